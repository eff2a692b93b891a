//! The binary layout of Navigation Files.
//!
//! All numbers are little-endian.
//!
//! Versioned layout (written by default):
//! - Magic: `"WNAV"` (4 bytes)
//! - Version: u32 (4 bytes)
//! - Body
//!
//! Legacy layout: just the Body.
//!
//! Body:
//! - Node count: i32
//! - per Node:
//!   - Record: id: i32, x: f32, y: f32, z: f32, neighbor count: i32 (20 bytes)
//!   - `neighbor count` times: neighbor id: i32 (values <= -1 are skipped)
//!
//! A legacy file can not start with the magic bytes, since that would be a node count of
//! over a billion.

use crate::{node_id::*, NavError, NavResult};
use glam::Vec3;
use std::io::Write;

/// Magic bytes of the versioned format
pub const MAGIC: [u8; 4] = *b"WNAV";

/// The newest version of the versioned format
pub const VERSION: u32 = 1;

/// Size of a stored [`NodeRecord`] in bytes
pub const RECORD_SIZE: usize = 20;

/// The two flavours of the Navigation File format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Header-less files: the body starts at the first byte
    Legacy,
    /// Files starting with [`MAGIC`] and [`VERSION`]
    #[default]
    Versioned,
}

/// The persisted part of a Node: identity, position and neighbor count.
///
/// The neighbor ids themselves are stored right after the record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeRecord {
    /// Unique id of the Node within its file
    pub id: NodeID,
    /// Position of the Node
    pub pos: Vec3,
    /// Number of neighbor ids stored for this Node
    pub neighbor_count: u32,
}

impl NodeRecord {
    /// Creates a Record without neighbors
    pub fn new(id: NodeID, pos: Vec3) -> NodeRecord {
        NodeRecord {
            id,
            pos,
            neighbor_count: 0,
        }
    }
}

/// Everything stored in a Navigation File
#[derive(Clone, Debug, Default)]
pub(crate) struct NavData {
    pub records: Vec<NodeRecord>,
    pub links: NodeIDMap<Vec<NodeID>>,
    /// `None` if the input was empty
    pub format: Option<FileFormat>,
}

struct Decoder<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Decoder<'a> {
    fn take<const N: usize>(&mut self) -> NavResult<[u8; N]> {
        let remaining = self.bytes.len() - self.offset;
        if remaining < N {
            return Err(NavError::Truncated {
                offset: self.offset,
                needed: N - remaining,
            });
        }
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.bytes[self.offset..self.offset + N]);
        self.offset += N;
        Ok(buf)
    }
    fn i32(&mut self) -> NavResult<i32> {
        self.take().map(i32::from_le_bytes)
    }
    fn u32(&mut self) -> NavResult<u32> {
        self.take().map(u32::from_le_bytes)
    }
    fn f32(&mut self) -> NavResult<f32> {
        self.take().map(f32::from_le_bytes)
    }
    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }
}

/// Decodes a complete Navigation File.
///
/// Every stored id is validated: Records may not carry negative or duplicate ids and every
/// neighbor id has to name a Record of the same file.
pub(crate) fn decode(bytes: &[u8]) -> NavResult<NavData> {
    if bytes.is_empty() {
        return Ok(NavData::default());
    }
    let mut decoder = Decoder { bytes, offset: 0 };

    let format = if bytes.starts_with(&MAGIC) {
        decoder.offset = MAGIC.len();
        let version = decoder.u32()?;
        if version != VERSION {
            return Err(NavError::UnsupportedVersion(version));
        }
        FileFormat::Versioned
    } else {
        FileFormat::Legacy
    };

    let count = decoder.i32()?;
    let count = usize::try_from(count).map_err(|_| NavError::NegativeNodeCount(count))?;

    // the count is untrusted, so don't reserve more than the data could possibly hold
    let mut records = Vec::with_capacity(count.min(decoder.remaining() / RECORD_SIZE));
    let mut links = node_id_map_with_cap::<Vec<NodeID>>(records.capacity());
    let mut skipped = 0usize;

    for index in 0..count {
        let raw_id = decoder.i32()?;
        let id = NodeID::try_from(raw_id)
            .map_err(|_| NavError::InvalidNodeId { index, id: raw_id })?;
        let pos = Vec3::new(decoder.f32()?, decoder.f32()?, decoder.f32()?);
        let stored_count = decoder.i32()?;

        if links.contains_key(&id) {
            return Err(NavError::DuplicateNode(id));
        }
        let neighbors = links.entry(id).or_default();
        for _ in 0..stored_count.max(0) {
            let neighbor = decoder.i32()?;
            match NodeID::try_from(neighbor) {
                Ok(neighbor) => neighbors.push(neighbor),
                Err(_) => skipped += 1,
            }
        }

        records.push(NodeRecord {
            id,
            pos,
            neighbor_count: neighbors.len() as u32,
        });
    }

    for (&node, neighbors) in links.iter() {
        if let Some(&neighbor) = neighbors.iter().find(|id| !links.contains_key(*id)) {
            return Err(NavError::DanglingNeighbor { node, neighbor });
        }
    }

    if skipped > 0 {
        log::debug!("skipped {} empty neighbor slots", skipped);
    }
    if decoder.remaining() > 0 {
        log::warn!(
            "ignoring {} trailing bytes after {} nodes",
            decoder.remaining(),
            records.len()
        );
    }

    Ok(NavData {
        records,
        links,
        format: Some(format),
    })
}

fn stored_id(id: NodeID) -> NavResult<i32> {
    i32::try_from(id).map_err(|_| NavError::IdOutOfRange(id))
}

/// Writes `records` and their `links` in the given `format`.
///
/// The neighbor count that is written is always the number of ids that follow it.
pub(crate) fn encode<W: Write>(
    writer: &mut W,
    format: FileFormat,
    records: &[NodeRecord],
    links: &NodeIDMap<Vec<NodeID>>,
) -> NavResult<()> {
    if format == FileFormat::Versioned {
        writer.write_all(&MAGIC)?;
        writer.write_all(&VERSION.to_le_bytes())?;
    }

    let count = i32::try_from(records.len()).map_err(|_| NavError::IdOutOfRange(NodeID::MAX))?;
    writer.write_all(&count.to_le_bytes())?;

    for record in records {
        let neighbors = links.get(&record.id).map_or(&[][..], |ids| ids.as_slice());
        debug_assert_eq!(neighbors.len(), record.neighbor_count as usize);

        let mut buf = [0u8; RECORD_SIZE];
        buf[0..4].copy_from_slice(&stored_id(record.id)?.to_le_bytes());
        buf[4..8].copy_from_slice(&record.pos.x.to_le_bytes());
        buf[8..12].copy_from_slice(&record.pos.y.to_le_bytes());
        buf[12..16].copy_from_slice(&record.pos.z.to_le_bytes());
        buf[16..20].copy_from_slice(&(neighbors.len() as i32).to_le_bytes());
        writer.write_all(&buf)?;

        for &neighbor in neighbors {
            writer.write_all(&stored_id(neighbor)?.to_le_bytes())?;
        }
    }
    Ok(())
}
