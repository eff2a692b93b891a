//! Persisted, editable Navigation Maps.

mod format;
pub use format::{FileFormat, NodeRecord, MAGIC, RECORD_SIZE, VERSION};

use crate::{node_id::*, NavConfig, NavError, NavGraph, NavResult};
use glam::Vec3;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

/// One named Navigation Map: the Node records, their connections and the file they live in.
///
/// A NavFile is the authoring representation of a map. It stores Nodes as plain
/// [`NodeRecord`]s and their connections as lists of neighbor ids. To search the map, turn it
/// into a [`NavGraph`] with [`build_graph`](NavFile::build_graph) or load it into a
/// [`PathSearch`](crate::PathSearch).
///
/// ## Examples
/// Authoring a map in memory:
/// ```
/// use waypoint_nav::{NavConfig, NavFile};
///
/// let mut file = NavFile::new("bridge", &NavConfig::default()).unwrap();
/// let a = file.create_node(0.0, 0.0, 0.0);
/// let b = file.create_node(5.0, 0.0, 0.0);
/// file.attach_nodes(a, b).unwrap();
///
/// assert_eq!(file.neighbor_ids(a), &[b]);
/// assert_eq!(file.neighbor_ids(b), &[a]);
/// ```
#[derive(Debug)]
pub struct NavFile {
    name: String,
    path: PathBuf,
    format: FileFormat,
    nodes: Vec<NodeRecord>,
    index: NodeIDMap<usize>,
    links: NodeIDMap<Vec<NodeID>>,
    handle: Option<File>,
}

impl NavFile {
    /// Creates an empty NavFile called `name` without touching the disk.
    ///
    /// The file location and format are taken from `config`. Fails if `name` is not a valid
    /// file name (see [`NavConfig::validate_name`]).
    pub fn new(name: &str, config: &NavConfig) -> NavResult<NavFile> {
        NavConfig::validate_name(name)?;
        Ok(NavFile {
            name: name.to_owned(),
            path: config.file_path(name),
            format: config.format,
            nodes: Vec::new(),
            index: node_id_map(),
            links: node_id_map(),
            handle: None,
        })
    }

    /// Creates a new, empty Navigation File on disk, replacing any existing file of that name.
    pub fn create(name: &str, config: &NavConfig) -> NavResult<NavFile> {
        let mut file = NavFile::new(name, config)?;
        let handle = File::create(&file.path).map_err(|source| NavError::Create {
            path: file.path.clone(),
            source,
        })?;
        file.handle = Some(handle);
        log::debug!("created navigation file {:?}", file.path);
        Ok(file)
    }

    /// Opens and decodes an existing Navigation File.
    pub fn open(name: &str, config: &NavConfig) -> NavResult<NavFile> {
        let mut file = NavFile::new(name, config)?;
        file.reopen()?;
        Ok(file)
    }

    /// Discards the in-memory contents and reads them again from disk.
    ///
    /// A previously open handle is closed first. On failure the contents are left empty.
    pub fn reopen(&mut self) -> NavResult<()> {
        self.close();
        self.clear();

        let handle = File::open(&self.path).map_err(|source| NavError::Open {
            path: self.path.clone(),
            source,
        })?;
        let mut reader = BufReader::new(&handle);
        self.read_from(&mut reader)?;
        self.handle = Some(handle);

        log::debug!(
            "opened navigation file {:?} with {} nodes",
            self.path,
            self.nodes.len()
        );
        Ok(())
    }

    /// Replaces the contents with the Navigation data read from `reader`.
    ///
    /// The contents are only replaced if the data is valid.
    pub fn read_from<R: Read>(&mut self, mut reader: R) -> NavResult<()> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let data = format::decode(&bytes)?;

        self.index = data
            .records
            .iter()
            .enumerate()
            .map(|(i, record)| (record.id, i))
            .collect();
        self.nodes = data.records;
        self.links = data.links;
        if let Some(format) = data.format {
            self.format = format;
        }
        Ok(())
    }

    /// Writes the contents to `writer` in this file's [`FileFormat`].
    pub fn write_to<W: Write>(&self, mut writer: W) -> NavResult<()> {
        format::encode(&mut writer, self.format, &self.nodes, &self.links)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the contents to disk, replacing the previous file.
    ///
    /// Any open handle is closed and the file is truncated before writing.
    pub fn save(&mut self) -> NavResult<()> {
        self.close();
        let handle = File::create(&self.path).map_err(|source| NavError::Create {
            path: self.path.clone(),
            source,
        })?;
        self.write_to(BufWriter::new(&handle))?;
        self.handle = Some(handle);

        log::debug!(
            "saved {} nodes to navigation file {:?}",
            self.nodes.len(),
            self.path
        );
        Ok(())
    }

    /// Closes the underlying file handle, if any. The contents stay in memory.
    pub fn close(&mut self) {
        self.handle = None;
    }

    /// `true` while a handle to the underlying file is held
    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Adds a new Node at the given position and returns its id.
    ///
    /// Ids are assigned sequentially: the new id is the number of Nodes before the call. If that
    /// id is already in use (only possible in files with sparse ids), the id after the largest
    /// one is used instead.
    pub fn create_node(&mut self, x: f32, y: f32, z: f32) -> NodeID {
        let mut id = self.nodes.len() as NodeID;
        if self.index.contains_key(&id) {
            id = self.nodes.iter().map(|n| n.id).max().map_or(0, |max| max + 1);
        }
        self.index.insert(id, self.nodes.len());
        self.nodes.push(NodeRecord::new(id, Vec3::new(x, y, z)));
        id
    }

    /// Connects the Nodes `a` and `b` in both directions.
    ///
    /// Connections are not de-duplicated: attaching the same pair twice stores it twice.
    pub fn attach_nodes(&mut self, a: NodeID, b: NodeID) -> NavResult<()> {
        let index_a = *self.index.get(&a).ok_or(NavError::UnknownNode(a))?;
        let index_b = *self.index.get(&b).ok_or(NavError::UnknownNode(b))?;

        self.links.entry(a).or_default().push(b);
        self.links.entry(b).or_default().push(a);
        self.nodes[index_a].neighbor_count += 1;
        self.nodes[index_b].neighbor_count += 1;
        Ok(())
    }

    /// Creates a linked copy of the contents. The NavFile is not modified.
    pub fn build_graph(&self) -> NavResult<NavGraph> {
        NavGraph::from_records(&self.nodes, &self.links)
    }

    /// Moves the contents into a linked [`NavGraph`].
    ///
    /// Afterwards the NavFile is empty. Use [`build_graph`](NavFile::build_graph) to keep the
    /// contents.
    pub fn generate_map(&mut self) -> NavResult<NavGraph> {
        let graph = self.build_graph()?;
        self.clear();
        Ok(graph)
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.links.clear();
    }

    /// The name this file was created or opened with
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The location of the file on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The format used when saving
    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Changes the format used by the next [`save`](NavFile::save)
    pub fn set_format(&mut self, format: FileFormat) {
        self.format = format;
    }

    /// Number of Nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// `true` if there are no Nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All Node records in storage order
    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    /// The record of the Node with the given id
    pub fn node(&self, id: NodeID) -> Option<&NodeRecord> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    /// The ids of all neighbors of `id`, in the order they were attached
    pub fn neighbor_ids(&self, id: NodeID) -> &[NodeID] {
        self.links.get(&id).map_or(&[][..], |ids| ids.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(count: usize) -> NavFile {
        let mut file = NavFile::new("line", &NavConfig::default()).unwrap();
        for i in 0..count {
            let id = file.create_node(i as f32, 0.0, 0.0);
            if i > 0 {
                file.attach_nodes(id - 1, id).unwrap();
            }
        }
        file
    }

    #[test]
    fn sequential_ids() {
        let file = line(4);
        let ids: Vec<NodeID> = file.nodes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(file.node(2).unwrap().neighbor_count, 2);
        assert_eq!(file.neighbor_ids(0), &[1]);
        assert_eq!(file.neighbor_ids(2), &[1, 3]);
    }

    #[test]
    fn attach_unknown_node() {
        let mut file = line(2);
        assert!(matches!(
            file.attach_nodes(0, 9),
            Err(NavError::UnknownNode(9))
        ));
        // nothing was recorded for the valid half
        assert_eq!(file.neighbor_ids(0), &[1]);
    }

    #[test]
    fn duplicate_attach_is_kept() {
        let mut file = line(2);
        file.attach_nodes(0, 1).unwrap();
        assert_eq!(file.neighbor_ids(0), &[1, 1]);
        assert_eq!(file.node(1).unwrap().neighbor_count, 2);
    }

    #[test]
    fn memory_round_trip() {
        let file = line(3);
        let mut bytes = vec![];
        file.write_to(&mut bytes).unwrap();

        let mut copy = NavFile::new("copy", &NavConfig::default()).unwrap();
        copy.read_from(bytes.as_slice()).unwrap();
        assert_eq!(copy.nodes(), file.nodes());
        assert_eq!(copy.neighbor_ids(1), &[0, 2]);
    }

    #[test]
    fn invalid_data_keeps_contents() {
        let mut file = line(2);
        assert!(file.read_from(&[1u8, 0, 0][..]).is_err());
        assert_eq!(file.node_count(), 2);
    }

    #[test]
    fn create_node_after_sparse_load() {
        let mut file = NavFile::new("sparse", &NavConfig::default()).unwrap();
        let mut bytes = 2i32.to_le_bytes().to_vec();
        for id in [1i32, 2] {
            bytes.extend(id.to_le_bytes());
            bytes.extend([0u8; 12]);
            bytes.extend(0i32.to_le_bytes());
        }
        file.read_from(bytes.as_slice()).unwrap();
        assert_eq!(file.format(), FileFormat::Legacy);

        // the next sequential id (2) is taken
        assert_eq!(file.create_node(9.0, 9.0, 9.0), 3);
        assert_eq!(file.create_node(9.0, 9.0, 9.0), 4);
    }

    #[test]
    fn generate_map_moves_contents() {
        let mut file = line(3);
        let graph = file.generate_map().unwrap();
        assert_eq!(graph.len(), 3);
        assert!(graph.are_adjacent(1, 2));
        assert!(file.is_empty());
        assert!(file.neighbor_ids(1).is_empty());
    }

    #[test]
    fn invalid_name() {
        assert!(matches!(
            NavFile::new("a/b", &NavConfig::default()),
            Err(NavError::InvalidName(_))
        ));
    }
}
