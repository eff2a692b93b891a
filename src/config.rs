use crate::{nav_file::FileFormat, Heuristic};
use std::path::{Path, PathBuf};

/// Options for configuring the [`NavRegistry`](crate::NavRegistry)
///
/// Default options:
/// ```
/// # use waypoint_nav::{NavConfig, FileFormat, Heuristic};
/// # use std::path::PathBuf;
/// assert_eq!(
///     NavConfig {
///         data_dir: PathBuf::from("Data/paths"),
///         extension: String::from("nav"),
///         format: FileFormat::Versioned,
///         heuristic: Heuristic::Euclidean,
///     },
///     Default::default()
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NavConfig {
    /// The directory that contains all Navigation Files (defaults to `Data/paths`)
    pub data_dir: PathBuf,
    /// The file extension of Navigation Files, without the leading dot (defaults to `nav`)
    pub extension: String,
    /// The format used for newly created Navigation Files (defaults to [`FileFormat::Versioned`]).
    ///
    /// Files that are opened keep the format they were read in.
    pub format: FileFormat,
    /// The Heuristic used by [`NavRegistry::find_path`](crate::NavRegistry::find_path)
    /// (defaults to [`Heuristic::Euclidean`])
    pub heuristic: Heuristic,
}

impl NavConfig {
    /// The longest accepted Navigation File name in bytes
    pub const MAX_NAME_LEN: usize = 63;

    /// Creates a default config that stores Navigation Files in `data_dir`
    /// ```
    /// # use waypoint_nav::NavConfig;
    /// let config = NavConfig::with_data_dir("maps");
    /// assert_eq!(config.file_path("forest"), std::path::Path::new("maps/forest.nav"));
    /// ```
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> NavConfig {
        NavConfig {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// The location of the Navigation File called `name`: `<data_dir>/<name>.<extension>`
    ///
    /// `name` is not validated here, see [`NavConfig::validate_name`].
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.{}", name, self.extension))
    }

    /// Checks that `name` maps to a file directly inside [`data_dir`](NavConfig::data_dir)
    ///
    /// Names must be non-empty, at most [`MAX_NAME_LEN`](NavConfig::MAX_NAME_LEN) bytes long and
    /// may not contain path separators or `..`.
    /// ```
    /// # use waypoint_nav::NavConfig;
    /// assert!(NavConfig::validate_name("forest_2").is_ok());
    /// assert!(NavConfig::validate_name("../secrets").is_err());
    /// assert!(NavConfig::validate_name("").is_err());
    /// ```
    pub fn validate_name(name: &str) -> crate::NavResult<()> {
        let valid = !name.is_empty()
            && name.len() <= Self::MAX_NAME_LEN
            && !name.contains(['/', '\\', '\0'])
            && !name.contains("..")
            && Path::new(name).is_relative();
        if valid {
            Ok(())
        } else {
            Err(crate::NavError::InvalidName(name.to_owned()))
        }
    }
}

impl Default for NavConfig {
    fn default() -> NavConfig {
        NavConfig {
            data_dir: PathBuf::from("Data/paths"),
            extension: String::from("nav"),
            format: FileFormat::Versioned,
            heuristic: Heuristic::Euclidean,
        }
    }
}
