//! On-disk bundle metadata.
//!
//! A bundle's info dictionary is a JSON object stored in `Info.json`; where
//! that file lives depends on the layout version, which is in turn inferred
//! from the shape of the bundle directory.

mod detect;
mod error;

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use bundlepath_core::ports::{BundleMetadata, FileSystemPort, MetadataPort};
use bundlepath_core::{InfoDictionary, PlatformConventions};
use tracing::warn;

pub use detect::{
    INFO_FILE_NAME, RESOURCES_DIRECTORY_NAME, contents_directory, detect_install_style,
    detect_layout_version, info_file_path,
};
pub use error::MetadataError;

use crate::fs::StdFileSystem;

/// Load the info dictionary at `path`.
///
/// A missing file is `Ok(None)`; an unreadable or malformed one is an error.
pub fn load_info_dictionary(path: &Path) -> Result<Option<InfoDictionary>, MetadataError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(MetadataError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| MetadataError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads bundle metadata from the host filesystem.
#[derive(Clone)]
pub struct DirectoryMetadataReader {
    fs: Arc<dyn FileSystemPort>,
    conventions: PlatformConventions,
}

impl DirectoryMetadataReader {
    pub fn new(fs: Arc<dyn FileSystemPort>, conventions: PlatformConventions) -> Self {
        Self { fs, conventions }
    }

    pub const fn conventions(&self) -> &PlatformConventions {
        &self.conventions
    }

    /// Metadata of the bundle at `root`, with load failures reported.
    pub fn try_read_metadata(&self, root: &str) -> Result<BundleMetadata, MetadataError> {
        let version = detect_layout_version(self.fs.as_ref(), root, &self.conventions);
        let info_path = info_file_path(root, version, &self.conventions);
        let info = load_info_dictionary(Path::new(&info_path))?;
        Ok(BundleMetadata { info, version })
    }
}

impl Default for DirectoryMetadataReader {
    fn default() -> Self {
        Self::new(Arc::new(StdFileSystem), PlatformConventions::default())
    }
}

impl std::fmt::Debug for DirectoryMetadataReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryMetadataReader")
            .field("platform", &self.conventions.platform)
            .finish_non_exhaustive()
    }
}

impl MetadataPort for DirectoryMetadataReader {
    fn read_metadata(&self, root: &str) -> BundleMetadata {
        match self.try_read_metadata(root) {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!(root = %root, error = %err, "Ignoring unusable info dictionary");
                BundleMetadata {
                    info: None,
                    version: detect_layout_version(self.fs.as_ref(), root, &self.conventions),
                }
            }
        }
    }

    fn content_root(&self, root: &str) -> Option<String> {
        contents_directory(self.fs.as_ref(), root, &self.conventions)
    }
}
