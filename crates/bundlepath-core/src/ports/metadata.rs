//! Bundle metadata port.
//!
//! Parsing and caching of a bundle's info dictionary is owned by an adapter.
//! The resolver needs two things from it: the metadata of a bare directory
//! (when no bundle instance exists yet) and the main executable name.

use crate::domain::{InfoDictionary, LayoutVersion};
use crate::paths::{PathStyle, last_component, last_component_without_extension, parent};
use crate::platform::CONTENTS_DIRECTORY_NAME;

/// What an adapter knows about a directory it was asked to open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BundleMetadata {
    pub info: Option<InfoDictionary>,
    pub version: LayoutVersion,
}

pub trait MetadataPort: Send + Sync {
    /// Parse the metadata of the bundle rooted at `root`.
    fn read_metadata(&self, root: &str) -> BundleMetadata;

    /// Directory the bundle's layout starts from, when it is not `root`
    /// itself (`Foo.app` → `Foo.app/Contents`).
    fn content_root(&self, _root: &str) -> Option<String> {
        None
    }

    /// Name of the main executable.
    ///
    /// Defaults to the declared `CFBundleExecutable`, falling back to the
    /// root's last component without its extension (`Foo.app` → `Foo`). A
    /// `Contents` root is named after its parent.
    fn main_executable_name(
        &self,
        root: &str,
        info: Option<&InfoDictionary>,
        style: PathStyle,
    ) -> Option<String> {
        if let Some(name) = info.and_then(InfoDictionary::executable_name) {
            return Some(name.to_string());
        }
        let named = if last_component(root, style) == CONTENTS_DIRECTORY_NAME {
            parent(root, style)
        } else {
            root
        };
        let stem = last_component_without_extension(named, style);
        if stem.is_empty() || stem.chars().all(|c| style.is_separator(c)) {
            return None;
        }
        Some(stem.to_string())
    }
}

/// Metadata port that knows nothing: no dictionary, legacy layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetadata;

impl MetadataPort for NoopMetadata {
    fn read_metadata(&self, _root: &str) -> BundleMetadata {
        BundleMetadata::default()
    }
}
