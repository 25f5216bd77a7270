//! Port definitions (trait abstractions) for external collaborators.
//!
//! Ports define the interfaces the resolver expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - Paths cross ports as strings in the target's `PathStyle`
//! - Every query is a bounded, local metadata lookup
//! - Absence is a normal answer, not an error

pub mod bundle_factory;
pub mod filesystem;
pub mod loader;
pub mod metadata;

use std::sync::Arc;

pub use bundle_factory::BundleFactoryPort;
pub use filesystem::FileSystemPort;
pub use loader::{LoaderPreflightPort, NoopLoaderPreflight};
pub use metadata::{BundleMetadata, MetadataPort, NoopMetadata};

#[cfg(test)]
pub use filesystem::MockFileSystemPort;
#[cfg(test)]
pub use loader::MockLoaderPreflightPort;

/// Container for the collaborators a locator is wired with.
///
/// # Example
///
/// ```ignore
/// let ports = LocatorPorts::new(Arc::new(StdFileSystem), Arc::new(DirectoryMetadataReader::default()));
/// let locator = ExecutableLocator::new(LocatorConfig::from_env()?, ports)?;
/// ```
#[derive(Clone)]
pub struct LocatorPorts {
    /// Existence checks and path canonicalisation.
    pub fs: Arc<dyn FileSystemPort>,
    /// Info dictionary access for bare directories and executable names.
    pub metadata: Arc<dyn MetadataPort>,
    /// Loader preflight, wired only where binaries can be relocated.
    pub loader: Option<Arc<dyn LoaderPreflightPort>>,
}

impl LocatorPorts {
    pub fn new(fs: Arc<dyn FileSystemPort>, metadata: Arc<dyn MetadataPort>) -> Self {
        Self {
            fs,
            metadata,
            loader: None,
        }
    }

    #[must_use]
    pub fn with_loader(mut self, loader: Arc<dyn LoaderPreflightPort>) -> Self {
        self.loader = Some(loader);
        self
    }
}
