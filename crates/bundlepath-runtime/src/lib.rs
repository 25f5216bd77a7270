//! Host adapters for `bundlepath-core`.
//!
//! - [`StdFileSystem`]: `FileSystemPort` over `std::fs`
//! - [`DirectoryMetadataReader`]: `MetadataPort` reading `Info.json` and
//!   detecting a bundle's layout version from its directory shape
//! - [`DefaultBundleFactory`]: `BundleFactoryPort` with a registry of live
//!   bundles
//! - [`logging`]: tracing subscriber initialisation

#![deny(unsafe_code)]

pub mod factory;
pub mod fs;
pub mod logging;
pub mod metadata;

use std::sync::Arc;

use bundlepath_core::{ConfigError, ExecutableLocator, LocatorConfig, LocatorPorts};

pub use factory::DefaultBundleFactory;
pub use fs::StdFileSystem;
pub use logging::init_logging;
pub use metadata::{DirectoryMetadataReader, MetadataError};

/// A locator wired to the host filesystem, configured from the environment.
pub fn host_locator() -> Result<ExecutableLocator, ConfigError> {
    locator_for(LocatorConfig::from_env()?)
}

/// A locator wired to the host filesystem with an explicit configuration.
///
/// Fails if the configuration does not validate.
pub fn locator_for(config: LocatorConfig) -> Result<ExecutableLocator, ConfigError> {
    let fs = Arc::new(StdFileSystem);
    let metadata = DirectoryMetadataReader::new(fs.clone(), config.conventions());
    ExecutableLocator::new(config, LocatorPorts::new(fs, Arc::new(metadata)))
}
