//! Bundle executable resolution.
//!
//! Given a bundle root, find the binary the bundle represents, or a named
//! auxiliary binary shipped with it; given an executable, recover the bundle
//! it belongs to. Legacy flat bundles, `Support Files` bundles, `Contents`
//! bundles, FHS installs and freestanding `Name.resources` bundles are
//! understood.
//!
//! This crate does no I/O of its own. Filesystem queries, metadata parsing and
//! bundle creation go through the traits in [`ports`]; `bundlepath-runtime`
//! provides the standard implementations.

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod error;
pub mod layout;
pub mod locator;
pub mod paths;
pub mod platform;
pub mod ports;
pub mod probe;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{IMAGE_SUFFIX_ENV, LocatorConfig, PLATFORM_ENV};
pub use domain::{
    BinaryType, Bundle, EXECUTABLE_KEY, ExecutableCacheSlot, ExecutableLookup, IDENTIFIER_KEY,
    InfoDictionary, InstallStyle, LayoutVersion,
};
pub use error::ConfigError;
pub use layout::{DirectoryStrategy, LayoutResolver, SearchRequest};
pub use locator::ExecutableLocator;
pub use paths::PathStyle;
pub use platform::{Platform, PlatformConventions, PlatformFeatures};
pub use ports::{
    BundleFactoryPort, BundleMetadata, FileSystemPort, LoaderPreflightPort, LocatorPorts,
    MetadataPort, NoopLoaderPreflight, NoopMetadata,
};
pub use probe::BinaryProbe;
