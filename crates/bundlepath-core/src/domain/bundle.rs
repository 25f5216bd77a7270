//! The bundle handle the locator works against.
//!
//! A `Bundle` is created by a `BundleFactoryPort` adapter. The only state the
//! resolver mutates on it is the cached main-executable path and the binary
//! type, each behind its own mutex.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::info::InfoDictionary;
use super::layout::{InstallStyle, LayoutVersion};

/// What kind of binary a bundle carries, as far as path resolution can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinaryType {
    /// Not determined yet.
    #[default]
    Unknown,
    /// The main executable lookup failed; loads must not be attempted.
    NoBinary,
}

/// Which executable a lookup is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutableLookup<'a> {
    /// The bundle's declared main executable.
    Main,
    /// An explicitly named auxiliary binary.
    Auxiliary(&'a str),
}

impl ExecutableLookup<'_> {
    pub const fn is_main(&self) -> bool {
        matches!(self, Self::Main)
    }
}

#[derive(Debug)]
pub struct Bundle {
    root: String,
    layout_version: LayoutVersion,
    install_style: InstallStyle,
    info: Option<InfoDictionary>,
    executable_path: Mutex<Option<String>>,
    binary_type: Mutex<BinaryType>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Bundle {
    pub fn new(root: impl Into<String>, layout_version: LayoutVersion) -> Self {
        Self {
            root: root.into(),
            layout_version,
            install_style: InstallStyle::Native,
            info: None,
            executable_path: Mutex::new(None),
            binary_type: Mutex::new(BinaryType::Unknown),
        }
    }

    #[must_use]
    pub fn with_install_style(mut self, install_style: InstallStyle) -> Self {
        self.install_style = install_style;
        self
    }

    #[must_use]
    pub fn with_info(mut self, info: InfoDictionary) -> Self {
        self.info = Some(info);
        self
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub const fn layout_version(&self) -> LayoutVersion {
        self.layout_version
    }

    pub const fn install_style(&self) -> InstallStyle {
        self.install_style
    }

    pub const fn info(&self) -> Option<&InfoDictionary> {
        self.info.as_ref()
    }

    pub fn binary_type(&self) -> BinaryType {
        *lock(&self.binary_type)
    }

    pub(crate) fn mark_no_binary(&self) {
        *lock(&self.binary_type) = BinaryType::NoBinary;
    }

    /// The cached main-executable path, if a lookup has stored one.
    pub fn cached_executable_path(&self) -> Option<String> {
        lock(&self.executable_path).clone()
    }

    /// Drop the cached main-executable path so the next lookup re-resolves.
    pub fn invalidate_executable_cache(&self) {
        lock(&self.executable_path).take();
    }
}

/// Write access to a bundle's main-executable cache.
///
/// Only obtainable for a main-executable lookup, with caching enabled, on a
/// live bundle. Holding one is the only way to read or populate the cache
/// from the locator.
#[derive(Debug, Clone, Copy)]
pub struct ExecutableCacheSlot<'a> {
    bundle: &'a Bundle,
}

impl<'a> ExecutableCacheSlot<'a> {
    pub fn for_lookup(
        bundle: Option<&'a Bundle>,
        lookup: ExecutableLookup<'_>,
        ignore_cache: bool,
    ) -> Option<Self> {
        match (bundle, lookup, ignore_cache) {
            (Some(bundle), ExecutableLookup::Main, false) => Some(Self { bundle }),
            _ => None,
        }
    }

    pub fn read(&self) -> Option<String> {
        self.bundle.cached_executable_path()
    }

    /// Store the resolved path. Concurrent stores of the same lookup write
    /// the same value; the last one wins.
    pub fn store(&self, path: String) {
        *lock(&self.bundle.executable_path) = Some(path);
    }
}
