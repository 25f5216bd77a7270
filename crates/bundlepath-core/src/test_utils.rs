//! In-memory ports and environment helpers for tests.
//!
//! Available to this crate's unit tests and, through the `test-utils`
//! feature, to downstream test suites.

use std::collections::{BTreeSet, HashMap};
use std::env;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{Bundle, InstallStyle};
use crate::paths::{PathStyle, absolutize, parent};
use crate::ports::{BundleFactoryPort, BundleMetadata, FileSystemPort, MetadataPort};

/// Held by every test that touches `DYLD_IMAGE_SUFFIX`, `BUNDLEPATH_PLATFORM`
/// or `BUNDLEPATH_LOG`; the process environment is global.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Overrides one variable for the guard's lifetime.
///
/// ```ignore
/// let _lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
/// let _suffix = EnvVarGuard::set(IMAGE_SUFFIX_ENV, "_debug");
/// ```
pub struct EnvVarGuard {
    key: String,
    previous: Option<String>,
}

impl EnvVarGuard {
    #[allow(unsafe_code)]
    pub fn set(key: &str, value: &str) -> Self {
        let previous = env::var(key).ok();
        // SAFETY: callers serialize on ENV_LOCK.
        unsafe { env::set_var(key, value) };
        Self {
            key: key.to_string(),
            previous,
        }
    }
}

impl Drop for EnvVarGuard {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        // SAFETY: still under the caller's ENV_LOCK.
        match self.previous.take() {
            Some(value) => unsafe { env::set_var(&self.key, value) },
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct Entries {
    files: BTreeSet<String>,
    directories: BTreeSet<String>,
    probes: Vec<String>,
}

/// A filesystem tree held in memory.
///
/// Paths are absolutized against the configured working directory and
/// normalized lexically, so `canonicalize` behaves like a symlink-free disk.
/// Every `exists` query is recorded verbatim for later inspection.
#[derive(Debug)]
pub struct MemoryFileSystem {
    style: PathStyle,
    current_dir: String,
    entries: Mutex<Entries>,
}

impl MemoryFileSystem {
    pub fn new(style: PathStyle) -> Self {
        let current_dir = match style {
            PathStyle::Posix => "/",
            PathStyle::Windows => "C:\\",
        };
        Self {
            style,
            current_dir: current_dir.to_string(),
            entries: Mutex::new(Entries::default()),
        }
    }

    #[must_use]
    pub fn with_current_dir(mut self, current_dir: &str) -> Self {
        self.current_dir = current_dir.to_string();
        self
    }

    fn normalize(&self, path: &str) -> String {
        absolutize(path, &self.current_dir, self.style)
    }

    fn add_ancestors(&self, entries: &mut Entries, path: &str) {
        let mut current = parent(path, self.style);
        while !current.is_empty() && entries.directories.insert(current.to_string()) {
            let next = parent(current, self.style);
            if next == current {
                break;
            }
            current = next;
        }
    }

    /// Add a file, creating its parent directories.
    pub fn add_file(&self, path: &str) {
        let path = self.normalize(path);
        let mut entries = lock(&self.entries);
        self.add_ancestors(&mut entries, &path);
        entries.files.insert(path);
    }

    /// Add a directory and its parents.
    pub fn add_dir(&self, path: &str) {
        let path = self.normalize(path);
        let mut entries = lock(&self.entries);
        self.add_ancestors(&mut entries, &path);
        entries.directories.insert(path);
    }

    pub fn remove(&self, path: &str) {
        let path = self.normalize(path);
        let mut entries = lock(&self.entries);
        entries.files.remove(&path);
        entries.directories.remove(&path);
    }

    /// Paths passed to `exists`, in call order.
    pub fn probes(&self) -> Vec<String> {
        lock(&self.entries).probes.clone()
    }

    pub fn clear_probes(&self) {
        lock(&self.entries).probes.clear();
    }

    fn contains(&self, path: &str) -> bool {
        let path = self.normalize(path);
        let entries = lock(&self.entries);
        entries.files.contains(&path) || entries.directories.contains(&path)
    }
}

impl FileSystemPort for MemoryFileSystem {
    fn exists(&self, path: &str) -> bool {
        lock(&self.entries).probes.push(path.to_string());
        self.contains(path)
    }

    fn is_dir(&self, path: &str) -> bool {
        let path = self.normalize(path);
        lock(&self.entries).directories.contains(&path)
    }

    fn canonicalize(&self, path: &str) -> Option<String> {
        self.contains(path).then(|| self.normalize(path))
    }

    fn current_dir(&self) -> Option<String> {
        Some(self.current_dir.clone())
    }
}

/// Metadata port answering from a fixed table keyed by root.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata {
    entries: HashMap<String, BundleMetadata>,
}

impl StaticMetadata {
    #[must_use]
    pub fn with(mut self, root: &str, metadata: BundleMetadata) -> Self {
        self.entries.insert(root.to_string(), metadata);
        self
    }
}

impl MetadataPort for StaticMetadata {
    fn read_metadata(&self, root: &str) -> BundleMetadata {
        self.entries.get(root).cloned().unwrap_or_default()
    }
}

/// Bundle factory over a fixed table of roots, recording releases.
#[derive(Debug, Default)]
pub struct MemoryBundleFactory {
    bundles: HashMap<String, (BundleMetadata, InstallStyle)>,
    released: Mutex<Vec<String>>,
}

impl MemoryBundleFactory {
    #[must_use]
    pub fn with(self, root: &str, metadata: BundleMetadata) -> Self {
        self.with_install_style(root, metadata, InstallStyle::Native)
    }

    #[must_use]
    pub fn with_install_style(
        mut self,
        root: &str,
        metadata: BundleMetadata,
        install_style: InstallStyle,
    ) -> Self {
        self.bundles
            .insert(root.to_string(), (metadata, install_style));
        self
    }

    /// Roots of the bundles handed back through `release_bundle`.
    pub fn released(&self) -> Vec<String> {
        lock(&self.released).clone()
    }
}

impl BundleFactoryPort for MemoryBundleFactory {
    fn create_bundle(&self, root: &str) -> Option<Arc<Bundle>> {
        let (metadata, install_style) = self.bundles.get(root)?;
        let mut bundle = Bundle::new(root, metadata.version).with_install_style(*install_style);
        if let Some(info) = &metadata.info {
            bundle = bundle.with_info(info.clone());
        }
        Some(Arc::new(bundle))
    }

    fn release_bundle(&self, bundle: Arc<Bundle>) {
        lock(&self.released).push(bundle.root().to_string());
    }
}
