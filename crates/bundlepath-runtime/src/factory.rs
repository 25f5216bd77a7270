//! Bundle factory backed by on-disk metadata.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use anyhow::{Context, Result, bail};
use bundlepath_core::ports::{BundleFactoryPort, FileSystemPort};
use bundlepath_core::{Bundle, PlatformConventions};
use tracing::{debug, warn};

use crate::fs::StdFileSystem;
use crate::metadata::{DirectoryMetadataReader, contents_directory, detect_install_style};

/// Opens bundles from directories and keeps track of the ones still alive.
///
/// Each `create_bundle` call produces a fresh `Bundle`; the registration
/// table maps a root to the most recently opened bundle that has not been
/// released or dropped.
pub struct DefaultBundleFactory {
    fs: Arc<dyn FileSystemPort>,
    reader: DirectoryMetadataReader,
    live: Mutex<HashMap<String, Weak<Bundle>>>,
}

impl DefaultBundleFactory {
    pub fn new(fs: Arc<dyn FileSystemPort>, conventions: PlatformConventions) -> Self {
        Self {
            reader: DirectoryMetadataReader::new(fs.clone(), conventions),
            fs,
            live: Mutex::new(HashMap::new()),
        }
    }

    fn live(&self) -> MutexGuard<'_, HashMap<String, Weak<Bundle>>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open the bundle at `path`, folding an outer `Foo.app` into its
    /// `Contents` directory.
    pub fn open(&self, path: &str) -> Result<Arc<Bundle>> {
        if !self.fs.is_dir(path) {
            bail!("Bundle root {path} is not a directory");
        }

        let conventions = self.reader.conventions();
        let root = contents_directory(self.fs.as_ref(), path, conventions)
            .unwrap_or_else(|| path.to_string());

        let metadata = self
            .reader
            .try_read_metadata(&root)
            .with_context(|| format!("Failed to load metadata of bundle {root}"))?;
        let version = metadata.version;

        let mut bundle = Bundle::new(root.clone(), version)
            .with_install_style(detect_install_style(&root, conventions));
        if let Some(info) = metadata.info {
            bundle = bundle.with_info(info);
        }

        let bundle = Arc::new(bundle);
        self.live().insert(root.clone(), Arc::downgrade(&bundle));
        debug!(
            root = %root,
            version = version.as_u8(),
            install_style = ?bundle.install_style(),
            "Opened bundle"
        );
        Ok(bundle)
    }

    /// The live bundle registered for `root`, if any.
    pub fn registered_bundle(&self, root: &str) -> Option<Arc<Bundle>> {
        let mut live = self.live();
        let bundle = live.get(root).and_then(Weak::upgrade);
        if bundle.is_none() {
            live.remove(root);
        }
        bundle
    }

    /// Roots of all live registered bundles, sorted.
    pub fn registered_roots(&self) -> Vec<String> {
        let mut live = self.live();
        live.retain(|_, bundle| bundle.strong_count() > 0);
        let mut roots: Vec<String> = live.keys().cloned().collect();
        roots.sort();
        roots
    }
}

impl Default for DefaultBundleFactory {
    fn default() -> Self {
        Self::new(Arc::new(StdFileSystem), PlatformConventions::default())
    }
}

impl std::fmt::Debug for DefaultBundleFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultBundleFactory")
            .field("reader", &self.reader)
            .field("live", &self.live().len())
            .finish_non_exhaustive()
    }
}

impl BundleFactoryPort for DefaultBundleFactory {
    fn create_bundle(&self, root: &str) -> Option<Arc<Bundle>> {
        match self.open(root) {
            Ok(bundle) => Some(bundle),
            Err(err) => {
                warn!(root = %root, error = ?err, "Cannot open bundle");
                None
            }
        }
    }

    fn release_bundle(&self, bundle: Arc<Bundle>) {
        let mut live = self.live();
        let registered = live
            .get(bundle.root())
            .is_some_and(|weak| weak.as_ptr() == Arc::as_ptr(&bundle));
        if registered {
            live.remove(bundle.root());
            debug!(root = %bundle.root(), "Released bundle");
        }
    }
}
