//! Bundle creation port.
//!
//! Inverse lookup speculatively opens a bundle at a recovered root and must be
//! able to give it back when the bundle turns out not to own the executable.

use std::sync::Arc;

use crate::domain::Bundle;

pub trait BundleFactoryPort: Send + Sync {
    /// Open a new, unshared bundle rooted at `root`.
    fn create_bundle(&self, root: &str) -> Option<Arc<Bundle>>;

    /// Give back a bundle created by [`create_bundle`](Self::create_bundle)
    /// that the caller will not hand out.
    fn release_bundle(&self, bundle: Arc<Bundle>) {
        drop(bundle);
    }
}
