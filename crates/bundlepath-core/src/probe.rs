//! Existence and loadability checks for candidate binaries.

use std::sync::Arc;

use crate::platform::{PlatformConventions, PlatformFeatures};
use crate::ports::{FileSystemPort, LoaderPreflightPort};

/// Decides whether a candidate path names a binary the loader could use.
#[derive(Clone)]
pub struct BinaryProbe {
    fs: Arc<dyn FileSystemPort>,
    loader: Option<Arc<dyn LoaderPreflightPort>>,
    relocated_binaries: bool,
}

impl BinaryProbe {
    pub fn new(
        fs: Arc<dyn FileSystemPort>,
        loader: Option<Arc<dyn LoaderPreflightPort>>,
        conventions: &PlatformConventions,
    ) -> Self {
        Self {
            fs,
            loader,
            relocated_binaries: conventions.supports(PlatformFeatures::RELOCATED_BINARY_CACHE),
        }
    }

    /// `true` if `candidate` exists, or the loader vouches for it on
    /// platforms where binaries may have been relocated into a shared cache.
    ///
    /// An absent candidate is never loadable and causes no I/O.
    pub fn is_loadable(&self, candidate: Option<&str>) -> bool {
        let Some(path) = candidate else {
            return false;
        };

        if self.fs.exists(path) {
            return true;
        }

        match &self.loader {
            Some(loader) if self.relocated_binaries => loader.preflight(path),
            _ => false,
        }
    }
}

impl std::fmt::Debug for BinaryProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryProbe")
            .field("preflight", &self.loader.is_some())
            .field("relocated_binaries", &self.relocated_binaries)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::platform::Platform;
    use crate::ports::{MockFileSystemPort, MockLoaderPreflightPort, NoopLoaderPreflight};

    #[test]
    fn absent_candidate_does_no_io() {
        let fs = MockFileSystemPort::new();
        let probe = BinaryProbe::new(Arc::new(fs), None, &Platform::Linux.conventions());
        assert!(!probe.is_loadable(None));
    }

    #[test]
    fn existing_file_skips_preflight() {
        let mut fs = MockFileSystemPort::new();
        fs.expect_exists()
            .with(eq("/Apps/Foo/Foo"))
            .times(1)
            .return_const(true);
        let mut loader = MockLoaderPreflightPort::new();
        loader.expect_preflight().never();

        let probe = BinaryProbe::new(
            Arc::new(fs),
            Some(Arc::new(loader)),
            &Platform::Ios.conventions(),
        );
        assert!(probe.is_loadable(Some("/Apps/Foo/Foo")));
    }

    #[test]
    fn preflight_runs_after_missing_file_on_relocating_platform() {
        let mut fs = MockFileSystemPort::new();
        fs.expect_exists().times(1).return_const(false);
        let mut loader = MockLoaderPreflightPort::new();
        loader
            .expect_preflight()
            .with(eq("/System/Foo"))
            .times(1)
            .return_const(true);

        let probe = BinaryProbe::new(
            Arc::new(fs),
            Some(Arc::new(loader)),
            &Platform::Ios.conventions(),
        );
        assert!(probe.is_loadable(Some("/System/Foo")));
    }

    #[test]
    fn preflight_ignored_where_binaries_are_not_relocated() {
        let mut fs = MockFileSystemPort::new();
        fs.expect_exists().times(1).return_const(false);
        let mut loader = MockLoaderPreflightPort::new();
        loader.expect_preflight().never();

        let probe = BinaryProbe::new(
            Arc::new(fs),
            Some(Arc::new(loader)),
            &Platform::MacOs.conventions(),
        );
        assert!(!probe.is_loadable(Some("/Apps/Foo")));
    }

    #[test]
    fn noop_preflight_accepts_nothing() {
        let mut fs = MockFileSystemPort::new();
        fs.expect_exists().times(1).return_const(false);

        let probe = BinaryProbe::new(
            Arc::new(fs),
            Some(Arc::new(NoopLoaderPreflight)),
            &Platform::Ios.conventions(),
        );
        assert!(!probe.is_loadable(Some("/System/Foo")));
    }
}
