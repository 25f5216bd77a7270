//! Filesystem port.
//!
//! The resolver only ever asks metadata questions about paths; it never reads
//! or writes file contents. Implementations live in adapters (e.g.
//! `bundlepath-runtime::StdFileSystem`).

/// Read-only filesystem queries used by probing and inverse lookup.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystemPort: Send + Sync {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Whether `path` exists and is a directory.
    fn is_dir(&self, path: &str) -> bool;

    /// Absolute form of `path` with symbolic links resolved, if it exists.
    fn canonicalize(&self, path: &str) -> Option<String>;

    /// Working directory used to absolutize relative paths.
    fn current_dir(&self) -> Option<String>;
}
