//! Dynamic loader preflight port.
//!
//! Only meaningful on platforms whose loader can serve binaries that were
//! moved out of their nominal path into a packed cache. Everywhere else no
//! implementation is wired in.

/// Asks the dynamic loader whether it would accept a binary at `path`.
#[cfg_attr(test, mockall::automock)]
pub trait LoaderPreflightPort: Send + Sync {
    fn preflight(&self, path: &str) -> bool;
}

/// Preflight that never accepts anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLoaderPreflight;

impl LoaderPreflightPort for NoopLoaderPreflight {
    fn preflight(&self, _path: &str) -> bool {
        false
    }
}
