//! Configuration error types.
//!
//! Lookups themselves never fail: a missing executable or an unrecoverable
//! bundle is reported as `None`. Errors only arise while building the
//! configuration a locator runs with.

use thiserror::Error;

/// Errors that can occur while validating a [`LocatorConfig`](crate::LocatorConfig).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The image suffix would change the directory a binary is looked up in.
    #[error("Image suffix {0:?} must not contain a path separator")]
    ImageSuffixHasSeparator(String),

    /// The platform override could not be parsed.
    #[error("Unknown platform {0:?}")]
    UnknownPlatform(String),
}
