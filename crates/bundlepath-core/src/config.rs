//! Locator configuration.
//!
//! The locator never reads the process environment while resolving; whatever
//! it needs is captured here once and injected.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::platform::{Platform, PlatformConventions};

/// Environment variable naming the image suffix (`_debug`, `_profile`).
pub const IMAGE_SUFFIX_ENV: &str = "DYLD_IMAGE_SUFFIX";

/// Environment variable overriding the target platform.
pub const PLATFORM_ENV: &str = "BUNDLEPATH_PLATFORM";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Suffix spliced into binary names before their extension.
    ///
    /// Only honoured on platforms that decorate binaries this way.
    pub image_suffix: Option<String>,

    /// Resolve for another platform than the one this crate was built for.
    pub platform: Option<Platform>,
}

impl LocatorConfig {
    /// Capture the configuration from the process environment.
    ///
    /// Empty values are treated as unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let image_suffix = env::var(IMAGE_SUFFIX_ENV)
            .ok()
            .filter(|value| !value.is_empty());

        let platform = match env::var(PLATFORM_ENV) {
            Ok(value) if !value.trim().is_empty() => Some(value.parse()?),
            _ => None,
        };

        let config = Self {
            image_suffix,
            platform,
        };
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_image_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.image_suffix = Some(suffix.into());
        self
    }

    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(suffix) = &self.image_suffix
            && suffix.contains(['/', '\\'])
        {
            return Err(ConfigError::ImageSuffixHasSeparator(suffix.clone()));
        }
        Ok(())
    }

    /// Conventions of the configured platform, or of the build target.
    pub fn conventions(&self) -> PlatformConventions {
        self.platform.unwrap_or_else(Platform::current).conventions()
    }

    /// The image suffix, if set and non-empty.
    pub fn image_suffix(&self) -> Option<&str> {
        self.image_suffix.as_deref().filter(|suffix| !suffix.is_empty())
    }
}
