//! Layout version and installation style tags.

use serde::{Deserialize, Serialize};

/// On-disk directory convention followed by a bundle.
///
/// The tag is decided by whoever opens the bundle (see `MetadataPort`); the
/// resolver only consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum LayoutVersion {
    /// Legacy bundle with a top-level `Resources` directory.
    #[default]
    Legacy = 0,
    /// "New" bundle nesting everything under `Support Files`.
    SupportFiles = 1,
    /// OS-native bundle; the root passed in is already the `Contents` wrapper.
    Contents = 2,
    /// Freestanding `<Name>.resources` directory next to its binary.
    Freestanding = 3,
    /// Flat directory with metadata at the top level.
    Flat = 4,
}

impl LayoutVersion {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Versions 3 and 4 have no wrapper directories at all.
    pub const fn is_flat(self) -> bool {
        matches!(self, Self::Freestanding | Self::Flat)
    }
}

impl From<LayoutVersion> for u8 {
    fn from(version: LayoutVersion) -> Self {
        version.as_u8()
    }
}

impl TryFrom<u8> for LayoutVersion {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Legacy),
            1 => Ok(Self::SupportFiles),
            2 => Ok(Self::Contents),
            3 => Ok(Self::Freestanding),
            4 => Ok(Self::Flat),
            other => Err(format!("unknown bundle layout version {other}")),
        }
    }
}

/// How a bundle was installed; selects the directory-enumeration strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallStyle {
    /// Everything lives under the bundle root.
    #[default]
    Native,
    /// Split over a Unix `prefix/{bin,sbin,lib,libexec,share}` tree.
    FhsInstalled,
    /// A `<Name>.resources` directory sitting next to the bare binary.
    Freestanding,
}
