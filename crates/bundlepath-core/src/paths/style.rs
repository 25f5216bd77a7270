//! Separator conventions for in-memory path strings.

use serde::{Deserialize, Serialize};

/// How a target platform spells paths.
///
/// Resolution never goes through `std::path`, so a Windows-style bundle can be
/// reasoned about on a POSIX host and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// `/`-separated paths.
    Posix,
    /// `\`-separated paths with optional drive-letter prefix. `/` is accepted
    /// as a separator when parsing.
    Windows,
}

impl PathStyle {
    /// The separator inserted when joining components.
    pub const fn separator(self) -> char {
        match self {
            Self::Posix => '/',
            Self::Windows => '\\',
        }
    }

    /// Whether `c` terminates a path component in this style.
    pub const fn is_separator(self, c: char) -> bool {
        match self {
            Self::Posix => c == '/',
            Self::Windows => c == '\\' || c == '/',
        }
    }

    pub(crate) const fn is_separator_byte(self, b: u8) -> bool {
        self.is_separator(b as char)
    }

    /// `true` for paths starting with a drive designator such as `C:`.
    pub fn has_drive(self, path: &str) -> bool {
        let bytes = path.as_bytes();
        matches!(self, Self::Windows)
            && bytes.len() >= 2
            && bytes[0].is_ascii_alphabetic()
            && bytes[1] == b':'
    }

    /// `true` for a path that is exactly a drive root, e.g. `C:\`.
    pub fn is_drive_root(self, path: &str) -> bool {
        path.len() == 3 && self.has_drive(path) && self.is_separator_byte(path.as_bytes()[2])
    }
}
