//! Target platform conventions.
//!
//! Each supported target is one [`Platform`] variant; everything the resolver
//! needs to know about it is gathered into a [`PlatformConventions`] value so
//! the rest of the crate never branches on `cfg!` directly.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paths::PathStyle;

/// Directory holding the executables of a `Support Files` bundle.
pub const EXECUTABLES_DIRECTORY_NAME: &str = "Executables";

/// Wrapper directory of a version 1 bundle.
pub const SUPPORT_FILES_DIRECTORY_NAME: &str = "Support Files";

/// Wrapper directory of an OS-native (version 2) bundle.
pub const CONTENTS_DIRECTORY_NAME: &str = "Contents";

/// Extension of a freestanding bundle's sibling resource directory.
pub const SIBLING_RESOURCES_EXTENSION: &str = "resources";

/// Suffix of the per-bundle directory under `prefix/libexec`.
pub const FHS_EXECUTABLES_DIRECTORY_SUFFIX: &str = ".executables";

/// FHS `share` directory holding installed bundle roots.
pub const FHS_SHARE_DIRECTORY: &str = "share";

/// FHS directory for auxiliary executables.
pub const FHS_LIBEXEC_DIRECTORY: &str = "libexec";

bitflags! {
    /// Optional behaviours a platform opts into.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PlatformFeatures: u8 {
        /// Binary names may be decorated with an environment image suffix.
        const IMAGE_SUFFIX = 1 << 0;
        /// Bundles may be split over a `bin/sbin/lib/libexec/share` prefix.
        const FHS_BUNDLES = 1 << 1;
        /// Bundles may be a `<Name>.resources` directory next to the binary.
        const FREESTANDING_BUNDLES = 1 << 2;
        /// The loader can serve binaries that are absent from the filesystem.
        const RELOCATED_BINARY_CACHE = 1 << 3;
        /// Main executables may live in `../../Executables` of the root.
        const EXECUTABLES_FALLBACK = 1 << 4;
    }
}

/// Supported target platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    MacOs,
    Ios,
    Linux,
    Android,
    FreeBsd,
    Windows,
}

impl Platform {
    /// The platform this crate was compiled for.
    ///
    /// Unlisted targets fall back to the Linux conventions.
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "ios") {
            Self::Ios
        } else if cfg!(target_os = "android") {
            Self::Android
        } else if cfg!(target_os = "freebsd") {
            Self::FreeBsd
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Linux
        }
    }

    /// Conventions of this platform.
    pub const fn conventions(self) -> PlatformConventions {
        match self {
            Self::MacOs => PlatformConventions {
                platform: self,
                path_style: PathStyle::Posix,
                executables_subdirectory: "MacOS",
                shared_library_prefix: "lib",
                shared_library_suffix: ".dylib",
                executable_prefix: "",
                executable_suffix: "",
                fhs_arch_lib_directory: None,
                features: PlatformFeatures::IMAGE_SUFFIX,
            },
            Self::Ios => PlatformConventions {
                platform: self,
                path_style: PathStyle::Posix,
                executables_subdirectory: "MacOS",
                shared_library_prefix: "lib",
                shared_library_suffix: ".dylib",
                executable_prefix: "",
                executable_suffix: "",
                fhs_arch_lib_directory: None,
                features: PlatformFeatures::IMAGE_SUFFIX
                    .union(PlatformFeatures::RELOCATED_BINARY_CACHE),
            },
            Self::Linux | Self::Android => PlatformConventions {
                platform: self,
                path_style: PathStyle::Posix,
                executables_subdirectory: "Linux",
                shared_library_prefix: "lib",
                shared_library_suffix: ".so",
                executable_prefix: "",
                executable_suffix: "",
                fhs_arch_lib_directory: Some(if cfg!(target_pointer_width = "64") {
                    "lib64"
                } else {
                    "lib32"
                }),
                features: PlatformFeatures::FHS_BUNDLES
                    .union(PlatformFeatures::FREESTANDING_BUNDLES),
            },
            Self::FreeBsd => PlatformConventions {
                platform: self,
                path_style: PathStyle::Posix,
                executables_subdirectory: "FreeBSD",
                shared_library_prefix: "lib",
                shared_library_suffix: ".so",
                executable_prefix: "",
                executable_suffix: "",
                fhs_arch_lib_directory: None,
                features: PlatformFeatures::FHS_BUNDLES
                    .union(PlatformFeatures::FREESTANDING_BUNDLES),
            },
            Self::Windows => PlatformConventions {
                platform: self,
                path_style: PathStyle::Windows,
                executables_subdirectory: "Windows",
                shared_library_prefix: "",
                shared_library_suffix: ".dll",
                executable_prefix: "",
                executable_suffix: ".exe",
                fhs_arch_lib_directory: None,
                features: PlatformFeatures::FREESTANDING_BUNDLES
                    .union(PlatformFeatures::EXECUTABLES_FALLBACK),
            },
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::MacOs => "macos",
            Self::Ios => "ios",
            Self::Linux => "linux",
            Self::Android => "android",
            Self::FreeBsd => "freebsd",
            Self::Windows => "windows",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "macos" | "macosx" => Ok(Self::MacOs),
            "ios" | "iphoneos" => Ok(Self::Ios),
            "linux" => Ok(Self::Linux),
            "android" => Ok(Self::Android),
            "freebsd" => Ok(Self::FreeBsd),
            "windows" => Ok(Self::Windows),
            _ => Err(ConfigError::UnknownPlatform(s.to_string())),
        }
    }
}

/// Naming and layout conventions of one target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformConventions {
    pub platform: Platform,
    pub path_style: PathStyle,
    /// Platform subdirectory nested in a bundle's executable directory.
    pub executables_subdirectory: &'static str,
    pub shared_library_prefix: &'static str,
    pub shared_library_suffix: &'static str,
    pub executable_prefix: &'static str,
    pub executable_suffix: &'static str,
    /// Pointer-width lib directory searched before `lib` in FHS installs.
    pub fhs_arch_lib_directory: Option<&'static str>,
    pub features: PlatformFeatures,
}

impl PlatformConventions {
    pub const fn supports(&self, feature: PlatformFeatures) -> bool {
        self.features.contains(feature)
    }

    /// Directories under an FHS prefix searched for a main executable, in order.
    pub fn fhs_executable_directories(&self) -> Vec<&'static str> {
        let mut directories = vec!["bin", "sbin"];
        if let Some(arch_lib) = self.fhs_arch_lib_directory {
            directories.push(arch_lib);
        }
        directories.push("lib");
        directories
    }

    /// `prefix + name + suffix` using the shared-library convention.
    pub fn shared_library_name(&self, name: &str) -> String {
        format!(
            "{}{name}{}",
            self.shared_library_prefix, self.shared_library_suffix
        )
    }

    /// `prefix + name + suffix` using the executable convention.
    pub fn executable_name(&self, name: &str) -> String {
        format!("{}{name}{}", self.executable_prefix, self.executable_suffix)
    }
}

impl Default for PlatformConventions {
    fn default() -> Self {
        Platform::current().conventions()
    }
}
