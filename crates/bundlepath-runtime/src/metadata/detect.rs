//! Layout version and install style detection from a directory's shape.

use bundlepath_core::paths::{join_relative, last_component, parent, path_extension};
use bundlepath_core::platform::{
    CONTENTS_DIRECTORY_NAME, FHS_SHARE_DIRECTORY, PlatformConventions, PlatformFeatures,
    SIBLING_RESOURCES_EXTENSION, SUPPORT_FILES_DIRECTORY_NAME,
};
use bundlepath_core::ports::FileSystemPort;
use bundlepath_core::{InstallStyle, LayoutVersion};

/// Directory holding the info file of a legacy bundle.
pub const RESOURCES_DIRECTORY_NAME: &str = "Resources";

/// Name of the info file inside a bundle.
pub const INFO_FILE_NAME: &str = "Info.json";

/// Classify the directory at `root`.
///
/// Checked in order: a `Contents` root, a `Support Files` wrapper, a legacy
/// `Resources` directory, a `.resources` extension; anything else is flat.
pub fn detect_layout_version(
    fs: &dyn FileSystemPort,
    root: &str,
    conventions: &PlatformConventions,
) -> LayoutVersion {
    let style = conventions.path_style;
    let name = last_component(root, style);

    if name == CONTENTS_DIRECTORY_NAME {
        LayoutVersion::Contents
    } else if fs.is_dir(&join_relative(root, SUPPORT_FILES_DIRECTORY_NAME, style)) {
        LayoutVersion::SupportFiles
    } else if fs.is_dir(&join_relative(root, RESOURCES_DIRECTORY_NAME, style)) {
        LayoutVersion::Legacy
    } else if path_extension(name) == Some(SIBLING_RESOURCES_EXTENSION) {
        LayoutVersion::Freestanding
    } else {
        LayoutVersion::Flat
    }
}

/// Where the info file of a bundle with this layout lives.
pub fn info_file_path(root: &str, version: LayoutVersion, conventions: &PlatformConventions) -> String {
    let style = conventions.path_style;
    match version {
        LayoutVersion::SupportFiles => join_relative(
            root,
            &format!("{SUPPORT_FILES_DIRECTORY_NAME}/{INFO_FILE_NAME}"),
            style,
        ),
        LayoutVersion::Legacy => join_relative(
            root,
            &format!("{RESOURCES_DIRECTORY_NAME}/{INFO_FILE_NAME}"),
            style,
        ),
        LayoutVersion::Contents | LayoutVersion::Freestanding | LayoutVersion::Flat => {
            join_relative(root, INFO_FILE_NAME, style)
        }
    }
}

/// `Name.resources` under `prefix/share` is an FHS install where the
/// platform has them; any other `Name.resources` is freestanding.
pub fn detect_install_style(root: &str, conventions: &PlatformConventions) -> InstallStyle {
    let style = conventions.path_style;
    if path_extension(last_component(root, style)) != Some(SIBLING_RESOURCES_EXTENSION) {
        return InstallStyle::Native;
    }

    let under_share = last_component(parent(root, style), style) == FHS_SHARE_DIRECTORY;
    if under_share && conventions.supports(PlatformFeatures::FHS_BUNDLES) {
        InstallStyle::FhsInstalled
    } else {
        InstallStyle::Freestanding
    }
}

/// `root/Contents` when `root` is the outer directory of a native bundle.
pub fn contents_directory(
    fs: &dyn FileSystemPort,
    root: &str,
    conventions: &PlatformConventions,
) -> Option<String> {
    let style = conventions.path_style;
    if last_component(root, style) == CONTENTS_DIRECTORY_NAME {
        return None;
    }
    let contents = join_relative(root, CONTENTS_DIRECTORY_NAME, style);
    fs.is_dir(&contents).then_some(contents)
}
