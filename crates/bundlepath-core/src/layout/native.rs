//! Directories searched for a natively installed bundle.

use super::{DirectoryStrategy, SearchRequest, push_distinct};
use crate::domain::LayoutVersion;
use crate::paths::{join_relative, last_component, parent, path_extension};
use crate::platform::{
    EXECUTABLES_DIRECTORY_NAME, PlatformConventions, PlatformFeatures, SIBLING_RESOURCES_EXTENSION,
    SUPPORT_FILES_DIRECTORY_NAME,
};

/// Where a bundle keeps its executables, before the platform subdirectory.
///
/// | version | directory |
/// |---|---|
/// | 1 | `root/Support Files/Executables` |
/// | 2 | `root` (already the `Contents` directory) |
/// | other | `root`, or its parent for a `Name.resources` sibling bundle |
///
/// The sibling rule applies when the platform supports freestanding bundles
/// or `force_sibling` is set.
pub fn executable_directory(
    root: &str,
    version: LayoutVersion,
    conventions: &PlatformConventions,
    force_sibling: bool,
) -> String {
    let style = conventions.path_style;
    match version {
        LayoutVersion::SupportFiles => join_relative(
            root,
            &format!("{SUPPORT_FILES_DIRECTORY_NAME}/{EXECUTABLES_DIRECTORY_NAME}"),
            style,
        ),
        LayoutVersion::Contents => root.to_string(),
        LayoutVersion::Legacy | LayoutVersion::Freestanding | LayoutVersion::Flat => {
            let sibling_allowed =
                force_sibling || conventions.supports(PlatformFeatures::FREESTANDING_BUNDLES);
            if sibling_allowed && is_sibling_resources(root, conventions) {
                parent(root, style).to_string()
            } else {
                root.to_string()
            }
        }
    }
}

fn is_sibling_resources(root: &str, conventions: &PlatformConventions) -> bool {
    path_extension(last_component(root, conventions.path_style)) == Some(SIBLING_RESOURCES_EXTENSION)
}

/// Enumerate `exeDir/<platform>`, `exeDir`, `root`, plus the Windows
/// `../../Executables` fallback for main executables.
pub(super) fn native_directories(request: &SearchRequest<'_>, force_sibling: bool) -> Vec<String> {
    let conventions = request.conventions;
    let style = conventions.path_style;
    let exe_dir = executable_directory(request.root, request.version, conventions, force_sibling);

    let mut directories = Vec::with_capacity(4);
    push_distinct(
        &mut directories,
        join_relative(&exe_dir, conventions.executables_subdirectory, style),
    );
    push_distinct(&mut directories, exe_dir);
    push_distinct(&mut directories, request.root.to_string());

    if request.lookup.is_main() && conventions.supports(PlatformFeatures::EXECUTABLES_FALLBACK) {
        push_distinct(
            &mut directories,
            join_relative(
                request.root,
                &format!("../../{EXECUTABLES_DIRECTORY_NAME}"),
                style,
            ),
        );
    }

    directories
}

/// Bundles laid out by the platform's own conventions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeLayout;

impl DirectoryStrategy for NativeLayout {
    fn candidate_directories(&self, request: &SearchRequest<'_>) -> Vec<String> {
        native_directories(request, false)
    }
}
