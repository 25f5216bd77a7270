//! Bundle recovery from an executable path.
//!
//! The executable's directory is matched against the placements the forward
//! lookup produces, most specific first:
//!
//! 1. a `Name.resources` directory next to the binary (freestanding bundle)
//! 2. `prefix/{bin,sbin,lib}` or `prefix/libexec/Name.executables` with a
//!    matching `prefix/share/Name.resources` (FHS install)
//! 3. the generic walk out of `<platform>`, `Executables` and its wrapper

use std::sync::Arc;

use tracing::debug;

use super::{ExecutableLocator, LookupTarget};
use crate::domain::{Bundle, ExecutableLookup, InfoDictionary};
use crate::layout::bundle_name_for_binary;
use crate::paths::{absolutize, join_relative, last_component, parent};
use crate::platform::{
    EXECUTABLES_DIRECTORY_NAME, FHS_EXECUTABLES_DIRECTORY_SUFFIX, FHS_LIBEXEC_DIRECTORY,
    FHS_SHARE_DIRECTORY, PlatformFeatures, SIBLING_RESOURCES_EXTENSION,
    SUPPORT_FILES_DIRECTORY_NAME,
};
use crate::ports::BundleFactoryPort;

impl ExecutableLocator {
    /// Root of the bundle that `executable` belongs to.
    ///
    /// Only the path is inspected, plus existence checks for sibling and FHS
    /// resource directories; nothing is cached.
    pub fn locate_bundle_for_executable(&self, executable: &str) -> Option<String> {
        let resolved = self.resolve_executable(executable)?;
        self.bundle_root_for_resolved(&resolved)
    }

    /// Open the bundle owning `executable`, provided that bundle's own main
    /// executable lookup lands on the same file.
    pub fn create_bundle_if_looks_like_bundle(
        &self,
        factory: &dyn BundleFactoryPort,
        executable: &str,
    ) -> Option<Arc<Bundle>> {
        self.create_owning_bundle(factory, executable, false)
    }

    /// Like [`create_bundle_if_looks_like_bundle`](Self::create_bundle_if_looks_like_bundle),
    /// but flat bundles must also carry a non-empty info dictionary.
    pub fn create_bundle_if_might_be_bundle(
        &self,
        factory: &dyn BundleFactoryPort,
        executable: &str,
    ) -> Option<Arc<Bundle>> {
        self.create_owning_bundle(factory, executable, true)
    }

    fn create_owning_bundle(
        &self,
        factory: &dyn BundleFactoryPort,
        executable: &str,
        require_flat_info: bool,
    ) -> Option<Arc<Bundle>> {
        let resolved = self.resolve_executable(executable)?;
        let root = self.bundle_root_for_resolved(&resolved)?;
        let bundle = factory.create_bundle(&root)?;

        if require_flat_info
            && bundle.layout_version().is_flat()
            && bundle.info().is_none_or(InfoDictionary::is_empty)
        {
            debug!(root = %root, "Flat bundle without info dictionary rejected");
            factory.release_bundle(bundle);
            return None;
        }

        let located = self.locate(LookupTarget::Bundle(&bundle), ExecutableLookup::Main, true);
        if located.as_deref() == Some(resolved.as_str()) {
            return Some(bundle);
        }

        debug!(
            root = %root,
            executable = %resolved,
            located = ?located,
            "Bundle does not own executable"
        );
        factory.release_bundle(bundle);
        None
    }

    /// Canonical absolute form of `executable`.
    fn resolve_executable(&self, executable: &str) -> Option<String> {
        if executable.is_empty() {
            return None;
        }
        if let Some(canonical) = self.ports.fs.canonicalize(executable) {
            return Some(canonical);
        }
        let cwd = self.ports.fs.current_dir()?;
        Some(absolutize(executable, &cwd, self.conventions().path_style))
    }

    fn bundle_root_for_resolved(&self, executable: &str) -> Option<String> {
        let style = self.conventions().path_style;
        let directory = parent(executable, style);
        if directory.is_empty() {
            return None;
        }
        let file_name = last_component(executable, style);

        if let Some(root) = self.freestanding_root(directory, file_name) {
            debug!(executable = %executable, root = %root, "Freestanding bundle");
            return Some(root);
        }

        if let Some(root) = self.fhs_root(directory, file_name) {
            debug!(executable = %executable, root = %root, "FHS-installed bundle");
            return Some(root);
        }

        let root = self.walk_out_of_executables(directory);
        if root.is_empty() {
            return None;
        }
        debug!(executable = %executable, root = %root, "Bundle root from directory layout");
        Some(root.to_string())
    }

    fn freestanding_root(&self, directory: &str, file_name: &str) -> Option<String> {
        let conventions = self.conventions();
        if !conventions.supports(PlatformFeatures::FREESTANDING_BUNDLES) {
            return None;
        }
        let name = bundle_name_for_binary(file_name, conventions);
        let candidate = join_relative(
            directory,
            &format!("{name}.{SIBLING_RESOURCES_EXTENSION}"),
            conventions.path_style,
        );
        self.ports.fs.is_dir(&candidate).then_some(candidate)
    }

    fn fhs_root(&self, directory: &str, file_name: &str) -> Option<String> {
        let conventions = self.conventions();
        if !conventions.supports(PlatformFeatures::FHS_BUNDLES) {
            return None;
        }
        let style = conventions.path_style;
        let directory_name = last_component(directory, style);

        let (prefix, name) = if conventions
            .fhs_executable_directories()
            .contains(&directory_name)
        {
            (
                parent(directory, style),
                bundle_name_for_binary(file_name, conventions),
            )
        } else {
            let stem = directory_name.strip_suffix(FHS_EXECUTABLES_DIRECTORY_SUFFIX)?;
            let libexec = parent(directory, style);
            if stem.is_empty() || last_component(libexec, style) != FHS_LIBEXEC_DIRECTORY {
                return None;
            }
            (parent(libexec, style), stem)
        };

        if prefix.is_empty() {
            return None;
        }
        let candidate = join_relative(
            prefix,
            &format!("{FHS_SHARE_DIRECTORY}/{name}.{SIBLING_RESOURCES_EXTENSION}"),
            style,
        );
        self.ports.fs.is_dir(&candidate).then_some(candidate)
    }

    /// Strip `<platform>` and then `Executables` plus its wrapper off
    /// `directory`.
    ///
    /// Without a platform directory, only a literal `Support Files/Executables`
    /// pair is stripped; any other directory is the root as is.
    fn walk_out_of_executables<'a>(&self, directory: &'a str) -> &'a str {
        let conventions = self.conventions();
        let style = conventions.path_style;

        if last_component(directory, style) == conventions.executables_subdirectory {
            let root = parent(directory, style);
            if last_component(root, style) == EXECUTABLES_DIRECTORY_NAME {
                return parent(parent(root, style), style);
            }
            return root;
        }

        let wrapper = parent(directory, style);
        if last_component(directory, style) == EXECUTABLES_DIRECTORY_NAME
            && last_component(wrapper, style) == SUPPORT_FILES_DIRECTORY_NAME
        {
            return parent(wrapper, style);
        }
        directory
    }
}
