//! Bundles installed across an FHS prefix.
//!
//! ```text
//! prefix/share/App.resources          bundle root
//! prefix/{bin,sbin,lib64,lib}/App     main executable
//! prefix/libexec/App.executables/     auxiliary executables
//! ```

use super::{DirectoryStrategy, SearchRequest};
use crate::domain::ExecutableLookup;
use crate::paths::{join_relative, last_component_without_extension, parent};
use crate::platform::{FHS_EXECUTABLES_DIRECTORY_SUFFIX, FHS_LIBEXEC_DIRECTORY};

#[derive(Debug, Clone, Copy, Default)]
pub struct FhsLayout;

impl DirectoryStrategy for FhsLayout {
    fn candidate_directories(&self, request: &SearchRequest<'_>) -> Vec<String> {
        let conventions = request.conventions;
        let style = conventions.path_style;

        match request.lookup {
            ExecutableLookup::Main => {
                let prefix = parent(parent(request.root, style), style);
                conventions
                    .fhs_executable_directories()
                    .into_iter()
                    .map(|dir| join_relative(prefix, dir, style))
                    .collect()
            }
            ExecutableLookup::Auxiliary(_) => {
                let stem = last_component_without_extension(request.root, style);
                let libexec = format!(
                    "../../{FHS_LIBEXEC_DIRECTORY}/{stem}{FHS_EXECUTABLES_DIRECTORY_SUFFIX}"
                );
                vec![join_relative(request.root, &libexec, style)]
            }
        }
    }
}
