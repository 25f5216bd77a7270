//! Directory-layout resolution.
//!
//! A bundle's install style selects a [`DirectoryStrategy`] that lists the
//! directories its binary may live in. Each directory is then probed with the
//! platform's filename variants; the first loadable candidate wins.

mod fhs;
mod freestanding;
mod native;
mod naming;
mod variants;

use tracing::trace;

pub use fhs::FhsLayout;
pub use freestanding::FreestandingLayout;
pub use naming::bundle_name_for_binary;
pub use native::{NativeLayout, executable_directory};
pub use variants::{decorate_with_image_suffix, filename_variants};

use crate::domain::{ExecutableLookup, InstallStyle, LayoutVersion};
use crate::paths::join_relative;
use crate::platform::PlatformConventions;
use crate::probe::BinaryProbe;

/// Everything a strategy needs to enumerate directories for one lookup.
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'a> {
    pub root: &'a str,
    pub version: LayoutVersion,
    pub install_style: InstallStyle,
    pub lookup: ExecutableLookup<'a>,
    pub conventions: &'a PlatformConventions,
}

/// Lists candidate directories, in search order.
pub trait DirectoryStrategy: Send + Sync {
    fn candidate_directories(&self, request: &SearchRequest<'_>) -> Vec<String>;
}

/// The strategy for an install style.
pub fn strategy_for(install_style: InstallStyle) -> &'static dyn DirectoryStrategy {
    match install_style {
        InstallStyle::Native => &NativeLayout,
        InstallStyle::FhsInstalled => &FhsLayout,
        InstallStyle::Freestanding => &FreestandingLayout,
    }
}

/// Append `directory` unless it repeats the previous entry.
pub(crate) fn push_distinct(directories: &mut Vec<String>, directory: String) {
    if directories.last() != Some(&directory) {
        directories.push(directory);
    }
}

/// Probes candidate directories for a named binary.
#[derive(Debug, Clone)]
pub struct LayoutResolver {
    probe: BinaryProbe,
    conventions: PlatformConventions,
    image_suffix: Option<String>,
}

impl LayoutResolver {
    pub fn new(
        probe: BinaryProbe,
        conventions: PlatformConventions,
        image_suffix: Option<String>,
    ) -> Self {
        Self {
            probe,
            conventions,
            image_suffix,
        }
    }

    pub const fn conventions(&self) -> &PlatformConventions {
        &self.conventions
    }

    /// Find `name` for the bundle rooted at `root`.
    ///
    /// Returns the first loadable candidate path as probed, not canonicalized.
    pub fn search(
        &self,
        root: &str,
        version: LayoutVersion,
        install_style: InstallStyle,
        lookup: ExecutableLookup<'_>,
        name: &str,
    ) -> Option<String> {
        let request = SearchRequest {
            root,
            version,
            install_style,
            lookup,
            conventions: &self.conventions,
        };

        strategy_for(install_style)
            .candidate_directories(&request)
            .iter()
            .find_map(|directory| {
                self.find_in_directory(Some(directory.as_str()), Some(name), install_style)
            })
    }

    /// Probe every filename variant of `name` inside `directory`.
    ///
    /// A missing directory or name yields `None` without probing.
    pub fn find_in_directory(
        &self,
        directory: Option<&str>,
        name: Option<&str>,
        install_style: InstallStyle,
    ) -> Option<String> {
        let (directory, name) = (directory?, name?);
        let style = self.conventions.path_style;

        filename_variants(
            name,
            install_style,
            &self.conventions,
            self.image_suffix.as_deref(),
        )
        .into_iter()
        .map(|variant| join_relative(directory, &variant, style))
        .find(|candidate| {
            let loadable = self.probe.is_loadable(Some(candidate.as_str()));
            trace!(candidate = %candidate, loadable, "Probed executable candidate");
            loadable
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::Sequence;
    use mockall::predicate::eq;

    use super::*;
    use crate::platform::Platform;
    use crate::ports::MockFileSystemPort;

    fn resolver(fs: MockFileSystemPort, platform: Platform, suffix: Option<&str>) -> LayoutResolver {
        let conventions = platform.conventions();
        let probe = BinaryProbe::new(Arc::new(fs), None, &conventions);
        LayoutResolver::new(probe, conventions, suffix.map(str::to_string))
    }

    #[test]
    fn missing_directory_or_name_probes_nothing() {
        let fs = MockFileSystemPort::new();
        let resolver = resolver(fs, Platform::Linux, None);
        assert_eq!(
            resolver.find_in_directory(None, Some("Foo"), InstallStyle::Native),
            None
        );
        assert_eq!(
            resolver.find_in_directory(Some("/opt"), None, InstallStyle::Native),
            None
        );
    }

    #[test]
    fn image_suffix_variant_probed_first() {
        let mut fs = MockFileSystemPort::new();
        let mut seq = Sequence::new();
        fs.expect_exists()
            .with(eq("/Apps/Foo.app/Contents/MacOS/Foo_debug.dylib"))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(false);
        fs.expect_exists()
            .with(eq("/Apps/Foo.app/Contents/MacOS/Foo.dylib"))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(true);

        let resolver = resolver(fs, Platform::MacOs, Some("_debug"));
        let found = resolver.find_in_directory(
            Some("/Apps/Foo.app/Contents/MacOS"),
            Some("Foo.dylib"),
            InstallStyle::Native,
        );
        assert_eq!(found.as_deref(), Some("/Apps/Foo.app/Contents/MacOS/Foo.dylib"));
    }

    #[test]
    fn stops_at_first_hit() {
        let mut fs = MockFileSystemPort::new();
        fs.expect_exists()
            .with(eq("/Apps/Foo/MacOS/Foo"))
            .times(1)
            .return_const(true);

        let resolver = resolver(fs, Platform::MacOs, None);
        let found = resolver.search(
            "/Apps/Foo",
            LayoutVersion::Flat,
            InstallStyle::Native,
            ExecutableLookup::Main,
            "Foo",
        );
        assert_eq!(found.as_deref(), Some("/Apps/Foo/MacOS/Foo"));
    }

    #[test]
    fn nothing_found_after_exhausting_candidates() {
        let mut fs = MockFileSystemPort::new();
        fs.expect_exists().times(2).return_const(false);

        let resolver = resolver(fs, Platform::MacOs, None);
        let found = resolver.search(
            "/Apps/Foo",
            LayoutVersion::Flat,
            InstallStyle::Native,
            ExecutableLookup::Main,
            "Foo",
        );
        assert_eq!(found, None);
    }

    #[test]
    fn strategies_follow_install_style() {
        let linux = Platform::Linux.conventions();
        let request = SearchRequest {
            root: "/usr/share/App.resources",
            version: LayoutVersion::Freestanding,
            install_style: InstallStyle::FhsInstalled,
            lookup: ExecutableLookup::Main,
            conventions: &linux,
        };
        assert_eq!(
            strategy_for(InstallStyle::FhsInstalled).candidate_directories(&request)[0],
            "/usr/bin"
        );
        assert_eq!(
            strategy_for(InstallStyle::Freestanding).candidate_directories(&request)[1],
            "/usr/share"
        );
    }
}
