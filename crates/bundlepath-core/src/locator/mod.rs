//! Executable lookup for bundles and bare bundle directories.
//!
//! The forward direction turns a bundle into the path of its main executable
//! (or of a named auxiliary binary). The inverse direction
//! recovers the bundle root from an executable path.

mod inverse;
#[cfg(test)]
mod round_trip;

use std::borrow::Cow;

use tracing::debug;

use crate::config::LocatorConfig;
use crate::domain::{Bundle, ExecutableCacheSlot, ExecutableLookup, InfoDictionary, InstallStyle};
use crate::error::ConfigError;
use crate::layout::LayoutResolver;
use crate::paths::absolutize;
use crate::platform::PlatformConventions;
use crate::ports::LocatorPorts;
use crate::probe::BinaryProbe;

/// What a lookup runs against.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LookupTarget<'a> {
    Bundle(&'a Bundle),
    Directory(&'a str),
}

/// Resolves executables inside bundles.
///
/// Holds no per-bundle state; a single locator can be shared across threads.
#[derive(Clone)]
pub struct ExecutableLocator {
    ports: LocatorPorts,
    resolver: LayoutResolver,
}

impl ExecutableLocator {
    /// Build a locator, rejecting configurations that could steer probes
    /// outside the candidate directories.
    pub fn new(config: LocatorConfig, ports: LocatorPorts) -> Result<Self, ConfigError> {
        config.validate()?;
        let conventions = config.conventions();
        let probe = BinaryProbe::new(ports.fs.clone(), ports.loader.clone(), &conventions);
        let resolver = LayoutResolver::new(
            probe,
            conventions,
            config.image_suffix().map(str::to_string),
        );
        Ok(Self { ports, resolver })
    }

    pub const fn conventions(&self) -> &PlatformConventions {
        self.resolver.conventions()
    }

    /// Path of the bundle's main executable, cached on the bundle.
    pub fn executable_path(&self, bundle: &Bundle) -> Option<String> {
        self.locate(LookupTarget::Bundle(bundle), ExecutableLookup::Main, false)
    }

    /// Path of the binary `name` shipped inside the bundle. Never cached.
    pub fn auxiliary_executable_path(&self, bundle: &Bundle, name: &str) -> Option<String> {
        self.locate(
            LookupTarget::Bundle(bundle),
            ExecutableLookup::Auxiliary(name),
            false,
        )
    }

    /// Main executable of the bundle directory at `root`, without opening a
    /// bundle for it.
    pub fn executable_in_directory(&self, root: &str) -> Option<String> {
        self.locate(LookupTarget::Directory(root), ExecutableLookup::Main, true)
    }

    /// Same lookup as [`executable_in_directory`](Self::executable_in_directory),
    /// kept for callers resolving a directory other than their own bundle.
    pub fn other_executable_in_directory(&self, root: &str) -> Option<String> {
        self.executable_in_directory(root)
    }

    /// Resolve `lookup` for `target`.
    ///
    /// A bundle supplies its root, layout version, install style and info
    /// dictionary, and owns the main-executable cache. For a bare directory
    /// the metadata port is asked instead.
    pub(crate) fn locate(
        &self,
        target: LookupTarget<'_>,
        lookup: ExecutableLookup<'_>,
        ignore_cache: bool,
    ) -> Option<String> {
        let (bundle, root) = match target {
            LookupTarget::Bundle(bundle) => (Some(bundle), bundle.root()),
            LookupTarget::Directory(root) => (None, root),
        };
        let slot = ExecutableCacheSlot::for_lookup(bundle, lookup, ignore_cache);
        if let Some(cached) = slot.as_ref().and_then(ExecutableCacheSlot::read) {
            debug!(root = %root, path = %cached, "Executable cache hit");
            return Some(cached);
        }

        let (search_root, version, install_style, info): (
            Cow<'_, str>,
            _,
            _,
            Option<Cow<'_, InfoDictionary>>,
        ) = match bundle {
            Some(bundle) => (
                Cow::Borrowed(root),
                bundle.layout_version(),
                bundle.install_style(),
                bundle.info().map(Cow::Borrowed),
            ),
            None => {
                let search_root = self
                    .ports
                    .metadata
                    .content_root(root)
                    .map_or(Cow::Borrowed(root), Cow::Owned);
                let metadata = self.ports.metadata.read_metadata(&search_root);
                (
                    search_root,
                    metadata.version,
                    InstallStyle::Native,
                    metadata.info.map(Cow::Owned),
                )
            }
        };

        let style = self.conventions().path_style;
        let name = match lookup {
            ExecutableLookup::Main => {
                self.ports
                    .metadata
                    .main_executable_name(&search_root, info.as_deref(), style)
            }
            ExecutableLookup::Auxiliary(name) => {
                Some(name.to_string()).filter(|name| !name.is_empty())
            }
        };

        let found = name.and_then(|name| {
            self.resolver
                .search(&search_root, version, install_style, lookup, &name)
        });

        let Some(found) = found else {
            debug!(
                root = %root,
                version = version.as_u8(),
                ?install_style,
                main = lookup.is_main(),
                "Executable not found"
            );
            if lookup.is_main()
                && let Some(bundle) = bundle
            {
                bundle.mark_no_binary();
            }
            return None;
        };

        let resolved = self.absolute_path(&found);
        if let Some(slot) = slot {
            debug!(root = %root, path = %resolved, "Caching executable path");
            slot.store(resolved.clone());
        }
        Some(resolved)
    }

    /// Canonical form of an existing path, falling back to a lexical
    /// absolute form when the filesystem cannot canonicalize it.
    fn absolute_path(&self, path: &str) -> String {
        if let Some(canonical) = self.ports.fs.canonicalize(path) {
            return canonical;
        }
        let style = self.conventions().path_style;
        let cwd = self.ports.fs.current_dir().unwrap_or_default();
        absolutize(path, &cwd, style)
    }
}

impl std::fmt::Debug for ExecutableLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutableLocator")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}
