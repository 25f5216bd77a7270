//! Filename variants probed inside each candidate directory.

use crate::domain::InstallStyle;
use crate::platform::{PlatformConventions, PlatformFeatures};

const DYLIB_EXTENSION: &str = ".dylib";

/// Names to try for `name`, in probe order, without duplicates.
///
/// 1. `name` decorated with the image suffix, where the platform uses one
/// 2. `name` itself
/// 3. `name` with the shared-library prefix and suffix
/// 4. `name` with the executable prefix and suffix
///
/// The decorated forms (3, 4) are only produced for FHS and freestanding
/// installs, or on platforms that support either kind of bundle.
pub fn filename_variants(
    name: &str,
    install_style: InstallStyle,
    conventions: &PlatformConventions,
    image_suffix: Option<&str>,
) -> Vec<String> {
    let mut variants: Vec<String> = Vec::with_capacity(4);

    if let Some(suffix) = image_suffix.filter(|suffix| !suffix.is_empty())
        && conventions.supports(PlatformFeatures::IMAGE_SUFFIX)
    {
        variants.push(decorate_with_image_suffix(name, suffix));
    }

    push_unique(&mut variants, name.to_string());

    if decorated_names_apply(install_style, conventions) {
        push_unique(&mut variants, conventions.shared_library_name(name));
        push_unique(&mut variants, conventions.executable_name(name));
    }

    variants
}

/// `Foo.dylib` + `_debug` → `Foo_debug.dylib`, anything else gets the suffix
/// appended.
pub fn decorate_with_image_suffix(name: &str, suffix: &str) -> String {
    match name.strip_suffix(DYLIB_EXTENSION) {
        Some(stem) if !stem.is_empty() => format!("{stem}{suffix}{DYLIB_EXTENSION}"),
        _ => format!("{name}{suffix}"),
    }
}

fn decorated_names_apply(install_style: InstallStyle, conventions: &PlatformConventions) -> bool {
    matches!(
        install_style,
        InstallStyle::FhsInstalled | InstallStyle::Freestanding
    ) || conventions
        .features
        .intersects(PlatformFeatures::FHS_BUNDLES | PlatformFeatures::FREESTANDING_BUNDLES)
}

fn push_unique(variants: &mut Vec<String>, candidate: String) {
    if !variants.contains(&candidate) {
        variants.push(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;

    #[test]
    fn dylib_suffix_goes_before_extension() {
        let variants = filename_variants(
            "Foo.dylib",
            InstallStyle::Native,
            &Platform::MacOs.conventions(),
            Some("_debug"),
        );
        assert_eq!(variants, vec!["Foo_debug.dylib", "Foo.dylib"]);
    }

    #[test]
    fn plain_name_gets_suffix_appended() {
        assert_eq!(decorate_with_image_suffix("Foo", "_profile"), "Foo_profile");
        assert_eq!(decorate_with_image_suffix(".dylib", "_debug"), ".dylib_debug");
    }

    #[test]
    fn image_suffix_ignored_where_unsupported() {
        let variants = filename_variants(
            "Foo",
            InstallStyle::Native,
            &Platform::Linux.conventions(),
            Some("_debug"),
        );
        assert_eq!(variants, vec!["Foo", "libFoo.so"]);
    }

    #[test]
    fn native_mac_bundle_only_probes_bare_name() {
        let variants = filename_variants(
            "Foo",
            InstallStyle::Native,
            &Platform::MacOs.conventions(),
            None,
        );
        assert_eq!(variants, vec!["Foo"]);
    }

    #[test]
    fn freestanding_style_forces_decorated_names() {
        let variants = filename_variants(
            "Foo",
            InstallStyle::Freestanding,
            &Platform::MacOs.conventions(),
            None,
        );
        assert_eq!(variants, vec!["Foo", "libFoo.dylib"]);
    }

    #[test]
    fn windows_tries_dll_then_exe() {
        let variants = filename_variants(
            "Foo",
            InstallStyle::Native,
            &Platform::Windows.conventions(),
            None,
        );
        assert_eq!(variants, vec!["Foo", "Foo.dll", "Foo.exe"]);
    }
}
