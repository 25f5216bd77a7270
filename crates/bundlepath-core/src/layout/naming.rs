//! Bundle name inference from a binary's filename.

use crate::paths::strip_prefix_suffix;
use crate::platform::PlatformConventions;

/// Recover the bundle name a binary was built from.
///
/// `libFoo.so` → `Foo`, `Foo.exe` → `Foo`. The shared-library convention is
/// tried first, then the executable one; a name matching neither is returned
/// verbatim.
pub fn bundle_name_for_binary<'a>(file_name: &'a str, conventions: &PlatformConventions) -> &'a str {
    strip_prefix_suffix(
        file_name,
        conventions.shared_library_prefix,
        conventions.shared_library_suffix,
    )
    .or_else(|| {
        strip_prefix_suffix(
            file_name,
            conventions.executable_prefix,
            conventions.executable_suffix,
        )
    })
    .unwrap_or(file_name)
}
