//! Last-component arithmetic over path strings.
//!
//! Lengths and offsets are byte positions into the input. Separators are
//! ASCII, so every returned position falls on a character boundary and can be
//! used to slice the original string.

use super::style::PathStyle;

/// Append `component` to `base`, inserting the style's separator.
///
/// `component` may contain several segments (`Support Files/Executables`);
/// each is re-joined with the style's separator. `..` segments are kept as-is.
pub fn join_relative(base: &str, component: &str, style: PathStyle) -> String {
    let mut joined = String::with_capacity(base.len() + component.len() + 1);
    joined.push_str(base);

    for segment in component
        .split(|c| style.is_separator(c) || c == '/')
        .filter(|segment| !segment.is_empty())
    {
        if !joined.is_empty() && !joined.ends_with(|c| style.is_separator(c)) {
            joined.push(style.separator());
        }
        joined.push_str(segment);
    }

    joined
}

/// Length of `path` once its final component is removed.
///
/// The root separator is kept (`/a` → `/`), trailing separators are ignored
/// and a drive root (`C:\`) cannot be shortened any further. Returns 0 when no
/// separator precedes the last component.
pub fn length_after_removing_last_component(path: &str, style: PathStyle) -> usize {
    if style.is_drive_root(path) {
        return path.len();
    }

    let bytes = path.as_bytes();
    let len = bytes.len();
    if len < 2 {
        return 0;
    }

    let drive = style.has_drive(path);
    for idx in (1..len).rev() {
        if style.is_separator_byte(bytes[idx - 1]) {
            if idx != 1 && !(drive && idx == 3) {
                return idx - 1;
            }
            return idx;
        }
    }

    if len > 2 && drive {
        return 2;
    }
    0
}

/// Offset of the first character after the last separator.
///
/// Callers pass a path without trailing separators; see [`last_component`]
/// for the trimming variant.
pub fn start_of_last_component(path: &str, style: PathStyle) -> usize {
    let bytes = path.as_bytes();
    let len = bytes.len();
    if len < 2 {
        return 0;
    }

    for idx in (1..len).rev() {
        if style.is_separator_byte(bytes[idx - 1]) {
            return idx;
        }
    }

    if len > 2 && style.has_drive(path) {
        return 2;
    }
    0
}

/// Anchored strip of `prefix` and `suffix` from `name`.
///
/// Returns `None` when both anchors are empty (the caller should try another
/// naming convention), when either anchor is missing, or when the anchors
/// would overlap or leave nothing between them.
pub fn strip_prefix_suffix<'a>(name: &'a str, prefix: &str, suffix: &str) -> Option<&'a str> {
    if prefix.is_empty() && suffix.is_empty() {
        return None;
    }
    if name.len() <= prefix.len() + suffix.len() {
        return None;
    }
    name.strip_prefix(prefix)?.strip_suffix(suffix)
}

fn trim_trailing_separators(path: &str, style: PathStyle) -> &str {
    let trimmed = path.trim_end_matches(|c| style.is_separator(c));
    if trimmed.is_empty() || (style.has_drive(trimmed) && trimmed.len() == 2) {
        // Keep `/` and `C:\` intact.
        return path;
    }
    trimmed
}

/// The final component of `path`, ignoring trailing separators.
pub fn last_component(path: &str, style: PathStyle) -> &str {
    let trimmed = trim_trailing_separators(path, style);
    &trimmed[start_of_last_component(trimmed, style)..]
}

/// `path` with its final component removed.
pub fn parent(path: &str, style: PathStyle) -> &str {
    &path[..length_after_removing_last_component(path, style)]
}

/// Extension of a single component (`Foo.resources` → `resources`).
///
/// Leading-dot names such as `.hidden` have no extension.
pub fn path_extension(component: &str) -> Option<&str> {
    match component.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < component.len() => Some(&component[idx + 1..]),
        _ => None,
    }
}

/// A single component with its extension removed.
pub fn delete_path_extension(component: &str) -> &str {
    match path_extension(component) {
        Some(ext) => &component[..component.len() - ext.len() - 1],
        None => component,
    }
}

/// The final component of `path` without its extension.
pub fn last_component_without_extension(path: &str, style: PathStyle) -> &str {
    delete_path_extension(last_component(path, style))
}

/// Whether `path` is anchored at a filesystem root.
pub fn is_absolute(path: &str, style: PathStyle) -> bool {
    match style {
        PathStyle::Posix => path.starts_with('/'),
        PathStyle::Windows => {
            path.starts_with(|c| style.is_separator(c))
                || (style.has_drive(path)
                    && path.len() > 2
                    && style.is_separator_byte(path.as_bytes()[2]))
        }
    }
}

fn split_root(path: &str, style: PathStyle) -> (String, &str) {
    match style {
        PathStyle::Posix => match path.strip_prefix('/') {
            Some(rest) => ("/".to_string(), rest),
            None => (String::new(), path),
        },
        PathStyle::Windows => {
            if style.has_drive(path) {
                let drive = &path[..2];
                let rest = &path[2..];
                match rest.strip_prefix(|c| style.is_separator(c)) {
                    Some(rest) => (format!("{drive}\\"), rest),
                    None => (drive.to_string(), rest),
                }
            } else if let Some(rest) = path.strip_prefix(|c| style.is_separator(c)) {
                ("\\".to_string(), rest)
            } else {
                (String::new(), path)
            }
        }
    }
}

/// Resolve `.` and `..` segments without touching the filesystem.
///
/// `..` at the root is dropped; leading `..` segments of a relative path are
/// preserved.
pub fn normalize_lexically(path: &str, style: PathStyle) -> String {
    let (root, rest) = split_root(path, style);
    let mut parts: Vec<&str> = Vec::new();

    for segment in rest.split(|c| style.is_separator(c)) {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if root.is_empty() {
                    parts.push("..");
                }
            }
            _ => parts.push(segment),
        }
    }

    let mut normalized = root;
    normalized.push_str(&parts.join(&style.separator().to_string()));
    if normalized.is_empty() && !path.is_empty() {
        normalized.push('.');
    }
    normalized
}

/// Make `path` absolute against `cwd`, then normalize it lexically.
pub fn absolutize(path: &str, cwd: &str, style: PathStyle) -> String {
    if is_absolute(path, style) {
        normalize_lexically(path, style)
    } else {
        normalize_lexically(&join_relative(cwd, path, style), style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSIX: PathStyle = PathStyle::Posix;
    const WINDOWS: PathStyle = PathStyle::Windows;

    #[test]
    fn join_inserts_single_separator() {
        assert_eq!(join_relative("/a", "b", POSIX), "/a/b");
        assert_eq!(join_relative("/a/", "b", POSIX), "/a/b");
        assert_eq!(join_relative("", "b", POSIX), "b");
        assert_eq!(join_relative("/", "b", POSIX), "/b");
    }

    #[test]
    fn join_keeps_parent_segments() {
        assert_eq!(
            join_relative("/usr/share/App.resources", "../../libexec", POSIX),
            "/usr/share/App.resources/../../libexec"
        );
    }

    #[test]
    fn join_resplits_multi_segment_components() {
        assert_eq!(
            join_relative("C:\\Apps\\Foo", "Support Files/Executables", WINDOWS),
            "C:\\Apps\\Foo\\Support Files\\Executables"
        );
    }

    #[test]
    fn removing_last_component() {
        fn cut(p: &str) -> &str {
            &p[..length_after_removing_last_component(p, POSIX)]
        }
        assert_eq!(cut("/a/b"), "/a");
        assert_eq!(cut("/a/b/"), "/a");
        assert_eq!(cut("/a"), "/");
        assert_eq!(cut("a/b"), "a");
        assert_eq!(cut("a"), "");
        assert_eq!(cut("/"), "");
    }

    #[test]
    fn drive_root_is_already_minimal() {
        assert_eq!(length_after_removing_last_component("C:\\", WINDOWS), 3);
        assert_eq!(length_after_removing_last_component("C:\\Foo", WINDOWS), 3);
        assert_eq!(
            length_after_removing_last_component("C:\\Foo\\Bar.exe", WINDOWS),
            6
        );
    }

    #[test]
    fn start_of_last_component_finds_trailing_name() {
        let path = "/Apps/Foo/Support Files/Executables/Linux";
        let start = start_of_last_component(path, POSIX);
        assert_eq!(&path[start..], "Linux");
        assert_eq!(start_of_last_component("Foo", POSIX), 0);
        assert_eq!(start_of_last_component("C:Foo", WINDOWS), 2);
    }

    #[test]
    fn strip_prefix_suffix_is_anchored() {
        assert_eq!(strip_prefix_suffix("libFoo.so", "lib", ".so"), Some("Foo"));
        assert_eq!(strip_prefix_suffix("Foo.dll", "", ".dll"), Some("Foo"));
        assert_eq!(strip_prefix_suffix("Foo.exe", "", ""), None);
        assert_eq!(strip_prefix_suffix("Foo.so", "lib", ".so"), None);
        assert_eq!(strip_prefix_suffix("libFoo.so.1", "lib", ".so"), None);
        assert_eq!(strip_prefix_suffix("lib.so", "lib", ".so"), None);
    }

    #[test]
    fn extension_helpers() {
        assert_eq!(path_extension("Foo.resources"), Some("resources"));
        assert_eq!(path_extension(".hidden"), None);
        assert_eq!(path_extension("Foo."), None);
        assert_eq!(delete_path_extension("Foo.app"), "Foo");
        assert_eq!(
            last_component_without_extension("/usr/share/App.resources/", POSIX),
            "App"
        );
    }

    #[test]
    fn parent_and_last_component() {
        assert_eq!(parent("/usr/share/App.resources", POSIX), "/usr/share");
        assert_eq!(last_component("/usr/share/App.resources/", POSIX), "App.resources");
        assert_eq!(last_component("C:\\Foo\\Bar.exe", WINDOWS), "Bar.exe");
        assert_eq!(last_component("/", POSIX), "/");
    }

    #[test]
    fn lexical_normalization() {
        assert_eq!(
            normalize_lexically("/usr/share/App.resources/../../libexec", POSIX),
            "/usr/libexec"
        );
        assert_eq!(normalize_lexically("/../a/./b", POSIX), "/a/b");
        assert_eq!(normalize_lexically("../a", POSIX), "../a");
        assert_eq!(
            normalize_lexically("C:/Apps\\Foo\\..\\Bar", WINDOWS),
            "C:\\Apps\\Bar"
        );
    }

    #[test]
    fn absolutize_joins_relative_paths() {
        assert_eq!(absolutize("bin/tool", "/work", POSIX), "/work/bin/tool");
        assert_eq!(absolutize("/bin/../sbin/tool", "/work", POSIX), "/sbin/tool");
        assert!(is_absolute("C:\\x", WINDOWS));
        assert!(!is_absolute("x\\y", WINDOWS));
    }
}
