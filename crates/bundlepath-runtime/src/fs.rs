//! `std::fs` backed filesystem port.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use bundlepath_core::ports::FileSystemPort;

/// Answers filesystem queries against the host filesystem.
///
/// Paths that are not valid UTF-8 after canonicalization are reported as
/// absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl StdFileSystem {
    pub const fn new() -> Self {
        Self
    }
}

fn into_string(path: PathBuf) -> Option<String> {
    let path = path.into_os_string().into_string().ok()?;
    Some(strip_verbatim_prefix(path))
}

/// `\\?\C:\dir` → `C:\dir`; the resolver does not understand verbatim paths.
fn strip_verbatim_prefix(path: String) -> String {
    match path.strip_prefix(r"\\?\") {
        Some(rest) if !rest.starts_with("UNC\\") => rest.to_string(),
        _ => path,
    }
}

impl FileSystemPort for StdFileSystem {
    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    fn is_dir(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    fn canonicalize(&self, path: &str) -> Option<String> {
        fs::canonicalize(path).ok().and_then(into_string)
    }

    fn current_dir(&self) -> Option<String> {
        env::current_dir().ok().and_then(into_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_files_and_directories() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("tool");
        fs::write(&file, b"").unwrap();
        let fs_port = StdFileSystem::new();

        let dir = temp.path().to_str().unwrap();
        let file = file.to_str().unwrap();
        assert!(fs_port.exists(file));
        assert!(!fs_port.is_dir(file));
        assert!(fs_port.is_dir(dir));
        assert!(!fs_port.exists(&format!("{dir}/missing")));
    }

    #[test]
    fn canonicalize_requires_existing_path() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("a")).unwrap();
        let fs_port = StdFileSystem::new();

        let dotted = temp.path().join("a").join("..").join("a");
        let canonical = fs_port.canonicalize(dotted.to_str().unwrap()).unwrap();
        assert!(!canonical.contains(".."));
        assert_eq!(fs_port.canonicalize(&format!("{canonical}/missing")), None);
    }

    #[test]
    fn verbatim_prefix_removed() {
        assert_eq!(strip_verbatim_prefix(r"\\?\C:\Apps".to_string()), r"C:\Apps");
        assert_eq!(
            strip_verbatim_prefix(r"\\?\UNC\server\share".to_string()),
            r"\\?\UNC\server\share"
        );
        assert_eq!(strip_verbatim_prefix("/usr/bin".to_string()), "/usr/bin");
    }
}
