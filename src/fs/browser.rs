// src/fs/browser.rs
//! Directory listing for the track browser.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use super::detection::{detect_file_type, FileCategory};

/// One row of the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    pub name: String,
    pub is_dir: bool,
    pub category: FileCategory,
    /// Empty for directories and unreadable files
    pub mime: String,
}

impl BrowserEntry {
    pub fn is_audio(&self) -> bool {
        !self.is_dir && self.category == FileCategory::Audio
    }
}

/// List `dir`, sorted by name without regard to case.
pub fn load_entries(dir: &Path) -> io::Result<Vec<BrowserEntry>> {
    let mut list = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            let path = e.path();
            if path.is_dir() {
                return BrowserEntry {
                    name,
                    is_dir: true,
                    category: FileCategory::Binary,
                    mime: String::new(),
                };
            }
            let (category, mime) = match detect_file_type(&path) {
                Ok(ft) => (ft.category, ft.mime),
                Err(_) => (FileCategory::Binary, String::new()),
            };
            BrowserEntry {
                name,
                is_dir: false,
                category,
                mime,
            }
        })
        .collect::<Vec<_>>();
    list.sort_by_key(|e| e.name.to_lowercase());
    Ok(list)
}

/// Last `n` components of `path`, prefixed with `…/` when truncated.
pub fn tail_path(path: &Path, n: usize) -> String {
    let parts: Vec<_> = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .filter(|c| c != "/")
        .collect();
    if parts.len() <= n {
        return path.display().to_string();
    }
    let tail: PathBuf = parts[parts.len() - n..].iter().collect();
    format!("…/{}", tail.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_sorted_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "x").unwrap();
        std::fs::write(dir.path().join("A.txt"), "x").unwrap();
        std::fs::create_dir(dir.path().join("c")).unwrap();

        let entries = load_entries(dir.path()).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A.txt", "b.txt", "c"]);
        assert!(entries[2].is_dir);
        assert!(!entries[0].is_audio());
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(load_entries(Path::new("/no/such/dir")).is_err());
    }

    #[test]
    fn tail_path_truncates() {
        assert_eq!(
            tail_path(Path::new("/a/b/c/d"), 2),
            format!("…/{}", Path::new("c/d").display())
        );
        assert_eq!(tail_path(Path::new("/a/b"), 3), "/a/b");
    }
}
