//! Filesystem access for the backup manager
//!
//! Every filesystem call the manager makes goes through [`BackupFs`], so the
//! retention logic can run against an in-memory directory in tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The filesystem operations the backup manager needs
pub trait BackupFs {
    /// File names (not paths) of the entries in `dir`
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Whether anything exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is an existing regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Move `from` to `to`
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Delete the file at `path`
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// [`BackupFs`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl BackupFs for OsFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            // Backup names are always built from a UTF-8 basename
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

/// Directory containing `path`, with `.` standing in for a bare file name
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryFs;
