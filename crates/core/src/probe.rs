use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// What a probed entry is. Anything that is not a directory scans as a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Attributes of one filesystem entry as reported by the OS.
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Byte length for files; zero for directories, whose aggregates are
    /// computed by the scan engine rather than read from the filesystem.
    pub size: u64,
    pub hidden: bool,
    pub symlink: bool,
}

impl Entry {
    fn from_metadata(path: PathBuf, meta: &Metadata, symlink: bool) -> Self {
        let kind = if meta.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        let size = match kind {
            EntryKind::File => meta.len(),
            EntryKind::Directory => 0,
        };
        let hidden = is_hidden(&path, meta);
        Self {
            path,
            kind,
            size,
            hidden,
            symlink,
        }
    }
}

/// Stat the scan root, following symlinks. The root is validated separately
/// by the engine and is never subject to the inclusion filter.
pub fn stat_root(path: &Path) -> io::Result<Entry> {
    let meta = fs::metadata(path)?;
    Ok(Entry::from_metadata(path.to_path_buf(), &meta, false))
}

/// List a directory's immediate children with non-following metadata.
///
/// Entries whose attributes cannot be read are dropped, and a directory that
/// cannot be listed at all yields an empty vec: traversal is best-effort
/// over a live filesystem.
pub fn list_dir(dir: &Path) -> Vec<Entry> {
    let reader = match fs::read_dir(dir) {
        Ok(reader) => reader,
        Err(err) => {
            debug!(dir = %dir.display(), %err, "directory not listable, skipping");
            return Vec::new();
        }
    };

    let mut entries = Vec::new();
    for item in reader {
        let item = match item {
            Ok(item) => item,
            Err(err) => {
                debug!(dir = %dir.display(), %err, "unreadable directory entry, skipping");
                continue;
            }
        };
        // DirEntry::metadata does not traverse symlinks.
        let meta = match item.metadata() {
            Ok(meta) => meta,
            Err(err) => {
                debug!(path = %item.path().display(), %err, "entry not statable, skipping");
                continue;
            }
        };
        let symlink = meta.file_type().is_symlink();
        entries.push(Entry::from_metadata(item.path(), &meta, symlink));
    }
    entries
}

// Hidden detection uses exactly one mechanism per platform: the filesystem
// hidden attribute on Windows, a leading `.` in the name everywhere else.

#[cfg(windows)]
fn is_hidden(_path: &Path, meta: &Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    use windows::Win32::Storage::FileSystem::FILE_ATTRIBUTE_HIDDEN;

    meta.file_attributes() & FILE_ATTRIBUTE_HIDDEN.0 != 0
}

#[cfg(not(windows))]
fn is_hidden(path: &Path, _meta: &Metadata) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;

    #[test]
    fn dot_prefix_marks_hidden() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::write(tmp.path().join(".secret"), b"x").unwrap();
        fs::write(tmp.path().join("plain.txt"), b"x").unwrap();

        let entries = list_dir(tmp.path());
        let hidden = entries.iter().find(|e| e.path.ends_with(".secret")).unwrap();
        let plain = entries.iter().find(|e| e.path.ends_with("plain.txt")).unwrap();

        assert!(hidden.hidden);
        assert!(!plain.hidden);
    }

    #[test]
    fn listing_reports_kind_and_size() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("five.bin"), b"12345").unwrap();

        let entries = list_dir(tmp.path());
        let sub = entries.iter().find(|e| e.path.ends_with("sub")).unwrap();
        let five = entries.iter().find(|e| e.path.ends_with("five.bin")).unwrap();

        assert_eq!(sub.kind, EntryKind::Directory);
        assert_eq!(sub.size, 0);
        assert_eq!(five.kind, EntryKind::File);
        assert_eq!(five.size, 5);
    }
}
