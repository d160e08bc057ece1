use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// One scanned filesystem entry.
///
/// The file/directory distinction is carried by `children`: a directory owns
/// a child list (possibly empty), a file has none at all. A directory's size
/// is always the exact sum of its children's sizes; it is only ever updated
/// through [`FileNode::push_child`] while the scan engine builds the tree,
/// and the tree is not handed out until that construction pass is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    path: PathBuf,
    size: u64,
    extension: Option<String>,
    children: Option<Vec<FileNode>>,
}

impl FileNode {
    /// Leaf node for a regular file with its byte length.
    ///
    /// The extension is the lowercase suffix after the last `.` in the name;
    /// dotfiles like `.bashrc` and names without a `.` have none.
    pub(crate) fn file(path: PathBuf, size: u64) -> Self {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());
        Self {
            path,
            size,
            extension,
            children: None,
        }
    }

    /// Directory node with an empty child list. Size starts at zero and grows
    /// only as children are attached.
    pub(crate) fn dir(path: PathBuf) -> Self {
        Self {
            path,
            size: 0,
            extension: None,
            children: Some(Vec::new()),
        }
    }

    /// Final path component, or the full path when there is none (e.g. `/`).
    pub fn name(&self) -> Cow<'_, str> {
        match self.path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => self.path.to_string_lossy(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Lowercase extension. Always `None` for directories.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn is_dir(&self) -> bool {
        self.children.is_some()
    }

    /// Child nodes: `Some` (possibly empty) for directories, `None` for
    /// files. Callers can rely on the distinction.
    pub fn children(&self) -> Option<&[FileNode]> {
        self.children.as_deref()
    }

    /// Attach a finished child subtree, folding its size into this node.
    /// The only channel through which sizes propagate upward.
    pub(crate) fn push_child(&mut self, child: FileNode) {
        debug_assert!(self.is_dir(), "push_child on a file node");
        if let Some(children) = self.children.as_mut() {
            self.size += child.size;
            children.push(child);
        }
    }

    /// Recursively order every child list: descending size, ties broken by
    /// case-insensitive ascending name. Files and directories sort as peers
    /// in one combined list.
    pub(crate) fn sort_children(&mut self) {
        let Some(children) = self.children.as_mut() else {
            return;
        };
        children.sort_by(|a, b| {
            b.size
                .cmp(&a.size)
                .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
        });
        for child in children.iter_mut().filter(|child| child.is_dir()) {
            child.sort_children();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercase_last_suffix() {
        let node = FileNode::file(PathBuf::from("/tmp/photo.JPG"), 1);
        assert_eq!(node.extension(), Some("jpg"));

        let node = FileNode::file(PathBuf::from("/tmp/archive.tar.gz"), 1);
        assert_eq!(node.extension(), Some("gz"));
    }

    #[test]
    fn no_dot_means_no_extension() {
        let node = FileNode::file(PathBuf::from("/tmp/README"), 1);
        assert_eq!(node.extension(), None);
    }

    #[test]
    fn dotfile_has_no_extension() {
        let node = FileNode::file(PathBuf::from("/tmp/.bashrc"), 1);
        assert_eq!(node.extension(), None);
    }

    #[test]
    fn directories_never_have_an_extension() {
        let node = FileNode::dir(PathBuf::from("/tmp/src.old"));
        assert_eq!(node.extension(), None);
    }

    #[test]
    fn files_have_no_child_list() {
        let node = FileNode::file(PathBuf::from("/tmp/a.txt"), 1);
        assert!(node.children().is_none());
        assert!(!node.is_dir());
    }

    #[test]
    fn push_child_accumulates_sizes() {
        let mut dir = FileNode::dir(PathBuf::from("/tmp"));
        dir.push_child(FileNode::file(PathBuf::from("/tmp/a.txt"), 100));
        dir.push_child(FileNode::file(PathBuf::from("/tmp/b.txt"), 200));

        let mut parent = FileNode::dir(PathBuf::from("/"));
        parent.push_child(dir);

        assert_eq!(parent.size(), 300);
        assert_eq!(parent.children().map(<[_]>::len), Some(1));
    }

    #[test]
    fn sort_orders_by_size_then_ci_name() {
        let mut dir = FileNode::dir(PathBuf::from("/tmp"));
        dir.push_child(FileNode::file(PathBuf::from("/tmp/beta"), 5));
        dir.push_child(FileNode::file(PathBuf::from("/tmp/gamma"), 10));
        dir.push_child(FileNode::file(PathBuf::from("/tmp/Alpha"), 5));
        dir.sort_children();

        let names: Vec<String> = dir
            .children()
            .unwrap_or_default()
            .iter()
            .map(|c| c.name().into_owned())
            .collect();
        assert_eq!(names, ["gamma", "Alpha", "beta"]);
    }

    #[test]
    fn sort_recurses_into_subdirectories() {
        let mut sub = FileNode::dir(PathBuf::from("/tmp/sub"));
        sub.push_child(FileNode::file(PathBuf::from("/tmp/sub/small"), 1));
        sub.push_child(FileNode::file(PathBuf::from("/tmp/sub/large"), 9));

        let mut root = FileNode::dir(PathBuf::from("/tmp"));
        root.push_child(sub);
        root.sort_children();

        let sub = &root.children().unwrap_or_default()[0];
        let names: Vec<String> = sub
            .children()
            .unwrap_or_default()
            .iter()
            .map(|c| c.name().into_owned())
            .collect();
        assert_eq!(names, ["large", "small"]);
    }
}
