use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::FileNode;
use crate::policy::ScanPolicy;
use crate::probe::{self, Entry, EntryKind};

/// Minimum number of included children before a directory's fan-out is worth
/// distributing across the worker pool.
pub const PARALLEL_FANOUT: usize = 100;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The root path is missing or not a directory. No other path was touched.
    #[error("invalid directory path: {}", .0.display())]
    InvalidRoot(PathBuf),
    /// The bounded worker pool could not be started.
    #[error("failed to start scan worker pool")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Scan the subtree under `root` into a fully aggregated, sorted tree.
///
/// When `policy.parallel()` is set, a dedicated worker pool bounded by
/// `policy.max_workers()` is built for this one call and torn down when it
/// drops. Dropping a rayon pool joins every worker thread, so no threads
/// outlive the scan on any exit path.
pub fn scan(root: impl AsRef<Path>, policy: &ScanPolicy) -> Result<FileNode, ScanError> {
    let root = root.as_ref();
    let entry = probe::stat_root(root)
        .ok()
        .filter(|entry| entry.kind == EntryKind::Directory)
        .ok_or_else(|| ScanError::InvalidRoot(root.to_path_buf()))?;

    info!(root = %root.display(), parallel = policy.parallel(), "scan started");

    let mut tree = if policy.parallel() {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(policy.max_workers().get())
            .thread_name(|n| format!("drivescope-scan-{n}"))
            .build()?;
        pool.install(|| visit(entry, policy))
    } else {
        visit(entry, policy)
    };

    tree.sort_children();
    info!(root = %root.display(), bytes = tree.size(), "scan finished");
    Ok(tree)
}

/// Recursively scan one entry into a finished subtree.
///
/// Every directory level re-decides sequential vs parallel fan-out on its own
/// included child count. Workers hand back complete subtrees and only the
/// owning parent attaches them, so no two threads ever mutate the same node.
fn visit(entry: Entry, policy: &ScanPolicy) -> FileNode {
    if entry.kind == EntryKind::File {
        return FileNode::file(entry.path, entry.size);
    }

    let children: Vec<Entry> = probe::list_dir(&entry.path)
        .into_iter()
        .filter(|child| included(child, policy))
        .collect();
    let mut node = FileNode::dir(entry.path);

    if policy.parallel() && children.len() >= PARALLEL_FANOUT {
        let subtrees: Vec<FileNode> = children
            .into_par_iter()
            .map(|child| visit(child, policy))
            .collect();
        for subtree in subtrees {
            node.push_child(subtree);
        }
    } else {
        for child in children {
            node.push_child(visit(child, policy));
        }
    }

    node
}

/// The inclusion filter: symlinks are never followed nor represented, and
/// hidden entries only appear when the policy asks for them.
fn included(entry: &Entry, policy: &ScanPolicy) -> bool {
    if entry.symlink {
        debug!(path = %entry.path.display(), "symlink excluded");
        return false;
    }
    if entry.hidden && !policy.include_hidden() {
        debug!(path = %entry.path.display(), "hidden entry excluded");
        return false;
    }
    true
}
