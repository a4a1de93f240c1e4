//! engine::discover
//!
//! Repository discovery: walk a directory tree, yielding every git
//! repository root found under it.
//!
//! # Design
//!
//! Depth-first traversal over an explicit stack. Each visited directory is
//! probed for a repository boundary at exactly that directory; a hit yields
//! the path and prunes the subtree, so repositories nested inside a
//! discovered repository are never separately reported. A directory that
//! cannot be read yields an error item and the walk continues with its
//! siblings.
//!
//! The walk reflects live filesystem state at iteration time; it is not a
//! snapshot and not restartable.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::git;

/// Errors from repository discovery.
#[derive(Debug, Error)]
pub enum DiscoverError {
    /// The scan root does not exist or is not a directory.
    #[error("scan root not found: {path}")]
    RootNotFound {
        /// The root that was requested
        path: PathBuf,
    },

    /// A directory inside the tree could not be read.
    #[error("cannot read directory {path}: {source}")]
    Unreadable {
        /// The directory that failed
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },
}

/// Start a discovery walk over the subdirectories of `root`.
///
/// The root itself is not probed: it is the container the repositories live
/// under. An empty root yields an empty sequence; a missing root fails here,
/// before any iteration.
pub fn discover(root: &Path) -> Result<RepoWalker, DiscoverError> {
    if !root.is_dir() {
        return Err(DiscoverError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    let stack = read_child_dirs(root)?;
    Ok(RepoWalker { stack })
}

/// Lazy iterator over discovered repository roots.
///
/// Yields `Ok(path)` for each repository boundary and `Err` for each
/// unreadable directory; errors do not end the iteration.
#[derive(Debug)]
pub struct RepoWalker {
    /// Directories still to visit, deepest-first
    stack: Vec<PathBuf>,
}

impl Iterator for RepoWalker {
    type Item = Result<PathBuf, DiscoverError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(dir) = self.stack.pop() {
            if git::is_repository_root(&dir) {
                return Some(Ok(dir));
            }
            match read_child_dirs(&dir) {
                Ok(children) => self.stack.extend(children),
                Err(err) => return Some(Err(err)),
            }
        }
        None
    }
}

/// List the immediate subdirectories of `dir`, sorted so the walk visits
/// them in name order.
///
/// Symlinks are not followed, which keeps the traversal finite.
fn read_child_dirs(dir: &Path) -> Result<Vec<PathBuf>, DiscoverError> {
    let entries = std::fs::read_dir(dir).map_err(|source| DiscoverError::Unreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut children = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DiscoverError::Unreadable {
            path: dir.to_path_buf(),
            source,
        })?;
        let file_type = entry.file_type().map_err(|source| DiscoverError::Unreadable {
            path: entry.path(),
            source,
        })?;
        if file_type.is_dir() {
            children.push(entry.path());
        }
    }
    // Sorted descending: the stack pops the lexicographically first child.
    children.sort_unstable_by(|a, b| b.cmp(a));
    Ok(children)
}
