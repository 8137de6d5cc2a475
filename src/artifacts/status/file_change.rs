use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Difference between the index and the head commit's tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IndexChangeType {
    /// Staged for the next commit, new or with new contents
    Staged,
    /// Tracked by the head commit, dropped from the index
    Removed,
}

/// Difference between the working directory and the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkspaceChangeType {
    Modified,
    Deleted,
    Untracked,
}

impl From<&WorkspaceChangeType> for &str {
    fn from(change: &WorkspaceChangeType) -> Self {
        match change {
            WorkspaceChangeType::Modified => " (modified)",
            WorkspaceChangeType::Deleted => " (deleted)",
            WorkspaceChangeType::Untracked => "",
        }
    }
}

/// One line of a status section
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileChange {
    Index(PathBuf, IndexChangeType),
    Workspace(PathBuf, WorkspaceChangeType),
}

impl FileChange {
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Index(path, _) | FileChange::Workspace(path, _) => path,
        }
    }
}

impl fmt::Display for FileChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileChange::Index(path, IndexChangeType::Staged) => {
                write!(f, "{}", path.display().to_string().green())
            }
            FileChange::Index(path, IndexChangeType::Removed) => {
                write!(f, "{}", path.display().to_string().red())
            }
            FileChange::Workspace(path, change) => {
                let label: &str = change.into();
                write!(f, "{}", format!("{}{}", path.display(), label).red())
            }
        }
    }
}
