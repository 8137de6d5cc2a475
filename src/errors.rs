//! Typed repository errors
//!
//! Every failure a command can report to the user is a [`TwigError`] variant
//! carrying its one-line diagnostic. Internal plumbing keeps returning
//! `anyhow::Result`; typed errors travel inside the `anyhow::Error` and are
//! recovered with `downcast_ref` at the command boundary.

use crate::artifacts::objects::object_id::ObjectId;

/// Broad category of a [`TwigError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Object, commit, branch, or working file missing
    NotFound,
    /// Branch or repository already present
    AlreadyExists,
    /// Operation not allowed in the current repository state
    InvalidOperation,
    /// A working file would be overwritten or lost
    Conflict,
    /// Nothing to do
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TwigError {
    #[error("Not in an initialized twig directory.")]
    NotInitialized,

    #[error("A twig version-control system already exists in the current directory.")]
    RepositoryExists,

    #[error("File does not exist.")]
    FileNotFound,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("No commit with that id exists.")]
    CommitNotFound,

    #[error("Object {0} does not exist.")]
    ObjectNotFound(ObjectId),

    #[error("No such branch exists.")]
    NoSuchBranch,

    #[error("A branch with that name does not exist.")]
    BranchNotFound,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("Unsupported file name: {0}")]
    UnsupportedFileName(String),

    #[error("No need to checkout the current branch.")]
    CheckoutCurrentBranch,

    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,

    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("Found no commit with that message.")]
    NoMatchingCommit,
}

impl TwigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TwigError::NotInitialized
            | TwigError::FileNotFound
            | TwigError::FileNotInCommit
            | TwigError::CommitNotFound
            | TwigError::ObjectNotFound(_)
            | TwigError::NoSuchBranch
            | TwigError::BranchNotFound => ErrorKind::NotFound,
            TwigError::RepositoryExists | TwigError::BranchExists => ErrorKind::AlreadyExists,
            TwigError::InvalidBranchName(_)
            | TwigError::UnsupportedFileName(_)
            | TwigError::CheckoutCurrentBranch
            | TwigError::RemoveCurrentBranch
            | TwigError::MergeWithSelf
            | TwigError::UncommittedChanges
            | TwigError::EmptyMessage => ErrorKind::InvalidOperation,
            TwigError::UntrackedFileInTheWay => ErrorKind::Conflict,
            TwigError::NothingToCommit | TwigError::NothingToRemove | TwigError::NoMatchingCommit => {
                ErrorKind::NoOp
            }
        }
    }

    /// Recover the typed error carried by an `anyhow::Error`, if any
    pub fn from_anyhow(error: &anyhow::Error) -> Option<&TwigError> {
        error.downcast_ref::<TwigError>()
    }
}
