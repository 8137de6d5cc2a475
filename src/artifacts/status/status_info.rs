use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::FileTree;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::file_change::{FileChange, IndexChangeType, WorkspaceChangeType};
use derive_new::new;
use std::collections::BTreeSet;
use std::path::Path;

pub type ChangeSet = BTreeSet<FileChange>;

/// Everything `status` reports, each set in path order
#[derive(Debug, Clone, Default)]
pub struct StatusInfo {
    pub(crate) branches: BTreeSet<BranchName>,
    pub(crate) current_branch: Option<BranchName>,
    pub(crate) staged: ChangeSet,
    pub(crate) removed: ChangeSet,
    pub(crate) workspace_changes: ChangeSet,
    pub(crate) untracked: ChangeSet,
}

impl StatusInfo {
    pub fn branches(&self) -> &BTreeSet<BranchName> {
        &self.branches
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> bool {
        self.current_branch.as_ref() == Some(branch_name)
    }

    pub fn staged(&self) -> &ChangeSet {
        &self.staged
    }

    pub fn removed(&self) -> &ChangeSet {
        &self.removed
    }

    pub fn workspace_changes(&self) -> &ChangeSet {
        &self.workspace_changes
    }

    pub fn untracked(&self) -> &ChangeSet {
        &self.untracked
    }

    /// No staged, removed, modified or untracked files
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty()
            && self.removed.is_empty()
            && self.workspace_changes.is_empty()
            && self.untracked.is_empty()
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, index: &Index) -> anyhow::Result<StatusInfo> {
        let refs = self.repository.refs();
        let (_, head_commit) = self.repository.head_commit()?;
        let head_tree = head_commit.tree();

        let mut status_info = StatusInfo {
            branches: refs.list_branches()?,
            current_branch: Some(refs.current_branch_name()?),
            ..StatusInfo::default()
        };

        self.check_index_against_head_tree(index, head_tree, &mut status_info);
        self.check_index_against_workspace(index, &mut status_info)?;
        self.collect_untracked_files(index, &mut status_info)?;

        Ok(status_info)
    }

    fn check_index_against_head_tree(
        &self,
        index: &Index,
        head_tree: &FileTree,
        status_info: &mut StatusInfo,
    ) {
        for entry in index.entries() {
            if head_tree.get(&entry.name) != Some(&entry.oid) {
                status_info
                    .staged
                    .insert(FileChange::Index(entry.name.clone(), IndexChangeType::Staged));
            }
        }

        for path in head_tree.keys() {
            if !index.is_tracked(path) {
                status_info
                    .removed
                    .insert(FileChange::Index(path.clone(), IndexChangeType::Removed));
            }
        }
    }

    fn check_index_against_workspace(
        &self,
        index: &Index,
        status_info: &mut StatusInfo,
    ) -> anyhow::Result<()> {
        let workspace = self.repository.workspace();

        for entry in index.entries() {
            let change = if !workspace.is_file(&entry.name) {
                Some(WorkspaceChangeType::Deleted)
            } else if self.is_content_changed(&entry.name, index)? {
                Some(WorkspaceChangeType::Modified)
            } else {
                None
            };

            if let Some(change) = change {
                status_info
                    .workspace_changes
                    .insert(FileChange::Workspace(entry.name.clone(), change));
            }
        }

        Ok(())
    }

    fn collect_untracked_files(
        &self,
        index: &Index,
        status_info: &mut StatusInfo,
    ) -> anyhow::Result<()> {
        for path in self.repository.workspace().list_files()? {
            if !index.is_tracked(&path) {
                status_info
                    .untracked
                    .insert(FileChange::Workspace(path, WorkspaceChangeType::Untracked));
            }
        }

        Ok(())
    }

    fn is_content_changed(&self, path: &Path, index: &Index) -> anyhow::Result<bool> {
        let data = self.repository.workspace().read_file(path)?;
        let oid = Blob::new(data).object_id()?;

        Ok(index.oid_by_path(path) != Some(&oid))
    }
}
