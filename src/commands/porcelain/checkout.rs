use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::FileTree;
use crate::errors::TwigError;
use std::path::{Path, PathBuf};

impl Repository {
    /// Restore files from a commit (HEAD when `revision` is `None`)
    ///
    /// The restored contents are written to the working tree only; the index
    /// is left as it is.
    pub async fn checkout_files(
        &mut self,
        revision: Option<&str>,
        paths: &[String],
    ) -> anyhow::Result<()> {
        let revision = Revision::try_parse(revision.unwrap_or("HEAD"))?;
        let commit_oid = revision.resolve(self)?;
        let commit = self.database().get_commit(&commit_oid)?;

        let paths = paths
            .iter()
            .map(|path| self.workspace().normalize_path(Path::new(path)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        if paths.iter().any(|path| !commit.tree().contains_key(path)) {
            return Err(TwigError::FileNotInCommit.into());
        }

        self.materialize(commit.tree(), Some(paths.as_slice()))
    }

    /// Make `branch_name` the active branch and its head the working snapshot
    pub async fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name =
            BranchName::try_parse(branch_name.to_string()).map_err(|_| TwigError::NoSuchBranch)?;
        let target_oid = self
            .refs()
            .read_branch(&branch_name)?
            .ok_or(TwigError::NoSuchBranch)?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(TwigError::CheckoutCurrentBranch.into());
        }

        let target_commit = self.database().get_commit(&target_oid)?;
        self.migrate_to(target_commit.tree().clone()).await?;
        self.refs().set_current_branch(&branch_name)?;

        Ok(())
    }

    /// Write the blobs of `tree` (or of the listed paths only) into the working tree
    pub fn materialize(&self, tree: &FileTree, paths: Option<&[PathBuf]>) -> anyhow::Result<()> {
        let entries = tree
            .iter()
            .filter(|(path, _)| paths.is_none_or(|paths| paths.contains(*path)));

        for (path, oid) in entries {
            let data = self.database().get_blob(oid)?;
            self.workspace().write_file(path, &data)?;
        }

        Ok(())
    }

    /// Replace the working snapshot and the index with `target_tree`
    ///
    /// Fails with nothing written when an untracked file is in the way.
    pub(crate) async fn migrate_to(&self, target_tree: FileTree) -> anyhow::Result<()> {
        let (_, head_commit) = self.head_commit()?;

        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        let mut migration =
            Migration::for_snapshot(self, &mut index, head_commit.tree(), target_tree);
        migration.apply_changes()?;

        index.write_updates()?;

        Ok(())
    }
}
