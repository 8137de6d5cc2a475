use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, FileTree, commit_timestamp_from_env};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let message = message.trim();
        if message.is_empty() {
            return Err(TwigError::EmptyMessage.into());
        }

        let tree = {
            let index = self.index();
            let mut index = index.lock().await;

            index.rehydrate()?;
            index.as_tree()
        };

        let (head_oid, head_commit) = self.head_commit()?;
        if &tree == head_commit.tree() {
            return Err(TwigError::NothingToCommit.into());
        }

        let commit_oid = self.write_commit(vec![head_oid], tree, message.to_string())?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            self.refs().current_branch_name()?,
            commit_oid.to_short_oid(),
            message.lines().next().unwrap_or_default()
        )?;

        Ok(())
    }

    /// Store a commit of `tree` and advance the current branch to it
    ///
    /// Two parents make a merge commit, the first being the current head.
    pub(crate) fn write_commit(
        &self,
        parents: Vec<ObjectId>,
        tree: FileTree,
        message: String,
    ) -> anyhow::Result<ObjectId> {
        let timestamp = commit_timestamp_from_env();

        let commit = match parents.as_slice() {
            [parent] => Commit::new(parent.clone(), tree, timestamp, message),
            [primary, secondary] => {
                Commit::new_merge(primary.clone(), secondary.clone(), tree, timestamp, message)
            }
            _ => anyhow::bail!("a commit takes one or two parents, got {}", parents.len()),
        };

        let commit_oid = self.database().put_commit(&commit)?;
        let current_branch = self.refs().current_branch_name()?;
        self.refs().set_branch_head(&current_branch, &commit_oid)?;

        Ok(commit_oid)
    }
}
