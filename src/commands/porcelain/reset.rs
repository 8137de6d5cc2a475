use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;

impl Repository {
    /// Check out an arbitrary commit and move the current branch to it
    pub async fn reset(&mut self, revision: &str) -> anyhow::Result<()> {
        let target_oid = Revision::try_parse(revision)?.resolve(self)?;
        let target_commit = self.database().get_commit(&target_oid)?;

        self.migrate_to(target_commit.tree().clone()).await?;

        let current_branch = self.refs().current_branch_name()?;
        self.refs().set_branch_head(&current_branch, &target_oid)?;

        Ok(())
    }
}
