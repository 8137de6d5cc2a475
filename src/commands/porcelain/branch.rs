use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;

impl Repository {
    /// Create a branch at the current head; the active branch does not change
    pub fn branch_create(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        self.refs().create_branch(&branch_name)?;

        Ok(())
    }

    /// Delete a branch pointer, leaving its commits in place
    pub fn branch_delete(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        self.refs().delete_branch(&branch_name)?;

        Ok(())
    }

    pub fn branch_list(&self) -> anyhow::Result<()> {
        let current_branch = self.refs().current_branch_name()?;

        for branch_name in self.refs().list_branches()? {
            let marker = if branch_name == current_branch { "*" } else { "" };
            writeln!(self.writer(), "{}{}", marker, branch_name)?;
        }

        Ok(())
    }
}
