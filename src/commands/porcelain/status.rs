use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::{ChangeSet, StatusInfo};
use colored::Colorize;

impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        let status_info = {
            let index = self.index();
            let mut index = index.lock().await;

            index.rehydrate()?;
            self.status_report().initialize(&index)?
        };

        self.print_branches(&status_info)?;
        self.print_section("Staged Files", status_info.staged())?;
        self.print_section("Removed Files", status_info.removed())?;
        self.print_section(
            "Modifications Not Staged For Commit",
            status_info.workspace_changes(),
        )?;
        self.print_section("Untracked Files", status_info.untracked())?;

        Ok(())
    }

    fn print_branches(&self, status_info: &StatusInfo) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for branch_name in status_info.branches() {
            if status_info.is_current_branch(branch_name) {
                writeln!(writer, "*{}", branch_name.as_ref().green())?;
            } else {
                writeln!(writer, "{}", branch_name)?;
            }
        }
        writeln!(writer)?;

        Ok(())
    }

    fn print_section(&self, title: &str, changes: &ChangeSet) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "=== {} ===", title)?;
        for change in changes {
            writeln!(writer, "{}", change)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
