use crate::areas::repository::Repository;
use crate::errors::TwigError;
use std::path::Path;

impl Repository {
    /// Stop tracking a file
    ///
    /// A file tracked by the head commit is dropped from the index and deleted
    /// from the working tree. A file that is only staged is unstaged and kept.
    pub async fn rm(&mut self, path: &str) -> anyhow::Result<()> {
        let path = self.workspace().normalize_path(Path::new(path))?;
        let (_, head_commit) = self.head_commit()?;

        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        if head_commit.tree().contains_key(&path) {
            index.remove(&path);
            index.write_updates()?;
            self.workspace().remove_file(&path)?;
        } else if index.is_tracked(&path) {
            index.remove(&path);
            index.write_updates()?;
        } else {
            return Err(TwigError::NothingToRemove.into());
        }

        Ok(())
    }
}
