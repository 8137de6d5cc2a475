use crate::areas::repository::Repository;
use crate::errors::TwigError;
use std::path::Path;

impl Repository {
    pub async fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        // expand every path before staging anything, so a missing one fails cleanly
        let files = paths
            .iter()
            .map(|path| {
                let relative_path = self.workspace().normalize_path(Path::new(path))?;
                self.workspace().list_files_under(&relative_path)
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();

        // tracked paths must survive the line-based commit format unchanged
        for path in &files {
            check_file_name(path)?;
        }

        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        for path in files {
            let data = self.workspace().read_file(&path)?;
            let blob_id = self.database().put_blob(data)?;

            index.add(path, blob_id);
        }

        if index.has_changed() {
            index.write_updates()?;
        }

        Ok(())
    }
}

fn check_file_name(path: &Path) -> anyhow::Result<()> {
    match path.to_str() {
        Some(name) if !name.contains(['\n', '\r']) => Ok(()),
        _ => Err(TwigError::UnsupportedFileName(format!("{:?}", path.as_os_str())).into()),
    }
}
