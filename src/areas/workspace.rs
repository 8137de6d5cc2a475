//! Working directory access
//!
//! Paths handed to and returned from the workspace are relative to the
//! repository root. The metadata directory is never listed.

use crate::METADATA_DIR;
use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::errors::TwigError;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [METADATA_DIR, ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every file of the working tree, sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        self.list_files_under(Path::new(""))
    }

    /// Files at or below `path`; a file lists as itself
    pub fn list_files_under(&self, path: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let root_path = self.path.join(path);

        if !root_path.exists() {
            return Err(TwigError::FileNotFound.into());
        }

        let mut files = WalkDir::new(&root_path)
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored_name(&entry.file_name().to_string_lossy()))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| self.relative_path(entry.path()))
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    /// Turn a user-supplied path (absolute or relative to the current
    /// directory) into one relative to the repository root
    ///
    /// Resolution is lexical, so paths of deleted files normalize too.
    pub fn normalize_path(&self, path: &Path) -> anyhow::Result<PathBuf> {
        let absolute_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.canonicalize()?.join(path)
        };

        let mut normalized = PathBuf::new();
        for component in absolute_path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    normalized.pop();
                }
                other => normalized.push(other.as_os_str()),
            }
        }

        normalized
            .strip_prefix(&self.path)
            .map(PathBuf::from)
            .with_context(|| format!("{} is outside the repository", path.display()))
    }

    fn is_ignored_name(name: &str) -> bool {
        IGNORED_PATHS.contains(&name)
    }

    fn relative_path(&self, path: &Path) -> Option<PathBuf> {
        path.strip_prefix(self.path.as_ref())
            .ok()
            .map(PathBuf::from)
    }

    pub fn is_file(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn is_dir(&self, dir_path: &Path) -> bool {
        self.path.join(dir_path).is_dir()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(Bytes::from(content))
    }

    /// Write a file, creating its parent directories and replacing a
    /// directory standing at its path
    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_dir() {
            std::fs::remove_dir_all(&full_path).with_context(|| {
                format!("Failed to remove existing directory: {:?}", file_path)
            })?;
        }

        if let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            self.make_directory(parent)?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&full_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Delete a file and any parent directories left empty; a missing file is fine
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        if let Some(parent) = file_path.parent() {
            self.prune_empty_dirs(parent)?;
        }

        Ok(())
    }

    fn prune_empty_dirs(&self, dir_path: &Path) -> anyhow::Result<()> {
        for ancestor in dir_path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }

            let full_path = self.path.join(ancestor);
            if !full_path.is_dir() || full_path.read_dir()?.next().is_some() {
                break;
            }

            std::fs::remove_dir(&full_path)
                .with_context(|| format!("Failed to remove directory: {:?}", ancestor))?;
        }

        Ok(())
    }

    // Deletions go first so that a directory being replaced by a file (or
    // the other way around) is gone before anything is written in its place.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for (file_path, _) in migration.actions_of(ActionType::Delete) {
            self.remove_file(file_path)?;
        }

        for action in [ActionType::Modify, ActionType::Add] {
            for (file_path, oid) in migration.actions_of(action) {
                let oid = oid
                    .as_ref()
                    .ok_or_else(|| anyhow::anyhow!("Invalid action and entry combination"))?;
                let data = migration.load_blob_data(oid)?;

                // a tracked file may stand where a directory of the target goes
                for ancestor in file_path.ancestors().skip(1) {
                    if !ancestor.as_os_str().is_empty() && self.is_file(ancestor) {
                        std::fs::remove_file(self.path.join(ancestor)).with_context(|| {
                            format!("Failed to remove file: {:?}", ancestor)
                        })?;
                    }
                }

                self.write_file(file_path, &data)?;
            }
        }

        Ok(())
    }

    fn make_directory(&self, dir_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(dir_path);

        if full_path.is_dir() {
            return Ok(());
        }

        std::fs::create_dir_all(&full_path)
            .with_context(|| format!("Failed to create directory: {:?}", dir_path))?;

        Ok(())
    }
}
