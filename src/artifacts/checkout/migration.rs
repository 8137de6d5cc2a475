//! Tree-to-tree migration of the working directory and index
//!
//! A migration is planned from the current commit's tree to a target tree,
//! then applied in two steps: the workspace first, the index second.
//!
//! ## Untracked files
//!
//! A working file is untracked when the current commit does not track it.
//! Planning fails with [`TwigError::UntrackedFileInTheWay`] when the target
//! would write over such a file, over a directory holding one, or below a
//! path where one stands.
//!
//! ## Scope
//!
//! - `for_snapshot` rewrites every path of the target tree, restoring files
//!   the current commit and the target share.
//! - `for_merge` writes only the paths whose blob changes, leaving the rest
//!   of the working tree alone.

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::FileTree;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use anyhow::Context;
use bytes::Bytes;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Type of file system action required by a migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Create a file the current tree does not track
    Add,
    /// Delete a tracked file absent from the target
    Delete,
    /// Rewrite a tracked file
    Modify,
}

/// Planned actions grouped by type, each in path order
pub type ActionsSet = HashMap<ActionType, Vec<(PathBuf, Option<ObjectId>)>>;

pub struct Migration<'r> {
    repository: &'r Repository,
    index: &'r mut Index,
    current_tree: &'r FileTree,
    target_tree: FileTree,
    /// Rewrite paths whose blob is the same on both sides
    restore_unchanged: bool,
    actions: ActionsSet,
    untracked: BTreeSet<PathBuf>,
}

impl<'r> Migration<'r> {
    pub fn for_snapshot(
        repository: &'r Repository,
        index: &'r mut Index,
        current_tree: &'r FileTree,
        target_tree: FileTree,
    ) -> Self {
        Self::new(repository, index, current_tree, target_tree, true)
    }

    pub fn for_merge(
        repository: &'r Repository,
        index: &'r mut Index,
        current_tree: &'r FileTree,
        merged_tree: FileTree,
    ) -> Self {
        Self::new(repository, index, current_tree, merged_tree, false)
    }

    fn new(
        repository: &'r Repository,
        index: &'r mut Index,
        current_tree: &'r FileTree,
        target_tree: FileTree,
        restore_unchanged: bool,
    ) -> Self {
        let actions = HashMap::from([
            (ActionType::Add, Vec::new()),
            (ActionType::Delete, Vec::new()),
            (ActionType::Modify, Vec::new()),
        ]);

        Self {
            repository,
            index,
            current_tree,
            target_tree,
            restore_unchanged,
            actions,
            untracked: BTreeSet::new(),
        }
    }

    pub fn actions_of(&self, action: ActionType) -> &[(PathBuf, Option<ObjectId>)] {
        self.actions
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Paths of untracked files the target would clobber, filled by planning
    pub fn untracked(&self) -> &BTreeSet<PathBuf> {
        &self.untracked
    }

    pub fn apply_changes(&mut self) -> anyhow::Result<()> {
        self.plan_changes()?;
        self.update_workspace()?;
        self.update_index();

        Ok(())
    }

    /// Compute the actions and check for untracked files without touching disk
    pub fn plan_changes(&mut self) -> anyhow::Result<()> {
        for action in self.actions.values_mut() {
            action.clear();
        }
        self.untracked.clear();

        for path in self.current_tree.keys() {
            if !self.target_tree.contains_key(path) {
                self.record_change(ActionType::Delete, path, None);
            }
        }

        let target_entries = self
            .target_tree
            .iter()
            .map(|(path, oid)| (path.clone(), oid.clone()))
            .collect::<Vec<_>>();

        for (path, oid) in target_entries {
            match self.current_tree.get(&path) {
                None => {
                    self.check_for_untracked(&path);
                    self.record_change(ActionType::Add, &path, Some(oid));
                }
                Some(current_oid) if *current_oid != oid || self.restore_unchanged => {
                    self.record_change(ActionType::Modify, &path, Some(oid));
                }
                Some(_) => {}
            }
        }

        if !self.untracked.is_empty() {
            return Err(TwigError::UntrackedFileInTheWay.into());
        }

        Ok(())
    }

    fn record_change(&mut self, action: ActionType, path: &Path, oid: Option<ObjectId>) {
        self.actions
            .entry(action)
            .or_default()
            .push((path.to_path_buf(), oid));
    }

    fn check_for_untracked(&mut self, path: &Path) {
        let repository = self.repository;
        let workspace = repository.workspace();

        if workspace.is_file(path) {
            self.untracked.insert(path.to_path_buf());
        }

        if workspace.is_dir(path) {
            let files = workspace.list_files_under(path).unwrap_or_default();
            self.untracked.extend(
                files
                    .into_iter()
                    .filter(|file| !self.current_tree.contains_key(file)),
            );
        }

        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            if workspace.is_file(ancestor) && !self.current_tree.contains_key(ancestor) {
                self.untracked.insert(ancestor.to_path_buf());
            }
        }
    }

    fn update_workspace(&self) -> anyhow::Result<()> {
        self.repository.workspace().apply_migration(self)
    }

    fn update_index(&mut self) {
        self.index.replace_with(&self.target_tree);
    }

    pub fn load_blob_data(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        self.repository
            .database()
            .get_blob(object_id)
            .with_context(|| format!("Failed to load blob {}", object_id))
    }
}
