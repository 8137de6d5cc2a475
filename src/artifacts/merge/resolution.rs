//! Per-path three-way merge
//!
//! Each path of the union of the split (S), current (C) and other (O) trees
//! is resolved on its own. Absence from a tree is a value like any other:
//!
//! | S vs C    | S vs O    | C vs O | result          |
//! |-----------|-----------|--------|-----------------|
//! | any       | any       | equal  | keep C          |
//! | unchanged | changed   |        | take O          |
//! | changed   | unchanged |        | keep C          |
//! | changed   | changed   | differ | conflict        |
//!
//! "take O" with O absent deletes the path; "keep C" with C absent leaves it
//! absent. The resulting tree is built fresh from the three input trees,
//! which are never modified.

use crate::artifacts::objects::commit::FileTree;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// The current version stays as it is (possibly absent)
    Keep,
    /// The other branch's version replaces the current one
    Take(ObjectId),
    /// The path is removed from the working tree and the index
    Delete,
    /// Both sides changed the path differently
    Conflict {
        current: Option<ObjectId>,
        other: Option<ObjectId>,
    },
}

impl MergeAction {
    pub fn resolve(
        split: Option<&ObjectId>,
        current: Option<&ObjectId>,
        other: Option<&ObjectId>,
    ) -> Self {
        if current == other {
            MergeAction::Keep
        } else if split == current {
            match other {
                Some(oid) => MergeAction::Take(oid.clone()),
                None => MergeAction::Delete,
            }
        } else if split == other {
            MergeAction::Keep
        } else {
            MergeAction::Conflict {
                current: current.cloned(),
                other: other.cloned(),
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    actions: BTreeMap<PathBuf, MergeAction>,
}

impl MergePlan {
    pub fn compute(split: &FileTree, current: &FileTree, other: &FileTree) -> Self {
        let paths = split
            .keys()
            .chain(current.keys())
            .chain(other.keys())
            .collect::<BTreeSet<_>>();

        let actions = paths
            .into_iter()
            .map(|path| {
                let action = MergeAction::resolve(split.get(path), current.get(path), other.get(path));
                (path.clone(), action)
            })
            .collect();

        MergePlan { actions }
    }

    pub fn actions(&self) -> impl Iterator<Item = (&Path, &MergeAction)> {
        self.actions
            .iter()
            .map(|(path, action)| (path.as_path(), action))
    }

    pub fn action_for(&self, path: &Path) -> Option<&MergeAction> {
        self.actions.get(path)
    }

    pub fn has_conflicts(&self) -> bool {
        self.conflicts().next().is_some()
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &Path> {
        self.actions().filter_map(|(path, action)| match action {
            MergeAction::Conflict { .. } => Some(path),
            _ => None,
        })
    }

    /// Tree of the merge result
    ///
    /// `resolve_conflict` receives each conflicted path with both sides and
    /// returns the blob to record for it.
    pub fn merged_tree<F>(&self, current: &FileTree, mut resolve_conflict: F) -> anyhow::Result<FileTree>
    where
        F: FnMut(&Path, Option<&ObjectId>, Option<&ObjectId>) -> anyhow::Result<ObjectId>,
    {
        let mut merged = FileTree::new();

        for (path, action) in &self.actions {
            match action {
                MergeAction::Keep => {
                    if let Some(oid) = current.get(path) {
                        merged.insert(path.clone(), oid.clone());
                    }
                }
                MergeAction::Take(oid) => {
                    merged.insert(path.clone(), oid.clone());
                }
                MergeAction::Delete => {}
                MergeAction::Conflict { current, other } => {
                    let oid = resolve_conflict(path, current.as_ref(), other.as_ref())?;
                    merged.insert(path.clone(), oid);
                }
            }
        }

        Ok(merged)
    }
}
