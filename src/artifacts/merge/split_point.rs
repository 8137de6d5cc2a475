//! Split point finder for merges
//!
//! The split point of two commits is the common ancestor a three-way merge
//! uses as its base.
//!
//! ## Algorithm Overview
//!
//! ### Phase 1: Mark ancestors
//!
//! Both commits are walked through their parent edges with an explicit
//! queue. Every reached commit is tagged with the side(s) it was reached
//! from; a commit is expanded at most once per side, so shared history is
//! never walked twice. Commits tagged from both sides are common ancestors.
//!
//! ### Phase 2: Drop dominated ancestors
//!
//! A common ancestor that is a parent of another common ancestor is never
//! the best base: the path from it to the merged commits passes through
//! that child. Every commit between a common ancestor and one of its common
//! descendants is itself common, so checking direct parents is enough.
//!
//! ### Phase 3: Choose
//!
//! Among the remaining candidates the latest timestamp wins; ties go to the
//! lexicographically smallest commit ID.
//!
//! Phase 2 runs before the timestamp rule on purpose. Picking the latest
//! timestamp across every common ancestor would let an older root win
//! whenever commits share a timestamp (fixed commit dates do this), and
//! would let a skewed clock pick a dominated ancestor.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Debug logging compiled in with the `debug_merge` feature flag
///
/// # Usage
/// ```rust,ignore
/// debug_log!("Processing commit {}", commit_id);
/// ```
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const FROM_CURRENT = 0b01;
        const FROM_TARGET = 0b10;
        const FROM_BOTH = Self::FROM_CURRENT.bits() | Self::FROM_TARGET.bits();
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::FROM_CURRENT) {
            flags.push("CURRENT");
        }
        if self.contains(VisitState::FROM_TARGET) {
            flags.push("TARGET");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Walks the commit graph through a loader function
///
/// The loader makes the finder independent of storage: the repository
/// passes one backed by the object database and a commit cache, tests pass
/// one backed by an in-memory graph.
pub struct SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Every commit reachable from `commit_id` through parent edges,
    /// `commit_id` included
    pub fn ancestors_of(&self, commit_id: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let states = self.mark_ancestors(&[(commit_id, VisitState::FROM_CURRENT)])?;
        Ok(states.into_keys().collect())
    }

    /// Commits reachable from both `current_id` and `target_id`
    pub fn common_ancestors(
        &self,
        current_id: &ObjectId,
        target_id: &ObjectId,
    ) -> anyhow::Result<Vec<SlimCommit>> {
        let states = self.mark_ancestors(&[
            (current_id, VisitState::FROM_CURRENT),
            (target_id, VisitState::FROM_TARGET),
        ])?;

        debug_log!(
            "Ancestor states: {}",
            states
                .iter()
                .map(|(oid, state)| format!("{}: {}", oid.to_short_oid(), state))
                .collect::<Vec<_>>()
                .join(", ")
        );

        states
            .into_iter()
            .filter(|(_, state)| state.contains(VisitState::FROM_BOTH))
            .map(|(oid, _)| (self.commit_loader)(&oid))
            .collect()
    }

    /// The merge base of `current_id` and `target_id`, `None` for unrelated histories
    pub fn find_split_point(
        &self,
        current_id: &ObjectId,
        target_id: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let common_ancestors = self.common_ancestors(current_id, target_id)?;

        let dominated = common_ancestors
            .iter()
            .flat_map(|commit| commit.parents.iter())
            .collect::<HashSet<_>>();

        let best = common_ancestors
            .iter()
            .filter(|commit| !dominated.contains(&commit.oid))
            .max();

        debug_log!(
            "Split point of {} and {}: {:?} out of {} common ancestors",
            current_id.to_short_oid(),
            target_id.to_short_oid(),
            best.map(|commit| commit.oid.to_short_oid()),
            common_ancestors.len()
        );

        Ok(best.map(|commit| commit.oid.clone()))
    }

    // Breadth-first walk from every start at once; a commit is queued again
    // only when it gains a side it was not reached from before.
    fn mark_ancestors(
        &self,
        starts: &[(&ObjectId, VisitState)],
    ) -> anyhow::Result<HashMap<ObjectId, VisitState>> {
        let mut ancestors_states = HashMap::<ObjectId, VisitState>::new();
        let mut queue = VecDeque::new();

        for (commit_id, state) in starts {
            let entry = ancestors_states
                .entry((*commit_id).clone())
                .or_insert(VisitState::NONE);
            *entry |= *state;
            queue.push_back(((*commit_id).clone(), *state));
        }

        while let Some((commit_id, state)) = queue.pop_front() {
            let commit = (self.commit_loader)(&commit_id)?;

            for parent_id in commit.parents {
                let parent_state = ancestors_states
                    .get(&parent_id)
                    .copied()
                    .unwrap_or(VisitState::NONE);

                if parent_state.contains(state) {
                    continue;
                }

                let new_sides = state - parent_state;
                ancestors_states.insert(parent_id.clone(), parent_state | state);
                queue.push_back((parent_id, new_sides));
            }
        }

        Ok(ancestors_states)
    }
}
