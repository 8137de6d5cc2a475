use crate::areas::database::CommitCache;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::conflict::render_conflict;
use crate::artifacts::merge::resolution::MergePlan;
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;

const ANCESTOR_NOTICE: &str = "Given branch is an ancestor of the current branch.";
const FAST_FORWARD_NOTICE: &str = "Current branch fast-forwarded.";
const CONFLICT_NOTICE: &str = "Encountered a merge conflict.";

impl Repository {
    pub async fn merge(&mut self, target: &str) -> anyhow::Result<()> {
        let current_branch = self.refs().current_branch_name()?;
        let (head_oid, head_commit) = self.head_commit()?;

        {
            let index = self.index();
            let mut index = index.lock().await;

            index.rehydrate()?;
            if &index.as_tree() != head_commit.tree() {
                return Err(TwigError::UncommittedChanges.into());
            }
        }

        let target_branch =
            BranchName::try_parse(target.to_string()).map_err(|_| TwigError::BranchNotFound)?;
        let target_oid = self
            .refs()
            .read_branch(&target_branch)?
            .ok_or(TwigError::BranchNotFound)?;

        if target_branch == current_branch {
            return Err(TwigError::MergeWithSelf.into());
        }

        let split_oid = self.find_split_point(&head_oid, &target_oid)?;

        if split_oid == target_oid {
            writeln!(self.writer(), "{}", ANCESTOR_NOTICE)?;
            return Ok(());
        }

        let target_commit = self.database().get_commit(&target_oid)?;

        if split_oid == head_oid {
            self.migrate_to(target_commit.tree().clone()).await?;
            self.refs().set_branch_head(&current_branch, &target_oid)?;

            writeln!(self.writer(), "{}", FAST_FORWARD_NOTICE)?;
            return Ok(());
        }

        let split_commit = self.database().get_commit(&split_oid)?;
        let plan = MergePlan::compute(split_commit.tree(), head_commit.tree(), target_commit.tree());

        // conflict blobs are stored only once the working tree is known to be safe
        let mut conflict_blobs = Vec::new();
        let merged_tree = plan.merged_tree(head_commit.tree(), |_, current, other| {
            let current = current
                .map(|oid| self.database().get_blob(oid))
                .transpose()?;
            let other = other.map(|oid| self.database().get_blob(oid)).transpose()?;

            let blob = Blob::new(render_conflict(current.as_deref(), other.as_deref()));
            let oid = blob.object_id()?;
            conflict_blobs.push(blob);

            Ok(oid)
        })?;

        {
            let index = self.index();
            let mut index = index.lock().await;

            let mut migration =
                Migration::for_merge(self, &mut index, head_commit.tree(), merged_tree.clone());
            migration.plan_changes()?;

            for blob in conflict_blobs {
                self.database().store(blob)?;
            }

            migration.apply_changes()?;
            index.write_updates()?;
        }

        let message = format!("Merged {} into {}.", target_branch, current_branch);
        self.write_commit(vec![head_oid, target_oid], merged_tree, message)?;

        if plan.has_conflicts() {
            writeln!(self.writer(), "{}", CONFLICT_NOTICE)?;
        }

        Ok(())
    }

    fn find_split_point(
        &self,
        head_oid: &ObjectId,
        target_oid: &ObjectId,
    ) -> anyhow::Result<ObjectId> {
        let commit_cache = CommitCache::new();
        let database = self.database();

        let finder =
            SplitPointFinder::new(|oid| commit_cache.get_or_load_slim_commit(database, oid));

        finder
            .find_split_point(head_oid, target_oid)?
            .ok_or_else(|| anyhow::anyhow!("no common ancestor found between HEAD and {target_oid}"))
    }
}
