use crate::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::TwigError;
use anyhow::Context;
use std::fs;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.metadata_path().exists() {
            return Err(TwigError::RepositoryExists.into());
        }

        for object_type in [ObjectType::Blob, ObjectType::Commit] {
            fs::create_dir_all(self.database().collection_path(object_type))
                .with_context(|| format!("Failed to create {} directory", object_type.collection()))?;
        }

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .twig/refs/heads directory")?;

        let initial_commit_oid = self
            .database()
            .put_commit(&Commit::initial())
            .context("Failed to store the initial commit")?;

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs()
            .set_branch_head(&default_branch, &initial_commit_oid)
            .context("Failed to create the default branch")?;
        self.refs()
            .set_current_branch(&default_branch)
            .context("Failed to create initial HEAD reference")?;

        let index = self.index();
        let mut index = index.lock().await;
        index
            .write_updates()
            .context("Failed to create .twig/index file")?;

        writeln!(
            self.writer(),
            "Initialized empty twig repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
