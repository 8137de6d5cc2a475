use crate::areas::repository::Repository;
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::TwigError;
use anyhow::Context;

/// Represents a revision expression identifying a commit.
///
/// Supports:
/// - `HEAD` and its alias `@`: the head of the active branch
/// - Full or abbreviated commit IDs (at least 4 hex characters)
/// - Parent notation: `<revision>^` (e.g., `HEAD^`, `abc123^`)
/// - Ancestor notation: `<revision>~<n>` following first parents
///
/// Every failure to resolve a revision surfaces as "No commit with that id exists."
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Head,
    CommitId(String),
    Parent(Box<Revision>),
    Ancestor(Box<Revision>, usize),
}

impl Revision {
    pub fn try_parse(revision: &str) -> anyhow::Result<Self> {
        let revision = REF_ALIASES.get(revision).copied().unwrap_or(revision);

        if let Some(captures) = regex::Regex::new(PARENT_REGEX)?.captures(revision) {
            return Ok(Revision::Parent(Box::new(Self::try_parse(&captures[1])?)));
        }

        if let Some(captures) = regex::Regex::new(ANCESTOR_REGEX)?.captures(revision) {
            let generations = captures[2]
                .parse::<usize>()
                .with_context(|| format!("invalid ancestor count in {revision}"))?;
            return Ok(Revision::Ancestor(
                Box::new(Self::try_parse(&captures[1])?),
                generations,
            ));
        }

        if revision == "HEAD" {
            Ok(Revision::Head)
        } else if !revision.is_empty() && revision.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Revision::CommitId(revision.to_ascii_lowercase()))
        } else {
            Err(TwigError::CommitNotFound.into())
        }
    }

    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        match self {
            Revision::Head => repository.refs().resolve_head(),
            Revision::CommitId(prefix) => {
                let matches = repository
                    .database()
                    .find_objects_by_prefix(ObjectType::Commit, prefix)?;

                match matches.as_slice() {
                    [oid] => Ok(oid.clone()),
                    _ => Err(TwigError::CommitNotFound.into()),
                }
            }
            Revision::Parent(base) => Self::resolve_parent(base.resolve(repository)?, repository),
            Revision::Ancestor(base, generations) => {
                let mut oid = base.resolve(repository)?;
                for _ in 0..*generations {
                    oid = Self::resolve_parent(oid, repository)?;
                }

                Ok(oid)
            }
        }
    }

    fn resolve_parent(oid: ObjectId, repository: &Repository) -> anyhow::Result<ObjectId> {
        repository
            .database()
            .get_commit(&oid)?
            .parent()
            .cloned()
            .ok_or_else(|| TwigError::CommitNotFound.into())
    }
}
