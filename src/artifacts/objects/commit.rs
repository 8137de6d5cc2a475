//! Commit object
//!
//! Commits are immutable snapshots of the tracked file set. They contain:
//! - Parent commit ID(s): none for the initial commit, two for merges
//! - A timestamp fixed at creation
//! - A flat tree mapping repository-relative paths to blob IDs
//! - A message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! date <rfc3339 timestamp>
//! blob <blob-sha> <path>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable, with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::PathBuf;

/// Message of the commit created by `init`
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable fixing the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "TWIG_COMMIT_DATE";

/// Path to blob mapping, iterated in path order
pub type FileTree = BTreeMap<PathBuf, ObjectId>;

/// Timestamp for a new commit
///
/// Reads `TWIG_COMMIT_DATE` (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`) and falls
/// back to the current local time.
pub fn commit_timestamp_from_env() -> DateTime<FixedOffset> {
    std::env::var(COMMIT_DATE_ENV)
        .ok()
        .and_then(|date_str| {
            DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        })
        .unwrap_or_else(|| chrono::Local::now().fixed_offset())
}

/// Slim representation of a commit
///
/// Contains only what the commit graph traversal needs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    /// The commit's object ID
    pub oid: ObjectId,
    /// The commit's parent object IDs, primary parent first
    pub parents: Vec<ObjectId>,
    /// Commit timestamp
    pub timestamp: DateTime<FixedOffset>,
}

impl PartialOrd for SlimCommit {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SlimCommit {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| other.oid.cmp(&self.oid))
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs (empty for the initial commit, two for merge commits)
    parents: Vec<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    tree: FileTree,
    message: String,
}

impl Commit {
    /// Create a regular single-parent commit
    pub fn new(
        parent: ObjectId,
        tree: FileTree,
        timestamp: DateTime<FixedOffset>,
        message: String,
    ) -> Self {
        Commit {
            parents: vec![parent],
            timestamp,
            tree,
            message,
        }
    }

    /// Create a merge commit, `primary` being the head of the current branch
    pub fn new_merge(
        primary: ObjectId,
        secondary: ObjectId,
        tree: FileTree,
        timestamp: DateTime<FixedOffset>,
        message: String,
    ) -> Self {
        Commit {
            parents: vec![primary, secondary],
            timestamp,
            tree,
            message,
        }
    }

    /// The parentless commit every repository starts with
    ///
    /// It is the same in every repository: epoch timestamp, no files.
    pub fn initial() -> Self {
        Commit {
            parents: Vec::new(),
            timestamp: DateTime::UNIX_EPOCH.fixed_offset(),
            tree: FileTree::new(),
            message: INITIAL_COMMIT_MESSAGE.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.parents.get(1)
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn to_slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self.parents.clone(),
            timestamp: self.timestamp,
        }
    }

    fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![];

        for parent in &self.parents {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!(
            "date {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, false)
        ));
        for (path, oid) in &self.tree {
            lines.push(format!("blob {} {}", oid.as_ref(), path.to_string_lossy()));
        }

        lines
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let object_content = format!("{}\n\n{}", self.header_lines().join("\n"), self.message);

        Ok(with_header(self.object_type(), object_content.as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parents = Vec::new();
        let mut timestamp = None;
        let mut tree = FileTree::new();

        for line in header.lines() {
            if let Some(parent_oid) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent_oid.to_string())?);
            } else if let Some(date) = line.strip_prefix("date ") {
                timestamp = Some(
                    DateTime::parse_from_rfc3339(date)
                        .with_context(|| format!("Invalid commit object: bad date {date}"))?,
                );
            } else if let Some(entry) = line.strip_prefix("blob ") {
                let (oid, path) = entry
                    .split_once(' ')
                    .context("Invalid commit object: invalid blob line")?;
                tree.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {line:?}");
            }
        }

        Ok(Commit {
            parents,
            timestamp: timestamp.context("Invalid commit object: missing date line")?,
            tree,
            message: message.to_string(),
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
