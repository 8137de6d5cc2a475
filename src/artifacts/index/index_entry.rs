//! Index entry representation
//!
//! Each entry maps a repository-relative path to the blob staged for it.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Size of a binary object ID
const OID_SIZE: usize = 20;

/// Maximum path length supported in index entries
const MAX_PATH_SIZE: usize = u16::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// File path relative to repository root
    pub name: PathBuf,
    /// ID of the staged blob
    pub oid: ObjectId,
}

impl IndexEntry {
    /// Every directory containing the entry, innermost last
    pub fn parent_dirs(&self) -> Vec<&Path> {
        let mut dirs = self
            .name
            .ancestors()
            .skip(1)
            .filter(|ancestor| !ancestor.as_os_str().is_empty())
            .collect::<Vec<_>>();
        dirs.reverse();
        dirs
    }

    pub(crate) fn serialize(&self) -> anyhow::Result<Bytes> {
        let path = self.name.to_string_lossy().replace('\\', "/");
        if path.len() > MAX_PATH_SIZE {
            anyhow::bail!("path too long for the index: {path}");
        }

        let mut entry_bytes = Vec::with_capacity(OID_SIZE + 2 + path.len());
        self.oid.write_h40_to(&mut entry_bytes)?;
        entry_bytes.write_u16::<byteorder::NetworkEndian>(path.len() as u16)?;
        entry_bytes.write_all(path.as_bytes())?;

        Ok(Bytes::from(entry_bytes))
    }

    pub(crate) fn read_from(reader: &mut Checksum) -> anyhow::Result<Self> {
        let oid_bytes = reader.read(OID_SIZE)?;
        let oid = ObjectId::read_h40_from(&mut oid_bytes.as_ref())?;

        let path_size = byteorder::NetworkEndian::read_u16(&reader.read(2)?) as usize;
        let path = String::from_utf8(reader.read(path_size)?.to_vec())
            .context("Index entry path is not valid UTF-8")?;

        Ok(IndexEntry::new(PathBuf::from(path), oid))
    }
}
