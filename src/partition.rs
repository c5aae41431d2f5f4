//! Resolving a partition identifier to a block device.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// Where udev maintains its PARTUUID symlinks.
pub const DEFAULT_PARTUUID_DIR: &str = "/dev/disk/by-partuuid";

/// Tag a partition is searched by.
#[non_exhaustive]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LookupKey {
    PartUuid,
}

impl LookupKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PartUuid => "PARTUUID",
        }
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index over the block devices currently visible to the system.
pub trait PartitionLookup {
    /// Find the device carrying `key=value`, if there is one.
    fn find(&self, key: LookupKey, value: &str) -> Result<Option<PathBuf>>;
}

/// Lookup through the `/dev/disk/by-partuuid` symlink directory.
pub struct ByPartuuidDirectory {
    dir: PathBuf,
}

impl ByPartuuidDirectory {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl Default for ByPartuuidDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_PARTUUID_DIR)
    }
}

impl PartitionLookup for ByPartuuidDirectory {
    fn find(&self, key: LookupKey, value: &str) -> Result<Option<PathBuf>> {
        // The value ends up as a file name.
        if value.is_empty() || value.contains('/') {
            return Ok(None);
        }

        let link = self.dir.join(value);
        debug!("Looking up {key}={value} at {link:?}");
        match fs::canonicalize(&link) {
            Ok(device) => Ok(Some(device)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::PartitionLookup {
                key: key.as_str(),
                value: value.to_owned(),
                source,
            }),
        }
    }
}
