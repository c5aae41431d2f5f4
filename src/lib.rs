//! Find the partition the machine was booted from under UEFI.
//!
//! The firmware records the boot entry it used in `BootCurrent`. That entry's
//! device path carries a hard drive node with the partition's MBR or GPT
//! signature, which is turned into a PARTUUID and looked up among the block
//! devices of the running system.

use std::path::PathBuf;

use log::debug;

pub mod boot_entry;
pub mod device_path;
pub mod efivars;
pub mod error;
pub mod partition;
pub mod reader;
pub mod signature;

pub use error::{Error, Result};

use efivars::VariableStore;
use partition::{LookupKey, PartitionLookup};

/// Resolve the device node of the partition the current boot entry points to.
pub fn detect_efi_boot_partition(
    store: &impl VariableStore,
    lookup: &impl PartitionLookup,
) -> Result<PathBuf> {
    let partuuid = boot_entry::current_boot_partuuid(store)?;
    debug!("Boot partition has PARTUUID {partuuid}");

    lookup
        .find(LookupKey::PartUuid, partuuid.as_str())?
        .ok_or_else(|| Error::PartitionNotFound {
            partuuid: partuuid.to_string(),
        })
}
