//! The boot entry the firmware booted from: `BootCurrent` and `Boot####`.

use log::{debug, info};

use crate::device_path;
use crate::efivars::{boot_entry_variable_name, efi_global_variable_name, VariableStore};
use crate::error::{Error, Result};
use crate::reader::ByteReader;
use crate::signature::PartUuid;

/// Read the index of the boot entry used for the current boot.
pub fn read_boot_current(store: &impl VariableStore) -> Result<u16> {
    let variable = store.read(&efi_global_variable_name("BootCurrent"))?;
    let mut reader = variable.reader();
    reader.read_u32_le()?; // variable attributes
    reader.read_u16_le()
}

/// Fixed part of an `EFI_LOAD_OPTION`, up to the device path list.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LoadOption {
    pub attributes: u32,
    /// Not trusted: the device path list is walked until its end node instead.
    pub file_path_list_length: u16,
    pub description: String,
}

impl LoadOption {
    /// Read the load option header, leaving `reader` at the first device path
    /// node. Expects the efivarfs attributes field to be consumed already.
    pub fn read(reader: &mut ByteReader) -> Result<Self> {
        let attributes = reader.read_u32_le()?;
        let file_path_list_length = reader.read_u16_le()?;

        let mut description = Vec::new();
        loop {
            match reader.read_u16_le()? {
                0 => break,
                unit => description.push(unit),
            }
        }

        Ok(Self {
            attributes,
            file_path_list_length,
            description: String::from_utf16_lossy(&description),
        })
    }
}

/// Find the PARTUUID of the partition the current boot entry points to.
pub fn current_boot_partuuid(store: &impl VariableStore) -> Result<PartUuid> {
    let boot_current = read_boot_current(store)?;
    debug!("BootCurrent is {boot_current:04X}");

    let variable = store.read(&boot_entry_variable_name(boot_current))?;
    let mut reader = variable.reader();
    reader.read_u32_le()?; // variable attributes

    let load_option = LoadOption::read(&mut reader)?;
    info!(
        "Current boot entry is Boot{boot_current:04X} ({})",
        load_option.description
    );

    let signature = device_path::find_partition_signature(&mut reader)?.ok_or_else(|| {
        Error::PartitionNotInDevicePath {
            variable: variable.name().to_owned(),
        }
    })?;
    debug!("Boot partition signature: {signature:?}");

    Ok(signature.partuuid())
}
