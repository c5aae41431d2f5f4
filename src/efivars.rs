//! Read access to EFI variables as exposed by efivarfs.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::trace;

use crate::error::{Error, Result};
use crate::reader::ByteReader;

/// Vendor GUID of the variables defined by the UEFI specification
/// (`EFI_GLOBAL_VARIABLE`).
pub const EFI_GLOBAL_VARIABLE: &str = "8be4df61-93ca-11d2-aa0d-00e098032b8c";

/// Where efivarfs is usually mounted.
pub const DEFAULT_EFIVARS_DIR: &str = "/sys/firmware/efi/efivars";

/// Full efivarfs name of a global variable, e.g. `BootCurrent-8be4df61-...`.
pub fn efi_global_variable_name(name: &str) -> String {
    format!("{name}-{EFI_GLOBAL_VARIABLE}")
}

/// Full efivarfs name of the `Boot####` load option for a boot index.
pub fn boot_entry_variable_name(index: u16) -> String {
    efi_global_variable_name(&format!("Boot{index:04X}"))
}

/// Raw contents of one variable, including the leading attributes field
/// efivarfs prepends.
pub struct Variable {
    name: String,
    data: Vec<u8>,
}

impl Variable {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reader(&self) -> ByteReader<'_> {
        ByteReader::new(&self.name, &self.data)
    }
}

/// Source of EFI variables.
pub trait VariableStore {
    /// Read a variable by its full name (including the vendor GUID).
    fn read(&self, name: &str) -> Result<Variable>;
}

/// Variables read from an efivarfs mountpoint.
pub struct Efivars {
    dir: PathBuf,
}

impl Efivars {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Whether EFI variables can be accessed at all.
    pub fn is_available(&self) -> bool {
        self.dir.is_dir()
    }
}

impl Default for Efivars {
    fn default() -> Self {
        Self::new(DEFAULT_EFIVARS_DIR)
    }
}

impl VariableStore for Efivars {
    fn read(&self, name: &str) -> Result<Variable> {
        let path = self.dir.join(name);
        trace!("Reading EFI variable {path:?}");

        let unavailable = |source| Error::VariableUnavailable {
            name: name.to_owned(),
            source,
        };
        // The file is closed when it goes out of scope, on error paths too.
        let mut file = File::open(&path).map_err(unavailable)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data).map_err(unavailable)?;

        Ok(Variable::new(name, data))
    }
}
