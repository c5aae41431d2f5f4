// Utility code in this module can become marked as dead code if it is not used in every single
// module in `tests/`. Thus we need to allow dead code here. See
// https://stackoverflow.com/a/67902444
#![allow(dead_code)]

use std::ffi::OsStr;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::Result;
use assert_cmd::Command;

pub const EFI_GLOBAL_VARIABLE: &str = "8be4df61-93ca-11d2-aa0d-00e098032b8c";

/// Attributes efivarfs prepends to every variable
/// (non-volatile, boot service and runtime access).
const ATTRIBUTES: [u8; 4] = [0x07, 0x00, 0x00, 0x00];

/// A fake system: an efivarfs directory, a by-partuuid directory and the
/// device nodes the symlinks point to.
pub struct FakeSystem {
    pub efivars: PathBuf,
    pub by_partuuid: PathBuf,
    pub dev: PathBuf,
}

impl FakeSystem {
    pub fn new(root: &Path) -> Result<Self> {
        let system = Self {
            efivars: root.join("efivars"),
            by_partuuid: root.join("by-partuuid"),
            dev: root.join("dev"),
        };
        fs::create_dir(&system.efivars)?;
        fs::create_dir(&system.by_partuuid)?;
        fs::create_dir(&system.dev)?;
        Ok(system)
    }

    pub fn write_variable(&self, name: &str, data: &[u8]) -> Result<()> {
        let mut contents = ATTRIBUTES.to_vec();
        contents.extend_from_slice(data);
        fs::write(
            self.efivars.join(format!("{name}-{EFI_GLOBAL_VARIABLE}")),
            contents,
        )?;
        Ok(())
    }

    pub fn set_boot_current(&self, index: u16) -> Result<()> {
        self.write_variable("BootCurrent", &index.to_le_bytes())
    }

    pub fn add_boot_entry(&self, index: u16, description: &str, device_path: &[u8]) -> Result<()> {
        self.write_variable(&format!("Boot{index:04X}"), &load_option(description, device_path))
    }

    /// Create a device node and its by-partuuid symlink. Returns the device path.
    pub fn add_partition(&self, device: &str, partuuid: &str) -> Result<PathBuf> {
        let device_path = self.dev.join(device);
        fs::write(&device_path, b"")?;
        symlink(&device_path, self.by_partuuid.join(partuuid))?;
        Ok(fs::canonicalize(device_path)?)
    }
}

/// An `EFI_LOAD_OPTION` without the efivarfs attributes.
pub fn load_option(description: &str, device_path: &[u8]) -> Vec<u8> {
    const LOAD_OPTION_ACTIVE: u32 = 0x0000_0001;

    let mut data = LOAD_OPTION_ACTIVE.to_le_bytes().to_vec();
    data.extend_from_slice(&u16::try_from(device_path.len()).unwrap().to_le_bytes());
    for unit in description.encode_utf16().chain([0]) {
        data.extend_from_slice(&unit.to_le_bytes());
    }
    data.extend_from_slice(device_path);
    data
}

pub fn device_path_node(device_type: u8, sub_type: u8, payload: &[u8]) -> Vec<u8> {
    let mut node = vec![device_type, sub_type];
    node.extend_from_slice(&u16::try_from(payload.len() + 4).unwrap().to_le_bytes());
    node.extend_from_slice(payload);
    node
}

/// ACPI device path node for PNP0A03 (PCI root bridge).
pub fn acpi_node() -> Vec<u8> {
    device_path_node(0x02, 0x01, &[0xD0, 0x41, 0x03, 0x0A, 0x00, 0x00, 0x00, 0x00])
}

/// Media file path node for `\EFI\BOOT\BOOTX64.EFI`.
pub fn file_path_node() -> Vec<u8> {
    let mut payload = Vec::new();
    for unit in r"\EFI\BOOT\BOOTX64.EFI".encode_utf16().chain([0]) {
        payload.extend_from_slice(&unit.to_le_bytes());
    }
    device_path_node(0x04, 0x04, &payload)
}

pub fn hard_drive_node(partition_number: u32, signature: [u8; 16], signature_type: u8) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(&partition_number.to_le_bytes());
    payload.extend_from_slice(&2048u64.to_le_bytes());
    payload.extend_from_slice(&1_048_576u64.to_le_bytes());
    payload.extend_from_slice(&signature);
    payload.push(signature_type);
    payload.push(signature_type);
    device_path_node(0x04, 0x01, &payload)
}

pub fn end_node() -> Vec<u8> {
    vec![0x7F, 0xFF, 0x04, 0x00]
}

/// Call the `detect-efi-boot-partition` command against a fake system.
pub fn detect(system: &FakeSystem, args: impl IntoIterator<Item = impl AsRef<OsStr>>) -> Result<Output> {
    let mut cmd = Command::cargo_bin("detect-efi-boot-partition")?;
    let output = cmd
        // Keep diagnostics free of color escapes for snapshot tests.
        .env("TERM", "dumb")
        .env("NO_COLOR", "1")
        .arg("--efivars")
        .arg(&system.efivars)
        .arg("--partuuid-dir")
        .arg(&system.by_partuuid)
        .args(args)
        .output()?;

    // Print debugging output.
    // This is a weird hack to make cargo test capture the output.
    // See https://github.com/rust-lang/rust/issues/12309
    print!("{}", String::from_utf8(output.stdout.clone())?);
    print!("{}", String::from_utf8(output.stderr.clone())?);

    Ok(output)
}
