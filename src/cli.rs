use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use efi_boot_partition::boot_entry::current_boot_partuuid;
use efi_boot_partition::detect_efi_boot_partition;
use efi_boot_partition::efivars::{Efivars, DEFAULT_EFIVARS_DIR};
use efi_boot_partition::partition::{ByPartuuidDirectory, DEFAULT_PARTUUID_DIR};

/// The default log level.
///
/// 1 corresponds to the level WARN.
const DEFAULT_LOG_LEVEL: usize = 1;

/// Find the EFI boot partition and print its device name
#[derive(Parser)]
#[command(version)]
pub struct Cli {
    /// Don't show error messages
    #[arg(short, long)]
    quiet: bool,
    /// Verbose mode (-v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// efivarfs mountpoint
    #[arg(long, value_name = "DIR", default_value = DEFAULT_EFIVARS_DIR)]
    efivars: PathBuf,
    /// Directory of PARTUUID symlinks to block devices
    #[arg(long, value_name = "DIR", default_value = DEFAULT_PARTUUID_DIR)]
    partuuid_dir: PathBuf,
    /// Print the PARTUUID of the boot partition instead of its device
    #[arg(long)]
    partuuid: bool,
}

impl Cli {
    pub fn call(self, module: &str) {
        stderrlog::new()
            .module(module)
            .module("efi_boot_partition")
            .show_level(false)
            .quiet(self.quiet)
            .verbosity(DEFAULT_LOG_LEVEL + usize::from(self.verbose))
            .init()
            .expect("Failed to setup logger.");

        match self.run() {
            Ok(output) => println!("{output}"),
            Err(e) => {
                log::error!("{e:#}");
                std::process::exit(1);
            }
        }
    }

    fn run(&self) -> Result<String> {
        let efivars = Efivars::new(&self.efivars);
        if !efivars.is_available() {
            bail!("No EFI variables available");
        }

        if self.partuuid {
            return Ok(current_boot_partuuid(&efivars)?.to_string());
        }

        let lookup = ByPartuuidDirectory::new(&self.partuuid_dir);
        let device = detect_efi_boot_partition(&efivars, &lookup)?;
        Ok(device.display().to_string())
    }
}
