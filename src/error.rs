use std::io;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can stop the boot partition from being resolved.
///
/// None of these are recovered from: they propagate unchanged up to the CLI.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot access EFI variable {name}")]
    VariableUnavailable {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error(
        "Boundary exceeded in EFI variable {variable} (EFI bug?): {required} bytes required at offset {offset}, {available} available"
    )]
    TruncatedStream {
        variable: String,
        offset: usize,
        required: usize,
        available: usize,
    },

    #[error(
        "Invalid device path node at offset {offset} in EFI variable {variable}: length {length} is less than 4"
    )]
    MalformedDevicePath {
        variable: String,
        offset: usize,
        length: u16,
    },

    #[error("Partition not found in device path of {variable}")]
    PartitionNotInDevicePath { variable: String },

    #[error("Partition not found (PARTUUID={partuuid})")]
    PartitionNotFound { partuuid: String },

    #[error("Failed to look up {key}={value}")]
    PartitionLookup {
        key: &'static str,
        value: String,
        #[source]
        source: io::Error,
    },
}
