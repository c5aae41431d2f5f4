//! Partition signatures as found in hard drive device path nodes, and their
//! textual PARTUUID form.

use std::fmt;

/// The signature type byte of a hard drive device path node.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SignatureType {
    /// 32-bit MBR disk signature.
    Mbr,
    /// GPT unique partition GUID.
    Gpt,
}

impl SignatureType {
    /// Returns `None` for "no signature" (0) and for values the firmware
    /// reserves for other uses.
    pub fn from_raw(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Mbr),
            2 => Some(Self::Gpt),
            _ => None,
        }
    }
}

/// A decoded partition signature.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PartitionSignature {
    Mbr {
        disk_signature: u32,
        partition_number: u32,
    },
    Gpt(Guid),
}

impl PartitionSignature {
    /// Interpret the 16 signature bytes according to the signature type.
    ///
    /// For MBR, only the first four bytes are meaningful.
    pub fn decode(signature: &[u8; 16], signature_type: u8, partition_number: u32) -> Option<Self> {
        match SignatureType::from_raw(signature_type)? {
            SignatureType::Mbr => {
                let [a, b, c, d, ..] = *signature;
                Some(Self::Mbr {
                    disk_signature: u32::from_le_bytes([a, b, c, d]),
                    partition_number,
                })
            }
            SignatureType::Gpt => Some(Self::Gpt(Guid::from_bytes(*signature))),
        }
    }

    pub fn partuuid(&self) -> PartUuid {
        PartUuid(self.to_string())
    }
}

impl fmt::Display for PartitionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mbr {
                disk_signature,
                partition_number,
            } => write!(f, "{disk_signature:08x}-{partition_number:02}"),
            Self::Gpt(guid) => fmt::Display::fmt(guid, f),
        }
    }
}

/// A GUID in its on-disk byte order.
///
/// The first three fields are stored little-endian and the remaining eight
/// bytes as-is, so the text form reorders the first eight bytes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Guid([u8; 16]);

impl Guid {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        let time_low = u32::from_le_bytes([b[0], b[1], b[2], b[3]]);
        let time_mid = u16::from_le_bytes([b[4], b[5]]);
        let time_high = u16::from_le_bytes([b[6], b[7]]);
        let clock_seq = u16::from_be_bytes([b[8], b[9]]);
        let node_high = u16::from_be_bytes([b[10], b[11]]);
        let node_low = u32::from_be_bytes([b[12], b[13], b[14], b[15]]);

        write!(
            f,
            "{time_low:08x}-{time_mid:04x}-{time_high:04x}-{clock_seq:04x}-{node_high:04x}{node_low:08x}"
        )
    }
}

/// Canonical identifier of a partition, as used by `/dev/disk/by-partuuid`
/// and blkid's `PARTUUID` tag.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PartUuid(String);

impl PartUuid {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
