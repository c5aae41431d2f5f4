//! Walking the device path list of a boot entry.

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::reader::ByteReader;
use crate::signature::PartitionSignature;

pub const END_DEVICE_PATH_TYPE: u8 = 0x7F;
pub const END_ENTIRE_DEVICE_PATH_SUBTYPE: u8 = 0xFF;
pub const MEDIA_DEVICE_PATH: u8 = 0x04;
pub const MEDIA_HARDDRIVE_DP: u8 = 0x01;

/// Size of the type, subtype and length fields every node starts with.
const NODE_HEADER_LENGTH: u16 = 4;
/// Header plus the fixed payload of a hard drive node.
const HARD_DRIVE_NODE_LENGTH: u16 = 42;

/// Payload of a media/hard drive device path node.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HardDriveNode {
    pub partition_number: u32,
    pub partition_start: u64,
    pub partition_size: u64,
    pub signature: [u8; 16],
    pub mbr_type: u8,
    pub signature_type: u8,
}

impl HardDriveNode {
    /// Read the fixed payload following the node header.
    pub fn read(reader: &mut ByteReader) -> Result<Self> {
        Ok(Self {
            partition_number: reader.read_u32_le()?,
            partition_start: reader.read_u64_le()?,
            partition_size: reader.read_u64_le()?,
            signature: reader.read_array()?,
            mbr_type: reader.read_u8()?,
            signature_type: reader.read_u8()?,
        })
    }

    pub fn partition_signature(&self) -> Option<PartitionSignature> {
        PartitionSignature::decode(&self.signature, self.signature_type, self.partition_number)
    }
}

/// Walk device path nodes until a hard drive node with a usable partition
/// signature or the end of the device path.
///
/// Returns `None` if the end is reached first. Hard drive nodes without a
/// usable signature are passed over like any other node.
pub fn find_partition_signature(reader: &mut ByteReader) -> Result<Option<PartitionSignature>> {
    loop {
        let node_offset = reader.offset();
        let device_type = reader.read_u8()?;
        let sub_type = reader.read_u8()?;
        if device_type == END_DEVICE_PATH_TYPE && sub_type == END_ENTIRE_DEVICE_PATH_SUBTYPE {
            trace!("End of device path at offset {node_offset}");
            return Ok(None);
        }

        let length = reader.read_u16_le()?;
        if length < NODE_HEADER_LENGTH {
            return Err(Error::MalformedDevicePath {
                variable: reader.variable().to_owned(),
                offset: node_offset,
                length,
            });
        }

        if device_type != MEDIA_DEVICE_PATH || sub_type != MEDIA_HARDDRIVE_DP {
            trace!(
                "Skipping device path node type {device_type:#04x} subtype {sub_type:#04x} ({length} bytes)"
            );
            reader.skip(usize::from(length - NODE_HEADER_LENGTH))?;
            continue;
        }

        let node = HardDriveNode::read(reader)?;
        debug!("Found hard drive device path node: {node:?}");
        if length > HARD_DRIVE_NODE_LENGTH {
            reader.skip(usize::from(length - HARD_DRIVE_NODE_LENGTH))?;
        }

        match node.partition_signature() {
            Some(signature) => return Ok(Some(signature)),
            None => debug!(
                "Hard drive node has no usable signature (type {}), continuing",
                node.signature_type
            ),
        }
    }
}
