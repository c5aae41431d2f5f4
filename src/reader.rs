use crate::error::{Error, Result};

/// Sequential little-endian reader over the contents of one EFI variable.
///
/// Every read is checked against the end of the variable. A short read is a
/// `TruncatedStream` error, never a zero-padded value.
pub struct ByteReader<'a> {
    variable: &'a str,
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(variable: &'a str, data: &'a [u8]) -> Self {
        Self {
            variable,
            data,
            offset: 0,
        }
    }

    /// Name of the variable being read, for diagnostics.
    pub fn variable(&self) -> &'a str {
        self.variable
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::TruncatedStream {
                variable: self.variable.to_owned(),
                offset: self.offset,
                required: n,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.offset..self.offset + n];
        self.offset += n;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_exact(N)?);
        Ok(array)
    }

    /// Skip `n` bytes without looking at them.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_exact(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_u64_le(&mut self) -> Result<u64> {
        self.read_array().map(u64::from_le_bytes)
    }
}
