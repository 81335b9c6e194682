//! Big-endian reads over a cursor into raw class-file bytes.

use crate::Result;
use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Cursor, Read};

/// A cursor over raw class-file bytes.
///
/// Offers `get_u16`/`get_u32`/`get_bytes` for the sequential big-endian reads
/// a class-file parser needs.
#[derive(Debug)]
pub struct ClassReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> ClassReader<'a> {
    /// Wrap a byte slice for sequential big-endian reads.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
        }
    }

    /// Read an unsigned 8-bit value.
    pub fn get_u8(&mut self) -> Result<u8> {
        Ok(self.cursor.read_u8()?)
    }

    /// Read a big-endian unsigned 16-bit value.
    pub fn get_u16(&mut self) -> Result<u16> {
        Ok(self.cursor.read_u16::<BigEndian>()?)
    }

    /// Read a big-endian unsigned 32-bit value.
    pub fn get_u32(&mut self) -> Result<u32> {
        Ok(self.cursor.read_u32::<BigEndian>()?)
    }

    /// Read a big-endian signed 32-bit value.
    pub fn get_i32(&mut self) -> Result<i32> {
        Ok(self.cursor.read_i32::<BigEndian>()?)
    }

    /// Read a big-endian signed 64-bit value.
    pub fn get_i64(&mut self) -> Result<i64> {
        Ok(self.cursor.read_i64::<BigEndian>()?)
    }

    /// Read a big-endian 32-bit IEEE-754 float.
    pub fn get_f32(&mut self) -> Result<f32> {
        Ok(self.cursor.read_f32::<BigEndian>()?)
    }

    /// Read a big-endian 64-bit IEEE-754 double.
    pub fn get_f64(&mut self) -> Result<f64> {
        Ok(self.cursor.read_f64::<BigEndian>()?)
    }

    /// Read exactly `len` raw bytes.
    pub fn get_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.cursor.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Number of bytes remaining in the stream.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        let position = self.cursor.position();
        let len = self.cursor.get_ref().len() as u64;
        len.saturating_sub(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_u16() -> Result<()> {
        let bytes = [0x01, 0x02];
        let mut reader = ClassReader::new(&bytes);
        assert_eq!(reader.get_u16()?, 0x0102);
        Ok(())
    }

    #[test]
    fn test_get_bytes_and_remaining() -> Result<()> {
        let bytes = [1, 2, 3, 4, 5];
        let mut reader = ClassReader::new(&bytes);
        assert_eq!(reader.remaining(), 5);
        let chunk = reader.get_bytes(3)?;
        assert_eq!(chunk, vec![1, 2, 3]);
        assert_eq!(reader.remaining(), 2);
        Ok(())
    }
}
