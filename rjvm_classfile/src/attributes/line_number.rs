//! `LineNumberTable` attribute entries (JVMS §4.7.12).

use crate::Result;
use crate::byte_reader::ClassReader;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineNumber {
    pub start_pc: u16,
    pub line_number: u16,
}

impl LineNumber {
    pub fn from_bytes(reader: &mut ClassReader<'_>) -> Result<Self> {
        Ok(Self {
            start_pc: reader.get_u16()?,
            line_number: reader.get_u16()?,
        })
    }
}
