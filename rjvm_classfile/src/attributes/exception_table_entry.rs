//! One entry of a `Code` attribute's exception table (JVMS §4.7.3).

use crate::Result;
use crate::byte_reader::ClassReader;
use std::ops::Range;

/// A single exception handler within a method body.
///
/// `catch_type` is a constant pool index into a `Class` constant naming the
/// caught exception type, or `0` for a "catch-all" (`finally`) handler.
#[derive(Clone, Debug, PartialEq)]
pub struct ExceptionTableEntry {
    pub range_pc: Range<u16>,
    pub handler_pc: u16,
    pub catch_type: u16,
}

impl ExceptionTableEntry {
    pub fn from_bytes(reader: &mut ClassReader<'_>) -> Result<Self> {
        let start_pc = reader.get_u16()?;
        let end_pc = reader.get_u16()?;
        let handler_pc = reader.get_u16()?;
        let catch_type = reader.get_u16()?;
        Ok(Self {
            range_pc: start_pc..end_pc,
            handler_pc,
            catch_type,
        })
    }

    /// Whether this handler catches every exception (a `finally` block, or
    /// `catch (Throwable t)` compiled without a named type).
    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        self.catch_type == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_catch_all() {
        let entry = ExceptionTableEntry {
            range_pc: 0..10,
            handler_pc: 10,
            catch_type: 0,
        };
        assert!(entry.is_catch_all());

        let entry = ExceptionTableEntry {
            range_pc: 0..10,
            handler_pc: 10,
            catch_type: 5,
        };
        assert!(!entry.is_catch_all());
    }
}
