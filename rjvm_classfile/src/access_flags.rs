//! Access-flag bitfields for classes, fields, and methods (JVMS §4.1, §4.5, §4.6).

use bitflags::bitflags;

bitflags! {
    /// Class-level access flags.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct ClassAccessFlags: u16 {
        const PUBLIC = 0x0001;
        const FINAL = 0x0010;
        const SUPER = 0x0020;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
        const MODULE = 0x8000;
    }
}

bitflags! {
    /// Field-level access flags.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct FieldAccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const VOLATILE = 0x0040;
        const TRANSIENT = 0x0080;
        const SYNTHETIC = 0x1000;
        const ENUM = 0x4000;
    }
}

bitflags! {
    /// Method-level access flags.
    ///
    /// `STATIC`, `NATIVE`, `ABSTRACT`, and `VARARGS` are the flags the
    /// dispatch resolver and descriptor logic depend on; the rest are
    /// carried for fidelity with the class-file format.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct MethodAccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const BRIDGE = 0x0040;
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
    }
}

macro_rules! raw_bits_roundtrip {
    ($ty:ty) => {
        impl $ty {
            /// Round-trip accessor for reflection's raw `modifiers` field.
            #[must_use]
            pub fn to_raw(self) -> u16 {
                self.bits()
            }

            /// Reconstruct flags from a raw 16-bit value, discarding any
            /// bits this version of the format does not recognize.
            #[must_use]
            pub fn from_raw(bits: u16) -> Self {
                Self::from_bits_truncate(bits)
            }
        }
    };
}

raw_bits_roundtrip!(ClassAccessFlags);
raw_bits_roundtrip!(FieldAccessFlags);
raw_bits_roundtrip!(MethodAccessFlags);
