use std::fmt::{Display, Formatter};

/// The primitive types a signature can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarCode {
    /// `b`
    Boolean,
    /// `y`
    Byte,
    /// `n`
    Int16,
    /// `q`
    UInt16,
    /// `i`
    Int32,
    /// `u`
    UInt32,
    /// `x`
    Int64,
    /// `t`
    UInt64,
    /// `d`
    Double,
    /// `s`
    String,
}

impl ScalarCode {
    // basic type characters
    /// The type character for a bool
    pub const CLASS_BOOLEAN: u8 = b'b';

    /// The type character for a byte
    pub const CLASS_BYTE: u8 = b'y';

    /// The type character for an i16
    pub const CLASS_INT16: u8 = b'n';

    /// The type character for an u16
    pub const CLASS_UINT16: u8 = b'q';

    /// The type character for an i32
    pub const CLASS_INT32: u8 = b'i';

    /// The type character for an u32
    pub const CLASS_UINT32: u8 = b'u';

    /// The type character for an i64
    pub const CLASS_INT64: u8 = b'x';

    /// The type character for an u64
    pub const CLASS_UINT64: u8 = b't';

    /// The type character for an f64
    pub const CLASS_DOUBLE: u8 = b'd';

    /// The type character for a string
    pub const CLASS_STRING: u8 = b's';

    /// All scalar codes in signature tag order
    pub const ALL: [ScalarCode; 10] = [
        ScalarCode::Boolean,
        ScalarCode::Byte,
        ScalarCode::Int16,
        ScalarCode::UInt16,
        ScalarCode::Int32,
        ScalarCode::UInt32,
        ScalarCode::Int64,
        ScalarCode::UInt64,
        ScalarCode::Double,
        ScalarCode::String,
    ];

    /// Look up the scalar code for a type character
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            Self::CLASS_BOOLEAN => ScalarCode::Boolean,
            Self::CLASS_BYTE => ScalarCode::Byte,
            Self::CLASS_INT16 => ScalarCode::Int16,
            Self::CLASS_UINT16 => ScalarCode::UInt16,
            Self::CLASS_INT32 => ScalarCode::Int32,
            Self::CLASS_UINT32 => ScalarCode::UInt32,
            Self::CLASS_INT64 => ScalarCode::Int64,
            Self::CLASS_UINT64 => ScalarCode::UInt64,
            Self::CLASS_DOUBLE => ScalarCode::Double,
            Self::CLASS_STRING => ScalarCode::String,
            _ => return None,
        })
    }

    /// The type character of this scalar code
    pub fn tag(self) -> char {
        let tag = match self {
            ScalarCode::Boolean => Self::CLASS_BOOLEAN,
            ScalarCode::Byte => Self::CLASS_BYTE,
            ScalarCode::Int16 => Self::CLASS_INT16,
            ScalarCode::UInt16 => Self::CLASS_UINT16,
            ScalarCode::Int32 => Self::CLASS_INT32,
            ScalarCode::UInt32 => Self::CLASS_UINT32,
            ScalarCode::Int64 => Self::CLASS_INT64,
            ScalarCode::UInt64 => Self::CLASS_UINT64,
            ScalarCode::Double => Self::CLASS_DOUBLE,
            ScalarCode::String => Self::CLASS_STRING,
        };

        tag as char
    }

    /// The number of bytes this scalar occupies on the wire, or `None` for strings
    pub fn wire_size(self) -> Option<usize> {
        match self {
            ScalarCode::Byte => Some(1),
            ScalarCode::Int16 | ScalarCode::UInt16 => Some(2),
            ScalarCode::Boolean | ScalarCode::Int32 | ScalarCode::UInt32 => Some(4),
            ScalarCode::Int64 | ScalarCode::UInt64 | ScalarCode::Double => Some(8),
            ScalarCode::String => None,
        }
    }

    /// The smallest number of bytes this scalar can occupy on the wire
    pub(crate) fn min_wire_size(self) -> usize {
        // length prefix and NUL terminator of the empty string
        self.wire_size().unwrap_or(5)
    }

    /// A human readable name for this type
    pub fn name(self) -> &'static str {
        match self {
            ScalarCode::Boolean => "bool",
            ScalarCode::Byte => "byte",
            ScalarCode::Int16 => "int16",
            ScalarCode::UInt16 => "uint16",
            ScalarCode::Int32 => "int32",
            ScalarCode::UInt32 => "uint32",
            ScalarCode::Int64 => "int64",
            ScalarCode::UInt64 => "uint64",
            ScalarCode::Double => "double",
            ScalarCode::String => "string",
        }
    }
}

impl Display for ScalarCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
