use std::fmt::{Display, Formatter};
use std::str::Utf8Error;

/// One step from a container node to one of its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// The n-th element of an array
    Element(usize),
    /// The n-th field of a struct
    Field(usize),
    /// The key of a dict entry
    Key,
    /// The value of a dict entry
    Value,
}

/// The location of a node inside a signature tree, starting at the root
///
/// Rendered as `$` for the root, `$.2` for the third struct field, `$[3]` for the fourth array
/// element and `$.key` / `$.value` for the halves of a dict entry.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Path(Vec<Segment>);

impl Path {
    /// The path of the root node
    pub fn root() -> Self {
        Self::default()
    }

    /// The individual steps of this path
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Return whether this is the root path
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, segment: Segment) {
        self.0.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "$")?;

        for segment in &self.0 {
            match segment {
                Segment::Element(index) => write!(f, "[{}]", index)?,
                Segment::Field(index) => write!(f, ".{}", index)?,
                Segment::Key => write!(f, ".key")?,
                Segment::Value => write!(f, ".value")?,
            }
        }

        Ok(())
    }
}

/// The stable category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The signature string is structurally invalid
    MalformedSignature,
    /// A value does not have the shape its signature requires
    TypeMismatch,
    /// A struct or dict entry has the wrong number of members
    Arity,
    /// A decoded scalar is outside the range of its type
    Range,
    /// A dict entry accessor was used on a different kind of value
    InvalidAccess,
    /// The wire data is truncated or inconsistent
    Data,
    /// A wire string is not valid UTF-8
    Utf8,
    /// A custom message, usually raised while converting native values
    Message,
}

/// An error that can occur while parsing signatures, building values or reading and writing
/// wire data
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The signature string could not be parsed
    MalformedSignature {
        /// The complete signature string
        signature: String,
        /// Byte offset into the signature where parsing stopped
        offset: usize,
        /// What was wrong at that offset
        reason: String,
    },

    /// The value at `path` does not match the type the signature expects there
    TypeMismatch {
        /// Location of the offending node
        path: Path,
        /// The expected type, as a signature
        expected: String,
        /// A description of what was found instead
        found: String,
    },

    /// The container at `path` has a different number of members than the signature demands
    Arity {
        /// Location of the offending container
        path: Path,
        /// The number of members required by the signature
        expected: usize,
        /// The number of members supplied
        found: usize,
    },

    /// A decoded scalar is outside of what its type can represent
    Range {
        /// Byte offset of the scalar in the wire data
        offset: usize,
        /// Context information
        message: String,
    },

    /// An accessor was called that is not valid for this value's signature
    InvalidAccess {
        /// The signature of the value
        signature: String,
        /// The accessor that was called
        operation: &'static str,
    },

    /// The wire data is truncated, has trailing bytes or is otherwise inconsistent
    Data {
        /// Byte offset into the wire data
        offset: usize,
        /// Context information
        message: String,
    },

    /// A wire string is not valid UTF-8
    Utf8 {
        /// Byte offset of the string contents in the wire data
        offset: usize,
        /// The underlying conversion error
        error: Utf8Error,
    },

    /// A custom error message
    Message(String),
}

impl Error {
    /// The stable category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedSignature { .. } => ErrorKind::MalformedSignature,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::Arity { .. } => ErrorKind::Arity,
            Error::Range { .. } => ErrorKind::Range,
            Error::InvalidAccess { .. } => ErrorKind::InvalidAccess,
            Error::Data { .. } => ErrorKind::Data,
            Error::Utf8 { .. } => ErrorKind::Utf8,
            Error::Message(_) => ErrorKind::Message,
        }
    }

    /// The tree path of the node that caused this error, if known
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::TypeMismatch { path, .. } | Error::Arity { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The byte offset into the signature or the wire data, if known
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::MalformedSignature { offset, .. }
            | Error::Range { offset, .. }
            | Error::Data { offset, .. }
            | Error::Utf8 { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    pub(crate) fn malformed(signature: &str, offset: usize, reason: impl Into<String>) -> Self {
        Error::MalformedSignature {
            signature: signature.to_string(),
            offset,
            reason: reason.into(),
        }
    }

    pub(crate) fn mismatch(path: &Path, expected: impl Display, found: impl Into<String>) -> Self {
        Error::TypeMismatch {
            path: path.clone(),
            expected: expected.to_string(),
            found: found.into(),
        }
    }

    pub(crate) fn data(offset: usize, message: impl Into<String>) -> Self {
        Error::Data {
            offset,
            message: message.into(),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Utf8 { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedSignature {
                signature,
                offset,
                reason,
            } => write!(
                f,
                "Malformed signature '{}' at offset {}: {}",
                signature, offset, reason
            ),
            Error::TypeMismatch {
                path,
                expected,
                found,
            } => write!(
                f,
                "Type mismatch at {}: expected '{}', found {}",
                path, expected, found
            ),
            Error::Arity {
                path,
                expected,
                found,
            } => write!(
                f,
                "Wrong number of members at {}: expected {}, found {}",
                path, expected, found
            ),
            Error::Range { offset, message } => {
                write!(f, "Value out of range at offset {}: {}", offset, message)
            }
            Error::InvalidAccess {
                signature,
                operation,
            } => write!(
                f,
                "'{}' is not available for a value with signature '{}'",
                operation, signature
            ),
            Error::Data { offset, message } => write!(
                f,
                "A data inconsistency error occured at offset {}: {}",
                offset, message
            ),
            Error::Utf8 { offset, error } => write!(
                f,
                "Error converting string at offset {} to UTF-8: {}",
                offset, error
            ),
            Error::Message(msg) => write!(f, "{}", msg),
        }
    }
}

/// The Result type for [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
