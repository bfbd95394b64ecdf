mod code;
mod node;
mod parse;

pub use code::ScalarCode;
pub use node::TypeNode;
pub use parse::{is_valid, parse, MAX_DEPTH};

use crate::error::Result;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

/// A parsed signature string.
///
/// The type tree is immutable and shared between clones, so any number of [`Variant`]s with the
/// same signature can hold it without copying.
///
/// [`Variant`]: crate::Variant
#[derive(Clone)]
pub struct Signature {
    text: Arc<str>,
    root: Arc<TypeNode>,
}

impl Signature {
    /// Parse a signature string
    pub fn new(signature: &str) -> Result<Self> {
        let root = parse(signature)?;
        Ok(Self {
            text: Arc::from(signature),
            root: Arc::new(root),
        })
    }

    /// The signature string exactly as parsed
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The root of the type tree
    pub fn root(&self) -> &TypeNode {
        &self.root
    }
}

impl From<TypeNode> for Signature {
    fn from(node: TypeNode) -> Self {
        Self {
            text: Arc::from(node.signature()),
            root: Arc::new(node),
        }
    }
}

impl FromStr for Signature {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Signature {
    type Error = crate::Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Signature {}

impl PartialEq<str> for Signature {
    fn eq(&self, other: &str) -> bool {
        &*self.text == other
    }
}

impl PartialEq<&str> for Signature {
    fn eq(&self, other: &&str) -> bool {
        &*self.text == *other
    }
}

impl AsRef<TypeNode> for Signature {
    fn as_ref(&self) -> &TypeNode {
        &self.root
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Signature").field(&&*self.text).finish()
    }
}
