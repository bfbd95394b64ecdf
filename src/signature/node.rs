use super::ScalarCode;
use std::fmt::{Debug, Display, Formatter};

/// A node in a parsed signature tree
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum TypeNode {
    /// A primitive type
    Scalar(ScalarCode),
    /// A homogeneous array of the element type
    Array(Box<TypeNode>),
    /// An ordered, fixed-arity sequence of heterogeneous fields. Never empty
    Struct(Vec<TypeNode>),
    /// A single key/value pair
    DictEntry(Box<TypeNode>, Box<TypeNode>),
}

impl TypeNode {
    /// The type character for an array
    pub const CLASS_ARRAY: u8 = b'a';

    /// The type character that opens a struct
    pub const CLASS_STRUCT: u8 = b'(';

    /// The type character that closes a struct
    pub const CLASS_STRUCT_END: u8 = b')';

    /// The type character that opens a dict entry
    pub const CLASS_DICT_ENTRY: u8 = b'{';

    /// The type character that closes a dict entry
    pub const CLASS_DICT_ENTRY_END: u8 = b'}';

    /// Create an array node with the specified element type
    pub fn array(element: TypeNode) -> Self {
        TypeNode::Array(Box::new(element))
    }

    /// Create a dict entry node with the specified key and value types
    pub fn dict_entry(key: TypeNode, value: TypeNode) -> Self {
        TypeNode::DictEntry(Box::new(key), Box::new(value))
    }

    /// Return whether this is a scalar type
    pub fn is_scalar(&self) -> bool {
        matches!(self, TypeNode::Scalar(_))
    }

    /// Return whether this is an array
    pub fn is_array(&self) -> bool {
        matches!(self, TypeNode::Array(_))
    }

    /// Return whether this is a struct
    pub fn is_struct(&self) -> bool {
        matches!(self, TypeNode::Struct(_))
    }

    /// Return whether this is a dict entry
    pub fn is_dict_entry(&self) -> bool {
        matches!(self, TypeNode::DictEntry(..))
    }

    /// The scalar code, if this is a scalar type
    pub fn scalar_code(&self) -> Option<ScalarCode> {
        match self {
            TypeNode::Scalar(code) => Some(*code),
            _ => None,
        }
    }

    /// The element type, if this is an array
    pub fn element(&self) -> Option<&TypeNode> {
        match self {
            TypeNode::Array(element) => Some(element),
            _ => None,
        }
    }

    /// The field types, if this is a struct
    pub fn fields(&self) -> Option<&[TypeNode]> {
        match self {
            TypeNode::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// The key type, if this is a dict entry
    pub fn key(&self) -> Option<&TypeNode> {
        match self {
            TypeNode::DictEntry(key, _) => Some(key),
            _ => None,
        }
    }

    /// The value type, if this is a dict entry
    pub fn value(&self) -> Option<&TypeNode> {
        match self {
            TypeNode::DictEntry(_, value) => Some(value),
            _ => None,
        }
    }

    /// The number of array dimensions directly at this node. `aai` has 2, `i` has 0
    pub fn dimensions(&self) -> usize {
        let mut node = self;
        let mut dimensions = 0;

        while let TypeNode::Array(element) = node {
            dimensions += 1;
            node = element;
        }

        dimensions
    }

    /// The container nesting depth. Scalars have depth 0
    pub fn depth(&self) -> usize {
        match self {
            TypeNode::Scalar(_) => 0,
            TypeNode::Array(element) => 1 + element.depth(),
            TypeNode::Struct(fields) => 1 + fields.iter().map(Self::depth).max().unwrap_or(0),
            TypeNode::DictEntry(key, value) => 1 + key.depth().max(value.depth()),
        }
    }

    /// The smallest number of bytes a value of this type can occupy on the wire
    pub fn min_wire_size(&self) -> usize {
        match self {
            TypeNode::Scalar(code) => code.min_wire_size(),
            // element count of an empty array
            TypeNode::Array(_) => 4,
            TypeNode::Struct(fields) => fields.iter().map(Self::min_wire_size).sum(),
            TypeNode::DictEntry(key, value) => key.min_wire_size() + value.min_wire_size(),
        }
    }

    fn write_signature(&self, out: &mut String) {
        match self {
            TypeNode::Scalar(code) => out.push(code.tag()),
            TypeNode::Array(element) => {
                out.push(Self::CLASS_ARRAY as char);
                element.write_signature(out);
            }
            TypeNode::Struct(fields) => {
                out.push(Self::CLASS_STRUCT as char);
                for field in fields {
                    field.write_signature(out);
                }
                out.push(Self::CLASS_STRUCT_END as char);
            }
            TypeNode::DictEntry(key, value) => {
                out.push(Self::CLASS_DICT_ENTRY as char);
                key.write_signature(out);
                value.write_signature(out);
                out.push(Self::CLASS_DICT_ENTRY_END as char);
            }
        }
    }

    /// The canonical signature string of this type
    pub fn signature(&self) -> String {
        let mut out = String::new();
        self.write_signature(&mut out);
        out
    }
}

impl Display for TypeNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.signature())
    }
}

impl Debug for TypeNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeNode::Scalar(code) => write!(f, "{}", code.name()),
            TypeNode::Array(element) => write!(f, "{:?}[]", element),
            TypeNode::Struct(fields) => {
                write!(f, "(")?;

                for (index, field) in fields.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{:?}", field)?;
                }

                write!(f, ")")
            }
            TypeNode::DictEntry(key, value) => write!(f, "{{{:?}: {:?}}}", key, value),
        }
    }
}

impl From<ScalarCode> for TypeNode {
    fn from(code: ScalarCode) -> Self {
        TypeNode::Scalar(code)
    }
}
