use crate::signature::ScalarCode;
use serde::ser::{Serialize, SerializeSeq, SerializeTuple, Serializer};
use std::fmt::{Display, Formatter};

/// A self-contained application value, before it is checked against a signature.
///
/// This is the input of the encode path and the output of the decode path. Containers own their
/// children, so a `Value` is always a consistent snapshot: once handed to [`Variant::new`] nothing
/// else can modify it.
///
/// [`Variant::new`]: crate::Variant::new
#[derive(Debug, Clone)]
pub enum Value {
    /// `b`
    Bool(bool),
    /// `y`
    Byte(u8),
    /// `n`
    Int16(i16),
    /// `q`
    UInt16(u16),
    /// `i`
    Int32(i32),
    /// `u`
    UInt32(u32),
    /// `x`
    Int64(i64),
    /// `t`
    UInt64(u64),
    /// `d`
    Double(f64),
    /// `s`
    Str(String),
    /// `a<type>`: elements in wire order
    Array(Vec<Value>),
    /// `(<type>+)`: fields in declaration order
    Struct(Vec<Value>),
    /// `{<type><type>}`: a single key and value
    DictEntry(Box<Value>, Box<Value>),
}

impl Value {
    /// Create a dict entry value
    pub fn entry(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        Value::DictEntry(Box::new(key.into()), Box::new(value.into()))
    }

    /// Create a struct value from its fields in declaration order
    pub fn structure<I, T>(fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Struct(fields.into_iter().map(Into::into).collect())
    }

    /// Create an array value from its elements
    pub fn array<I, T>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Array(elements.into_iter().map(Into::into).collect())
    }

    /// The scalar code carried by a scalar value
    pub fn scalar_code(&self) -> Option<ScalarCode> {
        Some(match self {
            Value::Bool(_) => ScalarCode::Boolean,
            Value::Byte(_) => ScalarCode::Byte,
            Value::Int16(_) => ScalarCode::Int16,
            Value::UInt16(_) => ScalarCode::UInt16,
            Value::Int32(_) => ScalarCode::Int32,
            Value::UInt32(_) => ScalarCode::UInt32,
            Value::Int64(_) => ScalarCode::Int64,
            Value::UInt64(_) => ScalarCode::UInt64,
            Value::Double(_) => ScalarCode::Double,
            Value::Str(_) => ScalarCode::String,
            _ => return None,
        })
    }

    /// Return whether this is a scalar value
    pub fn is_scalar(&self) -> bool {
        self.scalar_code().is_some()
    }

    /// A short description of the shape of this value, used in error messages
    pub(crate) fn describe(&self) -> String {
        match self {
            Value::Str(s) => format!("string {:?}", s),
            Value::Array(elements) => format!("array of {} elements", elements.len()),
            Value::Struct(fields) => format!("struct of {} fields", fields.len()),
            Value::DictEntry(..) => "dict entry".to_string(),
            scalar => match scalar.scalar_code() {
                Some(code) => format!("{} {}", code.name(), scalar),
                None => scalar.to_string(),
            },
        }
    }

    /// The boolean, if this is a `b` value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The byte, if this is a `y` value
    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Value::Byte(v) => Some(*v),
            _ => None,
        }
    }

    /// The integer, if this is an `n` value
    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Value::Int16(v) => Some(*v),
            _ => None,
        }
    }

    /// The integer, if this is a `q` value
    pub fn as_u16(&self) -> Option<u16> {
        match self {
            Value::UInt16(v) => Some(*v),
            _ => None,
        }
    }

    /// The integer, if this is an `i` value
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// The integer, if this is a `u` value
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::UInt32(v) => Some(*v),
            _ => None,
        }
    }

    /// The integer, if this is an `x` value
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// The integer, if this is a `t` value
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt64(v) => Some(*v),
            _ => None,
        }
    }

    /// The double, if this is a `d` value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// The string, if this is an `s` value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    /// The elements, if this is an array
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    /// The fields, if this is a struct
    pub fn as_struct(&self) -> Option<&[Value]> {
        match self {
            Value::Struct(v) => Some(v),
            _ => None,
        }
    }

    /// The key and value, if this is a dict entry
    pub fn as_dict_entry(&self) -> Option<(&Value, &Value)> {
        match self {
            Value::DictEntry(key, value) => Some((key, value)),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Int16(a), Value::Int16(b)) => a == b,
            (Value::UInt16(a), Value::UInt16(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::UInt32(a), Value::UInt32(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::UInt64(a), Value::UInt64(b)) => a == b,
            // bit pattern, so NaN == NaN and 0.0 != -0.0
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Struct(a), Value::Struct(b)) => a == b,
            (Value::DictEntry(ak, av), Value::DictEntry(bk, bv)) => ak == bk && av == bv,
            _ => false,
        }
    }
}

impl Eq for Value {}

fn write_list(f: &mut Formatter<'_>, items: &[Value]) -> std::fmt::Result {
    for (idx, elem) in items.iter().enumerate() {
        if idx > 0 {
            write!(f, ", ")?;
        }

        write!(f, "{}", elem)?;
    }

    Ok(())
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Byte(v) => write!(f, "{}", v),
            Value::Int16(v) => write!(f, "{}", v),
            Value::UInt16(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::UInt32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::UInt64(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{:?}", v),
            Value::Str(v) => write!(f, "{:?}", v),
            Value::Array(elements) => {
                write!(f, "[")?;
                write_list(f, elements)?;
                write!(f, "]")
            }
            Value::Struct(fields) => {
                write!(f, "(")?;
                write_list(f, fields)?;
                write!(f, ")")
            }
            Value::DictEntry(key, value) => write!(f, "{{{}: {}}}", key, value),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    u8 => Byte,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f64 => Double,
    String => Str,
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Double(f64::from(v))
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(v: &[T]) -> Self {
        Value::Array(v.iter().cloned().map(Into::into).collect())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Byte(v) => serializer.serialize_u8(*v),
            Value::Int16(v) => serializer.serialize_i16(*v),
            Value::UInt16(v) => serializer.serialize_u16(*v),
            Value::Int32(v) => serializer.serialize_i32(*v),
            Value::UInt32(v) => serializer.serialize_u32(*v),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::UInt64(v) => serializer.serialize_u64(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::Str(v) => serializer.serialize_str(v),
            Value::Array(elements) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for elem in elements {
                    seq.serialize_element(elem)?;
                }
                seq.end()
            }
            Value::Struct(fields) => {
                let mut tuple = serializer.serialize_tuple(fields.len())?;
                for field in fields {
                    tuple.serialize_element(field)?;
                }
                tuple.end()
            }
            Value::DictEntry(key, value) => {
                let mut tuple = serializer.serialize_tuple(2)?;
                tuple.serialize_element(key)?;
                tuple.serialize_element(value)?;
                tuple.end()
            }
        }
    }
}
