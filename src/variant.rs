use crate::codec;
use crate::endian::Context;
use crate::error::{Error, Result};
use crate::native;
use crate::signature::{Signature, TypeNode};
use crate::value::Value;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// A value tagged with the signature it was checked against.
///
/// A `Variant` is immutable: its value always conforms to its signature. Build a new one to
/// change it.
///
/// ```
/// use msgarg::Variant;
///
/// let arg = Variant::encode("(isby)", &(6566566, "simplestruct", true, 167u8)).unwrap();
/// let bytes = arg.to_bytes(Default::default()).unwrap();
///
/// let received = Variant::from_bytes("(isby)", &bytes, Default::default()).unwrap();
/// let (i, s, b, y): (i32, String, bool, u8) = received.decode().unwrap();
/// assert_eq!((i, s.as_str(), b, y), (6566566, "simplestruct", true, 167));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    signature: Signature,
    value: Value,
}

impl Variant {
    /// Parse `signature` and check `value` against it.
    ///
    /// `value` is taken by value: containers must be handed over as a finished snapshot.
    pub fn new(signature: &str, value: impl Into<Value>) -> Result<Self> {
        let signature = Signature::new(signature)?;
        Self::with_signature(&signature, value)
    }

    /// Check `value` against an already parsed signature
    pub fn with_signature(signature: &Signature, value: impl Into<Value>) -> Result<Self> {
        Self::with_context(signature, value, Context::default())
    }

    /// Check `value` against an already parsed signature, matching scalars according to the
    /// coercion mode of `context`.
    ///
    /// ```
    /// use msgarg::{Coercion, Context, Signature, Value, Variant};
    ///
    /// let signature = Signature::new("(iy)").unwrap();
    /// let fields = Value::structure([1i32, 167]);
    /// assert!(Variant::with_signature(&signature, fields.clone()).is_err());
    ///
    /// let weak = Context::default().with_coercion(Coercion::Weak);
    /// let arg = Variant::with_context(&signature, fields, weak).unwrap();
    /// assert_eq!(arg.children().unwrap()[1], Value::Byte(167));
    /// ```
    pub fn with_context(
        signature: &Signature,
        value: impl Into<Value>,
        context: Context,
    ) -> Result<Self> {
        let value = codec::conform(signature.root(), value.into(), context).map_err(|err| {
            tracing::debug!(signature = %signature, kind = ?err.kind(), "value rejected: {}", err);
            err
        })?;

        Ok(Self {
            signature: signature.clone(),
            value,
        })
    }

    /// Convert a native Rust value with serde and check it against `signature`
    pub fn encode<T: Serialize + ?Sized>(signature: &str, value: &T) -> Result<Self> {
        Self::encode_with_context(signature, value, Context::default())
    }

    /// Convert a native Rust value with serde and check it against `signature`, matching
    /// scalars according to the coercion mode of `context`
    pub fn encode_with_context<T: Serialize + ?Sized>(
        signature: &str,
        value: &T,
        context: Context,
    ) -> Result<Self> {
        let signature = Signature::new(signature)?;
        let value = native::to_value(value)?;
        Self::with_context(&signature, value, context)
    }

    /// Decode wire data that holds exactly one value of type `signature`
    pub fn from_bytes(signature: &str, data: &[u8], context: Context) -> Result<Self> {
        let signature = Signature::new(signature)?;
        Self::from_bytes_with_signature(&signature, data, context)
    }

    /// Decode wire data with an already parsed signature
    pub fn from_bytes_with_signature(
        signature: &Signature,
        data: &[u8],
        context: Context,
    ) -> Result<Self> {
        let value = codec::from_bytes(signature.root(), data, context).map_err(|err| {
            tracing::debug!(signature = %signature, kind = ?err.kind(), "wire data rejected: {}", err);
            err
        })?;

        tracing::trace!(signature = %signature, len = data.len(), "decoded variant");
        Ok(Self {
            signature: signature.clone(),
            value,
        })
    }

    /// Encode this variant's value as wire data
    pub fn to_bytes(&self, context: Context) -> Result<Vec<u8>> {
        let data = codec::to_bytes(self.signature.root(), &self.value, context)?;
        tracing::trace!(signature = %self.signature, len = data.len(), "encoded variant");
        Ok(data)
    }

    /// The signature this variant was built with
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The root of the type tree
    pub fn type_node(&self) -> &TypeNode {
        self.signature.root()
    }

    /// The value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consume the variant and return the value
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Convert the value into a native Rust type with serde
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        native::from_value(self.value.clone())
    }

    fn invalid_access(&self, operation: &'static str) -> Error {
        Error::InvalidAccess {
            signature: self.signature.to_string(),
            operation,
        }
    }

    /// The key of a dict entry variant
    pub fn key(&self) -> Result<&Value> {
        match &self.value {
            Value::DictEntry(key, _) => Ok(key),
            _ => Err(self.invalid_access("key")),
        }
    }

    /// The value of a dict entry variant
    pub fn entry_value(&self) -> Result<&Value> {
        match &self.value {
            Value::DictEntry(_, value) => Ok(value),
            _ => Err(self.invalid_access("entry_value")),
        }
    }

    /// The elements of an array variant or the fields of a struct variant
    pub fn children(&self) -> Result<&[Value]> {
        match &self.value {
            Value::Array(children) | Value::Struct(children) => Ok(children),
            _ => Err(self.invalid_access("children")),
        }
    }
}

impl AsRef<Value> for Variant {
    fn as_ref(&self) -> &Value {
        &self.value
    }
}

impl From<Variant> for Value {
    fn from(variant: Variant) -> Self {
        variant.value
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.value, f)
    }
}
