mod container;
mod scalar;
mod wire;

use crate::endian::Context;
use crate::error::{Path, Result};
use crate::signature::{ScalarCode, TypeNode};
use crate::value::Value;
use wire::{Reader, Writer};

/// Encode a single scalar.
///
/// Fails with a type mismatch if `value` is not a scalar of type `code`.
pub fn encode_scalar(code: ScalarCode, value: &Value, context: Context) -> Result<Vec<u8>> {
    let mut out = Writer::new(context.endian());
    scalar::write(code, value, &mut out, &Path::root())?;
    Ok(out.into_inner())
}

/// Decode a single scalar. `data` must contain exactly one value
pub fn decode_scalar(code: ScalarCode, data: &[u8], context: Context) -> Result<Value> {
    let mut input = Reader::new(data, context.endian());
    let value = scalar::read(code, &mut input)?;
    input.finish()?;
    Ok(value)
}

/// Check `value` against the type `node` and return it in canonical form.
///
/// Scalars are matched according to the coercion mode of `context`.
pub fn conform(node: &TypeNode, value: Value, context: Context) -> Result<Value> {
    container::conform(node, value, context.coercion(), &mut Path::root())
}

/// Encode `value` as type `node`
pub fn to_bytes(node: &TypeNode, value: &Value, context: Context) -> Result<Vec<u8>> {
    let mut out = Writer::new(context.endian());
    container::write(node, value, &mut out, &mut Path::root())?;
    Ok(out.into_inner())
}

/// Decode a value of type `node`. `data` must contain exactly one value
pub fn from_bytes(node: &TypeNode, data: &[u8], context: Context) -> Result<Value> {
    let mut input = Reader::new(data, context.endian());
    let value = container::read(node, &mut input)?;
    input.finish()?;
    Ok(value)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::endian::{Coercion, Endian};
    use crate::error::ErrorKind;
    use crate::signature::parse;

    #[test]
    fn scalar_api() {
        let context = Context::new(Endian::Big);
        let data = encode_scalar(ScalarCode::UInt16, &Value::UInt16(0x1234), context).unwrap();
        assert_eq!(data, vec![0x12, 0x34]);
        assert_eq!(
            decode_scalar(ScalarCode::UInt16, &data, context).unwrap(),
            Value::UInt16(0x1234)
        );

        let err = decode_scalar(ScalarCode::UInt16, &[0, 1, 2], context).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn tree_api() {
        let node = parse("aai").unwrap();
        let value = conform(
            &node,
            Value::from(vec![vec![1i32, 2, 3], vec![4, 5, 6]]),
            Context::default(),
        )
        .unwrap();

        let data = to_bytes(&node, &value, Context::default()).unwrap();
        assert_eq!(data.len(), 4 + 2 * (4 + 3 * 4));
        assert_eq!(from_bytes(&node, &data, Context::default()).unwrap(), value);

        let narrow = Value::from(vec![vec![1u8, 2, 3], vec![4, 5, 6]]);
        let err = conform(&node, narrow.clone(), Context::default()).unwrap_err();
        assert_eq!(err.path().unwrap().to_string(), "$[0][0]");
        let weak = Context::default().with_coercion(Coercion::Weak);
        assert_eq!(conform(&node, narrow, weak).unwrap(), value);

        let mut trailing = data.clone();
        trailing.push(0);
        let err = from_bytes(&node, &trailing, Context::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
        assert_eq!(err.offset(), Some(data.len()));
    }
}
