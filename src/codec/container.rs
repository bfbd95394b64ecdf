use super::scalar;
use super::wire::{Reader, Writer};
use crate::endian::Coercion;
use crate::error::{Error, Path, Result, Segment};
use crate::signature::TypeNode;
use crate::value::Value;

fn with_segment<T>(
    path: &mut Path,
    segment: Segment,
    f: impl FnOnce(&mut Path) -> Result<T>,
) -> Result<T> {
    path.push(segment);
    let res = f(path);
    path.pop();
    res
}

/// Check `value` against `node` and bring it into the canonical shape for that node.
///
/// A struct value with exactly two fields is accepted where a dict entry is expected. Scalars
/// are matched according to `coercion`.
pub(crate) fn conform(
    node: &TypeNode,
    value: Value,
    coercion: Coercion,
    path: &mut Path,
) -> Result<Value> {
    match node {
        TypeNode::Scalar(code) => scalar::conform(*code, value, coercion, path),
        TypeNode::Array(element) => match value {
            Value::Array(elements) => elements
                .into_iter()
                .enumerate()
                .map(|(index, elem)| {
                    with_segment(path, Segment::Element(index), |path| {
                        conform(element, elem, coercion, path)
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            other => Err(Error::mismatch(path, node, other.describe())),
        },
        TypeNode::Struct(fields) => match value {
            Value::Struct(values) => {
                if values.len() != fields.len() {
                    return Err(Error::Arity {
                        path: path.clone(),
                        expected: fields.len(),
                        found: values.len(),
                    });
                }

                fields
                    .iter()
                    .zip(values)
                    .enumerate()
                    .map(|(index, (field, value))| {
                        with_segment(path, Segment::Field(index), |path| {
                            conform(field, value, coercion, path)
                        })
                    })
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Struct)
            }
            other => Err(Error::mismatch(path, node, other.describe())),
        },
        TypeNode::DictEntry(key_type, value_type) => {
            let (key, value) = match value {
                Value::DictEntry(key, value) => (*key, *value),
                Value::Struct(values) => {
                    let found = values.len();
                    let mut values = values.into_iter();
                    match (values.next(), values.next(), values.next()) {
                        (Some(key), Some(value), None) => (key, value),
                        _ => {
                            return Err(Error::Arity {
                                path: path.clone(),
                                expected: 2,
                                found,
                            })
                        }
                    }
                }
                other => return Err(Error::mismatch(path, node, other.describe())),
            };

            let key = with_segment(path, Segment::Key, |path| {
                conform(key_type, key, coercion, path)
            })?;
            let value = with_segment(path, Segment::Value, |path| {
                conform(value_type, value, coercion, path)
            })?;

            Ok(Value::entry(key, value))
        }
    }
}

/// Append the wire representation of `value` to `out`
pub(crate) fn write(
    node: &TypeNode,
    value: &Value,
    out: &mut Writer,
    path: &mut Path,
) -> Result<()> {
    match (node, value) {
        (TypeNode::Scalar(code), value) => scalar::write(*code, value, out, path),
        (TypeNode::Array(element), Value::Array(elements)) => {
            let count = u32::try_from(elements.len()).map_err(|_| {
                Error::mismatch(path, node, "array with more than u32::MAX elements")
            })?;
            out.put_u32(count);

            for (index, elem) in elements.iter().enumerate() {
                with_segment(path, Segment::Element(index), |path| {
                    write(element, elem, out, path)
                })?;
            }

            Ok(())
        }
        (TypeNode::Struct(fields), Value::Struct(values)) => {
            if fields.len() != values.len() {
                return Err(Error::Arity {
                    path: path.clone(),
                    expected: fields.len(),
                    found: values.len(),
                });
            }

            for (index, (field, value)) in fields.iter().zip(values).enumerate() {
                with_segment(path, Segment::Field(index), |path| {
                    write(field, value, out, path)
                })?;
            }

            Ok(())
        }
        (TypeNode::DictEntry(key_type, value_type), Value::DictEntry(key, value)) => {
            with_segment(path, Segment::Key, |path| write(key_type, key, out, path))?;
            with_segment(path, Segment::Value, |path| {
                write(value_type, value, out, path)
            })
        }
        (node, value) => Err(Error::mismatch(path, node, value.describe())),
    }
}

/// Read one value of type `node` from `input`
pub(crate) fn read(node: &TypeNode, input: &mut Reader) -> Result<Value> {
    match node {
        TypeNode::Scalar(code) => scalar::read(*code, input),
        TypeNode::Array(element) => {
            let offset = input.offset();
            let count = input.get_u32()? as usize;

            // every element occupies at least one byte
            let min_size = element.min_wire_size().max(1);
            if count > input.remaining() / min_size {
                return Err(Error::data(
                    offset,
                    format!(
                        "array of {} elements of type '{}' does not fit into the remaining {} bytes",
                        count,
                        element,
                        input.remaining()
                    ),
                ));
            }

            let mut elements = Vec::with_capacity(count);
            for _ in 0..count {
                elements.push(read(element, input)?);
            }

            Ok(Value::Array(elements))
        }
        TypeNode::Struct(fields) => fields
            .iter()
            .map(|field| read(field, input))
            .collect::<Result<Vec<_>>>()
            .map(Value::Struct),
        TypeNode::DictEntry(key_type, value_type) => {
            let key = read(key_type, input)?;
            let value = read(value_type, input)?;
            Ok(Value::entry(key, value))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::endian::Endian;
    use crate::error::ErrorKind;
    use crate::signature::parse;
    use crate::test::assert_bytes_eq;
    use matches::assert_matches;
    use pretty_assertions::assert_eq;

    fn conform_str(signature: &str, value: Value) -> Result<Value> {
        conform(
            &parse(signature).unwrap(),
            value,
            Coercion::Strict,
            &mut Path::root(),
        )
    }

    fn conform_weak(signature: &str, value: Value) -> Result<Value> {
        conform(
            &parse(signature).unwrap(),
            value,
            Coercion::Weak,
            &mut Path::root(),
        )
    }

    fn encode(signature: &str, value: &Value, endian: Endian) -> Vec<u8> {
        let mut out = Writer::new(endian);
        write(&parse(signature).unwrap(), value, &mut out, &mut Path::root()).unwrap();
        out.into_inner()
    }

    fn decode(signature: &str, data: &[u8], endian: Endian) -> Result<Value> {
        let mut input = Reader::new(data, endian);
        let value = read(&parse(signature).unwrap(), &mut input)?;
        input.finish()?;
        Ok(value)
    }

    #[test]
    fn conform_struct() {
        let value = Value::structure([
            Value::from(6566566),
            Value::from("simplestruct"),
            Value::from(true),
            Value::from(167u8),
        ]);
        assert_eq!(conform_str("(isby)", value.clone()).unwrap(), value);

        let err = conform_str("(isb)", value.clone()).unwrap_err();
        assert_matches!(
            err,
            Error::Arity {
                expected: 3,
                found: 4,
                ..
            }
        );

        let err = conform_str("(iyby)", value).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.path().unwrap().to_string(), "$.1");
    }

    #[test]
    fn conform_nested_path() {
        let value = Value::array([
            Value::entry("a", Value::structure([1i32, 2])),
            Value::entry("b", Value::structure([Value::from(3i32), Value::from(4u32)])),
        ]);

        let err = conform_str("a{s(ii)}", value).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.path().unwrap().to_string(), "$[1].value.1");
    }

    #[test]
    fn conform_dict_entry_from_pair() {
        let pair = Value::structure([Value::from("key"), Value::from(1.5)]);
        assert_eq!(
            conform_str("{sd}", pair).unwrap(),
            Value::entry("key", 1.5)
        );

        let triple = Value::structure([Value::from("key"), Value::from(1.5), Value::from(2.5)]);
        assert_matches!(
            conform_str("{sd}", triple).unwrap_err(),
            Error::Arity {
                expected: 2,
                found: 3,
                ..
            }
        );

        assert_eq!(
            conform_str("{sd}", Value::from("key")).unwrap_err().kind(),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn conform_weak_nested() {
        let value = Value::structure([
            Value::from(6566566),
            Value::from("simplestruct"),
            Value::from(true),
            Value::from(167),
        ]);

        let err = conform_str("(isby)", value.clone()).unwrap_err();
        assert_eq!(err.path().unwrap().to_string(), "$.3");

        assert_eq!(
            conform_weak("(isby)", value).unwrap(),
            Value::structure([
                Value::from(6566566),
                Value::from("simplestruct"),
                Value::from(true),
                Value::from(167u8),
            ])
        );

        let matrix = Value::from(vec![vec![1i64, 2], vec![3, 4]]);
        assert_eq!(
            conform_weak("aad", matrix.clone()).unwrap(),
            Value::from(vec![vec![1.0, 2.0], vec![3.0, 4.0]])
        );

        // coercion never changes container shapes
        let entries = Value::array([Value::structure([Value::from(7i32), matrix])]);
        let err = conform_weak("a{qad}", entries).unwrap_err();
        assert_eq!(err.path().unwrap().to_string(), "$[0].value[0]");

        let pairs = Value::array([
            Value::structure([1i32, 2]),
            Value::structure([3i32, 40000]),
        ]);
        let err = conform_weak("a(yn)", pairs).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.path().unwrap().to_string(), "$[1].1");
    }

    #[test]
    fn conform_empty_array() {
        assert_eq!(
            conform_str("a(ii)", Value::Array(vec![])).unwrap(),
            Value::Array(vec![])
        );
        assert_eq!(
            conform_str("ai", Value::Int32(1)).unwrap_err().kind(),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn wire_layout() {
        let value = Value::structure([
            Value::from(7u8),
            Value::array([Value::from("ab"), Value::from("")]),
            Value::entry(2u16, true),
        ]);

        let data = encode("(yas{qb})", &value, Endian::Little);
        #[rustfmt::skip]
        let expected = [
            7,
            2, 0, 0, 0,
            2, 0, 0, 0, b'a', b'b', 0,
            0, 0, 0, 0, 0,
            2, 0,
            1, 0, 0, 0,
        ];
        assert_bytes_eq(&data, &expected, "little endian");
        assert_eq!(decode("(yas{qb})", &data, Endian::Little).unwrap(), value);

        let data = encode("(yas{qb})", &value, Endian::Big);
        #[rustfmt::skip]
        let expected = [
            7,
            0, 0, 0, 2,
            0, 0, 0, 2, b'a', b'b', 0,
            0, 0, 0, 0, 0,
            0, 2,
            0, 0, 0, 1,
        ];
        assert_bytes_eq(&data, &expected, "big endian");
        assert_eq!(decode("(yas{qb})", &data, Endian::Big).unwrap(), value);
    }

    #[test]
    fn string_array_elementwise() {
        let strings = Value::array(["this", "is", "a", "string", "array"]);
        let data = encode("as", &strings, Endian::Little);
        assert_eq!(decode("as", &data, Endian::Little).unwrap(), strings);
    }

    #[test]
    fn absurd_count() {
        let err = decode("ax", &[0xFF, 0xFF, 0xFF, 0xFF, 1, 2, 3], Endian::Little).unwrap_err();
        assert_matches!(err, Error::Data { offset: 0, .. });
        assert!(err.to_string().contains("does not fit"));

        let err = decode("ai", &[2, 0, 0, 0, 1, 0, 0, 0], Endian::Little).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn write_rejects_unconformed() {
        let mut out = Writer::new(Endian::Little);
        let err = write(
            &parse("(ii)").unwrap(),
            &Value::structure([1i32]),
            &mut out,
            &mut Path::root(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Arity);
    }
}
