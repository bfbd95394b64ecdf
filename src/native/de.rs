use crate::error::{Error, Result};
use crate::value::Value;
use serde::de::{self, DeserializeOwned, IntoDeserializer, Visitor};

/// Convert a [`Value`] into any deserializable type.
///
/// Structs and dict entries are presented as sequences, so derived structs, tuples and
/// `(key, value)` pairs can be read from them. An array of dict entries can also be read as a map.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    T::deserialize(value)
}

impl<'de> de::Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self {
            Value::Bool(v) => visitor.visit_bool(v),
            Value::Byte(v) => visitor.visit_u8(v),
            Value::Int16(v) => visitor.visit_i16(v),
            Value::UInt16(v) => visitor.visit_u16(v),
            Value::Int32(v) => visitor.visit_i32(v),
            Value::UInt32(v) => visitor.visit_u32(v),
            Value::Int64(v) => visitor.visit_i64(v),
            Value::UInt64(v) => visitor.visit_u64(v),
            Value::Double(v) => visitor.visit_f64(v),
            Value::Str(v) => visitor.visit_string(v),
            Value::Array(elements) | Value::Struct(elements) => visit_seq(elements, visitor),
            Value::DictEntry(key, value) => visit_seq(vec![*key, *value], visitor),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self {
            Value::Array(elements) => {
                let mut map = MapDeserializer {
                    iter: elements.into_iter(),
                    value: None,
                };
                let result = visitor.visit_map(&mut map)?;
                map.end()?;
                Ok(result)
            }
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self {
            Value::Array(elements) if elements.iter().all(|e| matches!(e, Value::Byte(_))) => {
                let bytes = elements.iter().filter_map(Value::as_u8).collect();
                visitor.visit_byte_buf(bytes)
            }
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self {
            Value::Str(variant) => {
                let variant: de::value::StringDeserializer<Error> = variant.into_deserializer();
                visitor.visit_enum(variant)
            }
            other => Err(de::Error::invalid_type(
                de::Unexpected::Other(&other.describe()),
                &"a unit variant name",
            )),
        }
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        unit unit_struct seq tuple tuple_struct struct identifier ignored_any
    }
}

fn visit_seq<'de, V: Visitor<'de>>(elements: Vec<Value>, visitor: V) -> Result<V::Value> {
    let len = elements.len();
    let mut seq = SeqDeserializer {
        iter: elements.into_iter(),
    };
    let result = visitor.visit_seq(&mut seq)?;

    if seq.iter.len() == 0 {
        Ok(result)
    } else {
        Err(de::Error::invalid_length(len, &"fewer elements"))
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T: de::DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>> {
        match self.iter.next() {
            Some(value) => seed.deserialize(value).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: std::vec::IntoIter<Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn end(&self) -> Result<()> {
        if self.iter.len() == 0 {
            Ok(())
        } else {
            Err(Error::Message(format!(
                "{} map entries were not consumed",
                self.iter.len()
            )))
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K: de::DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        match self.iter.next() {
            Some(Value::DictEntry(key, value)) => {
                self.value = Some(*value);
                seed.deserialize(*key).map(Some)
            }
            Some(other) => Err(de::Error::invalid_type(
                de::Unexpected::Other(&other.describe()),
                &"a dict entry",
            )),
            None => Ok(None),
        }
    }

    fn next_value_seed<V: de::DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        let value = self
            .value
            .take()
            .ok_or_else(|| Error::Message("map value requested before its key".to_string()))?;
        seed.deserialize(value)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Deserialize, Debug, PartialEq)]
    struct SimpleStruct {
        i: i32,
        s: String,
        b: bool,
        y: u8,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    enum Mode {
        Fast,
        Slow,
    }

    #[test]
    fn structs() {
        let value = Value::structure([
            Value::from(6566566),
            Value::from("simplestruct"),
            Value::from(true),
            Value::from(167u8),
        ]);

        assert_eq!(
            from_value::<SimpleStruct>(value.clone()).unwrap(),
            SimpleStruct {
                i: 6566566,
                s: "simplestruct".to_string(),
                b: true,
                y: 167,
            }
        );

        assert_eq!(
            from_value::<(i32, String, bool, u8)>(value).unwrap(),
            (6566566, "simplestruct".to_string(), true, 167)
        );
    }

    #[test]
    fn too_many_fields() {
        let value = Value::structure([1i32, 2, 3]);
        let err = from_value::<(i32, i32)>(value).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Message);
    }

    #[test]
    fn dict_entries() {
        let entry = Value::entry("string two", f64::MIN);
        let (key, value): (String, f64) = from_value(entry).unwrap();
        assert_eq!(key, "string two");
        assert_eq!(value.to_bits(), f64::MIN.to_bits());

        let dict = Value::array([Value::entry("a", 1u16), Value::entry("b", 2u16)]);
        let map: BTreeMap<String, u16> = from_value(dict.clone()).unwrap();
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&2));

        let pairs: Vec<(String, u16)> = from_value(dict).unwrap();
        assert_eq!(pairs, vec![("a".to_string(), 1), ("b".to_string(), 2)]);

        let err = from_value::<BTreeMap<String, u16>>(Value::array([1u16])).unwrap_err();
        assert!(err.to_string().contains("dict entry"));
    }

    #[test]
    fn scalars() {
        assert_eq!(from_value::<u8>(Value::Byte(255)).unwrap(), 255);
        assert_eq!(from_value::<i64>(Value::Int64(i64::MIN)).unwrap(), i64::MIN);
        assert_eq!(from_value::<u64>(Value::UInt64(u64::MAX)).unwrap(), u64::MAX);
        assert_eq!(from_value::<char>(Value::from("c")).unwrap(), 'c');
        assert_eq!(from_value::<Option<i32>>(Value::Int32(3)).unwrap(), Some(3));
        assert_eq!(from_value::<Mode>(Value::from("Fast")).unwrap(), Mode::Fast);
        assert_eq!(from_value::<Mode>(Value::from("Slow")).unwrap(), Mode::Slow);
        assert!(from_value::<Mode>(Value::from("Medium")).is_err());
        assert!(from_value::<String>(Value::Int32(3)).is_err());
    }

    #[test]
    fn nested_arrays() {
        let value = Value::from(vec![vec![1i32, 2, 3], vec![4, 5, 6]]);
        let rows: Vec<Vec<i32>> = from_value(value).unwrap();
        assert_eq!(rows, vec![vec![1, 2, 3], vec![4, 5, 6]]);

        let bytes: Vec<u8> = from_value(Value::array([1u8, 7, 13])).unwrap();
        assert_eq!(bytes, vec![1, 7, 13]);
    }
}
