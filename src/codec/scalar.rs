use super::wire::{Reader, Writer};
use crate::endian::Coercion;
use crate::error::{Error, Path, Result};
use crate::signature::ScalarCode;
use crate::value::Value;

/// Check that `value` is a scalar of type `code`
pub(crate) fn check(code: ScalarCode, value: &Value, path: &Path) -> Result<()> {
    if value.scalar_code() != Some(code) {
        return Err(Error::mismatch(path, code, value.describe()));
    }

    if let Value::Str(s) = value {
        if s.contains('\0') {
            return Err(Error::mismatch(path, code, "string with interior NUL byte"));
        }
    }

    Ok(())
}

fn integer(value: &Value) -> Option<i128> {
    Some(match value {
        Value::Byte(v) => i128::from(*v),
        Value::Int16(v) => i128::from(*v),
        Value::UInt16(v) => i128::from(*v),
        Value::Int32(v) => i128::from(*v),
        Value::UInt32(v) => i128::from(*v),
        Value::Int64(v) => i128::from(*v),
        Value::UInt64(v) => i128::from(*v),
        _ => return None,
    })
}

/// Check `value` against `code`, converting integers first when `coercion` allows it
pub(crate) fn conform(
    code: ScalarCode,
    value: Value,
    coercion: Coercion,
    path: &Path,
) -> Result<Value> {
    if coercion == Coercion::Strict || value.scalar_code() == Some(code) {
        check(code, &value, path)?;
        return Ok(value);
    }

    let n = match integer(&value) {
        Some(n) => n,
        None => return Err(Error::mismatch(path, code, value.describe())),
    };

    let converted = match code {
        ScalarCode::Byte => u8::try_from(n).ok().map(Value::Byte),
        ScalarCode::Int16 => i16::try_from(n).ok().map(Value::Int16),
        ScalarCode::UInt16 => u16::try_from(n).ok().map(Value::UInt16),
        ScalarCode::Int32 => i32::try_from(n).ok().map(Value::Int32),
        ScalarCode::UInt32 => u32::try_from(n).ok().map(Value::UInt32),
        ScalarCode::Int64 => i64::try_from(n).ok().map(Value::Int64),
        ScalarCode::UInt64 => u64::try_from(n).ok().map(Value::UInt64),
        ScalarCode::Double => Some(Value::Double(n as f64)),
        ScalarCode::Boolean | ScalarCode::String => {
            return Err(Error::mismatch(path, code, value.describe()))
        }
    };

    converted.ok_or_else(|| {
        Error::mismatch(
            path,
            code,
            format!("{} out of range for {}", value.describe(), code.name()),
        )
    })
}

pub(crate) fn write(code: ScalarCode, value: &Value, out: &mut Writer, path: &Path) -> Result<()> {
    match (code, value) {
        (ScalarCode::Boolean, Value::Bool(v)) => out.put_u32(u32::from(*v)),
        (ScalarCode::Byte, Value::Byte(v)) => out.put_u8(*v),
        (ScalarCode::Int16, Value::Int16(v)) => out.put_i16(*v),
        (ScalarCode::UInt16, Value::UInt16(v)) => out.put_u16(*v),
        (ScalarCode::Int32, Value::Int32(v)) => out.put_i32(*v),
        (ScalarCode::UInt32, Value::UInt32(v)) => out.put_u32(*v),
        (ScalarCode::Int64, Value::Int64(v)) => out.put_i64(*v),
        (ScalarCode::UInt64, Value::UInt64(v)) => out.put_u64(*v),
        (ScalarCode::Double, Value::Double(v)) => out.put_f64(*v),
        (ScalarCode::String, Value::Str(v)) => {
            check(code, value, path)?;
            let len = u32::try_from(v.len())
                .map_err(|_| Error::mismatch(path, code, "string longer than 4 GiB"))?;
            out.put_u32(len);
            out.put_bytes(v.as_bytes());
            out.put_u8(0);
        }
        _ => return Err(Error::mismatch(path, code, value.describe())),
    }

    Ok(())
}

pub(crate) fn read(code: ScalarCode, input: &mut Reader) -> Result<Value> {
    let offset = input.offset();

    Ok(match code {
        ScalarCode::Boolean => match input.get_u32()? {
            0 => Value::Bool(false),
            1 => Value::Bool(true),
            other => {
                return Err(Error::Range {
                    offset,
                    message: format!("{} is not a valid boolean", other),
                })
            }
        },
        ScalarCode::Byte => Value::Byte(input.get_u8()?),
        ScalarCode::Int16 => Value::Int16(input.get_i16()?),
        ScalarCode::UInt16 => Value::UInt16(input.get_u16()?),
        ScalarCode::Int32 => Value::Int32(input.get_i32()?),
        ScalarCode::UInt32 => Value::UInt32(input.get_u32()?),
        ScalarCode::Int64 => Value::Int64(input.get_i64()?),
        ScalarCode::UInt64 => Value::UInt64(input.get_u64()?),
        ScalarCode::Double => Value::Double(input.get_f64()?),
        ScalarCode::String => {
            let len = input.get_u32()? as usize;
            let start = input.offset();
            let bytes = input.take(len)?;

            let terminator_offset = input.offset();
            if input.get_u8()? != 0 {
                return Err(Error::data(
                    terminator_offset,
                    "string is not NUL terminated",
                ));
            }

            if let Some(pos) = bytes.iter().position(|b| *b == 0) {
                return Err(Error::data(start + pos, "string contains a NUL byte"));
            }

            let s = std::str::from_utf8(bytes).map_err(|error| Error::Utf8 {
                offset: start,
                error,
            })?;
            Value::Str(s.to_string())
        }
    })
}
