use crate::endian::Endian;
use crate::error::{Error, Result};
use byteorder::{BigEndian, ByteOrder, LittleEndian};

macro_rules! put_fn {
    ($name:ident, $ty:ty, $write:ident, $size:literal) => {
        pub fn $name(&mut self, value: $ty) {
            let mut buf = [0u8; $size];
            match self.endian {
                Endian::Little => LittleEndian::$write(&mut buf, value),
                Endian::Big => BigEndian::$write(&mut buf, value),
            }
            self.data.extend_from_slice(&buf);
        }
    };
}

macro_rules! get_fn {
    ($name:ident, $ty:ty, $read:ident, $size:literal) => {
        pub fn $name(&mut self) -> Result<$ty> {
            let endian = self.endian;
            let bytes = self.take($size)?;
            Ok(match endian {
                Endian::Little => LittleEndian::$read(bytes),
                Endian::Big => BigEndian::$read(bytes),
            })
        }
    };
}

/// Appends scalars in the configured byte order
pub(crate) struct Writer {
    data: Vec<u8>,
    endian: Endian,
}

impl Writer {
    pub fn new(endian: Endian) -> Self {
        Self {
            data: Vec::new(),
            endian,
        }
    }

    pub fn put_u8(&mut self, value: u8) {
        self.data.push(value);
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    put_fn!(put_u16, u16, write_u16, 2);
    put_fn!(put_i16, i16, write_i16, 2);
    put_fn!(put_u32, u32, write_u32, 4);
    put_fn!(put_i32, i32, write_i32, 4);
    put_fn!(put_u64, u64, write_u64, 8);
    put_fn!(put_i64, i64, write_i64, 8);
    put_fn!(put_f64, f64, write_f64, 8);

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

/// Reads scalars in the configured byte order, tracking the offset for error reporting
pub(crate) struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
    endian: Endian,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8], endian: Endian) -> Self {
        Self {
            data,
            offset: 0,
            endian,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(Error::data(
                self.offset,
                format!("Missing {} bytes to read data", len - self.remaining()),
            ));
        }

        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    pub fn get_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    get_fn!(get_u16, u16, read_u16, 2);
    get_fn!(get_i16, i16, read_i16, 2);
    get_fn!(get_u32, u32, read_u32, 4);
    get_fn!(get_i32, i32, read_i32, 4);
    get_fn!(get_u64, u64, read_u64, 8);
    get_fn!(get_i64, i64, read_i64, 8);
    get_fn!(get_f64, f64, read_f64, 8);

    /// Fail if any bytes are left unread
    pub fn finish(self) -> Result<()> {
        if self.remaining() == 0 {
            Ok(())
        } else {
            Err(Error::data(
                self.offset,
                format!(
                    "Found {} unexpected trailing bytes at the end while reading data",
                    self.remaining()
                ),
            ))
        }
    }
}
