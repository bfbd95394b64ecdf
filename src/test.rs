#![allow(unused)]

pub use matches::assert_matches;
pub use pretty_assertions::{assert_eq, assert_ne, assert_str_eq};
use std::cmp::{max, min};
use std::io::Write;

fn write_byte_row(
    f: &mut dyn Write,
    offset: usize,
    bytes_per_row: usize,
    bytes: &[u8],
) -> std::io::Result<()> {
    write!(f, "{:08X}", offset)?;

    for (index, byte) in bytes.iter().enumerate() {
        if index % 4 == 0 {
            write!(f, " ")?;
        }

        write!(f, " {:02X}", byte)?;
    }

    for index in bytes.len()..bytes_per_row {
        if index % 4 == 0 {
            write!(f, " ")?;
        }

        write!(f, "   ")?;
    }

    write!(f, "  ")?;

    for byte in bytes {
        if byte.is_ascii_alphanumeric() {
            write!(f, "{}", *byte as char)?;
        } else {
            write!(f, ".")?;
        }
    }

    writeln!(f)
}

fn hex_dump(center_offset: usize, bytes: &[u8]) -> String {
    const WIDTH: usize = 16;
    const EXTRA_ROWS_TOP: usize = 8;
    const EXTRA_ROWS_BOTTOM: usize = 4;

    let center_row = center_offset / WIDTH;
    let start_row = center_row - min(center_row, EXTRA_ROWS_TOP);
    // Partial rows at the end count as a row
    let last_row = min(center_row + EXTRA_ROWS_BOTTOM, bytes.len() / WIDTH + 1);

    let mut buf = Vec::new();
    for row in start_row..last_row {
        let offset_start = row * WIDTH;
        let offset_end = min(bytes.len(), offset_start + WIDTH);
        write_byte_row(&mut buf, offset_start, WIDTH, &bytes[offset_start..offset_end]).unwrap();
    }

    writeln!(buf, "({} bytes)", bytes.len()).unwrap();
    String::from_utf8(buf).unwrap()
}

/// Compare two byte buffers and print a hex dump around the first difference
pub fn assert_bytes_eq(a: &[u8], b: &[u8], context: &str) {
    let first_difference = (0..max(a.len(), b.len())).find(|&index| a.get(index) != b.get(index));

    if let Some(index) = first_difference {
        eprintln!("{}: first difference at offset {}", context, index);
        assert_str_eq!(hex_dump(index, a), hex_dump(index, b));
        panic!("{}: buffers differ at offset {}", context, index);
    }
}

#[test]
fn hex_dump_marks_lengths() {
    assert_bytes_eq(b"same", b"same", "equal buffers");

    let dump = hex_dump(0, b"abc\0");
    assert!(dump.starts_with("00000000  61 62 63 00"));
    assert!(dump.contains("abc."));
    assert!(dump.ends_with("(4 bytes)\n"));
}

#[test]
#[should_panic]
fn length_difference_fails() {
    assert_bytes_eq(&[1, 2, 3], &[1, 2], "short buffer");
}
