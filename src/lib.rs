//! # Signature-typed message arguments
//!
//! This crate marshals values described by D-Bus style type signatures. A signature such as
//! `(isby)` or `{sd}` is parsed into an immutable type tree, values are checked against that
//! tree, and checked values can be written to and read from a compact byte encoding.
//!
//! ## Examples
//!
//! Build a [`Variant`] from native Rust values with serde and read it back
//!
//! ```
//! use msgarg::{Context, Endian, Variant};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Sample {
//!     byte: u8,
//!     count: i64,
//!     ratio: f64,
//! }
//!
//! let sample = Sample { byte: 212, count: 35683450634546, ratio: 39.435723 };
//! let arg = Variant::encode("(yxd)", &sample).unwrap();
//! assert_eq!(arg.to_string(), "(212, 35683450634546, 39.435723)");
//!
//! let context = Context::new(Endian::Big);
//! let data = arg.to_bytes(context).unwrap();
//! let received = Variant::from_bytes("(yxd)", &data, context).unwrap();
//! assert_eq!(received.decode::<Sample>().unwrap(), sample);
//! ```
//!
//! Build values by hand with [`Value`]
//!
//! ```
//! use msgarg::{ErrorKind, Value, Variant};
//!
//! let entry = Variant::new("{sd}", Value::entry("string two", f64::MIN)).unwrap();
//! assert_eq!(entry.key().unwrap().as_str(), Some("string two"));
//!
//! let err = Variant::new("{sd}", Value::entry(2u8, 1.0)).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::TypeMismatch);
//! assert_eq!(err.path().unwrap().to_string(), "$.key");
//! ```
//!
//! ## Logging
//!
//! Signature parsing and wire calls emit [`tracing`](https://docs.rs/tracing) events. The
//! library never installs a subscriber.

#![warn(missing_docs)]

/// Scalar and container codecs
///
/// Use [`Variant`] for most purposes. These functions operate on bare type trees and values.
pub mod codec;

/// Parse signature strings into type trees
///
/// See [`Signature`](crate::signature::Signature) to get started
pub mod signature;

/// Convert between native Rust types and [`Value`] with serde
pub mod native;

mod endian;
mod error;
mod value;
mod variant;

pub use endian::{Coercion, Context, Endian};
pub use error::{Error, ErrorKind, Path, Result, Segment};
pub use signature::{parse as parse_signature, ScalarCode, Signature, TypeNode};
pub use value::Value;
pub use variant::Variant;

#[cfg(test)]
pub(crate) mod test;
