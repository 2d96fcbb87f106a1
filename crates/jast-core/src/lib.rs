//! # jast-core
//!
//! A typed JSON AST and a codec between that AST and JSON text.
//!
//! [`Value`] is a closed enum: `Nothing`, `Null`, `Bool`, `Int`, `Double`,
//! `String`, `Array` and `Object`. Numbers keep the integer/floating split the
//! source text made, objects keep their entries in order (duplicates too), and
//! `Nothing` is an ordinary value meaning "nothing could be parsed".
//!
//! ## Quick start
//!
//! ```rust
//! use jast_core::{decode, decode_lenient, encode, Field, Value};
//!
//! let value = Value::object([
//!     Field::new("alpha", "apple"),
//!     Field::new("beta", Value::object([Field::new("alpha", "bacon")])),
//! ]);
//! let json = encode(&value).unwrap();
//! assert_eq!(json, r#"{"alpha":"apple","beta":{"alpha":"bacon"}}"#);
//! assert_eq!(decode(&json).unwrap(), value);
//!
//! // Lenient decoding turns malformed input into Nothing instead of an error.
//! assert_eq!(decode_lenient(",."), Value::Nothing);
//! ```
//!
//! ## Modules
//!
//! - [`types`]: `Value`, `Field` and `Kind`
//! - [`reader`]: RFC 8259 token reader
//! - [`decoder`]: JSON text → `Value` (strict or lenient, depth-limited)
//! - [`encoder`]: `Value` → compact JSON text
//! - [`error`]: Error types for decode/encode failures
//!
//! `Value` also implements `serde::Serialize`/`Deserialize` and converts to
//! and from `serde_json::Value`.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod reader;
mod serde_impl;
pub mod types;

pub use decoder::{decode, decode_lenient, Decoder, Mode, DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING};
pub use encoder::{encode, encode_into};
pub use error::{JastError, Unencodable};
pub use types::{Field, Kind, Value};
