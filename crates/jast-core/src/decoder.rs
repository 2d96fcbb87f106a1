//! JSON decoder: text → [`Value`].
//!
//! A recursive-descent parser driven by the token [`Reader`]. Each call parses
//! exactly one document and rejects anything but whitespace after it.
//!
//! # Key design decisions
//!
//! - **Lexical number kinds**: a numeral becomes `Int` only when it has no
//!   fractional part, no exponent, and fits `i64`. `1.0` is always a `Double`.
//! - **Mode applies at the root**: every failure travels up as an ordinary
//!   `Err` through the container frames. Only [`Decoder::decode`] looks at the
//!   [`Mode`], so strict mode returns that error and lenient mode swaps it for
//!   `Value::Nothing`. There is no per-element recovery: one bad element
//!   anywhere makes the whole document `Nothing`.
//! - **Depth guard**: containers deeper than `max_depth` fail before the
//!   parser recurses into them. `max_depth` itself never exceeds
//!   [`MAX_DEPTH_CEILING`], so hostile nesting cannot exhaust the stack.

use crate::error::{JastError, Result};
use crate::reader::{locate, Reader, Token};
use crate::types::{Field, Value};
use tracing::debug;

/// Nesting limit used by [`decode`], [`decode_lenient`] and `Decoder::new()`.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Hard upper bound on [`Decoder::with_max_depth`]. The parser recurses once
/// per container, and this many frames fit comfortably in a 2 MiB thread stack.
pub const MAX_DEPTH_CEILING: usize = 512;

/// How the decoder reports malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Malformed input is returned as an error.
    #[default]
    Strict,
    /// Malformed input decodes to `Value::Nothing`.
    Lenient,
}

/// Decoder configuration. Cheap to copy and free of state between calls.
///
/// ```
/// use jast_core::{Decoder, Mode, Value};
///
/// let decoder = Decoder::new().with_mode(Mode::Lenient).with_max_depth(16);
/// assert_eq!(decoder.decode(",.").unwrap(), Value::Nothing);
/// assert_eq!(decoder.decode("[1]").unwrap(), Value::Array(vec![Value::Int(1)]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    mode: Mode,
    max_depth: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new()
    }
}

impl Decoder {
    /// A strict decoder with [`DEFAULT_MAX_DEPTH`].
    pub fn new() -> Self {
        Decoder {
            mode: Mode::Strict,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Maximum number of nested arrays/objects. Zero admits scalars only.
    /// Values above [`MAX_DEPTH_CEILING`] are clamped to it.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_CEILING);
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Decode one complete JSON document.
    ///
    /// In lenient mode this never returns `Err`.
    pub fn decode(&self, text: &str) -> Result<Value> {
        let outcome = Parser::new(text, self.max_depth).parse_document();
        self.settle(outcome)
    }

    /// Decode a document held as bytes. The bytes must be UTF-8; anything
    /// else is malformed input.
    pub fn decode_slice(&self, bytes: &[u8]) -> Result<Value> {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.decode(text),
            Err(err) => {
                let valid = &bytes[..err.valid_up_to()];
                // The prefix up to valid_up_to is UTF-8 by construction.
                let prefix = std::str::from_utf8(valid).unwrap_or_default();
                let (line, column) = locate(prefix, prefix.len());
                self.settle(Err(JastError::MalformedInput {
                    line,
                    column,
                    message: "invalid UTF-8".to_string(),
                }))
            }
        }
    }

    fn settle(&self, outcome: Result<Value>) -> Result<Value> {
        match (self.mode, outcome) {
            (Mode::Lenient, Err(err)) => {
                debug!(error = %err, "lenient decode produced Nothing");
                Ok(Value::Nothing)
            }
            (_, outcome) => outcome,
        }
    }
}

/// Decode a JSON document strictly.
///
/// # Example
/// ```
/// use jast_core::{decode, Value};
/// assert_eq!(decode("1").unwrap(), Value::Int(1));
/// assert_eq!(decode("1.0").unwrap(), Value::Double(1.0));
/// assert!(decode(",.").is_err());
/// ```
pub fn decode(text: &str) -> Result<Value> {
    Decoder::new().decode(text)
}

/// Decode a JSON document leniently: malformed input yields `Value::Nothing`.
///
/// # Example
/// ```
/// use jast_core::{decode_lenient, Value};
/// assert_eq!(decode_lenient(",."), Value::Nothing);
/// assert_eq!(decode_lenient("null"), Value::Null);
/// ```
pub fn decode_lenient(text: &str) -> Value {
    Decoder::new()
        .with_mode(Mode::Lenient)
        .decode(text)
        .unwrap_or(Value::Nothing)
}

/// Per-call parse state.
struct Parser<'a> {
    reader: Reader<'a>,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, max_depth: usize) -> Self {
        Parser {
            reader: Reader::new(text),
            max_depth,
        }
    }

    /// Root frame: one value, then the end of input.
    fn parse_document(mut self) -> Result<Value> {
        let value = self.parse_value(0)?;
        let (token, offset) = self.reader.next_token()?;
        match token {
            Token::EndDocument => Ok(value),
            other => Err(self.reader.error_at(
                offset,
                format!("unexpected {} after end of document", other.describe()),
            )),
        }
    }

    /// Read the next token and build the value it starts.
    /// `depth` counts the containers enclosing this value.
    fn parse_value(&mut self, depth: usize) -> Result<Value> {
        let (token, offset) = self.reader.next_token()?;
        self.value_from(token, offset, depth)
    }

    fn value_from(&mut self, token: Token<'a>, offset: usize, depth: usize) -> Result<Value> {
        match token {
            Token::BeginObject => self.parse_object(offset, depth + 1),
            Token::BeginArray => self.parse_array(offset, depth + 1),
            Token::String(s) => Ok(Value::String(s.into_owned())),
            Token::Number { lexeme, integral } => number_value(lexeme, integral)
                .ok_or_else(|| self.reader.error_at(offset, "number out of range")),
            Token::True => Ok(Value::Bool(true)),
            Token::False => Ok(Value::Bool(false)),
            Token::Null => Ok(Value::Null),
            other => Err(self
                .reader
                .error_at(offset, format!("expected a value, found {}", other.describe()))),
        }
    }

    /// Fail if a container opened at `offset` would sit at `depth`.
    fn enter(&self, offset: usize, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            let (line, column) = self.reader.position(offset);
            return Err(JastError::DepthExceeded {
                limit: self.max_depth,
                line,
                column,
            });
        }
        Ok(())
    }

    /// Parse array elements; the `[` at `open` is already consumed.
    fn parse_array(&mut self, open: usize, depth: usize) -> Result<Value> {
        self.enter(open, depth)?;
        let mut items = Vec::new();

        let (token, offset) = self.reader.next_token()?;
        if token == Token::EndArray {
            return Ok(Value::Array(items));
        }
        items.push(self.value_from(token, offset, depth)?);

        loop {
            let (token, offset) = self.reader.next_token()?;
            match token {
                Token::Comma => items.push(self.parse_value(depth)?),
                Token::EndArray => return Ok(Value::Array(items)),
                other => {
                    return Err(self.reader.error_at(
                        offset,
                        format!("expected ',' or ']' in array, found {}", other.describe()),
                    ))
                }
            }
        }
    }

    /// Parse object entries in encounter order; the `{` at `open` is already
    /// consumed. Repeated names are all kept.
    fn parse_object(&mut self, open: usize, depth: usize) -> Result<Value> {
        self.enter(open, depth)?;
        let mut fields = Vec::new();

        let (mut token, mut offset) = self.reader.next_token()?;
        if token == Token::EndObject {
            return Ok(Value::Object(fields));
        }

        loop {
            let name = match token {
                Token::String(s) => s.into_owned(),
                other => {
                    return Err(self.reader.error_at(
                        offset,
                        format!("expected a string key, found {}", other.describe()),
                    ))
                }
            };

            let (colon, colon_at) = self.reader.next_token()?;
            if colon != Token::Colon {
                return Err(self.reader.error_at(
                    colon_at,
                    format!("expected ':' after key, found {}", colon.describe()),
                ));
            }

            let value = self.parse_value(depth)?;
            fields.push(Field { name, value });

            let (next, next_at) = self.reader.next_token()?;
            match next {
                Token::Comma => (token, offset) = self.reader.next_token()?,
                Token::EndObject => return Ok(Value::Object(fields)),
                other => {
                    return Err(self.reader.error_at(
                        next_at,
                        format!("expected ',' or '}}' in object, found {}", other.describe()),
                    ))
                }
            }
        }
    }
}

/// Pick `Int` or `Double` for a numeral.
///
/// Returns `None` when the magnitude overflows `f64`, since such a value
/// could never be encoded again.
fn number_value(lexeme: &str, integral: bool) -> Option<Value> {
    if integral {
        if let Ok(n) = lexeme.parse::<i64>() {
            return Some(Value::Int(n));
        }
    }
    let n: f64 = lexeme.parse().ok()?;
    n.is_finite().then_some(Value::Double(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_overflow_falls_back_to_double() {
        assert_eq!(
            number_value("9223372036854775808", true),
            Some(Value::Double(9223372036854775808.0))
        );
        assert_eq!(
            number_value("-9223372036854775808", true),
            Some(Value::Int(i64::MIN))
        );
    }

    #[test]
    fn exponent_means_double() {
        assert_eq!(number_value("1e2", false), Some(Value::Double(100.0)));
    }

    #[test]
    fn infinite_magnitude_is_rejected() {
        assert_eq!(number_value("1e400", false), None);
    }

    #[test]
    fn builder_round_trips_settings() {
        let d = Decoder::new().with_mode(Mode::Lenient).with_max_depth(3);
        assert_eq!(d.mode(), Mode::Lenient);
        assert_eq!(d.max_depth(), 3);
        assert_eq!(Decoder::default(), Decoder::new());
    }

    #[test]
    fn max_depth_is_clamped_to_ceiling() {
        let d = Decoder::new().with_max_depth(usize::MAX);
        assert_eq!(d.max_depth(), MAX_DEPTH_CEILING);
    }
}
