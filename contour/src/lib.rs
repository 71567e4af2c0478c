//! Public, ergonomic entry points over `contour-core`'s engine (C6): a
//! decoder, a guard, an encoder, and throwing variants of each that render
//! their diagnostics to text (C8) instead of handing back a `ParseResult`.
//!
//! Grounded on the teacher's facade-crate split (`grill` depending on
//! `grill-core`): the engine crate stays free of any notion of "throwing",
//! and this crate is the only place that ever turns a `ParseResult` into a
//! `Result`.

mod render;

use contour_core::ast::Ast;
use contour_core::diagnostic::ParseResult;
use contour_core::options::{Direction, ParseOptions};
use contour_core::parser::Parser;
use contour_core::value::Value;

pub use contour_core::ast;
pub use contour_core::diagnostic;
pub use contour_core::diagnostic::ParseError;
pub use contour_core::options;
pub use contour_core::value;

/// The failure mode of every throwing operation: the rendered diagnostic
/// text plus the underlying error tree for callers that want to inspect it
/// programmatically.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    message: String,
    errors: Vec<ParseError>,
}

impl Error {
    fn from_errors(errors: Vec<ParseError>) -> Self {
        Self {
            message: render::render(&errors),
            errors,
        }
    }

    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }
}

/// A schema compiled for one direction, ready to parse many inputs.
///
/// `Decoder`/`Guard`/`Encoder` each wrap a [`contour_core::parser::Parser`]
/// compiled once at construction; building one is the only place schema
/// compilation happens; calling it is cheap and thread-safe (§5).
pub struct Decoder(Parser);
pub struct Guard(Parser);
pub struct Encoder(Parser);

/// Compiles `schema` into a decoder: raw input to validated value.
#[must_use]
pub fn decode(schema: &Ast) -> Decoder {
    Decoder(contour_core::compile(schema, Direction::Decoder))
}

/// Compiles `schema` into a guard: a membership test with no conversion.
#[must_use]
pub fn guard(schema: &Ast) -> Guard {
    Guard(contour_core::compile(schema, Direction::Guard))
}

/// Compiles `schema` into an encoder: validated value to raw output.
#[must_use]
pub fn encode(schema: &Ast) -> Encoder {
    Encoder(contour_core::compile(schema, Direction::Encoder))
}

impl Decoder {
    #[must_use]
    pub fn decode(&self, input: &Value, opts: &ParseOptions) -> ParseResult<Value> {
        (self.0)(input, opts)
    }

    /// Decodes `input`, rendering any diagnostics to a single [`Error`] on
    /// failure instead of returning the raw [`ParseResult`].
    pub fn decode_or_throw(&self, input: &Value, opts: &ParseOptions) -> Result<Value, Error> {
        match self.decode(input, opts) {
            ParseResult::Success(v) | ParseResult::Warning(_, v) => Ok(v),
            ParseResult::Failure(errs) => Err(Error::from_errors(errs)),
        }
    }
}

impl Guard {
    /// `true` iff `input` is already in the target shape (§8:
    /// `guard(S)(x) == true` iff `decode(S)(x)` would be `Success` or
    /// `Warning`).
    #[must_use]
    pub fn test(&self, input: &Value, opts: &ParseOptions) -> bool {
        (self.0)(input, opts).is_accepted()
    }

    /// Asserts `input` is in the target shape, rendering diagnostics to an
    /// [`Error`] when it is not.
    pub fn asserts(&self, input: &Value, opts: &ParseOptions) -> Result<(), Error> {
        match (self.0)(input, opts) {
            ParseResult::Success(_) | ParseResult::Warning(_, _) => Ok(()),
            ParseResult::Failure(errs) => Err(Error::from_errors(errs)),
        }
    }
}

impl Encoder {
    #[must_use]
    pub fn encode(&self, value: &Value, opts: &ParseOptions) -> ParseResult<Value> {
        (self.0)(value, opts)
    }

    pub fn encode_or_throw(&self, value: &Value, opts: &ParseOptions) -> Result<Value, Error> {
        match self.encode(value, opts) {
            ParseResult::Success(v) | ParseResult::Warning(_, v) => Ok(v),
            ParseResult::Failure(errs) => Err(Error::from_errors(errs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_or_throw_renders_failure_to_text() {
        let schema = Ast::string_keyword();
        let decoder = decode(&schema);
        let err = decoder
            .decode_or_throw(&Value::Number(1.0), &ParseOptions::new())
            .unwrap_err();
        assert!(err.to_string().contains("expected StringKeyword"));
    }

    #[test]
    fn guard_accepts_warnings_as_membership() {
        let schema = contour_core::ast::Ast::type_literal(
            vec![contour_core::ast::PropertySignature {
                name: "a".into(),
                ty: Ast::string_keyword(),
                is_optional: false,
            }],
            vec![],
        );
        let g = guard(&schema);
        let input = Value::Object(
            [
                (contour_core::value::Key::from("a"), Value::String("x".into())),
                (contour_core::value::Key::from("extra"), Value::Number(1.0)),
            ]
            .into_iter()
            .collect(),
        );
        assert!(g.test(&input, &ParseOptions::new().with_unexpected_allowed(true)));
        assert!(!g.test(&input, &ParseOptions::new()));
    }

    #[test]
    fn encode_round_trips_through_a_transform() {
        let schema = Ast::transform(
            Ast::number_keyword(),
            Ast::string_keyword(),
            |v, _opts| {
                let Value::Number(n) = v else { unreachable!() };
                ParseResult::Success(Value::String(n.to_string()))
            },
            |v, _opts| {
                let Value::String(s) = v else { unreachable!() };
                ParseResult::Success(Value::Number(s.parse().unwrap()))
            },
        );
        let decoded = decode(&schema)
            .decode_or_throw(&Value::Number(3.0), &ParseOptions::new())
            .unwrap();
        assert_eq!(decoded, Value::String("3".into()));
        let encoded = encode(&schema)
            .encode_or_throw(&decoded, &ParseOptions::new())
            .unwrap();
        assert_eq!(encoded, Value::Number(3.0));
    }
}
