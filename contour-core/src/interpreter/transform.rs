//! `Transform`: a bidirectional conversion between a `from` shape and a
//! `to` shape (§4.2, §4.4).
//!
//! `decode` and `encode` are themselves full parsers (not bare value
//! functions) so a transform step can fail or warn with the same
//! vocabulary as everything else in the interpreter.

use std::sync::Arc;

use crate::ast::Node;
use crate::diagnostic::ParseResult;
use crate::options::Direction;
use crate::parser::Parser;

pub fn compile(ast: &crate::ast::Ast, direction: Direction) -> Parser {
    let Node::Transform {
        from,
        to,
        decode,
        encode,
    } = ast.node()
    else {
        unreachable!("transform::compile called with a non-transform node")
    };

    match direction {
        Direction::Guard => super::compile(to, Direction::Guard),
        Direction::Decoder => {
            let from_parser = super::compile(from, Direction::Decoder);
            let decode = decode.clone();
            Arc::new(move |input, opts| match from_parser(input, opts) {
                ParseResult::Success(v) => decode(&v, opts),
                ParseResult::Warning(prior_errs, v) => combine(prior_errs, decode(&v, opts)),
                ParseResult::Failure(errs) => ParseResult::Failure(errs),
            })
        }
        Direction::Encoder => {
            let from_parser = super::compile(from, Direction::Encoder);
            let encode = encode.clone();
            Arc::new(move |input, opts| match encode(input, opts) {
                ParseResult::Success(v) => from_parser(&v, opts),
                ParseResult::Warning(prior_errs, v) => combine(prior_errs, from_parser(&v, opts)),
                ParseResult::Failure(errs) => ParseResult::Failure(errs),
            })
        }
    }
}

/// Prepends `prior_errs` onto the outcome of the second parsing step,
/// matching `Refinement`'s warning-combination rule: a later `Failure`
/// passes through unchanged rather than absorbing the earlier warnings.
fn combine(prior_errs: Vec<crate::diagnostic::ParseError>, result: ParseResult<crate::value::Value>) -> ParseResult<crate::value::Value> {
    match result {
        ParseResult::Success(v) => ParseResult::Warning(prior_errs, v),
        ParseResult::Warning(mut errs, v) => {
            let mut combined = prior_errs;
            combined.append(&mut errs);
            ParseResult::Warning(combined, v)
        }
        ParseResult::Failure(errs) => ParseResult::Failure(errs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Ast;
    use crate::options::ParseOptions;
    use crate::value::Value;

    fn number_to_string() -> Ast {
        Ast::transform(
            Ast::number_keyword(),
            Ast::string_keyword(),
            |v, _opts| {
                let Value::Number(n) = v else {
                    unreachable!()
                };
                ParseResult::Success(Value::String(n.to_string()))
            },
            |v, _opts| {
                let Value::String(s) = v else {
                    unreachable!()
                };
                match s.parse::<f64>() {
                    Ok(n) => ParseResult::Success(Value::Number(n)),
                    Err(_) => ParseResult::Failure(vec![crate::diagnostic::ParseError::Type(
                        Ast::number_keyword(),
                        v.clone(),
                    )]),
                }
            },
        )
    }

    #[test]
    fn decoder_applies_forward_leg() {
        let parser = compile(&number_to_string(), Direction::Decoder);
        let result = parser(&Value::Number(42.0), &ParseOptions::new());
        assert!(matches!(result, ParseResult::Success(Value::String(s)) if s == "42"));
    }

    #[test]
    fn encoder_applies_inverse_leg_through_from() {
        let parser = compile(&number_to_string(), Direction::Encoder);
        let result = parser(&Value::String("7".into()), &ParseOptions::new());
        assert!(matches!(result, ParseResult::Success(Value::Number(n)) if n == 7.0));
    }

    #[test]
    fn guard_checks_target_shape_only() {
        let parser = compile(&number_to_string(), Direction::Guard);
        assert!(parser(&Value::String("anything".into()), &ParseOptions::new()).is_success());
        assert!(parser(&Value::Number(1.0), &ParseOptions::new()).is_failure());
    }
}
