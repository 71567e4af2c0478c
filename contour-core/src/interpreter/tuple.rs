//! `Tuple`: a heterogeneous, fixed-length-or-variadic sequence (§4.4).

use std::ops::ControlFlow;
use std::sync::Arc;

use crate::ast::{Ast, Node};
use crate::diagnostic::ParseError;
use crate::options::Direction;
use crate::parser::Parser;
use crate::value::Value;

use super::accumulate::Accumulator;

pub fn compile(ast: &Ast, direction: Direction) -> Parser {
    let Node::Tuple { elements, rest, .. } = ast.node() else {
        unreachable!("tuple::compile called with a non-tuple node")
    };
    let element_parsers: Vec<(Parser, bool)> = elements
        .iter()
        .map(|e| (super::compile(&e.ty, direction), e.is_optional))
        .collect();
    let rest_parsers: Option<(Parser, Vec<Parser>)> = rest.as_ref().map(|r| {
        let mut parsers = r.parts.iter().map(|p| super::compile(p, direction));
        let head = parsers.next().expect("Rest.parts is non-empty");
        (head, parsers.collect())
    });
    let type_ast = ast.clone();
    let fixed_len = element_parsers.len();

    Arc::new(move |input, opts| {
        let Value::Array(items) = input else {
            return crate::diagnostic::ParseResult::Failure(vec![ParseError::Type(
                type_ast.clone(),
                input.clone(),
            )]);
        };
        let mut acc = Accumulator::new(opts);
        let mut out: Vec<Value> = Vec::new();

        // Fixed prefix.
        for (i, (parser, is_optional)) in element_parsers.iter().enumerate() {
            let control = match items.get(i) {
                None if *is_optional => ControlFlow::Continue(()),
                None => acc.fail(ParseError::Index(i, vec![ParseError::Missing])),
                Some(item) => acc.absorb(parser(item, opts), |e| ParseError::Index(i, e), &mut out),
            };
            if control.is_break() {
                return acc.finish(None);
            }
        }

        match &rest_parsers {
            Some((head, tail)) => {
                let tail_len = tail.len();
                let variadic_end = items.len().saturating_sub(tail_len).max(fixed_len);
                for i in fixed_len..variadic_end {
                    let control = acc.absorb(head(&items[i], opts), |e| ParseError::Index(i, e), &mut out);
                    if control.is_break() {
                        return acc.finish(None);
                    }
                }
                for (offset, parser) in tail.iter().enumerate() {
                    let i = variadic_end + offset;
                    let control = match items.get(i) {
                        None => acc.fail(ParseError::Index(i, vec![ParseError::Missing])),
                        Some(item) => {
                            acc.absorb(parser(item, opts), |e| ParseError::Index(i, e), &mut out)
                        }
                    };
                    if control.is_break() {
                        return acc.finish(None);
                    }
                }
            }
            None => {
                for i in fixed_len..items.len() {
                    let err = ParseError::Index(i, vec![ParseError::Unexpected(items[i].clone())]);
                    let control = if opts.is_unexpected_allowed {
                        acc.warn(std::iter::once(err));
                        ControlFlow::Continue(())
                    } else {
                        acc.fail(err)
                    };
                    if control.is_break() {
                        return acc.finish(None);
                    }
                    if opts.is_unexpected_allowed {
                        out.push(items[i].clone());
                    }
                }
            }
        }

        if acc.is_fatal() {
            acc.finish(None)
        } else {
            acc.finish(Some(Value::Array(out)))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Rest, TupleElement};
    use crate::diagnostic::ParseResult;
    use crate::options::ParseOptions;

    fn v(items: &[Value]) -> Value {
        Value::Array(items.to_vec())
    }

    #[test]
    fn tuple_with_rest_scenario() {
        // [string, ...number[], boolean]
        let schema = Ast::tuple(
            vec![TupleElement {
                ty: Ast::string_keyword(),
                is_optional: false,
            }],
            Some(Rest {
                parts: vec![Ast::number_keyword(), Ast::boolean_keyword()],
            }),
            false,
        );
        let parser = compile(&schema, Direction::Decoder);
        let opts = ParseOptions::new();

        let result = parser(
            &v(&[
                Value::String("x".into()),
                Value::Number(1.0),
                Value::Number(2.0),
                Value::Number(3.0),
                Value::Boolean(true),
            ]),
            &opts,
        );
        assert!(matches!(result, ParseResult::Success(_)));

        let result = parser(&v(&[Value::String("x".into()), Value::Boolean(true)]), &opts);
        assert!(matches!(result, ParseResult::Success(_)));

        let result = parser(&v(&[Value::String("x".into()), Value::Number(1.0)]), &opts);
        assert!(matches!(
            result,
            ParseResult::Failure(errs)
                if matches!(errs.as_slice(), [ParseError::Index(1, inner)]
                    if matches!(inner.as_slice(), [ParseError::Type(_, _)]))
        ));
    }

    #[test]
    fn input_shorter_than_fixed_plus_tail_reports_missing_at_absolute_index() {
        // [string, ...number[], boolean] with only the fixed prefix present:
        // the tail's `boolean` position is absent, not re-parsed against it.
        let schema = Ast::tuple(
            vec![TupleElement {
                ty: Ast::string_keyword(),
                is_optional: false,
            }],
            Some(Rest {
                parts: vec![Ast::number_keyword(), Ast::boolean_keyword()],
            }),
            false,
        );
        let parser = compile(&schema, Direction::Decoder);
        let result = parser(&v(&[Value::String("x".into())]), &ParseOptions::new());
        assert!(matches!(
            result,
            ParseResult::Failure(errs) if matches!(
                errs.as_slice(),
                [ParseError::Index(1, inner)] if matches!(inner.as_slice(), [ParseError::Missing])
            )
        ));
    }

    #[test]
    fn extra_elements_without_rest_are_unexpected() {
        let schema = Ast::tuple(
            vec![TupleElement {
                ty: Ast::string_keyword(),
                is_optional: false,
            }],
            None,
            false,
        );
        let parser = compile(&schema, Direction::Decoder);

        let strict = parser(&v(&[Value::String("a".into()), Value::Number(1.0)]), &ParseOptions::new());
        assert!(strict.is_failure());

        let lenient = parser(
            &v(&[Value::String("a".into()), Value::Number(1.0)]),
            &ParseOptions::new().with_unexpected_allowed(true),
        );
        assert!(matches!(lenient, ParseResult::Warning(_, _)));
    }

    #[test]
    fn missing_required_element_is_fatal() {
        let schema = Ast::tuple(
            vec![TupleElement {
                ty: Ast::string_keyword(),
                is_optional: false,
            }],
            None,
            false,
        );
        let parser = compile(&schema, Direction::Decoder);
        let result = parser(&v(&[]), &ParseOptions::new());
        assert!(matches!(
            result,
            ParseResult::Failure(errs) if matches!(
                errs.as_slice(),
                [ParseError::Index(0, inner)] if matches!(inner.as_slice(), [ParseError::Missing])
            )
        ));
    }
}
