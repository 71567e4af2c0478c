//! `TypeLiteral`: a record with fixed property signatures and/or index
//! signatures (§4.4).

use std::ops::ControlFlow;
use std::sync::Arc;

use crate::ast::{Ast, IndexSignature, Node};
use crate::diagnostic::{ParseError, ParseResult};
use crate::options::Direction;
use crate::parser::Parser;
use crate::value::{Key, Value};

use super::accumulate::Accumulator;

/// Which keys an index signature's parameter parser is willing to match,
/// determined once at compile time from the parameter AST's shape.
enum KeyKind {
    String,
    Symbol,
    /// A `TemplateLiteral`-constrained string key: only keys the compiled
    /// parameter parser itself accepts are candidates.
    Constrained,
}

fn key_kind(parameter: &Ast) -> KeyKind {
    match parameter.node() {
        crate::ast::Node::SymbolKeyword => KeyKind::Symbol,
        crate::ast::Node::StringKeyword => KeyKind::String,
        _ => KeyKind::Constrained,
    }
}

pub fn compile(ast: &Ast, direction: Direction) -> Parser {
    let Node::TypeLiteral {
        property_signatures,
        index_signatures,
    } = ast.node()
    else {
        unreachable!("type_literal::compile called with a non-type-literal node")
    };

    let property_parsers: Vec<(Key, Parser, bool)> = property_signatures
        .iter()
        .map(|p| (p.name.clone(), super::compile(&p.ty, direction), p.is_optional))
        .collect();
    let declared: std::collections::HashSet<Key> =
        property_parsers.iter().map(|(k, ..)| k.clone()).collect();

    let index_parsers: Vec<(KeyKind, Parser, Parser)> = index_signatures
        .iter()
        .map(|IndexSignature { parameter, ty }| {
            (
                key_kind(parameter),
                super::compile(parameter, direction),
                super::compile(ty, direction),
            )
        })
        .collect();

    let type_ast = ast.clone();

    Arc::new(move |input, opts| {
        let Value::Object(map) = input else {
            return ParseResult::Failure(vec![ParseError::Type(type_ast.clone(), input.clone())]);
        };
        let mut acc = Accumulator::new(opts);
        let mut out: indexmap::IndexMap<Key, Value> = indexmap::IndexMap::new();

        for (name, parser, is_optional) in &property_parsers {
            let control = match map.get(name) {
                None if *is_optional => ControlFlow::Continue(()),
                None => acc.fail(ParseError::Key(name.clone(), vec![ParseError::Missing])),
                Some(value) => absorb_keyed(&mut acc, name.clone(), parser(value, opts), &mut out),
            };
            if control.is_break() {
                return acc.finish(None);
            }
        }

        for (key, value) in map {
            if declared.contains(key) {
                continue;
            }
            let Some((_, key_parser, value_parser)) = index_parsers
                .iter()
                .find(|(kind, key_parser, _)| matches_kind(kind, key, key_parser, opts))
            else {
                let err = ParseError::Key(key.clone(), vec![ParseError::Unexpected(value.clone())]);
                let control = if index_parsers.is_empty() {
                    if opts.is_unexpected_allowed {
                        acc.warn(std::iter::once(err));
                        out.insert(key.clone(), value.clone());
                        ControlFlow::Continue(())
                    } else {
                        acc.fail(err)
                    }
                } else {
                    // Index signatures exist but none matched this key's
                    // kind: the key simply isn't part of the record.
                    ControlFlow::Continue(())
                };
                if control.is_break() {
                    return acc.finish(None);
                }
                continue;
            };

            let key_as_value = match key {
                Key::String(s) => Value::String(s.clone()),
                Key::Symbol(s) => Value::Symbol(s.clone()),
            };
            if let ParseResult::Failure(errs) = key_parser(&key_as_value, opts) {
                let control = acc.fail(ParseError::Key(key.clone(), errs));
                if control.is_break() {
                    return acc.finish(None);
                }
                continue;
            }
            let control = absorb_keyed(&mut acc, key.clone(), value_parser(value, opts), &mut out);
            if control.is_break() {
                return acc.finish(None);
            }
        }

        if acc.is_fatal() {
            acc.finish(None)
        } else {
            acc.finish(Some(Value::Object(out)))
        }
    })
}

fn matches_kind(kind: &KeyKind, key: &Key, key_parser: &Parser, opts: &crate::options::ParseOptions) -> bool {
    match kind {
        KeyKind::String => matches!(key, Key::String(_)),
        KeyKind::Symbol => matches!(key, Key::Symbol(_)),
        KeyKind::Constrained => {
            let Key::String(s) = key else { return false };
            key_parser(&Value::String(s.clone()), opts).is_accepted()
        }
    }
}

fn absorb_keyed(
    acc: &mut Accumulator,
    key: Key,
    result: ParseResult<Value>,
    out: &mut indexmap::IndexMap<Key, Value>,
) -> ControlFlow<()> {
    match result {
        ParseResult::Success(v) => {
            out.insert(key, v);
            ControlFlow::Continue(())
        }
        ParseResult::Warning(errs, v) => {
            acc.warn(std::iter::once(ParseError::Key(key.clone(), errs)));
            out.insert(key, v);
            ControlFlow::Continue(())
        }
        ParseResult::Failure(errs) => acc.fail(ParseError::Key(key, errs)),
    }
}
