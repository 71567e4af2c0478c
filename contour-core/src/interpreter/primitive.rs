//! Singletons and primitive keywords: `Literal`, `UniqueSymbol`,
//! `Undefined`/`Void`/`Never`/`Unknown`/`Any`, and the primitive type
//! keywords. None of these are direction-sensitive.

use std::sync::Arc;

use crate::ast::{Ast, Literal, Node};
use crate::diagnostic::{ParseError, ParseResult};
use crate::options::{Direction, ParseOptions};
use crate::parser::Parser;
use crate::value::Value;

use super::bigint;

pub fn compile(ast: &Ast, _direction: Direction) -> Parser {
    match ast.node() {
        Node::Literal(lit) => literal(lit.clone(), ast.clone()),
        Node::UniqueSymbol(sym) => {
            let sym = sym.clone();
            let ast = ast.clone();
            Arc::new(move |input, _opts| match input {
                Value::Symbol(s) if *s == sym => ParseResult::Success(input.clone()),
                _ => ParseResult::Failure(vec![ParseError::Equal(
                    Value::Symbol(sym.clone()),
                    input.clone(),
                )]),
            })
        }
        Node::UndefinedKeyword | Node::VoidKeyword => keyword(ast.clone(), |v| {
            matches!(v, Value::Undefined)
        }),
        Node::NeverKeyword => {
            let ast = ast.clone();
            Arc::new(move |input, _opts| {
                ParseResult::Failure(vec![ParseError::Type(ast.clone(), input.clone())])
            })
        }
        Node::UnknownKeyword | Node::AnyKeyword => {
            Arc::new(|input, _opts| ParseResult::Success(input.clone()))
        }
        Node::StringKeyword => keyword(ast.clone(), |v| matches!(v, Value::String(_))),
        Node::NumberKeyword => keyword(ast.clone(), |v| matches!(v, Value::Number(_))),
        Node::BooleanKeyword => keyword(ast.clone(), |v| matches!(v, Value::Boolean(_))),
        Node::SymbolKeyword => keyword(ast.clone(), |v| matches!(v, Value::Symbol(_))),
        Node::ObjectKeyword => keyword(ast.clone(), Value::is_object_like),
        Node::BigIntKeyword => {
            let ast = ast.clone();
            Arc::new(move |input, _opts| bigint::coerce(input, &ast))
        }
        _ => unreachable!("primitive::compile called with a non-primitive node"),
    }
}

fn literal(lit: Literal, ast: Ast) -> Parser {
    Arc::new(move |input, _opts: &ParseOptions| {
        if lit.matches(input) {
            ParseResult::Success(input.clone())
        } else {
            ParseResult::Failure(vec![ParseError::Equal(lit.to_value(), input.clone())])
        }
    })
}

fn keyword(ast: Ast, test: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Parser {
    Arc::new(move |input, _opts| {
        if test(input) {
            ParseResult::Success(input.clone())
        } else {
            ParseResult::Failure(vec![ParseError::Type(ast.clone(), input.clone())])
        }
    })
}
