//! `Enums`: a fixed, named set of literal values (§4.4).

use std::sync::Arc;

use crate::ast::{Ast, Node};
use crate::diagnostic::{ParseError, ParseResult};
use crate::options::Direction;
use crate::parser::Parser;

pub fn compile(ast: &Ast, _direction: Direction) -> Parser {
    let Node::Enums { enums } = ast.node() else {
        unreachable!("enums::compile called with a non-enums node")
    };
    let enums = enums.clone();
    let type_ast = ast.clone();

    Arc::new(move |input, _opts| {
        if enums.iter().any(|(_, v)| v.matches(input)) {
            ParseResult::Success(input.clone())
        } else {
            ParseResult::Failure(vec![ParseError::Type(type_ast.clone(), input.clone())])
        }
    })
}
