//! `Refinement`: a value-level check (and possible narrowing) applied after
//! `from` has already decoded successfully (§4.4).

use std::sync::Arc;

use crate::ast::Node;
use crate::diagnostic::ParseResult;
use crate::options::Direction;
use crate::parser::Parser;

pub fn compile(ast: &crate::ast::Ast, direction: Direction) -> Parser {
    let Node::Refinement { from, decode } = ast.node() else {
        unreachable!("refinement::compile called with a non-refinement node")
    };
    let from_parser = super::compile(from, direction);
    let decode = decode.clone();

    Arc::new(move |input, opts| match from_parser(input, opts) {
        ParseResult::Success(v) => decode(&v),
        ParseResult::Warning(prior_errs, v) => match decode(&v) {
            ParseResult::Success(v2) => ParseResult::Warning(prior_errs, v2),
            ParseResult::Warning(mut errs2, v2) => {
                let mut combined = prior_errs;
                combined.append(&mut errs2);
                ParseResult::Warning(combined, v2)
            }
            ParseResult::Failure(errs2) => ParseResult::Failure(errs2),
        },
        ParseResult::Failure(errs) => ParseResult::Failure(errs),
    })
}
