//! `Union`: the first matching branch wins, with a best-effort fallback
//! among partial matches (§4.4).

use std::sync::Arc;

use crate::ast::{Ast, Node};
use crate::diagnostic::{ParseError, ParseResult};
use crate::options::Direction;
use crate::parser::Parser;

pub fn compile(ast: &Ast, direction: Direction) -> Parser {
    let Node::Union { types } = ast.node() else {
        unreachable!("union::compile called with a non-union node")
    };
    let branches: Vec<Parser> = types.iter().map(|t| super::compile(t, direction)).collect();
    let never_ast = Ast::never_keyword();

    Arc::new(move |input, opts| {
        let mut best_warning: Option<(Vec<ParseError>, crate::value::Value, usize)> = None;
        let mut member_failures = Vec::new();

        for branch in &branches {
            match branch(input, opts) {
                ParseResult::Success(v) => return ParseResult::Success(v),
                ParseResult::Warning(errs, v) => {
                    let score = errs.iter().map(ParseError::count_unexpected).sum();
                    let better = match &best_warning {
                        None => true,
                        Some((_, _, best_score)) => score < *best_score,
                    };
                    if better {
                        best_warning = Some((errs, v, score));
                    }
                }
                ParseResult::Failure(errs) => member_failures.push(ParseError::Member(errs)),
            }
        }

        if let Some((errs, v, _)) = best_warning {
            return ParseResult::Warning(errs, v);
        }
        if !member_failures.is_empty() {
            return ParseResult::Failure(member_failures);
        }
        ParseResult::Failure(vec![ParseError::Type(never_ast.clone(), input.clone())])
    })
}
