//! `TemplateLiteral`: a string shape built from literal segments and typed
//! placeholders, compiled once to a single [`regex::Regex`] (§4.4).

use std::sync::Arc;

use regex::Regex;

use crate::ast::{Ast, Literal, Node, TemplateLiteralPart};
use crate::diagnostic::ParseError;
use crate::options::Direction;
use crate::parser::Parser;
use crate::value::Value;

pub fn compile(ast: &Ast, _direction: Direction) -> Parser {
    let Node::TemplateLiteral { parts } = ast.node() else {
        unreachable!("template_literal::compile called with a non-template-literal node")
    };

    let mut pattern = String::from("^");
    for part in parts {
        match part {
            TemplateLiteralPart::Literal(s) => pattern.push_str(&regex::escape(s)),
            TemplateLiteralPart::Placeholder(p) => pattern.push_str(&placeholder_pattern(p)),
        }
    }
    pattern.push('$');
    let regex = Regex::new(&pattern).expect("template literal pattern is always valid regex");
    let type_ast = ast.clone();
    let string_ast = Ast::string_keyword();

    Arc::new(move |input, _opts| {
        let Value::String(s) = input else {
            return crate::diagnostic::ParseResult::Failure(vec![ParseError::Type(
                string_ast.clone(),
                input.clone(),
            )]);
        };
        if regex.is_match(s) {
            crate::diagnostic::ParseResult::Success(input.clone())
        } else {
            crate::diagnostic::ParseResult::Failure(vec![ParseError::Type(type_ast.clone(), input.clone())])
        }
    })
}

fn placeholder_pattern(ast: &Ast) -> String {
    match ast.node() {
        Node::StringKeyword => ".*".to_owned(),
        Node::NumberKeyword => r"-?\d+(?:\.\d+)?".to_owned(),
        Node::BooleanKeyword => "true|false".to_owned(),
        Node::BigIntKeyword => r"-?\d+".to_owned(),
        Node::Literal(lit) => format!("(?:{})", regex::escape(&literal_text(lit))),
        Node::Union { types } => {
            let alts: Vec<String> = types.iter().map(|t| placeholder_pattern(t)).collect();
            format!("(?:{})", alts.join("|"))
        }
        _ => unreachable!("template literal placeholder must be a primitive keyword, literal, or union of either"),
    }
}

fn literal_text(lit: &Literal) -> String {
    match lit {
        Literal::String(s) => s.clone(),
        Literal::Number(n) => n.to_string(),
        Literal::Boolean(b) => b.to_string(),
        Literal::Null => "null".to_owned(),
        Literal::BigInt(b) => b.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::ParseResult;
    use crate::options::ParseOptions;

    #[test]
    fn matches_literal_prefix_and_typed_placeholder() {
        let schema = Ast::template_literal(vec![
            TemplateLiteralPart::Literal("id-".into()),
            TemplateLiteralPart::Placeholder(Ast::number_keyword()),
        ]);
        let parser = compile(&schema, Direction::Decoder);
        assert!(matches!(
            parser(&Value::String("id-42".into()), &ParseOptions::new()),
            ParseResult::Success(_)
        ));
        assert!(parser(&Value::String("id-abc".into()), &ParseOptions::new()).is_failure());
    }

    #[test]
    fn non_string_input_is_rejected() {
        let schema = Ast::template_literal(vec![TemplateLiteralPart::Literal("x".into())]);
        let parser = compile(&schema, Direction::Decoder);
        assert!(parser(&Value::Number(1.0), &ParseOptions::new()).is_failure());
    }

    #[test]
    fn union_placeholder_is_an_alternation() {
        let schema = Ast::template_literal(vec![TemplateLiteralPart::Placeholder(Ast::union(vec![
            Ast::literal(Literal::String("a".into())),
            Ast::literal(Literal::String("b".into())),
        ]))]);
        let parser = compile(&schema, Direction::Decoder);
        assert!(parser(&Value::String("a".into()), &ParseOptions::new()).is_success());
        assert!(parser(&Value::String("c".into()), &ParseOptions::new()).is_failure());
    }
}
