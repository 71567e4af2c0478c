//! Compiles an [`Ast`] into a [`Parser`] (C5).
//!
//! One node kind, one submodule; this file only dispatches and handles
//! `TypeAlias` expansion (the one node kind every other compiled parser can
//! recurse back into).

mod accumulate;
mod bigint;
mod enums;
mod lazy;
mod primitive;
mod refinement;
mod template_literal;
mod transform;
mod tuple;
mod type_literal;
mod union;

use crate::ast::{Ast, Node};
use crate::hooks;
use crate::options::Direction;
use crate::parser::Parser;

/// Compiles `ast` for `direction`. Grounded on the teacher's
/// `Keyword::compile`/`evaluate` split (`grill-core/src/keyword.rs`): one
/// recursive entry point that a node's own submodule calls back into for
/// each of its children, rather than a single giant match arm per node.
#[must_use]
pub fn compile(ast: &Ast, direction: Direction) -> Parser {
    tracing::debug!(kind = ast.kind_name(), ?direction, "compiling node");
    match ast.node() {
        Node::TypeAlias { .. } => type_alias(ast, direction),
        Node::Literal(_)
        | Node::UniqueSymbol(_)
        | Node::UndefinedKeyword
        | Node::VoidKeyword
        | Node::NeverKeyword
        | Node::UnknownKeyword
        | Node::AnyKeyword
        | Node::StringKeyword
        | Node::NumberKeyword
        | Node::BooleanKeyword
        | Node::BigIntKeyword
        | Node::SymbolKeyword
        | Node::ObjectKeyword => primitive::compile(ast, direction),
        Node::Tuple { .. } => tuple::compile(ast, direction),
        Node::TypeLiteral { .. } => type_literal::compile(ast, direction),
        Node::Union { .. } => union::compile(ast, direction),
        Node::Lazy { .. } => lazy::compile(ast, direction),
        Node::Enums { .. } => enums::compile(ast, direction),
        Node::Refinement { .. } => refinement::compile(ast, direction),
        Node::TemplateLiteral { .. } => template_literal::compile(ast, direction),
        Node::Transform { .. } => transform::compile(ast, direction),
    }
}

/// Expands a `TypeAlias` node: a registered hook takes over compilation
/// entirely (given the already-compiled type parameters), or, absent one,
/// the alias just compiles to its body (§4.1).
fn type_alias(ast: &Ast, direction: Direction) -> Parser {
    let Node::TypeAlias {
        id,
        type_,
        type_parameters,
    } = ast.node()
    else {
        unreachable!("type_alias called with a non-type-alias node")
    };
    match hooks::lookup(*id) {
        Some(handler) => {
            let params: Vec<Parser> = type_parameters.iter().map(|p| compile(p, direction)).collect();
            handler(&params)
        }
        None => compile(type_, direction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::ParseResult;
    use crate::options::ParseOptions;
    use crate::value::Value;

    #[test]
    fn type_alias_without_hook_compiles_its_body() {
        let schema = Ast::type_alias(Ast::string_keyword(), vec![]);
        let parser = compile(&schema, Direction::Decoder);
        assert!(parser(&Value::String("x".into()), &ParseOptions::new()).is_success());
        assert!(parser(&Value::Number(1.0), &ParseOptions::new()).is_failure());
    }

    #[test]
    fn type_alias_with_hook_delegates_entirely() {
        let schema = Ast::type_alias(Ast::string_keyword(), vec![Ast::number_keyword()]);
        let Node::TypeAlias { id, .. } = schema.node() else {
            unreachable!()
        };
        hooks::register(*id, |params| {
            let param = params[0].clone();
            let delegate: Parser = std::sync::Arc::new(move |v: &Value, opts: &ParseOptions| param(v, opts));
            delegate
        });
        let parser = compile(&schema, Direction::Decoder);
        // The hook compiled the declared type parameter (number), not the
        // alias body (string).
        assert!(matches!(
            parser(&Value::Number(1.0), &ParseOptions::new()),
            ParseResult::Success(_)
        ));
        assert!(parser(&Value::String("x".into()), &ParseOptions::new()).is_failure());
    }
}
