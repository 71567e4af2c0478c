//! `Lazy`: a self-referential schema node, compiled through a one-shot
//! [`crate::memo::Memo`] keyed by `(node id, direction)` so recursive
//! schemas never recurse at compile time (C4).

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy as OnceCellLazy;

use crate::ast::{Ast, Node, NodeId};
use crate::diagnostic::ParseResult;
use crate::memo::Memo;
use crate::options::Direction;
use crate::parser::Parser;

static MEMOS: OnceCellLazy<RwLock<HashMap<(NodeId, Direction), Arc<Memo>>>> =
    OnceCellLazy::new(|| RwLock::new(HashMap::new()));

fn memo_for(id: NodeId, direction: Direction) -> Arc<Memo> {
    if let Some(memo) = MEMOS
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .get(&(id, direction))
    {
        return memo.clone();
    }
    MEMOS
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .entry((id, direction))
        .or_insert_with(|| Arc::new(Memo::new()))
        .clone()
}

pub fn compile(ast: &Ast, direction: Direction) -> Parser {
    let Node::Lazy { id, f, .. } = ast.node() else {
        unreachable!("lazy::compile called with a non-lazy node")
    };
    let id = *id;
    let f = f.clone();

    Arc::new(move |input, opts| {
        let memo = memo_for(id, direction);
        let inner = memo.get_or_init(|| super::compile(&f(), direction));
        inner(input, opts)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{PropertySignature, TupleElement};
    use crate::options::ParseOptions;
    use crate::value::{Key, Value};

    #[test]
    fn recursive_schema_parses_nested_depth() {
        // type Tree = { value: number, children: Tree[] } represented with a
        // fixed-arity tuple-of-children approximation, since the vocabulary
        // has no native array keyword: children is a tuple with a Rest of
        // the recursive reference.
        fn tree() -> Ast {
            Ast::lazy("Tree", || {
                Ast::type_literal(
                    vec![
                        PropertySignature {
                            name: "value".into(),
                            ty: Ast::number_keyword(),
                            is_optional: false,
                        },
                        PropertySignature {
                            name: "children".into(),
                            ty: Ast::tuple(
                                vec![],
                                Some(crate::ast::Rest {
                                    parts: vec![tree()],
                                }),
                                false,
                            ),
                            is_optional: false,
                        },
                    ],
                    vec![],
                )
            })
        }

        let schema = tree();
        let parser = super::super::compile(&schema, Direction::Decoder);
        let opts = ParseOptions::new();

        let leaf = Value::Object(
            [
                (Key::from("value"), Value::Number(1.0)),
                (Key::from("children"), Value::Array(vec![])),
            ]
            .into_iter()
            .collect(),
        );
        let nested = Value::Object(
            [
                (Key::from("value"), Value::Number(0.0)),
                (Key::from("children"), Value::Array(vec![leaf.clone()])),
            ]
            .into_iter()
            .collect(),
        );
        assert!(matches!(parser(&nested, &opts), ParseResult::Success(_)));
    }
}
