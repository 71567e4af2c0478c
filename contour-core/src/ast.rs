//! The schema AST: a closed, immutable, tagged tree.
//!
//! Every node is constructed once and never mutated afterwards; sharing is
//! done by cloning the cheap [`Ast`] handle (an `Arc` around the actual
//! [`Node`]), not by mutating in place.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use num::BigInt;

use crate::diagnostic::ParseResult;
use crate::value::{Key, Symbol, Value};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

/// Identifies one specific AST node instance, assigned at construction.
///
/// Used as the [`crate::hooks`] registry key and the [`crate::memo`]
/// fix-point key. Two structurally identical nodes built independently get
/// different ids — the hook registry overrides one *instance*, not every
/// node that happens to look like it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The payload of a `Literal` node: a singleton value the input must equal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    BigInt(BigInt),
}

impl Literal {
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Literal::String(a), Value::String(b)) => a == b,
            (Literal::Number(a), Value::Number(b)) => a == b,
            (Literal::Boolean(a), Value::Boolean(b)) => a == b,
            (Literal::Null, Value::Null) => true,
            (Literal::BigInt(a), Value::BigInt(b)) => a == b,
            _ => false,
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Literal::String(s) => Value::String(s.clone()),
            Literal::Number(n) => Value::Number(*n),
            Literal::Boolean(b) => Value::Boolean(*b),
            Literal::Null => Value::Null,
            Literal::BigInt(b) => Value::BigInt(b.clone()),
        }
    }
}

/// One value of an `Enums` node: a `(name, value)` pair, where `value` is
/// the only part that participates in matching.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumValue {
    String(String),
    Number(f64),
}

impl EnumValue {
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (EnumValue::String(a), Value::String(b)) => a == b,
            (EnumValue::Number(a), Value::Number(b)) => a == b,
            _ => false,
        }
    }
}

/// One element of a `Tuple` node's fixed-position prefix.
#[derive(Debug, Clone)]
pub struct TupleElement {
    pub ty: Ast,
    pub is_optional: bool,
}

/// The variadic middle plus fixed tail of a `Tuple`'s `rest`, when present.
/// Non-empty: `parts[0]` is the middle (variadic) element; `parts[1..]` is
/// the fixed sequence required after it.
#[derive(Debug, Clone)]
pub struct Rest {
    pub parts: Vec<Ast>,
}

/// A `{ name: type, name?: type }` member of a `TypeLiteral`.
#[derive(Debug, Clone)]
pub struct PropertySignature {
    pub name: Key,
    pub ty: Ast,
    pub is_optional: bool,
}

/// A `{ [k: K]: type }` member of a `TypeLiteral`. `parameter` is itself an
/// AST node describing the kind of key matched (`StringKeyword`,
/// `SymbolKeyword`, or a `TemplateLiteral`-constrained string key).
#[derive(Debug, Clone)]
pub struct IndexSignature {
    pub parameter: Ast,
    pub ty: Ast,
}

/// One segment of a `TemplateLiteral`'s pattern.
#[derive(Debug, Clone)]
pub enum TemplateLiteralPart {
    Literal(String),
    /// A placeholder whose accepted values are described by a primitive
    /// keyword node, a `Literal`, or a `Union` of either.
    Placeholder(Ast),
}

type RefinementFn = Arc<dyn Fn(&Value) -> ParseResult<Value> + Send + Sync>;
type TransformFn = crate::parser::Parser;
type LazyThunk = Arc<dyn Fn() -> Ast + Send + Sync>;

/// The tagged variant at the heart of the AST. See module docs.
pub enum Node {
    TypeAlias {
        id: NodeId,
        type_: Ast,
        type_parameters: Vec<Ast>,
    },
    Literal(Literal),
    UniqueSymbol(Symbol),
    UndefinedKeyword,
    VoidKeyword,
    NeverKeyword,
    UnknownKeyword,
    AnyKeyword,
    StringKeyword,
    NumberKeyword,
    BooleanKeyword,
    BigIntKeyword,
    SymbolKeyword,
    ObjectKeyword,
    Tuple {
        elements: Vec<TupleElement>,
        rest: Option<Rest>,
        is_readonly: bool,
    },
    TypeLiteral {
        property_signatures: Vec<PropertySignature>,
        index_signatures: Vec<IndexSignature>,
    },
    Union {
        types: Vec<Ast>,
    },
    Lazy {
        id: NodeId,
        identifier: String,
        f: LazyThunk,
    },
    Enums {
        enums: Vec<(String, EnumValue)>,
    },
    Refinement {
        from: Ast,
        decode: RefinementFn,
    },
    TemplateLiteral {
        parts: Vec<TemplateLiteralPart>,
    },
    Transform {
        from: Ast,
        to: Ast,
        decode: TransformFn,
        encode: TransformFn,
    },
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Node::TypeAlias { .. } => "TypeAlias",
            Node::Literal(l) => return write!(f, "Literal({l:?})"),
            Node::UniqueSymbol(s) => return write!(f, "UniqueSymbol({s})"),
            Node::UndefinedKeyword => "UndefinedKeyword",
            Node::VoidKeyword => "VoidKeyword",
            Node::NeverKeyword => "NeverKeyword",
            Node::UnknownKeyword => "UnknownKeyword",
            Node::AnyKeyword => "AnyKeyword",
            Node::StringKeyword => "StringKeyword",
            Node::NumberKeyword => "NumberKeyword",
            Node::BooleanKeyword => "BooleanKeyword",
            Node::BigIntKeyword => "BigIntKeyword",
            Node::SymbolKeyword => "SymbolKeyword",
            Node::ObjectKeyword => "ObjectKeyword",
            Node::Tuple { .. } => "Tuple",
            Node::TypeLiteral { .. } => "TypeLiteral",
            Node::Union { .. } => "Union",
            Node::Lazy { identifier, .. } => return write!(f, "Lazy({identifier})"),
            Node::Enums { .. } => "Enums",
            Node::Refinement { .. } => "Refinement",
            Node::TemplateLiteral { .. } => "TemplateLiteral",
            Node::Transform { .. } => "Transform",
        };
        write!(f, "{tag}")
    }
}

/// A cheaply-cloneable handle to an immutable [`Node`].
#[derive(Debug, Clone)]
pub struct Ast(pub(crate) Arc<Node>);

impl Ast {
    #[must_use]
    pub fn node(&self) -> &Node {
        &self.0
    }

    /// A short, human-readable name for error messages and logging; not the
    /// full `Debug` dump.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match &*self.0 {
            Node::TypeAlias { .. } => "TypeAlias",
            Node::Literal(_) => "Literal",
            Node::UniqueSymbol(_) => "UniqueSymbol",
            Node::UndefinedKeyword => "UndefinedKeyword",
            Node::VoidKeyword => "VoidKeyword",
            Node::NeverKeyword => "NeverKeyword",
            Node::UnknownKeyword => "UnknownKeyword",
            Node::AnyKeyword => "AnyKeyword",
            Node::StringKeyword => "StringKeyword",
            Node::NumberKeyword => "NumberKeyword",
            Node::BooleanKeyword => "BooleanKeyword",
            Node::BigIntKeyword => "BigIntKeyword",
            Node::SymbolKeyword => "SymbolKeyword",
            Node::ObjectKeyword => "ObjectKeyword",
            Node::Tuple { .. } => "Tuple",
            Node::TypeLiteral { .. } => "TypeLiteral",
            Node::Union { .. } => "Union",
            Node::Lazy { .. } => "Lazy",
            Node::Enums { .. } => "Enums",
            Node::Refinement { .. } => "Refinement",
            Node::TemplateLiteral { .. } => "TemplateLiteral",
            Node::Transform { .. } => "Transform",
        }
    }

    fn new(node: Node) -> Self {
        Ast(Arc::new(node))
    }

    // -- constructors (C1) ---------------------------------------------

    #[must_use]
    pub fn type_alias(type_: Ast, type_parameters: Vec<Ast>) -> Self {
        Self::new(Node::TypeAlias {
            id: NodeId::next(),
            type_,
            type_parameters,
        })
    }

    #[must_use]
    pub fn literal(literal: Literal) -> Self {
        Self::new(Node::Literal(literal))
    }

    #[must_use]
    pub fn unique_symbol(symbol: Symbol) -> Self {
        Self::new(Node::UniqueSymbol(symbol))
    }

    #[must_use]
    pub fn undefined_keyword() -> Self {
        Self::new(Node::UndefinedKeyword)
    }

    #[must_use]
    pub fn void_keyword() -> Self {
        Self::new(Node::VoidKeyword)
    }

    #[must_use]
    pub fn never_keyword() -> Self {
        Self::new(Node::NeverKeyword)
    }

    #[must_use]
    pub fn unknown_keyword() -> Self {
        Self::new(Node::UnknownKeyword)
    }

    #[must_use]
    pub fn any_keyword() -> Self {
        Self::new(Node::AnyKeyword)
    }

    #[must_use]
    pub fn string_keyword() -> Self {
        Self::new(Node::StringKeyword)
    }

    #[must_use]
    pub fn number_keyword() -> Self {
        Self::new(Node::NumberKeyword)
    }

    #[must_use]
    pub fn boolean_keyword() -> Self {
        Self::new(Node::BooleanKeyword)
    }

    #[must_use]
    pub fn bigint_keyword() -> Self {
        Self::new(Node::BigIntKeyword)
    }

    #[must_use]
    pub fn symbol_keyword() -> Self {
        Self::new(Node::SymbolKeyword)
    }

    #[must_use]
    pub fn object_keyword() -> Self {
        Self::new(Node::ObjectKeyword)
    }

    /// # Panics
    /// If `rest` is `Some` with an empty `parts`.
    #[must_use]
    pub fn tuple(elements: Vec<TupleElement>, rest: Option<Rest>, is_readonly: bool) -> Self {
        if let Some(r) = &rest {
            assert!(!r.parts.is_empty(), "Tuple.rest must be non-empty");
        }
        Self::new(Node::Tuple {
            elements,
            rest,
            is_readonly,
        })
    }

    /// # Panics
    /// If two property signatures share a name.
    #[must_use]
    pub fn type_literal(
        property_signatures: Vec<PropertySignature>,
        index_signatures: Vec<IndexSignature>,
    ) -> Self {
        let mut seen = std::collections::HashSet::new();
        for p in &property_signatures {
            assert!(
                seen.insert(p.name.clone()),
                "duplicate property signature name: {}",
                p.name
            );
        }
        Self::new(Node::TypeLiteral {
            property_signatures,
            index_signatures,
        })
    }

    /// # Panics
    /// If fewer than two branches are given.
    #[must_use]
    pub fn union(types: Vec<Ast>) -> Self {
        assert!(types.len() >= 2, "Union requires at least two branches");
        Self::new(Node::Union { types })
    }

    #[must_use]
    pub fn lazy(identifier: impl Into<String>, f: impl Fn() -> Ast + Send + Sync + 'static) -> Self {
        Self::new(Node::Lazy {
            id: NodeId::next(),
            identifier: identifier.into(),
            f: Arc::new(f),
        })
    }

    /// # Panics
    /// If `enums` is empty.
    #[must_use]
    pub fn enums(enums: Vec<(String, EnumValue)>) -> Self {
        assert!(!enums.is_empty(), "Enums requires at least one member");
        Self::new(Node::Enums { enums })
    }

    #[must_use]
    pub fn refinement(
        from: Ast,
        decode: impl Fn(&Value) -> ParseResult<Value> + Send + Sync + 'static,
    ) -> Self {
        Self::new(Node::Refinement {
            from,
            decode: Arc::new(decode),
        })
    }

    #[must_use]
    pub fn template_literal(parts: Vec<TemplateLiteralPart>) -> Self {
        Self::new(Node::TemplateLiteral { parts })
    }

    #[must_use]
    pub fn transform(
        from: Ast,
        to: Ast,
        decode: impl Fn(&Value, &crate::options::ParseOptions) -> ParseResult<Value> + Send + Sync + 'static,
        encode: impl Fn(&Value, &crate::options::ParseOptions) -> ParseResult<Value> + Send + Sync + 'static,
    ) -> Self {
        Self::new(Node::Transform {
            from,
            to,
            decode: Arc::new(decode),
            encode: Arc::new(encode),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "at least two branches")]
    fn union_rejects_single_branch() {
        Ast::union(vec![Ast::string_keyword()]);
    }

    #[test]
    #[should_panic(expected = "duplicate property signature name")]
    fn type_literal_rejects_duplicate_names() {
        Ast::type_literal(
            vec![
                PropertySignature {
                    name: "a".into(),
                    ty: Ast::string_keyword(),
                    is_optional: false,
                },
                PropertySignature {
                    name: "a".into(),
                    ty: Ast::number_keyword(),
                    is_optional: false,
                },
            ],
            vec![],
        );
    }

    #[test]
    #[should_panic(expected = "Tuple.rest must be non-empty")]
    fn tuple_rejects_empty_rest() {
        Ast::tuple(vec![], Some(Rest { parts: vec![] }), false);
    }

    #[test]
    fn independently_built_nodes_get_distinct_ids() {
        let a = Ast::type_alias(Ast::string_keyword(), vec![]);
        let b = Ast::type_alias(Ast::string_keyword(), vec![]);
        let (Node::TypeAlias { id: id_a, .. }, Node::TypeAlias { id: id_b, .. }) =
            (a.node(), b.node())
        else {
            unreachable!()
        };
        assert_ne!(id_a, id_b);
    }
}
