//! One-shot fix-point box backing `Lazy` node compilation (C4).
//!
//! A `Lazy` node's thunk is never invoked while `go` is compiling its
//! enclosing schema — compiling a `Lazy` node just wraps a proxy parser
//! around one of these boxes and returns immediately. The thunk, and the
//! real compilation of whatever AST it returns, happens at most once, the
//! first time that proxy parser is actually called with input. Because
//! `go` never eagerly expands a `Lazy` node, a schema that refers to
//! itself through one can never cause unbounded compile-time recursion;
//! unbounded *parse*-time recursion is likewise impossible because each
//! level is only reached if the input actually has that much depth.

use std::sync::OnceLock;

use crate::parser::Parser;

/// A single-writer, many-reader cache for the parser a `Lazy` node expands
/// to. Safe to share across threads: [`OnceLock`] blocks concurrent
/// callers until the first `init` finishes, so the compiled body is built
/// exactly once regardless of how many threads call the `Lazy` node's
/// parser concurrently before it's warm.
#[derive(Default)]
pub struct Memo {
    cell: OnceLock<Parser>,
}

impl Memo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized parser, calling `init` to build it on the
    /// first call only.
    pub fn get_or_init(&self, init: impl FnOnce() -> Parser) -> Parser {
        self.cell.get_or_init(init).clone()
    }
}
