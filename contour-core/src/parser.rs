//! The compiled closure produced by the interpreter for one `(Ast,
//! Direction)` pair.

use std::sync::Arc;

use crate::diagnostic::ParseResult;
use crate::options::ParseOptions;
use crate::value::Value;

/// `(input, options) -> ParseResult`.
///
/// Parsers are referentially transparent over their input, hold no mutable
/// state, and never retain a handle to the input beyond their return — they
/// may be shared across threads without synchronization (§5).
pub type Parser = Arc<dyn Fn(&Value, &ParseOptions) -> ParseResult<Value> + Send + Sync>;
