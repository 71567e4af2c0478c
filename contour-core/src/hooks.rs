//! Per-`TypeAlias`-node interpreter override (C3, §4.1).
//!
//! A process-wide, set-once-per-node map, populated at schema-construction
//! time and read-only thereafter — the only extension point the
//! interpreter exposes. Grounded on `once_cell::sync::Lazy` for
//! process-wide lazily-initialized state, the pattern the teacher uses
//! throughout (`grill-core/src/lib.rs`, `anymap.rs`).

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::ast::NodeId;
use crate::parser::Parser;

/// `(type parameters already compiled) -> Parser`, substituted for a
/// `TypeAlias`'s default expand-the-body behavior when present.
pub type Handler = Arc<dyn Fn(&[Parser]) -> Parser + Send + Sync>;

static REGISTRY: Lazy<RwLock<HashMap<NodeId, Handler>>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers `handler` for the `TypeAlias` node identified by `id`.
///
/// There is no corresponding `unregister`: the registry is meant to be
/// populated once, during static schema construction, and left alone —
/// mutating it after compilation would make parser behavior depend on call
/// order, which the interpreter's purity guarantees rule out.
pub fn register(id: NodeId, handler: impl Fn(&[Parser]) -> Parser + Send + Sync + 'static) {
    tracing::debug!(node = %id, "registering interpreter hook");
    REGISTRY
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .insert(id, Arc::new(handler));
}

/// Looks up the hook for `id`, if one was registered.
#[must_use]
pub fn lookup(id: NodeId) -> Option<Handler> {
    REGISTRY
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .get(&id)
        .cloned()
}
