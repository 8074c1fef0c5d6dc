//! Invocation-scoped diagnostics context

use tracing::Span;

/// Diagnostics for one invocation
///
/// Created fresh for every call and passed down explicitly. Nothing in
/// here is consulted when deciding an outcome.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub span: Span,
}

impl InvocationContext {
    pub fn new(tx_id: &str, function: &str) -> Self {
        Self {
            span: tracing::debug_span!("invoke", tx_id = %tx_id, function = %function),
        }
    }
}
