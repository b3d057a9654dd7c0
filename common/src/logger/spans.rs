use tracing::{Span, field};

use super::TraceId;

/// Root span for one poll cycle / bootstrap. `ticker` is recorded later
/// once the caller knows which instrument the work belongs to.
pub fn root_span(name: &'static str, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "root",
        name = %name,
        trace_id = %trace_id,
        ticker = field::Empty
    )
}

/// Child span (inherits trace_id from the enclosing root span)
pub fn child_span(name: &'static str) -> Span {
    tracing::info_span!("child", name = %name)
}
