use std::time::{Duration, Instant};

use tracing::{Span, field};

/// Create a root span for a UI event (one user edit, one quote delivery).
pub fn root_span(name: &'static str, store: &'static str) -> Span {
    tracing::info_span!(
        "root",
        name = %name,
        store = %store,
        revision = field::Empty
    )
}

/// Create a child span (inherits the parent's store/revision context).
pub fn child_span(name: &'static str) -> Span {
    tracing::info_span!("child", name = %name, revision = field::Empty)
}

/// Record the form revision on the current span, if it declared the field.
pub fn annotate_revision(revision: u64) {
    Span::current().record("revision", revision);
}

/// Runs `f` and emits a warning when it takes longer than `max`.
pub fn warn_if_slow<T>(label: &'static str, max: Duration, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    let elapsed = start.elapsed();
    if elapsed > max {
        tracing::warn!(
            target: "performance",
            label = label,
            elapsed_ms = elapsed.as_millis() as u64,
            "slow operation detected"
        );
    }
    out
}
