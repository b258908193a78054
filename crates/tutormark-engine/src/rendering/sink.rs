/// Where the renderer reports expressions it could not typeset.
///
/// Reporting is fire-and-forget; the renderer never looks at the outcome.
pub trait DiagnosticSink {
    fn report(&self, description: &str, original: &str);
}

/// Forwards diagnostics to the `log` facade at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, description: &str, original: &str) {
        log::warn!(target: "tutormark::render", "failed to typeset {original:?}: {description}");
    }
}

/// Discards diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _description: &str, _original: &str) {}
}
