use exercise_form_wasm::{DiagnosticEvent, DiagnosticsSink};

/// 把分类器的调试事件转发到 tracing，附带会话 ID
#[derive(Debug, Clone)]
pub struct TracingDiagnostics {
    session_id: String,
}

impl TracingDiagnostics {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}

impl DiagnosticsSink for TracingDiagnostics {
    fn record(&self, event: &DiagnosticEvent) {
        let payload = serde_json::to_string(event).unwrap_or_else(|_| format!("{event:?}"));
        if event.is_verbose() {
            tracing::debug!(session_id = %self.session_id, event = %payload, "classifier frame");
        } else {
            tracing::info!(session_id = %self.session_id, event = %payload, "classifier event");
        }
    }
}
