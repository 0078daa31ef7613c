use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::form::identity::FormIdentity;
use crate::validation::gate::SubmitOutcome;

/// Page events worth a trace line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    Open,
    Restore,
    Change,
    Clear,
    Submit,
    StorageWarning,
}

#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub kind: TraceKind,
    pub form_id: String,

    pub field: Option<String>,
    pub outcome: Option<String>,
    pub error_fields: Vec<String>,
    pub detail: Option<String>,
}

impl TraceEvent {
    pub fn now(kind: TraceKind, identity: &FormIdentity) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            kind,
            form_id: identity.to_string(),
            field: None,
            outcome: None,
            error_fields: vec![],
            detail: None,
        }
    }

    pub fn with_field(mut self, field: impl ToString) -> Self {
        self.field = Some(field.to_string());
        self
    }

    pub fn with_submit(mut self, outcome: &SubmitOutcome) -> Self {
        self.outcome = Some(format!("{:?}", outcome.disposition));
        self.error_fields = outcome.errors.fields().into_iter().map(String::from).collect();
        self
    }

    pub fn with_outcome(mut self, outcome: impl ToString) -> Self {
        self.outcome = Some(outcome.to_string());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
