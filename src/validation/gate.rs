use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OrderFormError;
use crate::form::form_model::FormDocument;
use crate::form::order_fields::OrderFields;
use crate::validation::error_set::ValidationErrorSet;
use crate::validation::rules::{validate_order, OrderInput, RuleOptions};

/// Diagnostic shown when a valid order is deliberately not submitted.
pub const DEMO_NOTICE: &str =
    "Order submitted successfully! (Submission is currently disabled for this demo)";

/// What happens once every check passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnValidSubmission {
    /// Let the submission go through.
    #[default]
    Allow,
    /// Emit a diagnostic and keep submission disabled.
    LogOnly,
}

impl FromStr for OnValidSubmission {
    type Err = OrderFormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(OnValidSubmission::Allow),
            "log-only" | "log_only" => Ok(OnValidSubmission::LogOnly),
            other => Err(OrderFormError::UnknownPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for OnValidSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnValidSubmission::Allow => f.write_str("allow"),
            OnValidSubmission::LogOnly => f.write_str("log-only"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// At least one check failed; the default action stays prevented.
    Blocked,
    Submitted,
    /// Valid, but the policy keeps submission disabled.
    ValidNotSubmitted,
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub disposition: Disposition,
    pub errors: ValidationErrorSet,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl SubmitOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn submitted(&self) -> bool {
        self.disposition == Disposition::Submitted
    }
}

/// Intercepts submission, validates the whole form and renders the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionGate {
    pub policy: OnValidSubmission,
    pub rules: RuleOptions,
}

impl SubmissionGate {
    pub fn new(policy: OnValidSubmission, rules: RuleOptions) -> Self {
        Self { policy, rules }
    }

    pub fn submit(&self, document: &mut FormDocument, fields: &OrderFields) -> SubmitOutcome {
        // Full reset: nothing from a previous attempt survives.
        document.clear_validation_markers();

        let input = OrderInput::read(document, fields);
        let errors = validate_order(&input, self.rules);

        for error in &errors {
            if let Some(index) = document.field_index(&error.field) {
                document.show_error(index, &error.message);
            }
        }

        if !errors.is_empty() {
            return SubmitOutcome {
                disposition: Disposition::Blocked,
                errors,
                notice: None,
            };
        }

        match self.policy {
            OnValidSubmission::Allow => SubmitOutcome {
                disposition: Disposition::Submitted,
                errors,
                notice: None,
            },
            OnValidSubmission::LogOnly => SubmitOutcome {
                disposition: Disposition::ValidNotSubmitted,
                errors,
                notice: Some(DEMO_NOTICE.to_string()),
            },
        }
    }
}
