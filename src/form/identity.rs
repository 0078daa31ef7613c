use std::fmt;

use crate::form::form_model::FormDocument;

/// Storage key used when the form declares no id.
pub const FALLBACK_FORM_ID: &str = "genericForm";

/// Key that namespaces a form's persisted snapshot. Stable for the page lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormIdentity(String);

impl FormIdentity {
    pub fn resolve(declared_id: Option<&str>) -> Self {
        match declared_id {
            Some(id) if !id.is_empty() => FormIdentity(id.to_string()),
            _ => FormIdentity(FALLBACK_FORM_ID.to_string()),
        }
    }

    pub fn of(document: &FormDocument) -> Self {
        Self::resolve(document.id.as_deref())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hex SHA-1 of a key, used where the key must become a safe file name.
pub fn key_fingerprint(key: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}
