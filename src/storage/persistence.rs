use serde_json::{Map, Value};

use crate::error::OrderFormError;
use crate::form::form_model::{FieldKind, FormDocument, FormField};
use crate::form::identity::FormIdentity;
use crate::storage::store::KeyValueStore;

/// Field name -> last known value. Checkboxes hold booleans, everything
/// else holds strings.
pub type FieldRecord = Map<String, Value>;

/// What reading the persisted snapshot produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotRead {
    Found(FieldRecord),
    Missing,
    /// Unparseable, not a JSON object, or the store itself failed.
    Malformed(String),
}

impl SnapshotRead {
    /// The record, with every failure degraded to an empty one.
    pub fn into_record(self) -> FieldRecord {
        match self {
            SnapshotRead::Found(record) => record,
            SnapshotRead::Missing | SnapshotRead::Malformed(_) => FieldRecord::new(),
        }
    }
}

/// Outcome of restoring a document from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Number of fields that took a stored value. A radio group counts once,
    /// for the option that matched.
    Restored(usize),
    Missing,
    Malformed(String),
}

/// Mirrors form fields into a `KeyValueStore` under the form's identity.
#[derive(Debug)]
pub struct FormPersistence<S: KeyValueStore> {
    identity: FormIdentity,
    store: S,
}

impl<S: KeyValueStore> FormPersistence<S> {
    pub fn new(identity: FormIdentity, store: S) -> Self {
        Self { identity, store }
    }

    pub fn identity(&self) -> &FormIdentity {
        &self.identity
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn read_snapshot(&self) -> SnapshotRead {
        let raw = match self.store.get_item(self.identity.as_str()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SnapshotRead::Missing,
            Err(e) => return SnapshotRead::Malformed(e.to_string()),
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(record)) => SnapshotRead::Found(record),
            Ok(Value::Null) => SnapshotRead::Missing,
            Ok(other) => SnapshotRead::Malformed(format!("expected a JSON object, got {}", other)),
            Err(source) => SnapshotRead::Malformed(
                OrderFormError::JsonParse {
                    context: format!("snapshot for {}", self.identity),
                    source,
                }
                .to_string(),
            ),
        }
    }

    /// Merge one field's current value into the snapshot and write it back.
    pub fn save_field(&mut self, field: &FormField) -> Result<(), OrderFormError> {
        let mut record = self.read_snapshot().into_record();

        if let Some(value) = stored_value_of(field) {
            record.insert(field.name.clone(), value);
        }

        let json = serde_json::to_string(&record).map_err(|source| {
            OrderFormError::JsonSerialize {
                context: format!("snapshot for {}", self.identity),
                source,
            }
        })?;
        self.store.set_item(self.identity.as_str(), &json)
    }

    /// Restore every tracked field whose name appears in the snapshot.
    pub fn load_fields(&self, document: &mut FormDocument) -> LoadStatus {
        let record = match self.read_snapshot() {
            SnapshotRead::Found(record) => record,
            SnapshotRead::Missing => return LoadStatus::Missing,
            SnapshotRead::Malformed(reason) => return LoadStatus::Malformed(reason),
        };

        let mut restored = 0;
        for index in document.tracked_field_indices() {
            let field = document.field(index);
            let Some(stored) = record.get(&field.name) else {
                continue;
            };

            match field.kind {
                FieldKind::Checkbox => document.set_checked(index, is_truthy(stored)),
                // Only the option holding the stored value takes it
                FieldKind::Radio if stored.as_str() == Some(field.value.as_str()) => {
                    document.check_radio(index)
                }
                FieldKind::Radio => continue,
                _ => document.set_value(index, &stringify(stored)),
            }
            restored += 1;
        }

        LoadStatus::Restored(restored)
    }

    pub fn clear(&mut self) -> Result<(), OrderFormError> {
        self.store.remove_item(self.identity.as_str())
    }
}

/// The value a field contributes to the snapshot. An unchecked radio
/// contributes nothing.
pub fn stored_value_of(field: &FormField) -> Option<Value> {
    match field.kind {
        FieldKind::Checkbox => Some(Value::Bool(field.checked)),
        FieldKind::Radio => field.checked.then(|| Value::String(field.value.clone())),
        _ => Some(Value::String(field.value.clone())),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
