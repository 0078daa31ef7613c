use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OrderFormError;

/// Marker class carried by a field whose last validation failed.
pub const INVALID_CLASS: &str = "invalid";

/// Class shared by every error-message slot; the reset step clears them all.
pub const ERROR_MESSAGE_CLASS: &str = "error-message";

// ============================================================================
// Markup model: the form as the page author declared it
// ============================================================================

/// Kind of a form control, mirroring the HTML element/type pairs the
/// order page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Date,
    Month,
    Password,
    Hidden,
    Checkbox,
    Radio,
    Select,
    Textarea,
    Submit,
    Button,
}

impl FieldKind {
    /// Whether the persistence layer mirrors this control.
    /// Everything except submit controls and `<button>` elements is tracked.
    pub fn is_tracked(self) -> bool {
        !matches!(self, FieldKind::Submit | FieldKind::Button)
    }

    /// Whether a user can type free text into this control.
    pub fn accepts_text(self) -> bool {
        !matches!(
            self,
            FieldKind::Checkbox
                | FieldKind::Radio
                | FieldKind::Select
                | FieldKind::Submit
                | FieldKind::Button
                | FieldKind::Hidden
        )
    }
}

/// A single form control and its live state.
///
/// For radios and checkboxes `value` is the option value and `checked` is
/// the live state; for everything else `value` is the live value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    pub kind: FieldKind,

    #[serde(default)]
    pub value: String,

    #[serde(default)]
    pub checked: bool,

    /// Allowed values of a select. Empty means unconstrained.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub classes: BTreeSet<String>,
}

impl FormField {
    pub fn id_or_name(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

/// A block of the page whose visibility depends on the current selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,

    #[serde(default = "default_true")]
    pub visible: bool,
}

/// The `<field-id>-error` element next to a validated field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSlot {
    pub id: String,

    #[serde(default)]
    pub text: String,

    #[serde(default = "default_error_class")]
    pub class: String,
}

fn default_true() -> bool { true }
fn default_error_class() -> String { ERROR_MESSAGE_CLASS.to_string() }

/// The whole form: its identity, controls, dependent sections and error slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDocument {
    #[serde(default)]
    pub id: Option<String>,

    pub fields: Vec<FormField>,

    #[serde(default)]
    pub sections: Vec<Section>,

    #[serde(default)]
    pub error_slots: Vec<ErrorSlot>,
}

impl FormDocument {
    /// Parse markup from YAML. JSON is accepted too, being a YAML subset.
    pub fn from_yaml_str(content: &str, context: &str) -> Result<Self, OrderFormError> {
        serde_yaml::from_str(content).map_err(|source| OrderFormError::YamlParse {
            context: context.to_string(),
            source,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, OrderFormError> {
        let content = std::fs::read_to_string(path).map_err(|source| OrderFormError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content, &path.display().to_string())
    }

    // ---- Lookup ----

    pub fn field_index(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id.as_deref() == Some(id))
    }

    pub fn field(&self, index: usize) -> &FormField {
        &self.fields[index]
    }

    pub fn field_by_id(&self, id: &str) -> Option<&FormField> {
        self.field_index(id).map(|i| &self.fields[i])
    }

    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn section_by_id(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn set_section_visible(&mut self, index: usize, visible: bool) {
        self.sections[index].visible = visible;
    }

    pub fn error_slot(&self, id: &str) -> Option<&ErrorSlot> {
        self.error_slots.iter().find(|s| s.id == id)
    }

    /// Text of the error slot belonging to `field_id`, if the slot exists.
    pub fn error_text(&self, field_id: &str) -> Option<&str> {
        self.error_slot(&error_slot_id(field_id)).map(|s| s.text.as_str())
    }

    pub fn is_invalid(&self, field_id: &str) -> bool {
        self.field_by_id(field_id)
            .map(|f| f.has_class(INVALID_CLASS))
            .unwrap_or(false)
    }

    /// Ids of all fields currently carrying the invalid marker.
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.has_class(INVALID_CLASS))
            .map(|f| f.id_or_name())
            .collect()
    }

    /// Indices of every control the persistence layer mirrors.
    pub fn tracked_field_indices(&self) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.kind.is_tracked())
            .map(|(i, _)| i)
            .collect()
    }

    // ---- Mutation ----

    /// Programmatic value assignment. Ignores `max_length`; a select only
    /// takes a value among its options and otherwise ends up unselected.
    pub fn set_value(&mut self, index: usize, value: &str) {
        let field = &mut self.fields[index];
        if field.kind == FieldKind::Select
            && !field.options.is_empty()
            && !field.options.iter().any(|o| o == value)
        {
            field.value.clear();
        } else {
            field.value = value.to_string();
        }
    }

    /// User typing: the entered text is cut at `max_length` characters.
    pub fn enter_text(&mut self, index: usize, text: &str) -> Result<(), OrderFormError> {
        let field = &mut self.fields[index];
        if !field.kind.accepts_text() {
            return Err(OrderFormError::InvalidInteraction {
                field: field.id_or_name().to_string(),
                reason: format!("{:?} does not take typed text", field.kind),
            });
        }
        field.value = match field.max_length {
            Some(max) => text.chars().take(max).collect(),
            None => text.to_string(),
        };
        Ok(())
    }

    /// Check a radio and uncheck the other radios sharing its name.
    pub fn check_radio(&mut self, index: usize) {
        let name = self.fields[index].name.clone();
        if !name.is_empty() {
            for (i, f) in self.fields.iter_mut().enumerate() {
                if i != index && f.kind == FieldKind::Radio && f.name == name {
                    f.checked = false;
                }
            }
        }
        self.fields[index].checked = true;
    }

    pub fn set_checked(&mut self, index: usize, checked: bool) {
        if checked && self.fields[index].kind == FieldKind::Radio {
            self.check_radio(index);
        } else {
            self.fields[index].checked = checked;
        }
    }

    pub fn set_max_length(&mut self, index: usize, max_length: usize) {
        self.fields[index].max_length = Some(max_length);
    }

    // ---- Validation markers ----

    /// Empty every error-message slot and drop every invalid marker.
    pub fn clear_validation_markers(&mut self) {
        for slot in &mut self.error_slots {
            if slot.class == ERROR_MESSAGE_CLASS {
                slot.text.clear();
            }
        }
        for field in &mut self.fields {
            field.classes.remove(INVALID_CLASS);
        }
    }

    /// Render one failure. Returns false when the field has no error slot,
    /// in which case nothing is shown.
    pub fn show_error(&mut self, index: usize, message: &str) -> bool {
        let slot_id = error_slot_id(self.fields[index].id_or_name());
        match self.error_slots.iter_mut().find(|s| s.id == slot_id) {
            Some(slot) => {
                slot.text = message.to_string();
                self.fields[index].classes.insert(INVALID_CLASS.to_string());
                true
            }
            None => false,
        }
    }
}

pub fn error_slot_id(field_id: &str) -> String {
    format!("{}-error", field_id)
}
