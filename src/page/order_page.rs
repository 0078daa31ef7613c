use crate::error::OrderFormError;
use crate::form::form_model::{FieldKind, FormDocument};
use crate::form::identity::FormIdentity;
use crate::form::order_fields::{FieldHandle, OrderFields, OrderSections};
use crate::form::visibility::{
    apply_card_type_constraint, toggle_address_sections, toggle_credit_card_section,
};
use crate::storage::persistence::{FieldRecord, FormPersistence, LoadStatus};
use crate::storage::store::KeyValueStore;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::{TraceEvent, TraceKind};
use crate::validation::gate::{SubmissionGate, SubmitOutcome};

/// A live order page: the form document, its persistence and its
/// submission gate, driven through user interactions.
#[derive(Debug)]
pub struct OrderPage<S: KeyValueStore> {
    markup: FormDocument,
    document: FormDocument,
    fields: OrderFields,
    sections: OrderSections,
    persistence: FormPersistence<S>,
    gate: SubmissionGate,
    tracer: TraceLogger,
    load_status: LoadStatus,
}

impl<S: KeyValueStore> OrderPage<S> {
    /// Open the page: restore saved values, then apply initial visibility.
    pub fn open(
        markup: FormDocument,
        store: S,
        gate: SubmissionGate,
        tracer: TraceLogger,
    ) -> Result<Self, OrderFormError> {
        let fields = OrderFields::bind(&markup)?;
        let sections = OrderSections::bind(&markup)?;
        let identity = FormIdentity::of(&markup);
        let mut document = markup.clone();
        let persistence = FormPersistence::new(identity, store);

        // ---- Document ready: restore ----
        let load_status = persistence.load_fields(&mut document);
        let restore = TraceEvent::now(TraceKind::Restore, persistence.identity());
        let restore = match &load_status {
            LoadStatus::Restored(n) => restore.with_outcome("restored").with_detail(format!("{} fields", n)),
            LoadStatus::Missing => restore.with_outcome("missing"),
            LoadStatus::Malformed(reason) => restore.with_outcome("malformed").with_detail(reason),
        };
        tracer.log(&restore);

        // ---- Window load: initial visibility ----
        toggle_address_sections(&mut document, &fields, &sections);
        toggle_credit_card_section(&mut document, &fields, &sections);

        tracer.log(&TraceEvent::now(TraceKind::Open, persistence.identity()));

        Ok(Self {
            markup,
            document,
            fields,
            sections,
            persistence,
            gate,
            tracer,
            load_status,
        })
    }

    /// Throw the live document away and open a fresh one from the same
    /// markup and store, as a browser reload would.
    pub fn reload(self) -> Result<Self, OrderFormError> {
        let store = self.persistence.into_store();
        Self::open(self.markup, store, self.gate, self.tracer)
    }

    // ---- Accessors ----

    pub fn document(&self) -> &FormDocument {
        &self.document
    }

    pub fn fields(&self) -> &OrderFields {
        &self.fields
    }

    pub fn identity(&self) -> &FormIdentity {
        self.persistence.identity()
    }

    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    pub fn into_store(self) -> S {
        self.persistence.into_store()
    }

    /// The snapshot as currently stored, empty when absent or unreadable.
    pub fn stored_record(&self) -> FieldRecord {
        self.persistence.read_snapshot().into_record()
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn gate(&self) -> &SubmissionGate {
        &self.gate
    }

    pub fn is_section_visible(&self, id: &str) -> Option<bool> {
        self.document.section_by_id(id).map(|s| s.visible)
    }

    // ---- User interactions ----

    /// Type text into a field. The text is cut at the field's max length.
    pub fn fill(&mut self, id: &str, text: &str) -> Result<(), OrderFormError> {
        let index = self.resolve(id)?;
        self.document.enter_text(index, text)?;
        self.dispatch_change(FieldHandle(index));
        Ok(())
    }

    /// Pick an option of a select.
    pub fn select(&mut self, id: &str, value: &str) -> Result<(), OrderFormError> {
        let index = self.resolve(id)?;
        self.expect_kind(index, &[FieldKind::Select], "not a select")?;
        self.document.set_value(index, value);
        self.dispatch_change(FieldHandle(index));
        Ok(())
    }

    /// Check a radio or checkbox. Clicking an already checked radio
    /// fires no change.
    pub fn check(&mut self, id: &str) -> Result<(), OrderFormError> {
        let index = self.resolve(id)?;
        self.expect_kind(index, &[FieldKind::Radio, FieldKind::Checkbox], "not checkable")?;
        let field = self.document.field(index);
        if field.kind == FieldKind::Radio && field.checked {
            return Ok(());
        }
        self.document.set_checked(index, true);
        self.dispatch_change(FieldHandle(index));
        Ok(())
    }

    /// Uncheck a checkbox. Radios only uncheck by checking a sibling.
    pub fn uncheck(&mut self, id: &str) -> Result<(), OrderFormError> {
        let index = self.resolve(id)?;
        self.expect_kind(index, &[FieldKind::Checkbox], "only checkboxes can be unchecked")?;
        self.document.set_checked(index, false);
        self.dispatch_change(FieldHandle(index));
        Ok(())
    }

    /// Fire the submit event. Listeners run in registration order: the
    /// stored snapshot is cleared first, whatever validation then decides.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.clear_snapshot();
        let outcome = self.gate.submit(&mut self.document, &self.fields);

        self.tracer.log(
            &TraceEvent::now(TraceKind::Submit, self.persistence.identity()).with_submit(&outcome),
        );
        if let Some(notice) = &outcome.notice {
            eprintln!("{}", notice);
        }

        outcome
    }

    // ---- Listeners ----

    fn dispatch_change(&mut self, handle: FieldHandle) {
        if self.fields.is_fulfillment_radio(handle) {
            toggle_address_sections(&mut self.document, &self.fields, &self.sections);
        }
        if self.fields.is_payment_radio(handle) {
            toggle_credit_card_section(&mut self.document, &self.fields, &self.sections);
        }
        if handle == self.fields.card_type {
            apply_card_type_constraint(&mut self.document, &self.fields);
        }

        let field = self.document.field(handle.0);
        let field_id = field.id_or_name().to_string();

        if field.kind.is_tracked() {
            if let Err(e) = self.persistence.save_field(field) {
                self.warn_storage(&field_id, &e);
            }
        }

        self.tracer.log(
            &TraceEvent::now(TraceKind::Change, self.persistence.identity()).with_field(&field_id),
        );
    }

    fn clear_snapshot(&mut self) {
        match self.persistence.clear() {
            Ok(()) => self
                .tracer
                .log(&TraceEvent::now(TraceKind::Clear, self.persistence.identity())),
            Err(e) => self.warn_storage("", &e),
        }
    }

    fn warn_storage(&self, field_id: &str, error: &OrderFormError) {
        eprintln!("Warning: could not update stored form data: {}", error);
        let mut event = TraceEvent::now(TraceKind::StorageWarning, self.persistence.identity())
            .with_detail(error);
        if !field_id.is_empty() {
            event = event.with_field(field_id);
        }
        self.tracer.log(&event);
    }

    // ---- Helpers ----

    fn resolve(&self, id: &str) -> Result<usize, OrderFormError> {
        self.document
            .field_index(id)
            .ok_or_else(|| OrderFormError::UnknownField(id.to_string()))
    }

    fn expect_kind(
        &self,
        index: usize,
        kinds: &[FieldKind],
        reason: &str,
    ) -> Result<(), OrderFormError> {
        let field = self.document.field(index);
        if kinds.contains(&field.kind) {
            Ok(())
        } else {
            Err(OrderFormError::InvalidInteraction {
                field: field.id_or_name().to_string(),
                reason: reason.to_string(),
            })
        }
    }
}
