use order_form::error::OrderFormError;
use order_form::form::form_model::{FieldKind, FormDocument, INVALID_CLASS};
use order_form::form::identity::{key_fingerprint, FormIdentity, FALLBACK_FORM_ID};
use order_form::form::order_fields::{ids, OrderFields, OrderSections};
use order_form::form::visibility::{card_number_max_length, AMEX_MAX_LENGTH, DEFAULT_CARD_MAX_LENGTH};

use crate::common::utils::markup;

mod common;

// =========================================================================
// Markup parsing
// =========================================================================

#[test]
fn fixture_markup_parses_with_defaults() {
    let doc = markup();

    assert_eq!(doc.id.as_deref(), Some(ids::ORDER_FORM));
    assert_eq!(doc.sections.len(), 3);
    assert!(doc.sections.iter().all(|s| s.visible), "sections default to visible");

    let flavor = doc.field_by_id(ids::FLAVOR).unwrap();
    assert_eq!(flavor.kind, FieldKind::Select);
    assert_eq!(flavor.value, "");

    let delivery = doc.field_by_id(ids::DELIVERY).unwrap();
    assert_eq!(delivery.kind, FieldKind::Radio);
    assert!(delivery.checked);

    assert!(doc.error_slot("cvv-error").is_some());
    assert_eq!(doc.error_slot("cvv-error").unwrap().class, "error-message");
}

#[test]
fn json_markup_is_accepted() {
    let doc = FormDocument::from_yaml_str(
        r#"{"fields": [{"id": "a", "name": "a", "kind": "text", "value": "x"}]}"#,
        "inline json",
    )
    .unwrap();
    assert_eq!(doc.id, None);
    assert_eq!(doc.field_by_id("a").unwrap().value, "x");
}

#[test]
fn malformed_markup_reports_context() {
    let err = FormDocument::from_yaml_str("fields: [{ kind: spaceship }]", "bad.yaml").unwrap_err();
    assert!(matches!(err, OrderFormError::YamlParse { .. }));
    assert!(err.to_string().contains("bad.yaml"));
}

#[test]
fn tracked_fields_exclude_submit_controls() {
    let doc = markup();
    let tracked = doc.tracked_field_indices();
    let submit = doc.field_index("place-order").unwrap();

    assert!(!tracked.contains(&submit));
    assert_eq!(tracked.len(), doc.fields.len() - 1);
}

// =========================================================================
// Identity
// =========================================================================

#[test]
fn identity_falls_back_when_form_has_no_id() {
    assert_eq!(FormIdentity::resolve(Some("order-form")).as_str(), "order-form");
    assert_eq!(FormIdentity::resolve(Some("")).as_str(), FALLBACK_FORM_ID);
    assert_eq!(FormIdentity::resolve(None).as_str(), FALLBACK_FORM_ID);

    let mut doc = markup();
    doc.id = None;
    assert_eq!(FormIdentity::of(&doc).to_string(), "genericForm");
}

#[test]
fn key_fingerprint_is_stable_hex() {
    let a = key_fingerprint("order-form");
    assert_eq!(a, key_fingerprint("order-form"));
    assert_ne!(a, key_fingerprint("genericForm"));
    assert_eq!(a.len(), 40);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
}

// =========================================================================
// Field mutation
// =========================================================================

#[test]
fn checking_a_radio_unchecks_its_group() {
    let mut doc = markup();
    let pickup = doc.field_index(ids::PICKUP).unwrap();

    doc.check_radio(pickup);

    assert!(doc.field_by_id(ids::PICKUP).unwrap().checked);
    assert!(!doc.field_by_id(ids::DELIVERY).unwrap().checked);
    // Other groups are untouched
    assert!(doc.field_by_id(ids::PAY_PICKUP).unwrap().checked);
}

#[test]
fn select_rejects_values_outside_its_options() {
    let mut doc = markup();
    let flavor = doc.field_index(ids::FLAVOR).unwrap();

    doc.set_value(flavor, "chocolate");
    assert_eq!(doc.field(flavor).value, "chocolate");

    doc.set_value(flavor, "pistachio");
    assert_eq!(doc.field(flavor).value, "", "unknown option leaves select unselected");
}

#[test]
fn typed_text_is_cut_at_max_length_but_programmatic_values_are_not() {
    let mut doc = markup();
    let cvv = doc.field_index(ids::CVV).unwrap();

    doc.enter_text(cvv, "123456").unwrap();
    assert_eq!(doc.field(cvv).value, "1234");

    doc.set_value(cvv, "123456");
    assert_eq!(doc.field(cvv).value, "123456");
}

#[test]
fn typing_into_a_radio_is_rejected() {
    let mut doc = markup();
    let delivery = doc.field_index(ids::DELIVERY).unwrap();
    let err = doc.enter_text(delivery, "x").unwrap_err();
    assert!(matches!(err, OrderFormError::InvalidInteraction { .. }));
}

// =========================================================================
// Error markers
// =========================================================================

#[test]
fn show_error_needs_a_slot() {
    let mut doc = markup();
    let street = doc.field_index(ids::STREET).unwrap();
    let notes = doc.field_index("notes").unwrap();

    assert!(doc.show_error(street, "Street address is required for delivery."));
    assert!(doc.is_invalid(ids::STREET));
    assert_eq!(doc.error_text(ids::STREET), Some("Street address is required for delivery."));

    assert!(!doc.show_error(notes, "nope"), "no notes-error slot");
    assert!(!doc.is_invalid("notes"));
}

#[test]
fn clearing_markers_resets_every_slot_and_field() {
    let mut doc = markup();
    for id in [ids::STREET, ids::CVV, ids::CONTACT] {
        let i = doc.field_index(id).unwrap();
        doc.show_error(i, "bad");
    }
    assert_eq!(doc.invalid_fields().len(), 3);

    doc.clear_validation_markers();

    assert!(doc.invalid_fields().is_empty());
    assert!(doc.error_slots.iter().all(|s| s.text.is_empty()));
    assert!(doc.fields.iter().all(|f| !f.has_class(INVALID_CLASS)));
}

// =========================================================================
// Typed view binding
// =========================================================================

#[test]
fn binding_resolves_every_order_field() {
    let doc = markup();
    let fields = OrderFields::bind(&doc).unwrap();
    let sections = OrderSections::bind(&doc).unwrap();

    assert_eq!(doc.field(fields.cvv.0).id.as_deref(), Some(ids::CVV));
    assert_eq!(doc.sections[sections.credit_card.0].id, ids::CREDIT_CARD_SECTION);
    assert!(fields.is_fulfillment_radio(fields.pickup));
    assert!(fields.is_payment_radio(fields.pay_online));
    assert!(!fields.is_payment_radio(fields.delivery));
}

#[test]
fn binding_reports_the_missing_element() {
    let mut doc = markup();
    doc.fields.retain(|f| f.id.as_deref() != Some(ids::CVV));

    match OrderFields::bind(&doc) {
        Err(OrderFormError::MissingElement(id)) => assert_eq!(id, ids::CVV),
        other => panic!("Expected MissingElement, got {:?}", other),
    }

    let mut doc = markup();
    doc.sections.clear();
    assert!(OrderSections::bind(&doc).is_err());
}

#[test]
fn card_number_length_depends_on_card_type() {
    assert_eq!(card_number_max_length("amex"), AMEX_MAX_LENGTH);
    assert_eq!(card_number_max_length("visa"), DEFAULT_CARD_MAX_LENGTH);
    assert_eq!(card_number_max_length(""), DEFAULT_CARD_MAX_LENGTH);
}
