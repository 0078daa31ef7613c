use order_form::form::order_fields::ids;
use order_form::validation::gate::{Disposition, OnValidSubmission, SubmissionGate, DEMO_NOTICE};
use order_form::validation::rules::{card_number_error, messages, validate_order, OrderInput, RuleOptions};
use order_form::storage::store::MemoryStore;

use crate::common::utils::{fill_valid_delivery_online, open_page, open_with};

mod common;

fn valid_pickup() -> OrderInput {
    OrderInput {
        delivery: false,
        pay_online: false,
        flavor: "vanilla".into(),
        contact: "0412345678".into(),
        receipt_email: "a@b.co".into(),
        ..OrderInput::default()
    }
}

fn valid_delivery() -> OrderInput {
    OrderInput {
        delivery: true,
        street: "1 Main St".into(),
        suburb: "Carlton".into(),
        state: "VIC".into(),
        postcode: "3053".into(),
        ..valid_pickup()
    }
}

// =========================================================================
// Rule evaluation
// =========================================================================

#[test]
fn pickup_at_store_needs_no_address_or_card() {
    let errors = validate_order(&valid_pickup(), RuleOptions::default());
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
}

#[test]
fn blank_pickup_address_is_ignored_but_blank_delivery_address_is_not() {
    let mut input = valid_pickup();
    input.street = "   ".into();
    assert!(validate_order(&input, RuleOptions::default()).is_empty());

    input.delivery = true;
    let errors = validate_order(&input, RuleOptions::default());
    assert_eq!(errors.fields(), vec![ids::STREET, ids::SUBURB, ids::STATE, ids::POSTCODE]);
    assert_eq!(errors.message_for(ids::STREET), Some(messages::STREET));
}

#[test]
fn postcode_accepts_four_or_five_digits_only() {
    let mut input = valid_delivery();

    for (postcode, ok) in [
        ("1234", true),
        ("12345", true),
        (" 3053 ", true),
        ("123", false),
        ("123456", false),
        ("", false),
        ("12a4", false),
    ] {
        input.postcode = postcode.into();
        let errors = validate_order(&input, RuleOptions::default());
        assert_eq!(errors.is_empty(), ok, "postcode {:?}", postcode);
    }
}

#[test]
fn contact_number_needs_ten_to_fifteen_digits() {
    let mut input = valid_pickup();

    for (contact, ok) in [
        ("0412345678", true),
        ("  0412345678 ", true),
        ("123456789012345", true),
        ("123", false),
        ("1234567890123456", false),
        ("0412 345 678", false),
    ] {
        input.contact = contact.into();
        let errors = validate_order(&input, RuleOptions::default());
        assert_eq!(errors.is_empty(), ok, "contact {:?}", contact);
    }
}

#[test]
fn email_pattern_is_simple_and_untrimmed() {
    let mut input = valid_pickup();

    for (email, ok) in [
        ("a@b.co", true),
        ("first.last@shop.example.com", true),
        ("a@b", false),
        ("a b@c.de", false),
        ("@b.co", false),
        (" a@b.co", false),
        ("", false),
        ("a\u{00A0}b@c.de", false),
        ("a@b\u{2003}x.co", false),
        ("a@b.co\u{FEFF}", false),
    ] {
        input.receipt_email = email.into();
        let errors = validate_order(&input, RuleOptions::default());
        assert_eq!(errors.is_empty(), ok, "email {:?}", email);
    }
}

#[test]
fn card_number_branches() {
    let strict = RuleOptions { strict_card_number: true };
    let lenient = RuleOptions::default();
    let fifteen = "378282246310005";
    let sixteen = "4111111111111111";

    assert_eq!(card_number_error("amex", fifteen, strict), None);
    assert_eq!(card_number_error("amex", sixteen, strict), Some(messages::CARD_NUMBER_AMEX));
    assert_eq!(card_number_error("visa", sixteen, strict), None);
    assert_eq!(
        card_number_error("mastercard", fifteen, strict),
        Some(messages::CARD_NUMBER_VISA_MASTERCARD)
    );
    assert_eq!(
        card_number_error("visa", "", lenient),
        Some(messages::CARD_NUMBER_VISA_MASTERCARD)
    );
    assert_eq!(card_number_error("", "123", lenient), Some(messages::CARD_NUMBER_OTHER));
    assert_eq!(card_number_error("diners", sixteen, lenient), None);
    assert_eq!(
        card_number_error("visa", " 4111111111111111", strict),
        Some(messages::CARD_NUMBER_VISA_MASTERCARD),
        "card number is not trimmed"
    );
}

#[test]
fn empty_card_number_with_unset_type_passes_unless_strict() {
    assert_eq!(card_number_error("", "", RuleOptions::default()), None);
    assert_eq!(card_number_error("diners", "", RuleOptions::default()), None);
    assert_eq!(
        card_number_error("", "", RuleOptions { strict_card_number: true }),
        Some(messages::CARD_NUMBER_OTHER)
    );
}

#[test]
fn online_payment_checks_every_card_field() {
    let mut input = valid_pickup();
    input.pay_online = true;

    let errors = validate_order(&input, RuleOptions::default());
    assert_eq!(errors.fields(), vec![ids::CARD_TYPE, ids::CARD_NAME, ids::EXPIRY, ids::CVV]);

    let strict = RuleOptions { strict_card_number: true };
    let errors = validate_order(&input, strict);
    assert_eq!(
        errors.fields(),
        vec![ids::CARD_TYPE, ids::CARD_NAME, ids::CARD_NUMBER, ids::EXPIRY, ids::CVV]
    );

    input.card_type = "visa".into();
    input.card_name = "Jane Citizen".into();
    input.card_number = "4111111111111111".into();
    input.expiry = "2030-01".into();
    input.cvv = " 1234 ".into();
    assert!(validate_order(&input, RuleOptions::default()).is_empty());

    // Non-ASCII spaces count as spaces, and U+FEFF is trimmed away
    input.card_name = "Jane\u{00A0}Citizen".into();
    assert!(validate_order(&input, RuleOptions::default()).is_empty());
    input.card_name = "\u{FEFF}Jane\u{3000}Citizen\u{FEFF}".into();
    input.cvv = "\u{FEFF}123\u{00A0}".into();
    assert!(validate_order(&input, RuleOptions::default()).is_empty());

    input.card_name = "\u{FEFF}\u{00A0}".into();
    assert_eq!(validate_order(&input, RuleOptions::default()).fields(), vec![ids::CARD_NAME]);

    input.card_name = "J4ne".into();
    input.cvv = "12".into();
    let errors = validate_order(&input, RuleOptions::default());
    assert_eq!(errors.fields(), vec![ids::CARD_NAME, ids::CVV]);
    assert_eq!(errors.message_for(ids::CVV), Some(messages::CVV));
}

#[test]
fn every_failure_is_reported_in_check_order() {
    let input = OrderInput {
        delivery: true,
        pay_online: true,
        ..OrderInput::default()
    };
    let errors = validate_order(&input, RuleOptions { strict_card_number: true });

    assert_eq!(
        errors.fields(),
        vec![
            ids::FLAVOR,
            ids::STREET,
            ids::SUBURB,
            ids::STATE,
            ids::POSTCODE,
            ids::CONTACT,
            ids::RECEIPT_EMAIL,
            ids::CARD_TYPE,
            ids::CARD_NAME,
            ids::CARD_NUMBER,
            ids::EXPIRY,
            ids::CVV,
        ]
    );

    let lenient = validate_order(&input, RuleOptions::default());
    assert_eq!(lenient.len(), errors.len() - 1);
    assert!(!lenient.contains(ids::CARD_NUMBER));
}

#[test]
fn blank_checks_trim_browser_whitespace() {
    let mut input = valid_delivery();
    input.street = "\u{FEFF}\u{00A0}".into();
    input.contact = "\u{00A0}0412345678\u{FEFF}".into();
    input.postcode = "\u{2009}3053".into();

    let errors = validate_order(&input, RuleOptions::default());
    assert_eq!(errors.fields(), vec![ids::STREET]);
}

// =========================================================================
// Submission gate on a live page
// =========================================================================

#[test]
fn pickup_with_blank_address_has_no_address_errors() {
    let mut page = open_page();
    page.check("pickup").unwrap();

    let outcome = page.submit();

    for id in [ids::STREET, ids::SUBURB, ids::STATE, ids::POSTCODE] {
        assert!(!outcome.errors.contains(id), "{} should not be required", id);
        assert!(!page.document().is_invalid(id));
    }
}

#[test]
fn postcode_on_a_delivery_order() {
    for (postcode, ok) in [("1234", true), ("123", false), ("123456", false)] {
        let mut page = open_page();
        page.check("delivery").unwrap();
        page.fill("postcode", postcode).unwrap();

        let outcome = page.submit();
        assert_eq!(!outcome.errors.contains(ids::POSTCODE), ok, "postcode {:?}", postcode);
    }
}

#[test]
fn amex_number_length_is_enforced_with_its_own_message() {
    let mut page = open_page();
    fill_valid_delivery_online(&mut page);

    // The 16-digit visa number stays when the card type changes.
    page.select("card-type", "amex").unwrap();

    let outcome = page.submit();
    assert_eq!(outcome.disposition, Disposition::Blocked);
    assert_eq!(outcome.errors.fields(), vec![ids::CARD_NUMBER]);
    assert_eq!(outcome.errors.message_for(ids::CARD_NUMBER), Some(messages::CARD_NUMBER_AMEX));
    assert_eq!(page.document().error_text(ids::CARD_NUMBER), Some(messages::CARD_NUMBER_AMEX));

    page.fill("card-number", "378282246310005").unwrap();
    let outcome = page.submit();
    assert!(outcome.is_valid(), "unexpected errors: {:?}", outcome.errors);
}

#[test]
fn email_and_contact_on_a_live_page() {
    let mut page = open_page();
    fill_valid_delivery_online(&mut page);

    page.fill("receipt-email", "a@b").unwrap();
    page.fill("contact", "123").unwrap();
    let outcome = page.submit();
    assert_eq!(outcome.errors.fields(), vec![ids::CONTACT, ids::RECEIPT_EMAIL]);

    page.fill("receipt-email", "a@b.co").unwrap();
    page.fill("contact", "0412345678").unwrap();
    assert!(page.submit().is_valid());
}

#[test]
fn fixing_one_of_two_fields_leaves_exactly_one_error() {
    let mut page = open_page();
    fill_valid_delivery_online(&mut page);
    page.fill("suburb", "").unwrap();
    page.fill("cvv", "9").unwrap();

    let first = page.submit();
    assert_eq!(first.errors.len(), 2);
    assert!(page.document().is_invalid(ids::SUBURB));
    assert!(page.document().is_invalid(ids::CVV));

    page.fill("suburb", "Carlton").unwrap();
    let second = page.submit();

    assert_eq!(second.errors.len(), 1);
    assert_eq!(second.errors.fields(), vec![ids::CVV]);
    assert!(!page.document().is_invalid(ids::SUBURB), "stale invalid marker");
    assert_eq!(page.document().error_text(ids::SUBURB), Some(""));
    assert_eq!(page.document().invalid_fields(), vec![ids::CVV]);
}

#[test]
fn switching_to_pickup_drops_address_errors() {
    let mut page = open_page();
    let first = page.submit();
    assert!(first.errors.contains(ids::STREET));

    page.check("pickup").unwrap();
    let second = page.submit();
    assert!(!second.errors.contains(ids::STREET));
    assert!(!page.document().is_invalid(ids::STREET));
    assert_eq!(page.document().error_text(ids::STREET), Some(""));
}

// =========================================================================
// Valid-submission policy
// =========================================================================

#[test]
fn allow_policy_submits_a_valid_order() {
    let mut page = open_page();
    fill_valid_delivery_online(&mut page);

    let outcome = page.submit();
    assert_eq!(outcome.disposition, Disposition::Submitted);
    assert!(outcome.submitted());
    assert!(outcome.notice.is_none());
}

#[test]
fn log_only_policy_keeps_submission_disabled() {
    let gate = SubmissionGate::new(OnValidSubmission::LogOnly, RuleOptions::default());
    let mut page = open_with(MemoryStore::new(), gate);
    fill_valid_delivery_online(&mut page);

    let outcome = page.submit();
    assert_eq!(outcome.disposition, Disposition::ValidNotSubmitted);
    assert!(!outcome.submitted());
    assert!(outcome.is_valid());
    assert_eq!(outcome.notice.as_deref(), Some(DEMO_NOTICE));
}

#[test]
fn policy_names_parse() {
    assert_eq!("allow".parse::<OnValidSubmission>().unwrap(), OnValidSubmission::Allow);
    assert_eq!("log-only".parse::<OnValidSubmission>().unwrap(), OnValidSubmission::LogOnly);
    assert_eq!(OnValidSubmission::LogOnly.to_string(), "log-only");
    assert!("sometimes".parse::<OnValidSubmission>().is_err());
}
