use std::sync::LazyLock;

use regex_lite::Regex;

use crate::form::form_model::FormDocument;
use crate::form::order_fields::{ids, FieldHandle, OrderFields};
use crate::form::visibility::AMEX;
use crate::validation::error_set::ValidationErrorSet;

pub mod messages {
    pub const FLAVOR: &str = "Please select an ice cream flavor.";
    pub const STREET: &str = "Street address is required for delivery.";
    pub const SUBURB: &str = "Suburb is required for delivery.";
    pub const STATE: &str = "State is required for delivery.";
    pub const POSTCODE: &str = "A valid 4 or 5-digit postcode is required.";
    pub const CONTACT: &str = "Please enter a valid contact number.";
    pub const RECEIPT_EMAIL: &str = "Please enter a valid email address.";
    pub const CARD_TYPE: &str = "Please select a card type.";
    pub const CARD_NAME: &str = "Please enter a valid name on the card.";
    pub const CARD_NUMBER_AMEX: &str = "American Express card number must be 15 digits.";
    pub const CARD_NUMBER_VISA_MASTERCARD: &str = "Visa/MasterCard number must be 16 digits.";
    pub const CARD_NUMBER_OTHER: &str = "Card number must be 16 digits.";
    pub const EXPIRY: &str = "Please enter the card expiry date.";
    pub const CVV: &str = "Please enter a valid 3 or 4-digit CVV.";
}

/// Whitespace as a browser's `\s` and `trim()` see it. `regex-lite` only
/// knows the ASCII subset, so patterns splice this class in.
const BROWSER_SPACE: &str = "\t\n\u{0B}\u{0C}\r \u{00A0}\u{1680}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}\u{FEFF}";

static POSTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4,5}$").expect("valid postcode regex"));
static CONTACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10,15}$").expect("valid contact regex"));
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^[^{BROWSER_SPACE}@]+@[^{BROWSER_SPACE}@]+\.[^{BROWSER_SPACE}@]+$"))
        .expect("valid email regex")
});
static CARD_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^[a-zA-Z{BROWSER_SPACE}]+$")).expect("valid card name regex")
});
static AMEX_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{15}$").expect("valid amex regex"));
static CARD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{16}$").expect("valid card number regex"));
static CVV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3,4}$").expect("valid cvv regex"));

/// The values validation reads, captured from the form at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderInput {
    pub delivery: bool,
    pub pay_online: bool,

    pub flavor: String,
    pub street: String,
    pub suburb: String,
    pub state: String,
    pub postcode: String,
    pub contact: String,
    pub receipt_email: String,

    pub card_type: String,
    pub card_name: String,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

impl OrderInput {
    pub fn read(document: &FormDocument, fields: &OrderFields) -> Self {
        let value = |h: FieldHandle| document.field(h.0).value.clone();
        Self {
            delivery: document.field(fields.delivery.0).checked,
            pay_online: document.field(fields.pay_online.0).checked,
            flavor: value(fields.flavor),
            street: value(fields.street),
            suburb: value(fields.suburb),
            state: value(fields.state),
            postcode: value(fields.postcode),
            contact: value(fields.contact),
            receipt_email: value(fields.receipt_email),
            card_type: value(fields.card_type),
            card_name: value(fields.card_name),
            card_number: value(fields.card_number),
            expiry: value(fields.expiry),
            cvv: value(fields.cvv),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleOptions {
    /// Reject an empty card number when the card type is neither amex nor
    /// visa/mastercard (including unselected). Off by default, which lets
    /// such an order through with no card number at all.
    pub strict_card_number: bool,
}

/// Run every applicable check. Checks never short-circuit: each failure
/// is reported.
pub fn validate_order(input: &OrderInput, options: RuleOptions) -> ValidationErrorSet {
    let mut errors = ValidationErrorSet::new();

    if input.flavor.is_empty() {
        errors.push(ids::FLAVOR, messages::FLAVOR);
    }

    if input.delivery {
        if is_blank(&input.street) {
            errors.push(ids::STREET, messages::STREET);
        }
        if is_blank(&input.suburb) {
            errors.push(ids::SUBURB, messages::SUBURB);
        }
        if is_blank(&input.state) {
            errors.push(ids::STATE, messages::STATE);
        }
        if !matches_trimmed(&POSTCODE_RE, &input.postcode) {
            errors.push(ids::POSTCODE, messages::POSTCODE);
        }
    }

    if !matches_trimmed(&CONTACT_RE, &input.contact) {
        errors.push(ids::CONTACT, messages::CONTACT);
    }

    if !EMAIL_RE.is_match(&input.receipt_email) {
        errors.push(ids::RECEIPT_EMAIL, messages::RECEIPT_EMAIL);
    }

    if input.pay_online {
        if input.card_type.is_empty() {
            errors.push(ids::CARD_TYPE, messages::CARD_TYPE);
        }
        if !matches_trimmed(&CARD_NAME_RE, &input.card_name) {
            errors.push(ids::CARD_NAME, messages::CARD_NAME);
        }
        if let Some(message) = card_number_error(&input.card_type, &input.card_number, options) {
            errors.push(ids::CARD_NUMBER, message);
        }
        if input.expiry.is_empty() {
            errors.push(ids::EXPIRY, messages::EXPIRY);
        }
        if !matches_trimmed(&CVV_RE, &input.cvv) {
            errors.push(ids::CVV, messages::CVV);
        }
    }

    errors
}

/// Card number against the selected card type. The number is not trimmed.
pub fn card_number_error(
    card_type: &str,
    number: &str,
    options: RuleOptions,
) -> Option<&'static str> {
    if card_type == AMEX {
        (!AMEX_NUMBER_RE.is_match(number)).then_some(messages::CARD_NUMBER_AMEX)
    } else if card_type == "visa" || card_type == "mastercard" {
        (!CARD_NUMBER_RE.is_match(number)).then_some(messages::CARD_NUMBER_VISA_MASTERCARD)
    } else if (options.strict_card_number || !number.is_empty())
        && !CARD_NUMBER_RE.is_match(number)
    {
        Some(messages::CARD_NUMBER_OTHER)
    } else {
        None
    }
}

fn is_blank(value: &str) -> bool {
    browser_trim(value).is_empty()
}

/// Match the trimmed value. None of the patterns accept a blank string.
fn matches_trimmed(re: &Regex, value: &str) -> bool {
    re.is_match(browser_trim(value))
}

/// Trim the same set `BROWSER_SPACE` lists. Unlike `str::trim` this strips
/// U+FEFF and keeps U+0085.
fn browser_trim(value: &str) -> &str {
    value.trim_matches(is_browser_space)
}

fn is_browser_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}
