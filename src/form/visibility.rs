use crate::form::form_model::FormDocument;
use crate::form::order_fields::{OrderFields, OrderSections};

/// Card type whose numbers are 15 digits long.
pub const AMEX: &str = "amex";

pub const AMEX_MAX_LENGTH: usize = 15;
pub const DEFAULT_CARD_MAX_LENGTH: usize = 16;

/// Show both address sections iff delivery is selected.
pub fn toggle_address_sections(
    document: &mut FormDocument,
    fields: &OrderFields,
    sections: &OrderSections,
) {
    let visible = document.field(fields.delivery.0).checked;
    document.set_section_visible(sections.delivery_address.0, visible);
    document.set_section_visible(sections.billing_address.0, visible);
}

/// Show the credit card section iff paying online.
pub fn toggle_credit_card_section(
    document: &mut FormDocument,
    fields: &OrderFields,
    sections: &OrderSections,
) {
    let visible = document.field(fields.pay_online.0).checked;
    document.set_section_visible(sections.credit_card.0, visible);
}

pub fn card_number_max_length(card_type: &str) -> usize {
    if card_type == AMEX {
        AMEX_MAX_LENGTH
    } else {
        DEFAULT_CARD_MAX_LENGTH
    }
}

/// Bound future card-number input by the selected card type.
/// The value already entered is left as it is.
pub fn apply_card_type_constraint(document: &mut FormDocument, fields: &OrderFields) {
    let max = card_number_max_length(&document.field(fields.card_type.0).value);
    document.set_max_length(fields.card_number.0, max);
}
