use crate::error::OrderFormError;
use crate::form::form_model::FormDocument;

/// Element ids the order page depends on.
pub mod ids {
    pub const ORDER_FORM: &str = "order-form";

    pub const DELIVERY: &str = "delivery";
    pub const PICKUP: &str = "pickup";
    pub const PAY_ONLINE: &str = "pay-online";
    pub const PAY_PICKUP: &str = "pay-pickup";

    pub const FLAVOR: &str = "ice-cream-flavor";
    pub const STREET: &str = "street";
    pub const SUBURB: &str = "suburb";
    pub const STATE: &str = "state";
    pub const POSTCODE: &str = "postcode";
    pub const CONTACT: &str = "contact";
    pub const RECEIPT_EMAIL: &str = "receipt-email";

    pub const CARD_TYPE: &str = "card-type";
    pub const CARD_NAME: &str = "card-name";
    pub const CARD_NUMBER: &str = "card-number";
    pub const EXPIRY: &str = "expiry";
    pub const CVV: &str = "cvv";

    pub const DELIVERY_ADDRESS_SECTION: &str = "delivery-address-section";
    pub const BILLING_ADDRESS_SECTION: &str = "billing-address-section";
    pub const CREDIT_CARD_SECTION: &str = "credit-card-section";
}

/// Index of a field inside the `FormDocument` it was bound against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldHandle(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionHandle(pub usize);

/// Typed view of the order form's controls, resolved once at page open.
#[derive(Debug, Clone, Copy)]
pub struct OrderFields {
    pub delivery: FieldHandle,
    pub pickup: FieldHandle,
    pub pay_online: FieldHandle,
    pub pay_pickup: FieldHandle,

    pub flavor: FieldHandle,
    pub street: FieldHandle,
    pub suburb: FieldHandle,
    pub state: FieldHandle,
    pub postcode: FieldHandle,
    pub contact: FieldHandle,
    pub receipt_email: FieldHandle,

    pub card_type: FieldHandle,
    pub card_name: FieldHandle,
    pub card_number: FieldHandle,
    pub expiry: FieldHandle,
    pub cvv: FieldHandle,
}

impl OrderFields {
    pub fn bind(document: &FormDocument) -> Result<Self, OrderFormError> {
        let field = |id: &str| {
            document
                .field_index(id)
                .map(FieldHandle)
                .ok_or_else(|| OrderFormError::MissingElement(id.to_string()))
        };

        Ok(Self {
            delivery: field(ids::DELIVERY)?,
            pickup: field(ids::PICKUP)?,
            pay_online: field(ids::PAY_ONLINE)?,
            pay_pickup: field(ids::PAY_PICKUP)?,
            flavor: field(ids::FLAVOR)?,
            street: field(ids::STREET)?,
            suburb: field(ids::SUBURB)?,
            state: field(ids::STATE)?,
            postcode: field(ids::POSTCODE)?,
            contact: field(ids::CONTACT)?,
            receipt_email: field(ids::RECEIPT_EMAIL)?,
            card_type: field(ids::CARD_TYPE)?,
            card_name: field(ids::CARD_NAME)?,
            card_number: field(ids::CARD_NUMBER)?,
            expiry: field(ids::EXPIRY)?,
            cvv: field(ids::CVV)?,
        })
    }

    pub fn is_fulfillment_radio(&self, handle: FieldHandle) -> bool {
        handle == self.delivery || handle == self.pickup
    }

    pub fn is_payment_radio(&self, handle: FieldHandle) -> bool {
        handle == self.pay_online || handle == self.pay_pickup
    }
}

/// Sections whose visibility follows the radio selection.
#[derive(Debug, Clone, Copy)]
pub struct OrderSections {
    pub delivery_address: SectionHandle,
    pub billing_address: SectionHandle,
    pub credit_card: SectionHandle,
}

impl OrderSections {
    pub fn bind(document: &FormDocument) -> Result<Self, OrderFormError> {
        let section = |id: &str| {
            document
                .section_index(id)
                .map(SectionHandle)
                .ok_or_else(|| OrderFormError::MissingElement(id.to_string()))
        };

        Ok(Self {
            delivery_address: section(ids::DELIVERY_ADDRESS_SECTION)?,
            billing_address: section(ids::BILLING_ADDRESS_SECTION)?,
            credit_card: section(ids::CREDIT_CARD_SECTION)?,
        })
    }
}
