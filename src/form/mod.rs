pub mod form_model;
pub mod identity;
pub mod order_fields;
pub mod visibility;
