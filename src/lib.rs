//! Client-side behaviour of the ice-cream order form: section visibility,
//! field persistence across reloads, and validation before submission.
//!
//! The page is modelled as a [`form::form_model::FormDocument`] driven
//! through [`page::order_page::OrderPage`].

pub mod cli;
pub mod error;
pub mod form;
pub mod page;
pub mod report;
pub mod scenario;
pub mod storage;
pub mod trace;
pub mod validation;
