pub mod error_set;
pub mod gate;
pub mod rules;
