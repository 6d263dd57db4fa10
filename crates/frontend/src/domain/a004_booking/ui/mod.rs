pub mod details;
pub mod form;
