pub mod form;
pub mod schema;
