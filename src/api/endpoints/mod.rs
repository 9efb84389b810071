//! API endpoint handlers, one module per resource.

pub mod doctors;
pub mod patients;
pub mod records;
