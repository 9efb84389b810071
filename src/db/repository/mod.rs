//! Repository layer — entity-scoped database operations.
//!
//! Thin CRUD plus the predicate queries the record service depends on.
//! All public functions are re-exported here.

mod doctor;
mod patient;
mod record;

pub use doctor::*;
pub use patient::*;
pub use record::*;
