//! Clinica: a clinical-records backend.
//!
//! Patients, doctors and the medical records that link them, stored in
//! SQLite and served over an HTTP JSON API. The layering is
//! straightforward:
//!
//! - [`models`] — domain types and field validation
//! - [`db`] — connection management, migrations and the repository
//!   functions that own all SQL
//! - [`records`] — the medical-record service: referential checks,
//!   transactional writes, denormalized projections
//! - [`api`] — axum routes and the uniform response envelope

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod records;
