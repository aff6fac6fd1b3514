//! Server-side domain models.
//!
//! Entity rows are converted into these types at the repository boundary and into DTOs
//! at the controller boundary, so the service layer never handles raw snowflake strings.

pub mod invite;
