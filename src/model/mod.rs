//! Data transfer objects returned by the REST API.

pub mod api;
pub mod invite;
