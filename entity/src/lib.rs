//! SeaORM entity models for the invite tracking tables.

pub mod prelude;

pub mod invite_counter;
pub mod join_record;
