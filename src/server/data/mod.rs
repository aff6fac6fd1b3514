//! Database repository layer.
//!
//! Repositories own every query against the invite tables. They take snowflakes as
//! `u64`, store them as strings, and convert rows into the domain models of
//! `server::model` before returning them.

pub mod invite_counter;
pub mod join_record;

#[cfg(test)]
mod test;
