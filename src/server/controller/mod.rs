//! REST endpoints exposing invite statistics.
//!
//! The API is read-only and unauthenticated; it is meant to be bound to a loopback
//! or otherwise trusted address. Writes happen through the bot's slash commands.

pub mod invite;
