//! Service layer for business logic and orchestration.
//!
//! Services sit between the callers (bot handlers, REST controllers, the scheduler)
//! and the repositories. They apply the store time budget, combine repository calls
//! and return `AppError` instead of raw database errors.

pub mod invite;

#[cfg(test)]
mod test;
