//! Supreme Bot Test Utils
//!
//! Shared helpers for the invite tracking tests. Every test gets its own in-memory
//! SQLite database with only the tables it asks for.
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::JoinRecord;
//!
//! #[tokio::test]
//! async fn records_join() -> Result<(), DbErr> {
//!     let test = TestBuilder::new().with_table(JoinRecord).build().await.unwrap();
//!     let db = test.db.as_ref().unwrap();
//!     // ...
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
