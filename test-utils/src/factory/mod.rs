//! Factory methods for creating invite tracking test data.
//!
//! Each table has a `Factory` builder for customised rows and a `create_*` shorthand that
//! inserts a row with defaults. Snowflakes default to unique values from
//! `helpers::next_id()` so rows created in one test never collide.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let counter = factory::invite_counter::InviteCounterFactory::new(&db)
//!     .guild_id("100")
//!     .user_id("200")
//!     .regular(3)
//!     .build()
//!     .await?;
//!
//! let join = factory::create_join_record(&db, "100", Some("200")).await?;
//! ```

pub mod helpers;
pub mod invite_counter;
pub mod join_record;

pub use invite_counter::create_invite_counter;
pub use join_record::create_join_record;
