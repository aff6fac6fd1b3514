//! Discord bot that tracks which invite every new member used.
//!
//! The bot keeps a snapshot of the invite use counts of every guild it is in. When a
//! member joins, a fresh listing is compared against the snapshot to find the invite
//! that was used, and the join is handed to the invite service. Leaves are reported to
//! the same service, which decides whether the inviter is charged for them.
//!
//! The bot is initialized during server startup and runs in a separate tokio task
//! so it doesn't block the HTTP server.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive events about guild availability and removal
//! - `GUILD_MEMBERS` - Receive member join and leave events (privileged intent)
//! - `GUILD_INVITES` - Receive invite creation and deletion events
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application. Listing invites also
//! needs the `MANAGE_GUILD` permission in every tracked guild.

pub mod command;
pub mod handler;
pub mod invite_cache;
pub mod start;
