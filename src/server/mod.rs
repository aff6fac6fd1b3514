//! Invite tracking backend: Discord bot, persistence and the read-only API.
//!
//! The bot and the REST API are two front ends over the same service layer. The bot
//! feeds member joins and leaves into it and answers slash commands; the API exposes
//! the resulting counters. SeaORM handles persistence and a cron job periodically
//! recomputes every counter from join history.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers and DTO conversion
//! - **Service Layer** (`service/`) - Invite attribution, fraud checks and counter maintenance
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models shared by the bot, services and controllers
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared state handed to the controllers
//! - **Startup** (`startup`) - Logging and database initialization
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Scheduler** (`scheduler/`) - Periodic counter resync
//! - **Bot** (`bot/`) - Discord event handlers, slash commands and the invite cache
//! - **Util** (`util/`) - Snowflake parsing and store time budgets

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
