use std::{str::FromStr, time::Duration};

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_API_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_FAKE_ACCOUNT_AGE_HOURS: i64 = 168;
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_INVITE_RESYNC_CRON: &str = "0 0 * * * *";

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,
    pub api_bind_addr: String,

    /// Accounts younger than this many hours are treated as fake joins.
    pub fake_account_age_hours: i64,
    /// Whether an account without an avatar is treated as a fake join.
    pub require_avatar: bool,

    pub store_timeout: Duration,
    pub invite_resync_cron: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_source(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable lookup, `from_env` uses the process
    /// environment.
    fn from_source(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        Ok(Self {
            database_url: required(&var, "DATABASE_URL")?,
            discord_bot_token: required(&var, "DISCORD_BOT_TOKEN")?,
            api_bind_addr: optional(&var, "API_BIND_ADDR")
                .unwrap_or_else(|| DEFAULT_API_BIND_ADDR.to_string()),
            fake_account_age_hours: parsed(&var, "INVITE_FAKE_ACCOUNT_AGE_HOURS")?
                .unwrap_or(DEFAULT_FAKE_ACCOUNT_AGE_HOURS),
            require_avatar: parsed(&var, "INVITE_REQUIRE_AVATAR")?.unwrap_or(true),
            store_timeout: Duration::from_secs(
                parsed(&var, "STORE_TIMEOUT_SECS")?.unwrap_or(DEFAULT_STORE_TIMEOUT_SECS),
            ),
            invite_resync_cron: optional(&var, "INVITE_RESYNC_CRON")
                .unwrap_or_else(|| DEFAULT_INVITE_RESYNC_CRON.to_string()),
        })
    }
}

fn required(var: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String, ConfigError> {
    optional(var, name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(var: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    var(name).filter(|value| !value.trim().is_empty())
}

fn parsed<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<Option<T>, ConfigError> {
    optional(var, name)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidEnvVar {
                    name: name.to_string(),
                    value,
                })
        })
        .transpose()
}
