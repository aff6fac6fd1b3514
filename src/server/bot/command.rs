//! Slash command definitions and the messages they answer with.
//!
//! Everything here is free of I/O so the rendered text can be checked without a
//! gateway connection. The interaction handler decides which builder to call.

use serenity::all::{
    ButtonStyle, CommandOptionType, CreateActionRow, CreateButton, CreateCommand,
    CreateCommandOption, CreateEmbed, CreateEmbedFooter, Permissions, Timestamp,
};

use crate::server::model::invite::{
    InviteCounters, LeaderboardEntry, LeaderboardPage, ResetSummary,
};

pub const INVITES: &str = "invites";
pub const INVITE_LEADERBOARD: &str = "invite-leaderboard";
pub const RESET_INVITES: &str = "reset-invites";
pub const BONUS_INVITES: &str = "bonus-invites";

/// Entries shown on one leaderboard page.
pub const LEADERBOARD_PAGE_SIZE: u64 = 10;
/// Largest bonus that can be granted or revoked in one command.
pub const MAX_BONUS_AMOUNT: i64 = 1_000_000;

const LEADERBOARD_BUTTON_PREFIX: &str = "invite_lb";
const EMBED_COLOUR: u32 = 0x2F3136;
const RESET_COLOUR: u32 = 0xFF0000;
const FOOTER: &str = "Supreme Bot";

pub const NO_DATA_TO_RESET: &str = "⚠️ No invite data found to reset.";
pub const EMPTY_LEADERBOARD: &str = "The leaderboard is currently empty.";
pub const GUILD_ONLY: &str = "This command can only be used in a server.";
pub const MISSING_PERMISSION: &str =
    "❌ You need the Administrator permission to use this command.";
pub const NOT_YOUR_LEADERBOARD: &str = "Only the member who opened this leaderboard can turn its pages.";
pub const COMMAND_FAILED: &str = "❌ There was an error trying to execute that command.";
pub const RESET_FAILED: &str = "❌ There was an error trying to reset the invites.";
pub const BONUS_OUT_OF_RANGE: &str = "❌ The amount must be between -1000000 and 1000000, and not zero.";

/// Every command the bot registers.
pub fn commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new(INVITES)
            .description("Show how many members someone has invited")
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "user", "Member to look up")
                    .required(false),
            ),
        CreateCommand::new(INVITE_LEADERBOARD)
            .description("Show the invite leaderboard of this server")
            .add_option(
                CreateCommandOption::new(CommandOptionType::Integer, "page", "Page to open")
                    .required(false)
                    .min_int_value(1),
            ),
        CreateCommand::new(RESET_INVITES)
            .description("Reset all invite data of this server")
            .default_member_permissions(Permissions::ADMINISTRATOR),
        CreateCommand::new(BONUS_INVITES)
            .description("Grant or revoke bonus invites")
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "user", "Member to adjust")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "amount",
                    "Bonus invites to add, negative to remove",
                )
                .required(true)
                // Integer bounds are unsigned here, the lower one is checked on use.
                .max_int_value(MAX_BONUS_AMOUNT as u64),
            ),
    ]
}

/// Breakdown shown after a member's total.
fn breakdown(counters: &InviteCounters) -> String {
    format!(
        "(**{}** regular, **{}** left, **{}** fake, **{}** bonus)",
        counters.regular, counters.left, counters.fake, counters.bonus
    )
}

/// Reply to `/invites`.
pub fn counters_message(user_id: u64, counters: &InviteCounters) -> String {
    format!(
        "<@{}> has **{}** invites. {}",
        user_id,
        counters.total(),
        breakdown(counters)
    )
}

/// Reply to `/bonus-invites`.
pub fn bonus_message(user_id: u64, amount: i32, counters: &InviteCounters) -> String {
    let verb = if amount < 0 { "Removed" } else { "Added" };
    format!(
        "✅ {} **{}** bonus invites for <@{}>. They now have **{}** invites. {}",
        verb,
        amount.unsigned_abs(),
        user_id,
        counters.total(),
        breakdown(counters)
    )
}

pub fn leaderboard_line(entry: &LeaderboardEntry) -> String {
    format!(
        "**{}.** <@{}> • **{}** invites. {}",
        entry.rank,
        entry.user_id,
        entry.counters.total(),
        breakdown(&entry.counters)
    )
}

pub fn leaderboard_footer(page: &LeaderboardPage) -> String {
    format!(
        "{} • Page {} of {}",
        FOOTER,
        page.page + 1,
        page.total_pages()
    )
}

pub fn leaderboard_embed(page: &LeaderboardPage) -> CreateEmbed {
    let description = page
        .entries
        .iter()
        .map(leaderboard_line)
        .collect::<Vec<_>>()
        .join("\n");

    CreateEmbed::new()
        .title("Invites Leaderboard")
        .colour(EMBED_COLOUR)
        .description(description)
        .footer(CreateEmbedFooter::new(leaderboard_footer(page)))
        .timestamp(Timestamp::now())
}

/// Previous/next buttons, bound to the member who opened the leaderboard.
pub fn leaderboard_buttons(requester_id: u64, page: &LeaderboardPage) -> CreateActionRow {
    let last_page = page.total_pages() - 1;

    CreateActionRow::Buttons(vec![
        CreateButton::new(leaderboard_button_id(requester_id, page.page.saturating_sub(1)))
            .label("◀")
            .style(ButtonStyle::Secondary)
            .disabled(page.page == 0),
        CreateButton::new(leaderboard_button_id(requester_id, (page.page + 1).min(last_page)))
            .label("▶")
            .style(ButtonStyle::Secondary)
            .disabled(page.page >= last_page),
    ])
}

pub fn leaderboard_button_id(requester_id: u64, page: u64) -> String {
    format!("{}:{}:{}", LEADERBOARD_BUTTON_PREFIX, requester_id, page)
}

/// Parses a leaderboard button ID into the requester and the zero-based page.
pub fn parse_leaderboard_button(custom_id: &str) -> Option<(u64, u64)> {
    let mut parts = custom_id.split(':');

    if parts.next()? != LEADERBOARD_BUTTON_PREFIX {
        return None;
    }

    let requester_id = parts.next()?.parse().ok()?;
    let page = parts.next()?.parse().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some((requester_id, page))
}

pub fn reset_embed(summary: &ResetSummary) -> CreateEmbed {
    CreateEmbed::new()
        .title("✅ Invites Reset Successfully")
        .colour(RESET_COLOUR)
        .description(format!(
            "All invite data for this server has been reset.\n\n**Users Affected:** {}",
            summary.counters_removed
        ))
        .footer(CreateEmbedFooter::new(
            "Invite tracking will continue for new joins",
        ))
        .timestamp(Timestamp::now())
}
