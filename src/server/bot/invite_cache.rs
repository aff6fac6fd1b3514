//! Per-guild snapshot of invite use counts.
//!
//! Discord does not say which invite a new member used. The bot keeps the last known
//! use count of every invite and, when a member joins, compares it with a fresh
//! listing: the invite whose count went up is the one that was used. The table is
//! owned by the event handler and rebuilt whenever a guild becomes available.
//!
//! Listings of one guild are fetched and compared one at a time. Two members joining
//! at once would otherwise have their listings compared out of order, crediting the
//! second member to the first member's invite.

use std::{collections::HashMap, future::Future, sync::Arc};

use serenity::all::RichInvite;
use tokio::sync::{Mutex, RwLock};

use crate::server::model::invite::Inviter;

/// Use count of one invite at the time it was listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteUse {
    pub code: String,
    pub uses: u64,
    pub inviter_id: Option<u64>,
}

impl From<&RichInvite> for InviteUse {
    fn from(invite: &RichInvite) -> Self {
        Self {
            code: invite.code.clone(),
            uses: invite.uses,
            inviter_id: invite.inviter.as_ref().map(|user| user.id.get()),
        }
    }
}

/// How a new member got into the guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribution {
    /// A regular invite. `inviter_id` is `None` when Discord did not report an owner.
    Invite {
        code: String,
        inviter_id: Option<u64>,
    },
    /// The guild's vanity URL.
    Vanity,
}

impl Attribution {
    /// Who the join should be credited to, if anyone.
    pub fn inviter(&self) -> Option<Inviter> {
        match self {
            Self::Invite { inviter_id, .. } => inviter_id.map(Inviter::Member),
            Self::Vanity => Some(Inviter::Vanity),
        }
    }
}

/// Fresh invite listing of a guild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteListing {
    pub invites: Vec<InviteUse>,
    /// Vanity URL use count, `None` if the guild has none or it could not be read.
    pub vanity_uses: Option<u64>,
}

#[derive(Debug)]
struct GuildInvites {
    uses: HashMap<String, u64>,
    vanity_uses: Option<u64>,
}

/// Shared invite use table, cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct InviteCache {
    guilds: Arc<RwLock<HashMap<u64, GuildInvites>>>,
    /// Held from fetching a listing until it has been applied to `guilds`.
    listing_locks: Arc<Mutex<HashMap<u64, Arc<Mutex<()>>>>>,
}

impl InviteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the snapshot of a guild.
    pub async fn prime(&self, guild_id: u64, invites: &[InviteUse], vanity_uses: Option<u64>) {
        let invites = GuildInvites {
            uses: snapshot(invites),
            vanity_uses,
        };

        self.guilds.write().await.insert(guild_id, invites);
    }

    /// Records a newly created invite. Guilds without a snapshot are left alone.
    pub async fn insert(&self, guild_id: u64, code: String, uses: u64) {
        if let Some(guild) = self.guilds.write().await.get_mut(&guild_id) {
            guild.uses.insert(code, uses);
        }
    }

    /// Drops a deleted invite.
    pub async fn remove(&self, guild_id: u64, code: &str) {
        if let Some(guild) = self.guilds.write().await.get_mut(&guild_id) {
            guild.uses.remove(code);
        }
    }

    /// Drops the whole snapshot of a guild the bot left.
    pub async fn forget_guild(&self, guild_id: u64) {
        self.guilds.write().await.remove(&guild_id);
        self.listing_locks.lock().await.remove(&guild_id);
    }

    /// Fetches a listing with `fetch` and makes it the guild's snapshot.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of invites in the new snapshot
    /// - `Err(E)` - The listing could not be fetched, the snapshot is unchanged
    pub async fn refresh<E>(
        &self,
        guild_id: u64,
        fetch: impl Future<Output = Result<InviteListing, E>>,
    ) -> Result<usize, E> {
        let lock = self.listing_lock(guild_id).await;
        let _guard = lock.lock().await;

        let listing = fetch.await?;
        self.prime(guild_id, &listing.invites, listing.vanity_uses).await;

        Ok(listing.invites.len())
    }

    /// Fetches a listing with `fetch` and works out which invite a new member used.
    ///
    /// `fetch` is not polled until every earlier listing of the guild has been
    /// applied, so joins are compared in the order their listings were taken.
    ///
    /// # Returns
    /// - `Ok(Some(Attribution))` - The invite or vanity URL the member used
    /// - `Ok(None)` - Nothing moved, or the guild had no snapshot yet
    /// - `Err(E)` - The listing could not be fetched, the snapshot is unchanged
    pub async fn attribute<E>(
        &self,
        guild_id: u64,
        fetch: impl Future<Output = Result<InviteListing, E>>,
    ) -> Result<Option<Attribution>, E> {
        let lock = self.listing_lock(guild_id).await;
        let _guard = lock.lock().await;

        let listing = fetch.await?;

        Ok(self
            .detect(guild_id, &listing.invites, listing.vanity_uses)
            .await)
    }

    async fn listing_lock(&self, guild_id: u64) -> Arc<Mutex<()>> {
        self.listing_locks
            .lock()
            .await
            .entry(guild_id)
            .or_default()
            .clone()
    }

    /// Works out which invite a new member used and stores the new snapshot.
    ///
    /// The first invite whose use count is above the stored one wins. Invites missing
    /// from the stored snapshot count from zero. When no invite moved, the vanity URL
    /// is credited if its use count went up. Otherwise the join is unattributed.
    ///
    /// A guild without a snapshot has nothing to compare against: the listing becomes
    /// its snapshot and the join is left unattributed.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the member joined
    /// - `current` - Fresh invite listing of the guild
    /// - `vanity_uses` - Fresh vanity URL use count, `None` if the guild has none or it
    ///   could not be read
    pub async fn detect(
        &self,
        guild_id: u64,
        current: &[InviteUse],
        vanity_uses: Option<u64>,
    ) -> Option<Attribution> {
        let mut guilds = self.guilds.write().await;
        let Some(guild) = guilds.get_mut(&guild_id) else {
            guilds.insert(
                guild_id,
                GuildInvites {
                    uses: snapshot(current),
                    vanity_uses,
                },
            );
            return None;
        };

        let used = current
            .iter()
            .find(|invite| invite.uses > guild.uses.get(&invite.code).copied().unwrap_or(0));

        let attribution = match used {
            Some(invite) => Some(Attribution::Invite {
                code: invite.code.clone(),
                inviter_id: invite.inviter_id,
            }),
            None => match vanity_uses {
                Some(now) if now > guild.vanity_uses.unwrap_or(0) => Some(Attribution::Vanity),
                _ => None,
            },
        };

        guild.uses = snapshot(current);
        if vanity_uses.is_some() {
            guild.vanity_uses = vanity_uses;
        }

        attribution
    }
}

fn snapshot(invites: &[InviteUse]) -> HashMap<String, u64> {
    invites
        .iter()
        .map(|invite| (invite.code.clone(), invite.uses))
        .collect()
}
