//! Clan roster construction and enrichment.
//!
//! A roster is built in two passes over the member list: one batched call
//! attaches nicknames, then one call per member attaches the owned-ship
//! set. Player order is the clan API's member order and is never
//! re-sorted; the report's column order depends on it.

use std::collections::HashSet;

use tracing::info;

use crate::api::{ApiClient, ACCOUNT_INFO_PATH};
use crate::error::{Error, Result};

/// One clan member with display name and owned ships.
#[derive(Debug, Clone)]
pub struct Player {
    pub account_id: u64,
    pub nickname: String,
    pub ship_ids: HashSet<u64>,
}

impl Player {
    pub fn owns(&self, ship_id: u64) -> bool {
        self.ship_ids.contains(&ship_id)
    }
}

/// Clan members in clan-API order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Build a roster from an already-enriched player list. Primarily a
    /// seam for rendering tests; network construction goes through
    /// [`Roster::from_members`].
    pub fn from_players(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// First enrichment pass: fetch every member's nickname in one
    /// batched call and build the roster in member-id order.
    ///
    /// Every requested account must come back with a nickname; a missing
    /// entry is fatal rather than degraded to a blank column.
    pub fn from_members(client: &ApiClient, member_ids: &[u64]) -> Result<Self> {
        let mut nicknames = client.account_nicknames(member_ids)?;

        let mut players = Vec::with_capacity(member_ids.len());
        for &account_id in member_ids {
            let nickname = nicknames
                .remove(&account_id)
                .ok_or_else(|| Error::MalformedResponse {
                    endpoint: ACCOUNT_INFO_PATH,
                    message: format!("no nickname returned for account {account_id}"),
                })?;
            players.push(Player {
                account_id,
                nickname,
                ship_ids: HashSet::new(),
            });
        }
        info!(players = players.len(), "fetched member nicknames");
        Ok(Self { players })
    }

    /// Second enrichment pass: fetch each player's owned-ship set, one
    /// sequential call per player in roster order.
    pub fn attach_owned_ships(&mut self, client: &ApiClient) -> Result<()> {
        for player in &mut self.players {
            let owned = client.owned_ship_ids(player.account_id)?;
            player.ship_ids = owned.into_iter().collect();
        }
        info!(players = self.players.len(), "fetched owned ships");
        Ok(())
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
