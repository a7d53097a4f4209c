//! Clan tag resolution.

use tracing::info;

use crate::api::{ApiClient, ClanRecord};
use crate::error::{Error, Result};

/// A clan resolved to its numeric identifier and member list.
#[derive(Debug, Clone)]
pub struct ResolvedClan {
    pub clan_id: u64,
    /// Account identifiers in the order the clan-info endpoint returned
    /// them; this order is preserved all the way into the report columns.
    pub member_ids: Vec<u64>,
}

/// Resolve a clan tag to its identifier and member account list.
///
/// The search endpoint matches substrings, so its candidates are scanned
/// for the first case-sensitive exact tag match; near-matches such as
/// `ABCD` for the query `ABC` are rejected.
pub fn resolve_clan(client: &ApiClient, tag: &str) -> Result<ResolvedClan> {
    let candidates = client.search_clans(tag)?;
    let clan_id = find_exact_tag(&candidates, tag).ok_or_else(|| Error::ClanNotFound {
        tag: tag.to_string(),
    })?;
    let member_ids = client.clan_member_ids(clan_id)?;
    info!(tag, clan_id, members = member_ids.len(), "resolved clan");
    Ok(ResolvedClan {
        clan_id,
        member_ids,
    })
}

/// First candidate whose tag equals `tag` exactly, in search order.
pub fn find_exact_tag(candidates: &[ClanRecord], tag: &str) -> Option<u64> {
    candidates
        .iter()
        .find(|candidate| candidate.tag == tag)
        .map(|candidate| candidate.clan_id)
}
