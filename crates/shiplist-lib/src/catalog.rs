//! Ship encyclopedia fetching and catalog construction.
//!
//! The catalog is the row axis of the report: every ownable ship, in a
//! deterministic display order. Pages are fetched sequentially, flattened,
//! normalized into typed ships, then sorted and filtered once.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::api::{parse_id, ApiClient, RawShip, ENCYCLOPEDIA_SHIPS_PATH};
use crate::error::{Error, Result};

/// Ship category as reported by the encyclopedia.
///
/// The variant order here is incidental; display ordering goes through
/// [`ShipType::priority`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipType {
    Submarine,
    Destroyer,
    Cruiser,
    Battleship,
    AirCarrier,
    Auxiliary,
}

impl ShipType {
    /// Fixed sort priority within a tier.
    pub fn priority(self) -> u16 {
        match self {
            ShipType::Submarine => 1,
            ShipType::Destroyer => 2,
            ShipType::Cruiser => 3,
            ShipType::Battleship => 4,
            ShipType::AirCarrier => 5,
            ShipType::Auxiliary => 999,
        }
    }

    /// Parse the encyclopedia's type string. Unknown strings are not
    /// given a fallback priority; callers must treat them as fatal.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Submarine" => Some(ShipType::Submarine),
            "Destroyer" => Some(ShipType::Destroyer),
            "Cruiser" => Some(ShipType::Cruiser),
            "Battleship" => Some(ShipType::Battleship),
            "AirCarrier" => Some(ShipType::AirCarrier),
            "Auxiliary" => Some(ShipType::Auxiliary),
            _ => None,
        }
    }
}

/// One ownable ship in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    pub id: u64,
    pub tier: u8,
    pub kind: ShipType,
    pub name: String,
    pub nation: String,
}

/// All ownable ships, sorted by (tier, type priority, nation, id).
///
/// Iteration order is the report's row order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    ships: Vec<Ship>,
}

impl Catalog {
    /// Normalize, sort, and filter raw encyclopedia entries.
    ///
    /// Loaner ships, whose display name is wrapped in brackets, are
    /// excluded. Duplicate identifiers keep their first occurrence in
    /// sorted order. The result is deterministic for identical input
    /// regardless of arrival order.
    pub fn from_raw<I>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, RawShip)>,
    {
        let mut ships = Vec::new();
        for (key, entry) in raw {
            ships.push(normalize(&key, entry)?);
        }

        ships.sort_by(|a, b| {
            a.tier
                .cmp(&b.tier)
                .then(a.kind.priority().cmp(&b.kind.priority()))
                .then_with(|| a.nation.cmp(&b.nation))
                .then(a.id.cmp(&b.id))
        });

        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(ships.len());
        for ship in ships {
            if is_loaner(&ship.name) {
                debug!(ship = %ship.name, "excluding loaner ship");
                continue;
            }
            if !seen.insert(ship.id) {
                debug!(id = ship.id, ship = %ship.name, "dropping duplicate ship id");
                continue;
            }
            kept.push(ship);
        }

        Ok(Self { ships: kept })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter()
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }
}

/// Fetch the full ship encyclopedia and build the catalog.
///
/// The first page reports the total page count; remaining pages are
/// fetched sequentially. Any failed or malformed page aborts the fetch,
/// a partial catalog is never returned.
pub fn fetch_catalog(client: &ApiClient) -> Result<Catalog> {
    let first = client.ships_page(1)?;
    let page_total = first.page_total;
    let mut raw: Vec<(String, RawShip)> = first.ships.into_iter().collect();

    for page_no in 2..=page_total {
        let page = client.ships_page(page_no)?;
        raw.extend(page.ships);
    }

    let catalog = Catalog::from_raw(raw)?;
    info!(
        ships = catalog.len(),
        pages = page_total,
        "ship encyclopedia loaded"
    );
    Ok(catalog)
}

fn normalize(key: &str, entry: RawShip) -> Result<Ship> {
    let id = parse_id(ENCYCLOPEDIA_SHIPS_PATH, key)?;
    let kind = ShipType::parse(&entry.type_name).ok_or_else(|| Error::UnknownShipType {
        name: entry.name.clone(),
        value: entry.type_name.clone(),
    })?;
    if !(1..=11).contains(&entry.tier) {
        return Err(Error::TierOutOfRange {
            name: entry.name,
            tier: entry.tier,
        });
    }

    Ok(Ship {
        id,
        tier: entry.tier as u8,
        kind,
        name: entry.name,
        nation: entry.nation,
    })
}

/// Loaner hulls carry a bracket-wrapped display name and are not ownable.
fn is_loaner(name: &str) -> bool {
    name.starts_with('[') && name.ends_with(']')
}
