//! Shiplist library entry points.
//!
//! This crate exposes the full clan ship-list pipeline: resolve a clan
//! tag, build and enrich the member roster, fetch the ship encyclopedia
//! into a sorted catalog, and render the ownership grid as CSV. The CLI
//! should only depend on the functions exported here instead of
//! reimplementing behavior.

#![deny(warnings)]

pub mod api;
pub mod catalog;
pub mod clan;
pub mod error;
pub mod report;
pub mod roman;
pub mod roster;

pub use api::{ApiClient, ClanRecord, RawShip, ShipsPage};
pub use catalog::{fetch_catalog, Catalog, Ship, ShipType};
pub use clan::{find_exact_tag, resolve_clan, ResolvedClan};
pub use error::{Error, Result};
pub use report::{render, report_file_name, write_report, OWNERSHIP_MARKER};
pub use roman::tier_label;
pub use roster::{Player, Roster};
