//! CSV report rendering and output.
//!
//! The report is a grid: one column per clan member (roster order), one
//! row per catalog ship (catalog order), with a circle marker where the
//! member owns the ship. The whole document is rendered in memory and
//! written once; nothing is streamed, so an aborted run leaves no file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::roman::tier_label;
use crate::roster::Roster;

/// Glyph marking an owned ship in the grid.
pub const OWNERSHIP_MARKER: &str = "◯";

/// Render the ownership grid as CSV text.
///
/// The header row is an empty cell followed by nicknames in roster
/// order. Each ship row starts with `"<tier label> <name>"` and carries
/// the ownership marker in the column of every player owning that ship.
/// Fields containing delimiters or quotes are CSV-quoted.
pub fn render(catalog: &Catalog, roster: &Roster) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = Vec::with_capacity(roster.len() + 1);
    header.push(String::new());
    header.extend(roster.players().iter().map(|p| p.nickname.clone()));
    writer.write_record(&header)?;

    for ship in catalog.iter() {
        let mut row = Vec::with_capacity(roster.len() + 1);
        row.push(format!("{} {}", tier_label(ship.tier)?, ship.name));
        for player in roster.players() {
            row.push(if player.owns(ship.id) {
                OWNERSHIP_MARKER.to_string()
            } else {
                String::new()
            });
        }
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes).expect("csv writer emits valid UTF-8"))
}

/// File name for a report generated on `date`: `shiplist_<tag>_<YYYYMMDD>.csv`.
pub fn report_file_name(clan_tag: &str, date: NaiveDate) -> String {
    format!("shiplist_{}_{}.csv", clan_tag, date.format("%Y%m%d"))
}

/// Render the report and write it into `dir` under the dated file name.
///
/// Returns the path of the written file.
pub fn write_report(
    dir: &Path,
    clan_tag: &str,
    catalog: &Catalog,
    roster: &Roster,
) -> Result<PathBuf> {
    let text = render(catalog, roster)?;
    let path = dir.join(report_file_name(clan_tag, chrono::Local::now().date_naive()));
    fs::write(&path, text)?;
    info!(path = %path.display(), "report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_embeds_tag_and_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(report_file_name("ABC", date), "shiplist_ABC_20260807.csv");
    }
}
