use std::collections::HashSet;
use std::fs;

use shiplist_lib::{render, write_report, Catalog, Player, RawShip, Roster};

fn raw(id: &str, tier: u32, type_name: &str, name: &str, nation: &str) -> (String, RawShip) {
    (
        id.to_string(),
        RawShip {
            tier,
            type_name: type_name.to_string(),
            name: name.to_string(),
            nation: nation.to_string(),
        },
    )
}

fn player(account_id: u64, nickname: &str, ships: &[u64]) -> Player {
    Player {
        account_id,
        nickname: nickname.to_string(),
        ship_ids: ships.iter().copied().collect::<HashSet<u64>>(),
    }
}

#[test]
fn renders_the_minimal_grid() {
    let catalog = Catalog::from_raw(vec![raw("100", 5, "Cruiser", "Foo", "USA")]).unwrap();
    let roster = Roster::from_players(vec![player(1, "Alice", &[100])]);

    let text = render(&catalog, &roster).unwrap();
    assert_eq!(text, ",Alice\nV Foo,◯\n");
}

#[test]
fn marker_is_present_exactly_where_owned() {
    let catalog = Catalog::from_raw(vec![
        raw("100", 1, "Destroyer", "First", "usa"),
        raw("200", 2, "Destroyer", "Second", "usa"),
    ])
    .unwrap();
    let roster = Roster::from_players(vec![
        player(1, "Alice", &[100]),
        player(2, "Bob", &[200]),
        player(3, "Carol", &[100, 200]),
    ]);

    let text = render(&catalog, &roster).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], ",Alice,Bob,Carol");
    assert_eq!(lines[1], "I First,◯,,◯");
    assert_eq!(lines[2], "II Second,,◯,◯");
}

#[test]
fn header_preserves_roster_order() {
    let catalog = Catalog::from_raw(Vec::<(String, RawShip)>::new()).unwrap();
    let roster = Roster::from_players(vec![
        player(1, "Zed", &[]),
        player(2, "Ann", &[]),
        player(3, "Mia", &[]),
    ]);

    let text = render(&catalog, &roster).unwrap();
    assert_eq!(text, ",Zed,Ann,Mia\n");
}

#[test]
fn tier_eleven_rows_use_the_star_label() {
    let catalog = Catalog::from_raw(vec![raw("100", 11, "Battleship", "Apex", "usa")]).unwrap();
    let roster = Roster::from_players(vec![player(1, "Alice", &[])]);

    let text = render(&catalog, &roster).unwrap();
    assert!(text.contains("★ Apex"));
}

#[test]
fn write_report_materializes_the_rendered_grid() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let catalog = Catalog::from_raw(vec![raw("100", 5, "Cruiser", "Foo", "usa")]).unwrap();
    let roster = Roster::from_players(vec![player(1, "Alice", &[100])]);

    let path = write_report(temp_dir.path(), "ABC", &catalog, &roster).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("shiplist_ABC_"));
    assert!(name.ends_with(".csv"));

    let text = fs::read_to_string(&path).expect("report readable");
    assert_eq!(text, ",Alice\nV Foo,◯\n");
}

#[test]
fn names_containing_delimiters_are_quoted() {
    let catalog =
        Catalog::from_raw(vec![raw("100", 5, "Cruiser", "Foo, the Second", "usa")]).unwrap();
    let roster = Roster::from_players(vec![player(1, "Alice", &[100])]);

    let text = render(&catalog, &roster).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "\"V Foo, the Second\",◯");
}
