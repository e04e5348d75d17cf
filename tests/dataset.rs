use std::fs;
use std::path::PathBuf;

use wc_finals::dataset::{Dataset, FinalRecord};
use wc_finals::error::DashboardError;
use wc_finals::finals_fetch::extract_final_rows;
use wc_finals::win_summary::{CountryWins, WinSummary};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn record(year: &str, winner: &str, runner_up: &str, attendance: &str) -> FinalRecord {
    FinalRecord {
        year: year.to_string(),
        winner: winner.to_string(),
        score: "1–0".to_string(),
        runner_up: runner_up.to_string(),
        venue: "Stadium".to_string(),
        location: "City".to_string(),
        attendance: attendance.to_string(),
    }
}

#[test]
fn scenario_table_builds_two_rows() {
    let rows = extract_final_rows(&read_fixture("finals_scenario.html")).expect("fixture should parse");
    assert_eq!(rows.len(), 3);

    let dataset = Dataset::build(rows).expect("dataset should build");
    let years: Vec<&str> = dataset.years().collect();
    assert_eq!(years, ["2018", "2014"]);

    let wins = WinSummary::from_dataset(&dataset);
    assert_eq!(
        wins.entries(),
        [
            CountryWins { country: "France".to_string(), wins: 1 },
            CountryWins { country: "Germany".to_string(), wins: 1 },
        ]
    );
    assert_eq!(wins.wins_for("Spain"), None);
}

#[test]
fn rows_without_attendance_are_dropped() {
    let rows = extract_final_rows(&read_fixture("finals_page.html")).expect("fixture should parse");
    let dataset = Dataset::build(rows).expect("dataset should build");
    assert_eq!(dataset.len(), 12);
    assert!(dataset.records().iter().all(|r| !r.attendance.is_empty()));
    assert!(dataset.find_year("2026").is_none());
}

#[test]
fn legacy_name_is_normalized_in_both_columns() {
    let rows = extract_final_rows(&read_fixture("finals_page.html")).expect("fixture should parse");
    let dataset = Dataset::build(rows).expect("dataset should build");

    for r in dataset.records() {
        assert_ne!(r.winner, "West Germany", "{}", r.year);
        assert_ne!(r.runner_up, "West Germany", "{}", r.year);
    }
    assert_eq!(dataset.find_year("1954").map(|r| r.winner.as_str()), Some("Germany"));
    assert_eq!(dataset.find_year("1966").map(|r| r.runner_up.as_str()), Some("Germany"));
    // other columns keep the historical name
    assert_eq!(
        dataset.find_year("1974").map(|r| r.location.as_str()),
        Some("Munich, West Germany")
    );
}

#[test]
fn order_and_formatting_are_preserved() {
    let dataset = Dataset::build(vec![
        record("1990", "West Germany", "Argentina", "73,603"),
        record("1986", "Argentina", "West Germany", "114,600"),
    ])
    .expect("dataset should build");
    assert_eq!(dataset.first_year(), "1990");
    assert_eq!(dataset.records()[1].attendance, "114,600");
    assert_eq!(dataset.records()[1].runner_up, "Germany");
}

#[test]
fn win_counts_cover_every_row() {
    let rows = extract_final_rows(&read_fixture("finals_page.html")).expect("fixture should parse");
    let dataset = Dataset::build(rows).expect("dataset should build");
    let wins = WinSummary::from_dataset(&dataset);

    assert_eq!(wins.total_wins(), dataset.len());
    let countries: Vec<&str> = wins.countries().collect();
    assert_eq!(
        countries,
        ["Uruguay", "Italy", "Germany", "England", "Argentina", "France"]
    );
    assert_eq!(wins.wins_for("Germany"), Some(4));
    assert_eq!(wins.wins_for("Italy"), Some(3));
    assert_eq!(wins.wins_for("West Germany"), None);
}

#[test]
fn duplicate_year_is_rejected() {
    let err = Dataset::build(vec![
        record("2014", "Germany", "Argentina", "74,738"),
        record("2014", "Argentina", "Germany", "74,738"),
    ])
    .expect_err("years must be unique");
    assert!(matches!(err, DashboardError::DuplicateYear { year } if year == "2014"));
}

#[test]
fn all_rows_dropped_is_empty_dataset() {
    let err = Dataset::build(vec![record("2026", "TBD", "TBD", "")]).expect_err("nothing to show");
    assert!(matches!(err, DashboardError::EmptyDataset));
}
