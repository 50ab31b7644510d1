mod common;
use chrono::NaiveDate;
use common::{entry, row};
use teamlog::core::list::{ListLogic, ListQuery};
use teamlog::errors::AppError;
use teamlog::models::entry::{Entry, Listed};
use teamlog::report::{
    self, ALL_AREAS, count_by_area, filter_by_area, filter_by_day, filter_by_month,
    filter_by_range, leader, shares, sort_by_timestamp_desc, split_malformed,
};

fn sample() -> Vec<Entry> {
    vec![
        entry("2025-01-01 10:00", "Ali", "Mekanik", "Test"),
        entry("2025-01-02 11:00", "Veli", "Yazılım", "Build"),
        entry("2025-02-14 09:30", "Ayşe", "Mekanik", "Chassis"),
        entry("2024-02-03 08:00", "Can", "PR", "Poster"),
        entry("2025-02-14 09:30", "Deniz", "PR", "Sponsors"),
    ]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn two_row_store_example() {
    let rows = [
        row(&["2025-01-01 10:00", "Ali", "Mekanik", "Test"]),
        row(&["2025-01-02 11:00", "Veli", "Yazılım", "Build"]),
    ];
    let entries: Vec<Entry> = rows.iter().map(|r| Entry::from_row(r).unwrap()).collect();

    let mekanik = filter_by_area(&entries, "Mekanik");
    assert_eq!(mekanik, vec![entries[0].clone()]);

    let counts = count_by_area(&entries);
    assert_eq!(counts.len(), 2);
    assert_eq!(counts["Mekanik"], 1);
    assert_eq!(counts["Yazılım"], 1);
}

#[test]
fn all_filter_is_identity() {
    let entries = sample();
    assert_eq!(filter_by_area(&entries, ALL_AREAS), entries);
    assert!(filter_by_area(&Vec::<Entry>::new(), ALL_AREAS).is_empty());
}

#[test]
fn area_filter_is_exact() {
    let entries = sample();
    assert!(filter_by_area(&entries, "mekanik").is_empty());
    assert!(filter_by_area(&entries, "Mek").is_empty());
    assert_eq!(filter_by_area(&entries, "PR").len(), 2);
}

#[test]
fn day_filter_matches_calendar_date() {
    let hits = filter_by_day(&sample(), date(2025, 2, 14)).unwrap();
    let authors: Vec<&str> = hits.iter().map(|e| e.author.as_str()).collect();
    assert_eq!(authors, vec!["Ayşe", "Deniz"]);
}

#[test]
fn month_filter_with_and_without_year() {
    let entries = sample();

    let season = filter_by_month(&entries, 2, None).unwrap();
    assert_eq!(season.len(), 3, "month-only view spans every year");

    let this_year = filter_by_month(&entries, 2, Some(2025)).unwrap();
    assert_eq!(this_year.len(), 2);
    assert!(this_year.iter().all(|e| e.timestamp.starts_with("2025-02")));
}

#[test]
fn range_filter_is_inclusive() {
    let hits = filter_by_range(&sample(), date(2025, 1, 2), date(2025, 2, 14)).unwrap();
    assert_eq!(hits.len(), 3);
}

#[test]
fn sort_descending_is_idempotent_and_reverses_to_ascending() {
    let sorted = sort_by_timestamp_desc(&sample()).unwrap();
    assert_eq!(sorted[0].timestamp, "2025-02-14 09:30");
    assert_eq!(sorted.last().unwrap().timestamp, "2024-02-03 08:00");

    assert_eq!(sort_by_timestamp_desc(&sorted).unwrap(), sorted);

    let mut ascending = sorted.clone();
    ascending.reverse();
    assert!(
        ascending
            .windows(2)
            .all(|w| w[0].parsed_timestamp().unwrap() <= w[1].parsed_timestamp().unwrap())
    );
}

#[test]
fn sort_keeps_store_order_for_equal_timestamps() {
    let sorted = sort_by_timestamp_desc(&sample()).unwrap();
    assert_eq!(sorted[0].author, "Ayşe");
    assert_eq!(sorted[1].author, "Deniz");
}

#[test]
fn counts_total_equals_length() {
    let entries = sample();
    let total: usize = count_by_area(&entries).values().sum();
    assert_eq!(total, entries.len());
    assert!(count_by_area(&Vec::<Entry>::new()).is_empty());
}

#[test]
fn leader_breaks_ties_alphabetically() {
    let counts = count_by_area(&sample());
    // Mekanik 2, PR 2, Yazılım 1
    assert_eq!(leader(&counts), Some(("Mekanik".to_string(), 2)));
    assert_eq!(leader(&count_by_area(&Vec::<Entry>::new())), None);
}

#[test]
fn shares_sum_to_one_hundred() {
    let s = shares(&count_by_area(&sample()));
    assert_eq!(s[0].count, 2);
    let sum: f64 = s.iter().map(|x| x.percent).sum();
    assert!((sum - 100.0).abs() < 1e-9);
}

#[test]
fn malformed_timestamp_fails_filters_but_can_be_split_out() {
    let mut entries = sample();
    entries.push(entry("yesterday", "Ece", "PR", "Call"));

    match filter_by_day(&entries, date(2025, 1, 1)) {
        Err(AppError::Format(msg)) => assert!(msg.contains("yesterday")),
        other => panic!("expected format error, got {other:?}"),
    }
    assert!(sort_by_timestamp_desc(&entries).is_err());

    let (valid, malformed) = split_malformed(&entries);
    assert_eq!(valid.len(), 5);
    assert_eq!(malformed.len(), 1);
    assert_eq!(filter_by_day(&valid, date(2025, 1, 1)).unwrap().len(), 1);
}

#[test]
fn listed_rows_keep_their_store_position() {
    let listed = Listed::enumerate(sample());
    let pr = report::filter_by_area(&listed, "PR");
    let rows: Vec<usize> = pr.iter().map(|l| l.row).collect();
    assert_eq!(rows, vec![4, 5]);

    let sorted = sort_by_timestamp_desc(&pr).unwrap();
    assert_eq!(sorted[0].row, 5);
}

#[test]
fn list_view_combines_filters_and_reports_malformed_rows() {
    let mut entries = sample();
    entries.push(entry("-", "Ece", "Mekanik", "-"));

    let query = ListQuery {
        area: "Mekanik".into(),
        month: Some((2, Some(2025))),
        ..ListQuery::default()
    };
    let view = ListLogic::build(entries, &query).unwrap();

    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].entry.author, "Ayşe");
    assert_eq!(view.rows[0].row, 3);
    assert_eq!(view.malformed.len(), 1);
    assert_eq!(view.malformed[0].row, 6);
}
