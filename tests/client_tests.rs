mod common;
use chrono::NaiveDate;
use common::{FlakyStore, admin, entry, memory_client, memory_store, row};
use teamlog::access::Session;
use teamlog::client::{ArchiveState, SheetRanges, StoreClient};
use teamlog::errors::AppError;
use teamlog::models::entry::{Entry, PLACEHOLDER};
use teamlog::models::settings::Settings;
use teamlog::store::{MemoryStore, TabularStore};

fn new_entry(author: &str, area: &str, task: &str) -> Entry {
    Entry::new(author, area, task).unwrap()
}

#[test]
fn append_then_list_round_trips() {
    let mut client = memory_client();
    let e = new_entry("Ali", "Mechanical", "Gearbox");
    client.append_entry(&e).unwrap();

    let listed = client.list_entries().unwrap();
    assert_eq!(listed, vec![e.clone()]);
    assert_eq!(listed[0].key.as_ref().map(|k| k.len()), Some(36));

    let audit = client.store().audit_lines();
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].0, "add");
}

#[test]
fn header_row_is_skipped_and_written_once() {
    let mut client = memory_client();
    client.ensure_headers().unwrap();
    assert!(client.list_entries().unwrap().is_empty());

    let sheet = client.store().sheet("Reports").unwrap();
    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet[0][0], "Date");
}

#[test]
fn blank_fields_are_rejected_before_any_write() {
    assert!(matches!(
        Entry::new("  ", "PR", "Poster"),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        Entry::new("Ali", "PR", ""),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn short_rows_get_placeholders() {
    let store = memory_store().with_sheet(
        "Reports",
        vec![
            row(&["Date", "Name", "Area", "Task", "Key"]),
            row(&["2025-03-01 10:00", "Ali"]),
        ],
    );
    let client = StoreClient::new(store, SheetRanges::default());

    let entries = client.list_entries().unwrap();
    assert_eq!(entries[0].author, "Ali");
    assert_eq!(entries[0].area, PLACEHOLDER);
    assert_eq!(entries[0].description, PLACEHOLDER);
    assert_eq!(entries[0].key, None);

    assert!(matches!(
        Entry::from_row(&row(&["2025-03-01 10:00", "Ali"])),
        Err(AppError::Format(_))
    ));
}

#[test]
fn missing_sheet_is_a_connectivity_error() {
    let client = StoreClient::new(MemoryStore::new(), SheetRanges::default());
    assert!(matches!(
        client.list_entries(),
        Err(AppError::Connectivity(_))
    ));
}

#[test]
fn archive_moves_row_to_archive() {
    let mut client = memory_client();
    let first = new_entry("Ali", "Mechanical", "Gearbox");
    let second = new_entry("Veli", "PR", "Poster");
    client.append_entry(&first).unwrap();
    client.append_entry(&second).unwrap();

    let receipt = client.archive_and_remove(&admin(), 1, &first).unwrap();
    assert_eq!(receipt.row_index, 1);
    assert!(!receipt.resumed);

    assert_eq!(client.list_entries().unwrap(), vec![second]);
    let archived = client.list_archive().unwrap();
    assert_eq!(archived.len(), 1);
    assert_eq!(archived[0].key, first.key);

    let archive_sheet = client.store().sheet("Archive").unwrap();
    assert_eq!(archive_sheet[1].len(), 6, "archive row carries its archive time");
}

#[test]
fn archive_requires_admin() {
    let mut client = memory_client();
    let e = new_entry("Ali", "Mechanical", "Gearbox");
    client.append_entry(&e).unwrap();

    let guest = Session::new();
    assert!(matches!(
        client.archive_and_remove(&guest, 1, &e),
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        client.delete_last_entry(&guest, None),
        Err(AppError::Unauthorized(_))
    ));
    assert_eq!(client.list_entries().unwrap().len(), 1);
    assert!(client.list_archive().unwrap().is_empty());
}

#[test]
fn archive_refuses_a_row_that_moved() {
    let mut client = memory_client();
    let first = new_entry("Ali", "Mechanical", "Gearbox");
    let second = new_entry("Veli", "PR", "Poster");
    client.append_entry(&first).unwrap();
    client.append_entry(&second).unwrap();

    // another session removes row 1 after this one listed it
    client.archive_and_remove(&admin(), 1, &first).unwrap();

    match client.archive_and_remove(&admin(), 1, &first) {
        Err(AppError::StaleRow { index }) => assert_eq!(index, 1),
        other => panic!("expected stale row, got {other:?}"),
    }
    assert_eq!(client.list_entries().unwrap(), vec![second]);
    assert_eq!(client.list_archive().unwrap().len(), 1);
}

#[test]
fn archive_out_of_range_index() {
    let mut client = memory_client();
    let e = new_entry("Ali", "Mechanical", "Gearbox");
    assert!(matches!(
        client.archive_and_remove(&admin(), 3, &e),
        Err(AppError::EntryNotFound(_))
    ));
    assert!(matches!(
        client.archive_and_remove(&admin(), 0, &e),
        Err(AppError::EntryNotFound(_))
    ));
}

#[test]
fn failed_removal_reports_duplicate_and_recovers() {
    let mut client = StoreClient::new(FlakyStore::new(memory_store()), SheetRanges::default());
    client.ensure_headers().unwrap();

    let e = new_entry("Ali", "Mechanical", "Gearbox");
    client.append_entry(&e).unwrap();
    let key = e.key.clone().unwrap();

    client.store_mut().fail_delete = true;
    match client.archive_and_remove(&admin(), 1, &e) {
        Err(AppError::PartialArchive { entry, cause }) => {
            assert!(entry.contains("Ali"));
            assert!(cause.contains("connection reset"));
        }
        other => panic!("expected partial archive, got {other:?}"),
    }

    // the row now lives in both ranges
    assert_eq!(client.list_entries().unwrap().len(), 1);
    assert_eq!(client.list_archive().unwrap().len(), 1);
    assert_eq!(
        client.archive_state(&key).unwrap(),
        ArchiveState::PendingRemoval
    );

    client.store_mut().fail_delete = false;
    assert_eq!(client.resume_pending_archives(&admin()).unwrap(), 1);
    assert_eq!(client.archive_state(&key).unwrap(), ArchiveState::Archived);
    assert!(client.list_entries().unwrap().is_empty());
    assert_eq!(client.list_archive().unwrap().len(), 1);

    // nothing left to do
    assert_eq!(client.resume_pending_archives(&admin()).unwrap(), 0);
}

#[test]
fn archive_by_key_resumes_without_copying_twice() {
    let mut client = StoreClient::new(FlakyStore::new(memory_store()), SheetRanges::default());
    client.ensure_headers().unwrap();

    let e = new_entry("Ali", "Mechanical", "Gearbox");
    let other = new_entry("Veli", "PR", "Poster");
    client.append_entry(&e).unwrap();
    client.append_entry(&other).unwrap();
    let key = e.key.clone().unwrap();

    client.store_mut().fail_delete = true;
    assert!(client.archive_by_key(&admin(), &key).is_err());

    client.store_mut().fail_delete = false;
    let receipt = client.archive_by_key(&admin(), &key[..8]).unwrap();
    assert!(receipt.resumed);
    assert_eq!(receipt.entry.author, "Ali");
    assert_eq!(client.list_archive().unwrap().len(), 1);
    assert_eq!(client.list_entries().unwrap(), vec![other]);

    assert!(matches!(
        client.archive_by_key(&admin(), &key),
        Err(AppError::AlreadyArchived(_))
    ));
}

#[test]
fn key_lookup_rules() {
    let mut client = memory_client();
    let e = new_entry("Ali", "Mechanical", "Gearbox");
    client.append_entry(&e).unwrap();
    let key = e.key.clone().unwrap();

    let (row, found) = client.find_by_key(&key[..4]).unwrap().unwrap();
    assert_eq!(row, 1);
    assert_eq!(found, e);

    assert!(matches!(
        client.find_by_key("abc"),
        Err(AppError::Validation(_))
    ));
    assert_eq!(client.find_by_key("zzzzzzzz").unwrap(), None);
    assert_eq!(client.archive_state("zzzzzzzz").unwrap(), ArchiveState::Unknown);
    assert_eq!(client.archive_state(&key).unwrap(), ArchiveState::Active);
}

#[test]
fn delete_last_removes_only_the_final_row() {
    let mut client = memory_client();
    assert!(!client.delete_last_entry(&admin(), None).unwrap());

    let a = new_entry("Ali", "Mechanical", "Gearbox");
    let b = new_entry("Veli", "PR", "Poster");
    client.append_entry(&a).unwrap();
    client.append_entry(&b).unwrap();

    assert!(client.delete_last_entry(&admin(), Some(&b)).unwrap());
    assert_eq!(client.list_entries().unwrap(), vec![a]);
    assert!(client.list_archive().unwrap().is_empty());
}

#[test]
fn appends_land_after_legacy_rows() {
    let store = memory_store().with_sheet(
        "Reports",
        vec![
            row(&["Date", "Name", "Area", "Task"]),
            row(&["2025-01-01 10:00", "Ali", "Mekanik", "Test"]),
        ],
    );
    let mut client = StoreClient::new(store, SheetRanges::default());
    let e = entry("2025-01-02 11:00", "Veli", "Yazılım", "Build");
    client.append_entry(&e).unwrap();

    let entries = client.list_entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1], e);
}

#[test]
fn settings_fall_back_to_default() {
    let mut client = memory_client();
    assert_eq!(client.load_settings().unwrap(), None);
    assert_eq!(client.read_settings().unwrap(), Settings::default());

    client
        .store_mut()
        .update(
            &SheetRanges::default().settings,
            &[row(&["Regional final", "not a date"])],
        )
        .unwrap();
    assert_eq!(client.read_settings().unwrap(), Settings::default());
}

#[test]
fn settings_write_requires_admin_and_round_trips() {
    let mut client = memory_client();
    let s = Settings {
        goal_name: "Regional final".into(),
        target_date: NaiveDate::from_ymd_opt(2026, 5, 20).unwrap(),
    };

    assert!(matches!(
        client.write_settings(&Session::new(), &s),
        Err(AppError::Unauthorized(_))
    ));

    client.write_settings(&admin(), &s).unwrap();
    assert_eq!(client.read_settings().unwrap(), s);
    assert_eq!(
        s.days_remaining(NaiveDate::from_ymd_opt(2026, 5, 10).unwrap()),
        10
    );
}

#[test]
fn delete_last_refuses_a_row_appended_after_confirmation() {
    let mut client = memory_client();
    let a = new_entry("Ali", "Mechanical", "Gearbox");
    client.append_entry(&a).unwrap();

    // confirmed `a`, then someone else appended
    let late = new_entry("Veli", "PR", "Poster");
    client.append_entry(&late).unwrap();

    match client.delete_last_entry(&admin(), Some(&a)) {
        Err(AppError::StaleRow { index }) => assert_eq!(index, 2),
        other => panic!("expected stale row, got {other:?}"),
    }
    assert_eq!(client.list_entries().unwrap(), vec![a, late]);
}

#[test]
fn short_key_handles_non_ascii_cells() {
    let store = memory_store().with_sheet(
        "Reports",
        vec![
            row(&["Date", "Name", "Area", "Task", "Key"]),
            row(&["2025-03-01 10:00", "Ali", "PR", "Poster", "abcdefgé-not-a-uuid"]),
            row(&["2025-03-02 10:00", "Veli", "PR", "Flyer", "çğış"]),
        ],
    );
    let client = StoreClient::new(store, SheetRanges::default());

    let entries = client.list_entries().unwrap();
    assert_eq!(entries[0].short_key(), "abcdefgé");
    assert_eq!(entries[1].short_key(), "çğış");
    assert_eq!(new_entry("Ali", "PR", "x").short_key().len(), 8);
    assert_eq!(entry("2025-03-01 10:00", "Ali", "PR", "x").short_key(), "");
}

#[test]
fn blank_goal_name_is_not_written() {
    let mut client = memory_client();
    let kept = Settings {
        goal_name: "Regional final".into(),
        target_date: NaiveDate::from_ymd_opt(2026, 5, 20).unwrap(),
    };
    client.write_settings(&admin(), &kept).unwrap();

    let blank = Settings {
        goal_name: "  ".into(),
        target_date: NaiveDate::from_ymd_opt(2027, 3, 3).unwrap(),
    };
    assert!(matches!(
        client.write_settings(&admin(), &blank),
        Err(AppError::Validation(_))
    ));
    assert_eq!(client.read_settings().unwrap(), kept);
}

#[test]
fn failed_archive_copy_changes_nothing() {
    let mut client = StoreClient::new(FlakyStore::new(memory_store()), SheetRanges::default());
    client.ensure_headers().unwrap();

    let e = new_entry("Ali", "Mechanical", "Gearbox");
    client.append_entry(&e).unwrap();
    let key = e.key.clone().unwrap();

    client.store_mut().fail_append = true;
    assert!(matches!(
        client.archive_and_remove(&admin(), 1, &e),
        Err(AppError::Connectivity(_))
    ));
    assert!(matches!(
        client.archive_by_key(&admin(), &key),
        Err(AppError::Connectivity(_))
    ));

    assert_eq!(client.list_entries().unwrap(), vec![e]);
    assert!(client.list_archive().unwrap().is_empty());
    assert_eq!(client.archive_state(&key).unwrap(), ArchiveState::Active);
}
