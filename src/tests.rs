use anyhow::Result;
use crate::{ColumnEditor, Error, RecordStore, SortOrder};
use std::{fs, path::Path};
use tempfile::tempdir;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const PEOPLE: &str = "id,name,age,city\n\
1,Alice,30,NYC\n\
2,Bob,25,LA\n\
3,Carol,30,SF\n\
4,Dave,41,LA\n\
5,Eve,25,NYC\n";

fn init_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rowfile=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn write_people(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("people.csv");
    fs::write(&path, PEOPLE).unwrap();
    path
}

#[test]
fn test_delete_then_search_is_empty() -> Result<()> {
    init_tracing();
    let tmp = tempdir()?;
    let path = write_people(tmp.path());

    for (column, value) in [("city", "LA"), ("age", "30"), ("name", "Eve"), ("id", "42")] {
        let mut store = RecordStore::open(&path)?;
        let before = store.len();
        let hits = store.search_column(column, value)?.len();
        let removed = store.delete_where(column, value)?;
        assert_eq!(removed, hits);
        assert_eq!(store.len(), before - removed);
        assert!(store.search_column(column, value)?.is_empty());
        assert!(RecordStore::open(&path)?.search_column(column, value)?.is_empty());
    }
    Ok(())
}

#[test]
fn test_save_then_load_round_trips() -> Result<()> {
    init_tracing();
    let tmp = tempdir()?;
    let path = write_people(tmp.path());
    let mut store = RecordStore::open(&path)?;

    store.sort_by("name", SortOrder::text().descending())?;
    ColumnEditor::add_column_at(&mut store, "note", 2, "has, comma")?;
    ColumnEditor::rename_column(&mut store, "city", "location")?;
    store.append_row(["6", "Frank", "\"quoted\"", "52", "Oslo"])?;
    store.save()?;

    let reopened = RecordStore::open(&path)?;
    assert_eq!(reopened.header(), store.header());
    assert_eq!(reopened.table(), store.table());
    Ok(())
}

#[test]
fn test_numeric_sort_idempotent_both_directions() -> Result<()> {
    init_tracing();
    let tmp = tempdir()?;
    let path = write_people(tmp.path());
    let mut store = RecordStore::open(&path)?;

    for order in [SortOrder::numeric(), SortOrder::numeric().descending()] {
        store.sort_by("age", order)?;
        let once = store.table().clone();
        store.sort_by("age", order)?;
        assert_eq!(store.table(), &once);
    }

    // ties keep their prior relative order
    store.sort_by("age", SortOrder::numeric())?;
    let ages: Vec<_> = store.rows().map(|r| r.get("age").unwrap()).collect();
    assert_eq!(ages, ["25", "25", "30", "30", "41"]);
    Ok(())
}

#[test]
fn test_rename_moves_values() -> Result<()> {
    init_tracing();
    let tmp = tempdir()?;
    let path = write_people(tmp.path());
    let mut store = RecordStore::open(&path)?;
    let cities: Vec<String> = store
        .rows()
        .map(|r| r.get("city").unwrap().to_string())
        .collect();

    ColumnEditor::rename_column(&mut store, "city", "location")?;
    let locations: Vec<String> = store
        .rows()
        .map(|r| r.get("location").unwrap().to_string())
        .collect();
    assert_eq!(cities, locations);
    assert_eq!(store.header()[3], "location");
    assert!(matches!(
        store.search_column("city", "LA"),
        Err(Error::UnknownColumn(_))
    ));
    Ok(())
}

#[test]
fn test_malformed_file_is_rejected() {
    init_tracing();
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("bad.csv");
    fs::write(&path, "a,b,c\n1,2,3\n4,5,6,7\n").unwrap();

    let err = RecordStore::open(&path).unwrap_err();
    assert!(matches!(
        err,
        Error::Malformed {
            line: 3,
            expected: 3,
            found: 4
        }
    ));
}
