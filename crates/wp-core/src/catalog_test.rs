use super::*;
use std::fs;
use tempfile::TempDir;

fn write_pair(root: &Path, id: u32, name: &str, ts: &str) -> PathBuf {
    let dir = root.join(format!("{}.{}.{}", id, name, ts));
    fs::create_dir_all(&dir).unwrap();
    let up = dir.join(format!("up.{}.{}.{}.sql", id, name, ts));
    let down = dir.join(format!("down.{}.{}.{}.sql", id, name, ts));
    fs::write(&up, "").unwrap();
    fs::write(&down, "").unwrap();
    up
}

#[test]
fn test_missing_root_is_empty() {
    let dir = TempDir::new().unwrap();
    let available = scan(&dir.path().join("migrations")).unwrap();
    assert!(available.is_empty());
}

#[test]
fn test_scan_pairs_and_parses_identity() {
    let dir = TempDir::new().unwrap();
    let up = write_pair(dir.path(), 0, "create_users", "20240101-120000");

    let available = scan(dir.path()).unwrap();
    assert_eq!(available.len(), 1);
    let mf = &available[0];
    assert_eq!(mf.up_path, up);
    assert_eq!(mf.sequence_id, "0");
    assert_eq!(
        mf.down_path.file_name().unwrap().to_str().unwrap(),
        "down.0.create_users.20240101-120000.sql"
    );
    assert_eq!(
        mf.created_at,
        NaiveDateTime::parse_from_str("20240101-120000", TIMESTAMP_FORMAT).unwrap()
    );
    assert_eq!(
        mf.short_name(),
        "0.create_users.20240101-120000/up.0.create_users.20240101-120000.sql"
    );
}

#[test]
fn test_sorted_by_timestamp_not_id() {
    let dir = TempDir::new().unwrap();
    // Higher id but earlier timestamp must sort first
    write_pair(dir.path(), 2, "later_id_earlier_ts", "20230601-000000");
    write_pair(dir.path(), 0, "first", "20240101-000000");
    write_pair(dir.path(), 1, "second", "20240201-000000");

    let available = scan(dir.path()).unwrap();
    let ids: Vec<&str> = available.iter().map(|m| m.sequence_id.as_str()).collect();
    assert_eq!(ids, ["2", "0", "1"]);
    for pair in available.windows(2) {
        assert!(pair[0].created_at <= pair[1].created_at);
    }
}

#[test]
fn test_malformed_timestamp_aborts_scan() {
    let dir = TempDir::new().unwrap();
    write_pair(dir.path(), 0, "good", "20240101-120000");
    let bad_dir = dir.path().join("1.bad.notadate");
    fs::create_dir(&bad_dir).unwrap();
    fs::write(bad_dir.join("up.1.bad.notadate.sql"), "").unwrap();
    fs::write(bad_dir.join("down.1.bad.notadate.sql"), "").unwrap();

    let err = scan(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::MalformedCatalogEntry { .. }));
}

#[test]
fn test_missing_down_script_is_malformed() {
    let dir = TempDir::new().unwrap();
    let up = write_pair(dir.path(), 0, "orphan", "20240101-120000");
    fs::remove_file(up.with_file_name("down.0.orphan.20240101-120000.sql")).unwrap();

    let err = scan(dir.path()).unwrap_err();
    match err {
        CoreError::MalformedCatalogEntry { reason, .. } => {
            assert!(reason.contains("missing reverse script"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_find_by_id() {
    let dir = TempDir::new().unwrap();
    write_pair(dir.path(), 0, "create_users", "20240101-120000");
    write_pair(dir.path(), 1, "add_index", "20240102-120000");
    let available = scan(dir.path()).unwrap();

    assert_eq!(find_by_id(&available, "1", "add_index").unwrap(), 1);
    assert_eq!(find_by_id(&available, "0", "").unwrap(), 0);
    assert!(matches!(
        find_by_id(&available, "1", "wrong_name"),
        Err(CoreError::MigrationNotFound { .. })
    ));
    assert!(matches!(
        find_by_id(&available, "7", ""),
        Err(CoreError::MigrationNotFound { .. })
    ));
}

#[test]
fn test_find_by_id_ambiguous() {
    let dir = TempDir::new().unwrap();
    // Same sequence id twice: created on two machines from the same base
    write_pair(dir.path(), 2, "add_tags", "20240103-100000");
    write_pair(dir.path(), 2, "add_flags", "20240103-110000");
    let available = scan(dir.path()).unwrap();

    let err = find_by_id(&available, "2", "").unwrap_err();
    match err {
        CoreError::AmbiguousMigration { count, .. } => assert_eq!(count, 2),
        other => panic!("unexpected error: {other}"),
    }
    // A label disambiguates
    assert_eq!(find_by_id(&available, "2", "add_flags").unwrap(), 1);
}

#[test]
fn test_label_with_inner_dots() {
    let dir = TempDir::new().unwrap();
    write_pair(dir.path(), 0, "users.and.roles", "20240101-120000");
    let available = scan(dir.path()).unwrap();
    assert_eq!(available[0].label, "users.and.roles");
    assert_eq!(available[0].sequence_id, "0");
}

#[test]
fn test_non_migration_files_ignored() {
    let dir = TempDir::new().unwrap();
    write_pair(dir.path(), 0, "real", "20240101-120000");
    fs::write(dir.path().join("README.md"), "notes").unwrap();
    fs::write(dir.path().join("seed.sql"), "INSERT ...").unwrap();

    let available = scan(dir.path()).unwrap();
    assert_eq!(available.len(), 1);
}
