use gacha_ledger_catalog::{BannerRecord, HistoryStore, StoreError};
use std::fs;
use tempfile::TempDir;

fn record(from: &str, to: &str, five: &[&str], name: &str) -> BannerRecord {
    BannerRecord {
        from: from.to_string(),
        to: to.to_string(),
        five: five.iter().map(|s| s.to_string()).collect(),
        four: vec![],
        name: name.to_string(),
        extra: Default::default(),
    }
}

#[test]
fn missing_file_is_empty_history() {
    let tmp = TempDir::new().unwrap();
    let store = HistoryStore::new(tmp.path().join("301.yaml"));
    assert!(!store.exists());
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn empty_and_null_documents_are_empty_history() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("11.yaml");

    fs::write(&path, "\n").unwrap();
    assert!(HistoryStore::new(&path).load().unwrap().is_empty());

    fs::write(&path, "~\n").unwrap();
    assert!(HistoryStore::new(&path).load().unwrap().is_empty());
}

#[test]
fn load_hand_curated_history() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("301.yaml");
    fs::write(
        &path,
        r#"
- from: "2024-03-13 18:00:00"
  to: "2024-04-02 14:59:59"
  five:
    - 闲云
    - 纳西妲
  four:
    - 嘉明
    - 珐露珊
    - 诺艾尔
  name: 鹤与白兔的诉说|月草的赐慧
- from: "2020-09-28 10:00:00"
  to: "2020-10-18 17:59:59"
  five: [温迪]
"#,
    )
    .unwrap();

    let records = HistoryStore::new(&path).load().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].five, vec!["闲云", "纳西妲"]);
    assert_eq!(records[0].four.len(), 3);
    assert_eq!(records[1].name, "");
    assert!(records[1].four.is_empty());
}

#[test]
fn unknown_keys_survive_a_rewrite() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("301.yaml");
    fs::write(
        &path,
        r#"
- from: "2020-09-28 10:00:00"
  to: "2020-10-18 17:59:59"
  five: [温迪]
  name: 杯装之诗
  version: '1.0'
"#,
    )
    .unwrap();

    let store = HistoryStore::new(&path);
    let records = store.load().unwrap();
    assert_eq!(records[0].name, "杯装之诗");
    assert_eq!(records[0].extra.len(), 1);

    store.save(&records).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("version:"));
    assert!(text.find("name:").unwrap() < text.find("version:").unwrap());
    assert_eq!(store.load().unwrap(), records);
}

#[test]
fn save_then_load_preserves_records() {
    let tmp = TempDir::new().unwrap();
    let store = HistoryStore::new(tmp.path().join("manual").join("2001.yaml"));
    let records = vec![
        record("2024-07-24 12:00:00", "2024-08-14 11:59:59", &["柳"], "飞鸟坠入良夜"),
        record("2024-07-04 10:00:00", "2024-07-24 11:59:59", &["艾莲"], "慵懒逐浪"),
    ];

    store.save(&records).unwrap();
    assert!(store.exists());
    assert_eq!(store.load().unwrap(), records);

    let raw = fs::read_to_string(store.path()).unwrap();
    let from_pos = raw.find("from:").unwrap();
    let name_pos = raw.find("name:").unwrap();
    assert!(from_pos < name_pos);
}

#[test]
fn save_overwrites_whole_file() {
    let tmp = TempDir::new().unwrap();
    let store = HistoryStore::new(tmp.path().join("12.yaml"));
    store
        .save(&[
            record("2024-01-01", "2024-01-20", &["A"], "a"),
            record("2023-01-01", "2023-01-20", &["B"], "b"),
        ])
        .unwrap();
    store.save(&[record("2025-01-01", "2025-01-20", &["C"], "c")]).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].name, "c");
    assert!(!tmp.path().join("12.yaml.tmp").exists());
}

#[test]
fn malformed_yaml_is_parse_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("302.yaml");
    fs::write(&path, "from: [unclosed\n").unwrap();

    let err = HistoryStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::Parse { .. }));
}

#[test]
fn non_sequence_document_is_parse_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("3001.yaml");
    fs::write(&path, "from: 2024-01-01\nto: 2024-01-02\n").unwrap();

    let err = HistoryStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::Parse { .. }));
}
