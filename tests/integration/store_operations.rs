use crate::integration::support::Fixture;
use user_store::{ApiError, Record, StoreError};

#[test]
fn add_to_empty_file_writes_single_element_array() {
    let fixture = Fixture::with_contents("");
    let out = fixture.add(r#"{"id":"1","email":"a@b.com","age":30}"#);

    assert_eq!(out, "");
    assert_eq!(
        fixture.contents(),
        r#"[{"id":"1","email":"a@b.com","age":30}]"#
    );
}

#[test]
fn add_then_find_returns_equal_record() {
    let fixture = Fixture::new();
    fixture.add(r#"{"id":"1","email":"a@b.com","age":30}"#);
    fixture.add(r#"{"id":"2","email":"c@d.com","age":22}"#);

    let found: Record = serde_json::from_str(&fixture.find("2")).unwrap();
    assert_eq!(found, Record::new("2", "c@d.com", 22));
}

#[test]
fn add_accepts_mixed_case_keys_and_stores_canonical_names() {
    let fixture = Fixture::new();
    fixture.add(r#"{"Id":"1","EMAIL":"a@b.com","Age":30}"#);

    assert_eq!(
        fixture.contents(),
        r#"[{"id":"1","email":"a@b.com","age":30}]"#
    );
    let found: Record = serde_json::from_str(&fixture.find("1")).unwrap();
    assert_eq!(found, Record::new("1", "a@b.com", 30));
}

#[test]
fn add_preserves_insertion_order() {
    let fixture = Fixture::new();
    for id in ["b", "a", "c"] {
        fixture.add(&format!(r#"{{"id":"{}","email":"x","age":1}}"#, id));
    }
    let ids: Vec<String> = fixture.records().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
}

#[test]
fn add_with_duplicate_id_reports_and_keeps_both() {
    let fixture = Fixture::with_contents(r#"[{"id":"1","email":"a@b.com","age":30}]"#);
    let out = fixture.add(r#"{"id":"1","email":"c@d.com","age":22}"#);

    assert!(out.contains("Item with id 1 already exists"));
    let records = fixture.records();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.id == "1"));
    assert_eq!(records[1].email, "c@d.com");
}

#[test]
fn add_reports_once_per_existing_duplicate() {
    let fixture = Fixture::with_contents(
        r#"[{"id":"1","email":"a","age":1},{"id":"1","email":"b","age":2}]"#,
    );
    let out = fixture.add(r#"{"id":"1","email":"c","age":3}"#);
    assert_eq!(
        out,
        "Item with id 1 already existsItem with id 1 already exists"
    );
    assert_eq!(fixture.records().len(), 3);
}

#[test]
fn add_with_malformed_item_leaves_file_untouched() {
    let original = r#"[{"id":"1","email":"a@b.com","age":30}]"#;
    let fixture = Fixture::with_contents(original);
    let mut args = fixture.args("add");
    args.item = r#"{"id":"2","#.to_string();

    let err = fixture.run(&args).unwrap_err();
    assert!(matches!(
        err,
        ApiError::StorageError(StoreError::InvalidItem(_))
    ));
    assert_eq!(fixture.contents(), original);
}

#[test]
fn corrupt_store_is_reported_and_not_rewritten() {
    let fixture = Fixture::with_contents("not json");
    let mut args = fixture.args("add");
    args.item = r#"{"id":"1","email":"a","age":1}"#.to_string();

    let err = fixture.run(&args).unwrap_err();
    assert!(matches!(
        err,
        ApiError::StorageError(StoreError::CorruptStore(_))
    ));
    assert_eq!(fixture.contents(), "not json");
}

#[test]
fn list_outputs_raw_file_bytes() {
    let raw = "[\n  {\"id\": \"1\", \"email\": \"a@b.com\", \"age\": 30},\n  {\"id\": \"2\", \"email\": \"c@d.com\", \"age\": 22}\n]\n";
    let fixture = Fixture::with_contents(raw);
    assert_eq!(fixture.list(), raw);
}

#[test]
fn list_does_not_decode_content() {
    let fixture = Fixture::with_contents("definitely not json");
    assert_eq!(fixture.list(), "definitely not json");
}

#[test]
fn list_on_missing_file_creates_it_empty() {
    let fixture = Fixture::new();
    assert_eq!(fixture.list(), "");
    assert!(fixture.path.exists());
    assert_eq!(fixture.contents(), "");
}

#[test]
fn find_with_no_match_writes_nothing() {
    let fixture = Fixture::with_contents(r#"[{"id":"1","email":"a","age":1}]"#);
    assert_eq!(fixture.find("2"), "");
}

#[test]
fn find_writes_all_duplicates_back_to_back() {
    let fixture = Fixture::with_contents(
        r#"[{"id":"1","email":"a","age":1},{"id":"2","email":"b","age":2},{"id":"1","email":"c","age":3}]"#,
    );
    assert_eq!(
        fixture.find("1"),
        r#"{"id":"1","email":"a","age":1}{"id":"1","email":"c","age":3}"#
    );
}

#[test]
fn remove_splices_out_first_match_only() {
    let fixture = Fixture::with_contents(
        r#"[{"id":"1","email":"a","age":1},{"id":"2","email":"b","age":2},{"id":"1","email":"c","age":3}]"#,
    );
    let out = fixture.remove("1");

    assert_eq!(out, "");
    assert_eq!(
        fixture.contents(),
        r#"[{"id":"2","email":"b","age":2},{"id":"1","email":"c","age":3}]"#
    );
}

#[test]
fn remove_then_find_yields_nothing() {
    let fixture = Fixture::new();
    fixture.add(r#"{"id":"7","email":"a","age":1}"#);
    fixture.remove("7");
    assert_eq!(fixture.find("7"), "");
    assert_eq!(fixture.contents(), "[]");
}

#[test]
fn remove_missing_id_reports_and_leaves_file_unchanged() {
    let original = r#"[ {"id":"1", "email":"a", "age":1} ]"#;
    let fixture = Fixture::with_contents(original);
    let out = fixture.remove("X");

    assert_eq!(out, "Item with id X not found");
    assert_eq!(fixture.contents(), original);
}
