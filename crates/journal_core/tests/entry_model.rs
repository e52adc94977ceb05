use journal_core::Entry;

#[test]
fn entry_serialization_uses_expected_wire_fields() {
    let entry = Entry {
        id: 7,
        title: "Trip planning".to_string(),
        content: "<p>pack the tent</p>".to_string(),
        created_at: 1_700_000_000_000,
        updated_at: 1_700_000_360_000,
    };

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["title"], "Trip planning");
    assert_eq!(json["content"], "<p>pack the tent</p>");
    assert_eq!(json["created_at"], 1_700_000_000_000_i64);
    assert_eq!(json["updated_at"], 1_700_000_360_000_i64);

    let decoded: Entry = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, entry);
}

#[test]
fn timestamps_consistent_reflects_row_invariant() {
    let mut entry = Entry {
        id: 1,
        title: "t".to_string(),
        content: "c".to_string(),
        created_at: 2_000,
        updated_at: 2_000,
    };
    assert!(entry.timestamps_consistent());

    entry.updated_at = 3_000;
    assert!(entry.timestamps_consistent());

    entry.updated_at = 1_000;
    assert!(!entry.timestamps_consistent());
}
