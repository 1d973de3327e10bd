use journali_core::{Entry, EntryFilter, EntryValidationError};
use uuid::Uuid;

#[test]
fn entry_new_sets_defaults() {
    let entry = Entry::new("Trip", "Paris", 1_700_000_000_000);

    assert!(!entry.id.is_nil());
    assert_eq!(entry.title, "Trip");
    assert_eq!(entry.body, "Paris");
    assert_eq!(entry.created_at, 1_700_000_000_000);
    assert_eq!(entry.updated_at, entry.created_at);
    assert!(!entry.is_bookmarked);
}

#[test]
fn entry_serialization_uses_expected_wire_fields() {
    let entry_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut entry = Entry::with_id(entry_id, "Trip", "Paris", 1_700_000_000_000);
    entry.toggle_bookmark(1_700_000_360_000);

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["id"], entry_id.to_string());
    assert_eq!(json["title"], "Trip");
    assert_eq!(json["body"], "Paris");
    assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
    assert_eq!(json["updatedAt"], 1_700_000_360_000_i64);
    assert_eq!(json["isBookmarked"], true);

    let decoded: Entry = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, entry);
}

#[test]
fn filter_serializes_as_snake_case() {
    assert_eq!(
        serde_json::to_value(EntryFilter::BookmarkedOnly).unwrap(),
        "bookmarked_only"
    );
    assert_eq!(
        serde_json::from_value::<EntryFilter>(serde_json::json!("all")).unwrap(),
        EntryFilter::All
    );
}

#[test]
fn validate_rejects_reversed_timestamps() {
    let mut entry = Entry::new("Trip", "Paris", 2_000);
    entry.updated_at = 1_000;

    assert_eq!(
        entry.validate().unwrap_err(),
        EntryValidationError::UpdatedBeforeCreated {
            created_at: 2_000,
            updated_at: 1_000,
        }
    );
}
