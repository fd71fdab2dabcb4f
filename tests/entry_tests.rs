//! Integration tests for address book entry behavior
//!
//! These tests verify end-to-end functionality: factory construction,
//! hostmask matching, the mutable edit cycle, and dictionary round-trips,
//! including the documented compatibility edge cases.

use irc_addressbook::{AddressBookEntry, AddressBookEntryMutable, EntryType, HostmaskPattern};
use serde_json::{json, Map, Value};

fn as_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

#[test]
fn test_ignore_scenario_from_persisted_dictionary() {
    let dict = as_map(json!({
        "entryType": 0,
        "hostmask": "*!*@*.example.com",
        "ignorePublicMessages": true,
    }));

    let entry = AddressBookEntry::from_dictionary(&dict);

    assert_eq!(entry.entry_type(), EntryType::Ignore);
    assert!(entry.check_match("nick!user@host.example.com"));
    assert!(!entry.check_match("nick!user@host.other.net"));
    assert!(entry.ignore_messages_containing_match());
}

#[test]
fn test_user_tracking_entry_serialization() {
    let entry = AddressBookEntry::new_user_tracking_entry();
    let dict = entry.to_dictionary();

    assert_eq!(dict.get("trackUserActivity"), Some(&json!(true)));
    assert_eq!(dict.get("entryType"), Some(&json!(1)));
    for key in [
        "ignoreNoticeMessages",
        "ignorePublicMessages",
        "ignorePublicMessageHighlights",
        "ignorePrivateMessages",
        "ignorePrivateMessageHighlights",
        "ignoreGeneralEventMessages",
        "ignoreFileTransferRequests",
        "ignoreClientToClientProtocol",
    ] {
        assert_eq!(dict.get(key), Some(&json!(false)), "key: {}", key);
    }
}

#[test]
fn test_round_trip_every_factory() {
    let entries = [
        AddressBookEntry::new_ignore_entry(),
        AddressBookEntry::new_ignore_entry_for_hostmask(Some("troll!*@*")),
        AddressBookEntry::new_user_tracking_entry(),
    ];

    for entry in &entries {
        let restored = AddressBookEntry::from_dictionary(&entry.to_dictionary());
        assert_eq!(entry, &restored, "hostmask: {}", entry.hostmask());
        // The codec does not emit identifiers; decode generates a fresh one
        assert!(!restored.unique_identifier().is_empty());
    }
}

#[test]
fn test_round_trip_fully_populated_entry() {
    let mut editable = AddressBookEntryMutable::new(EntryType::UserTracking);
    editable.set_hostmask(Some("someone!*@*.example.org"));
    editable.set_tracking_nickname(Some("someone"));
    editable.set_ignore_notice_messages(true);
    editable.set_ignore_public_messages(true);
    editable.set_ignore_public_message_highlights(true);
    editable.set_ignore_private_messages(true);
    editable.set_ignore_private_message_highlights(true);
    editable.set_ignore_general_event_messages(true);
    editable.set_ignore_file_transfer_requests(true);
    editable.set_ignore_client_to_client_protocol(true);
    let entry = editable.freeze();

    let restored = AddressBookEntry::from_dictionary(&entry.to_dictionary());
    assert_eq!(entry, restored);
    assert_eq!(restored.tracking_nickname(), Some("someone"));
    assert!(restored.ignore_messages_containing_match());
}

#[test]
fn test_edit_cycle_is_copy_on_write() {
    let original = AddressBookEntry::new_ignore_entry_for_hostmask(Some("*!*@shared.host"));

    let mut editable = original.unique_copy_mutable();
    editable.set_ignore_general_event_messages(true);
    let edited = editable.freeze();

    // The original never changed; the edit produced a distinct value
    assert!(!original.ignore_general_event_messages());
    assert!(edited.ignore_general_event_messages());
    assert_ne!(original, edited);
    assert_eq!(original.unique_identifier(), edited.unique_identifier());
}

#[test]
fn test_match_all_hostmask_matches_everything() {
    let entry = AddressBookEntry::new_ignore_entry();
    assert!(entry.check_match(""));
    assert!(entry.check_match("nick!user@host"));
    assert!(entry.check_match("Absolutely anything?!"));
}

#[test]
fn test_literal_hostmask_is_exact_and_case_sensitive() {
    let entry = AddressBookEntry::new_ignore_entry_for_hostmask(Some("nick!user@host"));
    assert!(entry.check_match("nick!user@host"));
    assert!(!entry.check_match("Nick!user@host"));
    assert!(!entry.check_match("nick!user@host2"));
}

#[test]
fn test_forward_compatibility_keys_survive() {
    let dict = as_map(json!({
        "hostmask": "*!*@*",
        "entryType": 0,
        "notifyWhenAvailable": true,
        "lastSeenTimestamp": 1693526400,
    }));

    let entry = AddressBookEntry::from_dictionary(&dict);
    let encoded = entry.to_dictionary();

    assert_eq!(encoded.get("notifyWhenAvailable"), Some(&json!(true)));
    assert_eq!(encoded.get("lastSeenTimestamp"), Some(&json!(1693526400)));

    // Unknown keys also survive the mutable edit cycle
    let encoded = entry.unique_copy_mutable().freeze().to_dictionary();
    assert_eq!(encoded.get("notifyWhenAvailable"), Some(&json!(true)));
}

#[test]
fn test_json_convenience_round_trip() {
    let entry = AddressBookEntry::new_ignore_entry_for_hostmask(Some("*!*@*.example.com"));
    let json = entry.to_json().expect("serializes");
    let restored = AddressBookEntry::from_json(&json).expect("parses");
    assert_eq!(entry, restored);
}

#[test]
fn test_pattern_is_deterministic_and_reusable() {
    let pattern = HostmaskPattern::compile("*!~user@gateway/*");
    for _ in 0..3 {
        assert!(pattern.matches("anyone!~user@gateway/web"));
        assert!(!pattern.matches("anyone!user@gateway/web"));
    }
}
