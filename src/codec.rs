//! Dictionary encoding and decoding for address book entries.
//!
//! The persisted form of an entry is a flat string-keyed dictionary,
//! represented here as a [`serde_json::Map`]. This module is the sole owner
//! of the wire contract: key names, value types, and per-key defaults.
//!
//! # Persisted Keys
//!
//! | Key | Type | Default when absent |
//! |---|---|---|
//! | `ignoreNoticeMessages` | bool | false |
//! | `ignorePublicMessages` | bool | false |
//! | `ignorePublicMessageHighlights` | bool | false |
//! | `ignorePrivateMessages` | bool | false |
//! | `ignorePrivateMessageHighlights` | bool | false |
//! | `ignoreGeneralEventMessages` | bool | false |
//! | `ignoreFileTransferRequests` | bool | false |
//! | `ignoreClientToClientProtocol` | bool | false |
//! | `trackUserActivity` | bool | false |
//! | `hostmask` | string | `"*"` |
//! | `trackingNickname` | string | absent |
//! | `entryType` | integer | 0 (ignore) |
//!
//! Decoding is defensive: a missing or wrong-typed value is treated as
//! absent and takes its default, never failing the whole decode. Keys this
//! module does not recognize are carried on the decoded entry and written
//! back verbatim on encode, so newer producers' private keys survive a
//! load/save cycle through an older consumer.

use crate::entry::{
    new_unique_identifier, normalize_hostmask, AddressBookEntry, EntryFlags, EntryType,
};
use serde_json::{Map, Value};

pub(crate) const IGNORE_NOTICE_MESSAGES_KEY: &str = "ignoreNoticeMessages";
pub(crate) const IGNORE_PUBLIC_MESSAGES_KEY: &str = "ignorePublicMessages";
pub(crate) const IGNORE_PUBLIC_MESSAGE_HIGHLIGHTS_KEY: &str = "ignorePublicMessageHighlights";
pub(crate) const IGNORE_PRIVATE_MESSAGES_KEY: &str = "ignorePrivateMessages";
pub(crate) const IGNORE_PRIVATE_MESSAGE_HIGHLIGHTS_KEY: &str = "ignorePrivateMessageHighlights";
pub(crate) const IGNORE_GENERAL_EVENT_MESSAGES_KEY: &str = "ignoreGeneralEventMessages";
pub(crate) const IGNORE_FILE_TRANSFER_REQUESTS_KEY: &str = "ignoreFileTransferRequests";
pub(crate) const IGNORE_CLIENT_TO_CLIENT_PROTOCOL_KEY: &str = "ignoreClientToClientProtocol";
pub(crate) const TRACK_USER_ACTIVITY_KEY: &str = "trackUserActivity";
pub(crate) const HOSTMASK_KEY: &str = "hostmask";
pub(crate) const TRACKING_NICKNAME_KEY: &str = "trackingNickname";
pub(crate) const ENTRY_TYPE_KEY: &str = "entryType";
pub(crate) const UNIQUE_IDENTIFIER_KEY: &str = "uniqueIdentifier";

/// Keys consumed by [`decode`]; everything else is passthrough.
const KNOWN_KEYS: &[&str] = &[
    IGNORE_NOTICE_MESSAGES_KEY,
    IGNORE_PUBLIC_MESSAGES_KEY,
    IGNORE_PUBLIC_MESSAGE_HIGHLIGHTS_KEY,
    IGNORE_PRIVATE_MESSAGES_KEY,
    IGNORE_PRIVATE_MESSAGE_HIGHLIGHTS_KEY,
    IGNORE_GENERAL_EVENT_MESSAGES_KEY,
    IGNORE_FILE_TRANSFER_REQUESTS_KEY,
    IGNORE_CLIENT_TO_CLIENT_PROTOCOL_KEY,
    TRACK_USER_ACTIVITY_KEY,
    HOSTMASK_KEY,
    TRACKING_NICKNAME_KEY,
    ENTRY_TYPE_KEY,
    UNIQUE_IDENTIFIER_KEY,
];

/// Reads a boolean, treating anything that isn't a boolean as absent.
fn bool_for(dict: &Map<String, Value>, key: &str) -> bool {
    matches!(dict.get(key), Some(Value::Bool(true)))
}

/// Reads a string, treating anything that isn't a string as absent.
fn str_for<'a>(dict: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    match dict.get(key) {
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

/// Reads an unsigned integer, treating anything else as absent.
fn uint_for(dict: &Map<String, Value>, key: &str) -> Option<u64> {
    match dict.get(key) {
        Some(Value::Number(n)) => n.as_u64(),
        _ => None,
    }
}

/// Decodes a persisted dictionary into an immutable entry.
///
/// Never fails. A `uniqueIdentifier` key is honored if present as a string
/// (older archives carry one); otherwise a fresh identifier is generated.
pub(crate) fn decode(dict: &Map<String, Value>) -> AddressBookEntry {
    let entry_type = EntryType::from_raw(uint_for(dict, ENTRY_TYPE_KEY).unwrap_or(0));

    let unique_identifier = str_for(dict, UNIQUE_IDENTIFIER_KEY)
        .map(str::to_string)
        .unwrap_or_else(new_unique_identifier);

    let hostmask = normalize_hostmask(str_for(dict, HOSTMASK_KEY));

    let tracking_nickname = str_for(dict, TRACKING_NICKNAME_KEY)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let flags = EntryFlags {
        ignore_notice_messages: bool_for(dict, IGNORE_NOTICE_MESSAGES_KEY),
        ignore_public_messages: bool_for(dict, IGNORE_PUBLIC_MESSAGES_KEY),
        ignore_public_message_highlights: bool_for(dict, IGNORE_PUBLIC_MESSAGE_HIGHLIGHTS_KEY),
        ignore_private_messages: bool_for(dict, IGNORE_PRIVATE_MESSAGES_KEY),
        ignore_private_message_highlights: bool_for(dict, IGNORE_PRIVATE_MESSAGE_HIGHLIGHTS_KEY),
        ignore_general_event_messages: bool_for(dict, IGNORE_GENERAL_EVENT_MESSAGES_KEY),
        ignore_file_transfer_requests: bool_for(dict, IGNORE_FILE_TRANSFER_REQUESTS_KEY),
        ignore_client_to_client_protocol: bool_for(dict, IGNORE_CLIENT_TO_CLIENT_PROTOCOL_KEY),
        track_user_activity: bool_for(dict, TRACK_USER_ACTIVITY_KEY),
    };

    let extra: Map<String, Value> = dict
        .iter()
        .filter(|(key, _)| !KNOWN_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    AddressBookEntry::assemble(
        entry_type,
        unique_identifier,
        hostmask,
        tracking_nickname,
        flags,
        extra,
    )
}

/// Encodes an entry into its persisted dictionary representation.
///
/// Emits the full flag set unconditionally, `entryType` as its integer
/// discriminant, and `trackingNickname` only when present. The unique
/// identifier and the compiled pattern are never written. Passthrough keys
/// are written first so the contract keys win on collision.
pub(crate) fn encode(entry: &AddressBookEntry) -> Map<String, Value> {
    let mut dict = entry.extra.clone();

    dict.insert(
        IGNORE_NOTICE_MESSAGES_KEY.to_string(),
        Value::Bool(entry.ignore_notice_messages),
    );
    dict.insert(
        IGNORE_PUBLIC_MESSAGES_KEY.to_string(),
        Value::Bool(entry.ignore_public_messages),
    );
    dict.insert(
        IGNORE_PUBLIC_MESSAGE_HIGHLIGHTS_KEY.to_string(),
        Value::Bool(entry.ignore_public_message_highlights),
    );
    dict.insert(
        IGNORE_PRIVATE_MESSAGES_KEY.to_string(),
        Value::Bool(entry.ignore_private_messages),
    );
    dict.insert(
        IGNORE_PRIVATE_MESSAGE_HIGHLIGHTS_KEY.to_string(),
        Value::Bool(entry.ignore_private_message_highlights),
    );
    dict.insert(
        IGNORE_GENERAL_EVENT_MESSAGES_KEY.to_string(),
        Value::Bool(entry.ignore_general_event_messages),
    );
    dict.insert(
        IGNORE_FILE_TRANSFER_REQUESTS_KEY.to_string(),
        Value::Bool(entry.ignore_file_transfer_requests),
    );
    dict.insert(
        IGNORE_CLIENT_TO_CLIENT_PROTOCOL_KEY.to_string(),
        Value::Bool(entry.ignore_client_to_client_protocol),
    );
    dict.insert(
        TRACK_USER_ACTIVITY_KEY.to_string(),
        Value::Bool(entry.track_user_activity),
    );
    dict.insert(
        HOSTMASK_KEY.to_string(),
        Value::String(entry.hostmask.clone()),
    );
    dict.insert(
        ENTRY_TYPE_KEY.to_string(),
        Value::Number(entry.entry_type.as_raw().into()),
    );

    if let Some(nickname) = &entry.tracking_nickname {
        dict.insert(
            TRACKING_NICKNAME_KEY.to_string(),
            Value::String(nickname.clone()),
        );
    }

    dict
}
