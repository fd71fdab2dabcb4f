//! Immutable address book entry.
//!
//! An [`AddressBookEntry`] is a single rule consulted by the message-routing
//! layer: either an ignore rule suppressing categories of traffic from peers
//! matching a hostmask, or a user-tracking rule watching presence changes for
//! a nickname. Entries are plain value objects; storage in a list, persistence
//! to disk, and event delivery all belong to external collaborators.
//!
//! The immutable type is genuinely unmodifiable: edits go through
//! [`AddressBookEntryMutable`](crate::entry_builder::AddressBookEntryMutable)
//! obtained from [`unique_copy_mutable`](AddressBookEntry::unique_copy_mutable)
//! and are frozen back into a new immutable instance.
//!
//! # Examples
//!
//! ```
//! use irc_addressbook::AddressBookEntry;
//!
//! let entry = AddressBookEntry::new_ignore_entry_for_hostmask(Some("*!*@*.example.com"));
//! assert!(entry.check_match("nick!user@host.example.com"));
//! assert!(!entry.check_match("nick!user@host.other.net"));
//! ```

use crate::codec;
use crate::entry_builder::AddressBookEntryMutable;
use crate::error::{AddressBookError, Result};
use crate::hostmask::HostmaskPattern;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// The hostmask used when none is supplied: matches every peer.
pub const MATCH_ALL_HOSTMASK: &str = "*";

/// Discriminates the two kinds of address book rules.
///
/// The raw values are the persisted `entryType` discriminants and must not
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Suppress categories of incoming traffic from matching peers
    Ignore,
    /// Track presence/availability changes for a nickname
    UserTracking,
}

impl EntryType {
    /// Decodes a persisted discriminant. Unknown values fall back to
    /// [`EntryType::Ignore`], matching the decode default.
    pub fn from_raw(raw: u64) -> Self {
        match raw {
            1 => EntryType::UserTracking,
            _ => EntryType::Ignore,
        }
    }

    /// Returns the persisted discriminant.
    pub fn as_raw(self) -> u64 {
        match self {
            EntryType::Ignore => 0,
            EntryType::UserTracking => 1,
        }
    }
}

/// Presence state reported for a tracked user.
///
/// Produced by the presence-watching collaborator, not by this crate; the
/// vocabulary lives here because it is part of the address book schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackingStatus {
    /// No information yet
    #[default]
    Unknown,
    /// The tracked user signed off
    SignedOff,
    /// The tracked user signed on
    SignedOn,
    /// The tracked user became available (e.g., no longer away)
    Available,
    /// The tracked user became unavailable
    NotAvailable,
}

impl TrackingStatus {
    /// Decodes a raw status value. Out-of-range values map to
    /// [`TrackingStatus::Unknown`].
    pub fn from_raw(raw: u64) -> Self {
        match raw {
            1 => TrackingStatus::SignedOff,
            2 => TrackingStatus::SignedOn,
            3 => TrackingStatus::Available,
            4 => TrackingStatus::NotAvailable,
            _ => TrackingStatus::Unknown,
        }
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrackingStatus::Unknown => "unknown",
            TrackingStatus::SignedOff => "signed off",
            TrackingStatus::SignedOn => "signed on",
            TrackingStatus::Available => "available",
            TrackingStatus::NotAvailable => "not available",
        };
        write!(f, "{}", s)
    }
}

/// An immutable address book entry.
///
/// Constructed through the factory methods or by decoding a persisted
/// dictionary. The compiled hostmask pattern is built eagerly at construction
/// and stays consistent with the `hostmask` field for the entry's lifetime.
///
/// Equality compares the semantic fields only; the unique identifier, the
/// compiled pattern, and any passthrough keys carried for forward
/// compatibility are excluded.
#[derive(Debug, Clone)]
pub struct AddressBookEntry {
    pub(crate) entry_type: EntryType,
    pub(crate) unique_identifier: String,
    pub(crate) hostmask: String,
    pub(crate) tracking_nickname: Option<String>,

    pub(crate) ignore_client_to_client_protocol: bool,
    pub(crate) ignore_general_event_messages: bool,
    pub(crate) ignore_notice_messages: bool,
    pub(crate) ignore_private_message_highlights: bool,
    pub(crate) ignore_private_messages: bool,
    pub(crate) ignore_public_message_highlights: bool,
    pub(crate) ignore_public_messages: bool,
    pub(crate) ignore_file_transfer_requests: bool,
    pub(crate) track_user_activity: bool,

    /// Compiled form of `hostmask`, always in sync with it
    pub(crate) compiled: HostmaskPattern,

    /// Unknown persisted keys, round-tripped verbatim
    pub(crate) extra: Map<String, Value>,
}

/// Normalizes a user-supplied hostmask: empty or absent input becomes the
/// match-all pattern.
pub(crate) fn normalize_hostmask(hostmask: Option<&str>) -> String {
    match hostmask {
        Some(h) if !h.is_empty() => h.to_string(),
        _ => MATCH_ALL_HOSTMASK.to_string(),
    }
}

/// Generates a fresh entry identifier.
pub(crate) fn new_unique_identifier() -> String {
    Uuid::new_v4().to_string()
}

impl AddressBookEntry {
    /// Internal constructor shared by the factories, the codec, and the
    /// mutable variant's `freeze`.
    pub(crate) fn assemble(
        entry_type: EntryType,
        unique_identifier: String,
        hostmask: String,
        tracking_nickname: Option<String>,
        flags: EntryFlags,
        extra: Map<String, Value>,
    ) -> Self {
        let compiled = HostmaskPattern::compile(&hostmask);
        Self {
            entry_type,
            unique_identifier,
            hostmask,
            tracking_nickname,
            ignore_client_to_client_protocol: flags.ignore_client_to_client_protocol,
            ignore_general_event_messages: flags.ignore_general_event_messages,
            ignore_notice_messages: flags.ignore_notice_messages,
            ignore_private_message_highlights: flags.ignore_private_message_highlights,
            ignore_private_messages: flags.ignore_private_messages,
            ignore_public_message_highlights: flags.ignore_public_message_highlights,
            ignore_public_messages: flags.ignore_public_messages,
            ignore_file_transfer_requests: flags.ignore_file_transfer_requests,
            track_user_activity: flags.track_user_activity,
            compiled,
            extra,
        }
    }

    /// Creates a blank ignore entry with the match-all hostmask and every
    /// category flag off.
    pub fn new_ignore_entry() -> Self {
        Self::new_ignore_entry_for_hostmask(None)
    }

    /// Creates an ignore entry for the given hostmask.
    ///
    /// An empty or absent hostmask falls back to `"*"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use irc_addressbook::AddressBookEntry;
    ///
    /// let entry = AddressBookEntry::new_ignore_entry_for_hostmask(Some(""));
    /// assert_eq!(entry.hostmask(), "*");
    /// ```
    pub fn new_ignore_entry_for_hostmask(hostmask: Option<&str>) -> Self {
        Self::assemble(
            EntryType::Ignore,
            new_unique_identifier(),
            normalize_hostmask(hostmask),
            None,
            EntryFlags::default(),
            Map::new(),
        )
    }

    /// Creates a blank user-tracking entry with `track_user_activity` on.
    pub fn new_user_tracking_entry() -> Self {
        Self::assemble(
            EntryType::UserTracking,
            new_unique_identifier(),
            MATCH_ALL_HOSTMASK.to_string(),
            None,
            EntryFlags {
                track_user_activity: true,
                ..EntryFlags::default()
            },
            Map::new(),
        )
    }

    /// Decodes an entry from its persisted dictionary representation.
    ///
    /// Decoding is defensive: missing or wrong-typed keys take their
    /// documented defaults, unknown keys are preserved for re-encoding, and
    /// a missing `uniqueIdentifier` is replaced with a fresh one.
    pub fn from_dictionary(dict: &Map<String, Value>) -> Self {
        codec::decode(dict)
    }

    /// Serializes the entry to its persisted dictionary representation.
    ///
    /// Always emits the full flag set; never emits the unique identifier or
    /// the compiled pattern.
    pub fn to_dictionary(&self) -> Map<String, Value> {
        codec::encode(self)
    }

    /// Decodes an entry from a JSON object string.
    ///
    /// This is the only fallible entry point: the text must parse as JSON
    /// and its root must be an object. Field-level problems still fall back
    /// to defaults as in [`from_dictionary`](Self::from_dictionary).
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        match value {
            Value::Object(map) => Ok(Self::from_dictionary(&map)),
            other => Err(AddressBookError::Format(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            ))),
        }
    }

    /// Serializes the entry to a JSON object string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&Value::Object(self.to_dictionary()))?)
    }

    /// Checks a candidate peer address against this entry's hostmask.
    ///
    /// Matching is case-sensitive and delegates to the compiled pattern. For
    /// user-tracking entries this only makes sense against a host; nickname
    /// comparison for tracking lookups is the caller's job, via
    /// [`tracking_nickname`](Self::tracking_nickname).
    pub fn check_match(&self, hostmask: &str) -> bool {
        self.compiled.matches(hostmask)
    }

    /// Returns an independent deep copy sharing no mutable state with this
    /// entry. The copy keeps the same unique identifier.
    pub fn unique_copy(&self) -> Self {
        self.clone()
    }

    /// Returns a mutable variant pre-populated with this entry's fields,
    /// keeping the same unique identifier.
    pub fn unique_copy_mutable(&self) -> AddressBookEntryMutable {
        AddressBookEntryMutable::from_entry(self)
    }

    /// The entry variant: ignore rule or user-tracking rule.
    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    /// Opaque stable identifier, generated once at creation. Distinct entries
    /// never share an identifier; copies of one entry do.
    pub fn unique_identifier(&self) -> &str {
        &self.unique_identifier
    }

    /// The raw wildcard pattern as entered by the user. Never empty.
    pub fn hostmask(&self) -> &str {
        &self.hostmask
    }

    /// Nickname being tracked. Only meaningful for
    /// [`EntryType::UserTracking`]; consumers must ignore it on ignore
    /// entries.
    pub fn tracking_nickname(&self) -> Option<&str> {
        self.tracking_nickname.as_deref()
    }

    /// Suppress client-to-client protocol requests from matching peers.
    pub fn ignore_client_to_client_protocol(&self) -> bool {
        self.ignore_client_to_client_protocol
    }

    /// Suppress join/part/quit-style events from matching peers.
    pub fn ignore_general_event_messages(&self) -> bool {
        self.ignore_general_event_messages
    }

    /// Suppress NOTICE-type messages from matching peers.
    pub fn ignore_notice_messages(&self) -> bool {
        self.ignore_notice_messages
    }

    /// Suppress private highlight notifications from matching peers.
    pub fn ignore_private_message_highlights(&self) -> bool {
        self.ignore_private_message_highlights
    }

    /// Suppress private messages from matching peers.
    pub fn ignore_private_messages(&self) -> bool {
        self.ignore_private_messages
    }

    /// Suppress public highlight notifications from matching peers.
    pub fn ignore_public_message_highlights(&self) -> bool {
        self.ignore_public_message_highlights
    }

    /// Suppress public-channel messages from matching peers.
    pub fn ignore_public_messages(&self) -> bool {
        self.ignore_public_messages
    }

    /// Suppress file-transfer offers from matching peers.
    pub fn ignore_file_transfer_requests(&self) -> bool {
        self.ignore_file_transfer_requests
    }

    /// Whether presence tracking is enabled for this entry.
    pub fn track_user_activity(&self) -> bool {
        self.track_user_activity
    }

    /// True iff at least one ignore-category flag is set.
    ///
    /// Computed, never stored: lets collaborators skip hostmask matching
    /// entirely for entries with nothing to suppress.
    pub fn ignore_messages_containing_match(&self) -> bool {
        self.ignore_client_to_client_protocol
            || self.ignore_general_event_messages
            || self.ignore_notice_messages
            || self.ignore_private_message_highlights
            || self.ignore_private_messages
            || self.ignore_public_message_highlights
            || self.ignore_public_messages
            || self.ignore_file_transfer_requests
    }

    /// The semantic field tuple used for equality.
    fn semantic_fields(&self) -> (EntryType, &str, Option<&str>, [bool; 9]) {
        (
            self.entry_type,
            &self.hostmask,
            self.tracking_nickname.as_deref(),
            [
                self.ignore_client_to_client_protocol,
                self.ignore_general_event_messages,
                self.ignore_notice_messages,
                self.ignore_private_message_highlights,
                self.ignore_private_messages,
                self.ignore_public_message_highlights,
                self.ignore_public_messages,
                self.ignore_file_transfer_requests,
                self.track_user_activity,
            ],
        )
    }
}

impl PartialEq for AddressBookEntry {
    fn eq(&self, other: &Self) -> bool {
        self.semantic_fields() == other.semantic_fields()
    }
}

// Serde support routes through the dictionary codec so an entry embedded in
// a larger structure serializes exactly like its persisted form.

impl Serialize for AddressBookEntry {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Value::Object(self.to_dictionary()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AddressBookEntry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let dict = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_dictionary(&dict))
    }
}

/// The ten boolean flags, grouped so constructors stay readable.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct EntryFlags {
    pub ignore_client_to_client_protocol: bool,
    pub ignore_general_event_messages: bool,
    pub ignore_notice_messages: bool,
    pub ignore_private_message_highlights: bool,
    pub ignore_private_messages: bool,
    pub ignore_public_message_highlights: bool,
    pub ignore_public_messages: bool,
    pub ignore_file_transfer_requests: bool,
    pub track_user_activity: bool,
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
