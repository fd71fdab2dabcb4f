//! Mutable address book entry.
//!
//! [`AddressBookEntryMutable`] carries the same field surface as the
//! immutable [`AddressBookEntry`](crate::AddressBookEntry) but with every
//! field independently settable. It exists so edits never mutate a frozen
//! entry in place: collaborators take a mutable copy, edit it, and freeze it
//! back into a new immutable instance (copy-on-write).
//!
//! Setting the hostmask invalidates the cached compiled pattern, which is
//! recompiled lazily on the next [`check_match`](AddressBookEntryMutable::check_match)
//! or [`freeze`](AddressBookEntryMutable::freeze). The cache lives in a
//! [`OnceCell`], which is `!Sync`; a mutable entry is meant to be owned by a
//! single thread at a time, so there is no window where a match could see a
//! stale or half-compiled pattern.
//!
//! # Examples
//!
//! ```
//! use irc_addressbook::AddressBookEntry;
//!
//! let entry = AddressBookEntry::new_ignore_entry();
//! let mut editable = entry.unique_copy_mutable();
//! editable.set_hostmask(Some("*!*@*.example.com"));
//! editable.set_ignore_private_messages(true);
//!
//! let edited = editable.freeze();
//! assert!(edited.check_match("nick!user@gateway.example.com"));
//! assert_eq!(edited.unique_identifier(), entry.unique_identifier());
//! ```

use crate::entry::{
    new_unique_identifier, normalize_hostmask, AddressBookEntry, EntryFlags, EntryType,
    MATCH_ALL_HOSTMASK,
};
use crate::hostmask::HostmaskPattern;
use serde_json::{Map, Value};
use std::cell::OnceCell;

/// A writable variant of an address book entry.
///
/// Equality compares the same semantic fields as the immutable type. The
/// mutable and immutable forms are distinct types, so the immutable form
/// stays unmodifiable at the type level.
#[derive(Debug, Clone)]
pub struct AddressBookEntryMutable {
    entry_type: EntryType,
    unique_identifier: String,
    hostmask: String,
    tracking_nickname: Option<String>,
    flags: EntryFlags,

    /// Lazily compiled form of `hostmask`; reset whenever the hostmask changes
    compiled: OnceCell<HostmaskPattern>,

    /// Unknown persisted keys carried over from the source entry
    extra: Map<String, Value>,
}

impl AddressBookEntryMutable {
    /// Creates a blank mutable entry of the given type.
    ///
    /// The entry type is required up front so type-sensitive logic never
    /// sees an unset discriminator.
    pub fn new(entry_type: EntryType) -> Self {
        Self {
            entry_type,
            unique_identifier: new_unique_identifier(),
            hostmask: MATCH_ALL_HOSTMASK.to_string(),
            tracking_nickname: None,
            flags: EntryFlags {
                track_user_activity: entry_type == EntryType::UserTracking,
                ..EntryFlags::default()
            },
            compiled: OnceCell::new(),
            extra: Map::new(),
        }
    }

    /// Pre-populates a mutable entry from an immutable one, keeping the
    /// unique identifier.
    pub(crate) fn from_entry(entry: &AddressBookEntry) -> Self {
        Self {
            entry_type: entry.entry_type,
            unique_identifier: entry.unique_identifier.clone(),
            hostmask: entry.hostmask.clone(),
            tracking_nickname: entry.tracking_nickname.clone(),
            flags: EntryFlags {
                ignore_client_to_client_protocol: entry.ignore_client_to_client_protocol,
                ignore_general_event_messages: entry.ignore_general_event_messages,
                ignore_notice_messages: entry.ignore_notice_messages,
                ignore_private_message_highlights: entry.ignore_private_message_highlights,
                ignore_private_messages: entry.ignore_private_messages,
                ignore_public_message_highlights: entry.ignore_public_message_highlights,
                ignore_public_messages: entry.ignore_public_messages,
                ignore_file_transfer_requests: entry.ignore_file_transfer_requests,
                track_user_activity: entry.track_user_activity,
            },
            compiled: {
                // Reuse the already-compiled pattern rather than recompiling
                let cell = OnceCell::new();
                let _ = cell.set(entry.compiled.clone());
                cell
            },
            extra: entry.extra.clone(),
        }
    }

    /// Freezes this entry into a new immutable instance.
    ///
    /// The frozen entry keeps the unique identifier and owns a compiled
    /// pattern consistent with the current hostmask.
    pub fn freeze(&self) -> AddressBookEntry {
        AddressBookEntry::assemble(
            self.entry_type,
            self.unique_identifier.clone(),
            self.hostmask.clone(),
            self.tracking_nickname.clone(),
            self.flags,
            self.extra.clone(),
        )
    }

    /// Serializes through the same codec as the immutable form.
    pub fn to_dictionary(&self) -> Map<String, Value> {
        self.freeze().to_dictionary()
    }

    /// Checks a candidate peer address against the current hostmask,
    /// compiling the pattern first if the hostmask changed since the last
    /// check.
    pub fn check_match(&self, hostmask: &str) -> bool {
        self.compiled
            .get_or_init(|| HostmaskPattern::compile(&self.hostmask))
            .matches(hostmask)
    }

    /// The entry variant: ignore rule or user-tracking rule.
    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    /// Changes the entry variant.
    pub fn set_entry_type(&mut self, entry_type: EntryType) {
        self.entry_type = entry_type;
    }

    /// Opaque stable identifier carried over from the source entry.
    pub fn unique_identifier(&self) -> &str {
        &self.unique_identifier
    }

    /// The raw wildcard pattern. Never empty.
    pub fn hostmask(&self) -> &str {
        &self.hostmask
    }

    /// Sets the hostmask, normalizing empty/absent input to `"*"`, and
    /// invalidates the cached compiled pattern.
    pub fn set_hostmask(&mut self, hostmask: Option<&str>) {
        self.hostmask = normalize_hostmask(hostmask);
        self.compiled = OnceCell::new();
    }

    /// Nickname being tracked, when set.
    pub fn tracking_nickname(&self) -> Option<&str> {
        self.tracking_nickname.as_deref()
    }

    /// Sets the tracked nickname; empty input means absent.
    pub fn set_tracking_nickname(&mut self, nickname: Option<&str>) {
        self.tracking_nickname = nickname.filter(|s| !s.is_empty()).map(str::to_string);
    }

    /// Suppress client-to-client protocol requests.
    pub fn ignore_client_to_client_protocol(&self) -> bool {
        self.flags.ignore_client_to_client_protocol
    }

    /// Sets [`ignore_client_to_client_protocol`](Self::ignore_client_to_client_protocol).
    pub fn set_ignore_client_to_client_protocol(&mut self, value: bool) {
        self.flags.ignore_client_to_client_protocol = value;
    }

    /// Suppress join/part/quit-style events.
    pub fn ignore_general_event_messages(&self) -> bool {
        self.flags.ignore_general_event_messages
    }

    /// Sets [`ignore_general_event_messages`](Self::ignore_general_event_messages).
    pub fn set_ignore_general_event_messages(&mut self, value: bool) {
        self.flags.ignore_general_event_messages = value;
    }

    /// Suppress NOTICE-type messages.
    pub fn ignore_notice_messages(&self) -> bool {
        self.flags.ignore_notice_messages
    }

    /// Sets [`ignore_notice_messages`](Self::ignore_notice_messages).
    pub fn set_ignore_notice_messages(&mut self, value: bool) {
        self.flags.ignore_notice_messages = value;
    }

    /// Suppress private highlight notifications.
    pub fn ignore_private_message_highlights(&self) -> bool {
        self.flags.ignore_private_message_highlights
    }

    /// Sets [`ignore_private_message_highlights`](Self::ignore_private_message_highlights).
    pub fn set_ignore_private_message_highlights(&mut self, value: bool) {
        self.flags.ignore_private_message_highlights = value;
    }

    /// Suppress private messages.
    pub fn ignore_private_messages(&self) -> bool {
        self.flags.ignore_private_messages
    }

    /// Sets [`ignore_private_messages`](Self::ignore_private_messages).
    pub fn set_ignore_private_messages(&mut self, value: bool) {
        self.flags.ignore_private_messages = value;
    }

    /// Suppress public highlight notifications.
    pub fn ignore_public_message_highlights(&self) -> bool {
        self.flags.ignore_public_message_highlights
    }

    /// Sets [`ignore_public_message_highlights`](Self::ignore_public_message_highlights).
    pub fn set_ignore_public_message_highlights(&mut self, value: bool) {
        self.flags.ignore_public_message_highlights = value;
    }

    /// Suppress public-channel messages.
    pub fn ignore_public_messages(&self) -> bool {
        self.flags.ignore_public_messages
    }

    /// Sets [`ignore_public_messages`](Self::ignore_public_messages).
    pub fn set_ignore_public_messages(&mut self, value: bool) {
        self.flags.ignore_public_messages = value;
    }

    /// Suppress file-transfer offers.
    pub fn ignore_file_transfer_requests(&self) -> bool {
        self.flags.ignore_file_transfer_requests
    }

    /// Sets [`ignore_file_transfer_requests`](Self::ignore_file_transfer_requests).
    pub fn set_ignore_file_transfer_requests(&mut self, value: bool) {
        self.flags.ignore_file_transfer_requests = value;
    }

    /// Whether presence tracking is enabled.
    pub fn track_user_activity(&self) -> bool {
        self.flags.track_user_activity
    }

    /// Sets [`track_user_activity`](Self::track_user_activity).
    pub fn set_track_user_activity(&mut self, value: bool) {
        self.flags.track_user_activity = value;
    }

    /// True iff at least one ignore-category flag is set. Computed, same as
    /// on the immutable type.
    pub fn ignore_messages_containing_match(&self) -> bool {
        self.flags.ignore_client_to_client_protocol
            || self.flags.ignore_general_event_messages
            || self.flags.ignore_notice_messages
            || self.flags.ignore_private_message_highlights
            || self.flags.ignore_private_messages
            || self.flags.ignore_public_message_highlights
            || self.flags.ignore_public_messages
            || self.flags.ignore_file_transfer_requests
    }

    fn semantic_fields(&self) -> (EntryType, &str, Option<&str>, [bool; 9]) {
        (
            self.entry_type,
            &self.hostmask,
            self.tracking_nickname.as_deref(),
            [
                self.flags.ignore_client_to_client_protocol,
                self.flags.ignore_general_event_messages,
                self.flags.ignore_notice_messages,
                self.flags.ignore_private_message_highlights,
                self.flags.ignore_private_messages,
                self.flags.ignore_public_message_highlights,
                self.flags.ignore_public_messages,
                self.flags.ignore_file_transfer_requests,
                self.flags.track_user_activity,
            ],
        )
    }
}

impl PartialEq for AddressBookEntryMutable {
    fn eq(&self, other: &Self) -> bool {
        self.semantic_fields() == other.semantic_fields()
    }
}
