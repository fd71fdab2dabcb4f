//! irc-addressbook - IRC Address Book Entries with Wildcard Hostmask Matching
//!
//! This crate models the single rule entry an IRC client consults when
//! deciding whether to silence categories of incoming traffic from a peer, or
//! whether to track presence changes for a nickname. Entries are plain value
//! objects; storing them in lists, persisting files, and routing messages are
//! the caller's business.
//!
//! # Quick Start
//!
//! ```rust
//! use irc_addressbook::AddressBookEntry;
//!
//! // An ignore rule for every host under example.com
//! let entry = AddressBookEntry::new_ignore_entry_for_hostmask(Some("*!*@*.example.com"));
//!
//! // Edits go through a mutable copy, frozen back into a new immutable entry
//! let mut editable = entry.unique_copy_mutable();
//! editable.set_ignore_public_messages(true);
//! let entry = editable.freeze();
//!
//! assert!(entry.check_match("nick!user@host.example.com"));
//! assert!(!entry.check_match("nick!user@host.other.net"));
//! assert!(entry.ignore_messages_containing_match());
//!
//! // Persisted form is a flat string-keyed dictionary
//! let dict = entry.to_dictionary();
//! let restored = AddressBookEntry::from_dictionary(&dict);
//! assert_eq!(entry, restored);
//! ```
//!
//! # Key Features
//!
//! - **Wildcard Hostmasks**: `*` and `?` wildcards, everything else literal;
//!   compilation is total and never fails
//! - **Immutable/Mutable Duality**: the frozen type is unmodifiable at the
//!   type level; edits happen on a distinct mutable copy
//! - **Defensive Decoding**: missing or wrong-typed persisted keys fall back
//!   to documented defaults instead of failing the decode
//! - **Forward Compatible**: unrecognized persisted keys survive a
//!   decode/encode cycle untouched
//!
//! # Architecture
//!
//! ```text
//! persisted dictionary ──► codec ──► AddressBookEntry (frozen)
//!                                        │   ▲
//!                       unique_copy_mutable   │ freeze
//!                                        ▼   │
//!                              AddressBookEntryMutable
//!
//! AddressBookEntry::check_match ──► HostmaskPattern (compiled once)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
/// Dictionary persistence contract (internal)
mod codec;
/// Immutable entry type and factories
pub mod entry;
/// Mutable entry variant
pub mod entry_builder;
/// Error types for address book operations
pub mod error;
/// Wildcard hostmask compilation and matching
pub mod hostmask;

// Re-exports for Rust consumers

pub use crate::entry::{AddressBookEntry, EntryType, TrackingStatus, MATCH_ALL_HOSTMASK};
pub use crate::entry_builder::AddressBookEntryMutable;
pub use crate::error::AddressBookError;
pub use crate::hostmask::HostmaskPattern;

// Version information
/// Library version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
