//! Core types: raw API records, entity profiles and events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Discriminator value of a plain text message
pub const MESSAGE_TAG: &str = "Message";

/// One event from a dialog's message stream, as delivered by the API
///
/// The record is decoded once when it crosses the client boundary. Fields the
/// tables never read are ignored during decoding; everything a projection
/// might need is an explicit `Option`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Record discriminator (`"Message"` or `"MessageService"`)
    #[serde(rename = "_")]
    pub kind: String,

    /// Message ID, unique within its dialog
    pub id: i64,

    /// Container the record was posted in
    #[serde(default)]
    pub peer_id: Option<PeerReference>,

    /// Timestamp of the record
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,

    /// Message text (plain messages only)
    #[serde(default)]
    pub message: Option<String>,

    /// Sender, absent for anonymous or system records
    #[serde(default)]
    pub from_id: Option<PeerReference>,

    /// Service action (service records only)
    #[serde(default)]
    pub action: Option<RawAction>,
}

impl RawRecord {
    /// Whether this record is a plain message rather than a service record
    pub fn is_message(&self) -> bool {
        self.kind == MESSAGE_TAG
    }

    /// Channel or chat identifier of the container, if it is a group
    pub fn channel_id(&self) -> Option<i64> {
        self.peer_id.and_then(|peer| peer.group_id())
    }

    /// Sending user, if the sender is a user
    pub fn sender_id(&self) -> Option<i64> {
        self.from_id.and_then(|peer| peer.user_id())
    }
}

/// Nested action of a service record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAction {
    /// Action discriminator, e.g. `"MessageActionChatAddUser"`
    #[serde(rename = "_")]
    pub tag: String,

    /// Users added by an add-user action
    #[serde(default)]
    pub users: Vec<i64>,

    /// User removed by a delete-user action
    #[serde(default)]
    pub user_id: Option<i64>,

    /// Inviter of a joined-by-link action
    #[serde(default)]
    pub inviter_id: Option<i64>,
}

/// Reference to a peer (the container of a record, or its sender)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_")]
pub enum PeerReference {
    /// Supergroup or broadcast channel
    #[serde(rename = "PeerChannel")]
    Channel {
        /// Channel identifier
        channel_id: i64,
    },
    /// Basic group chat
    #[serde(rename = "PeerChat")]
    Chat {
        /// Chat identifier
        chat_id: i64,
    },
    /// Single user
    #[serde(rename = "PeerUser")]
    User {
        /// User identifier
        user_id: i64,
    },
    /// Any peer kind this crate does not know
    #[serde(other)]
    Unknown,
}

impl PeerReference {
    /// Channel or chat identifier; `None` for users and unknown peers
    pub fn group_id(self) -> Option<i64> {
        match self {
            PeerReference::Channel { channel_id } => Some(channel_id),
            PeerReference::Chat { chat_id } => Some(chat_id),
            PeerReference::User { .. } | PeerReference::Unknown => None,
        }
    }

    /// User identifier; `None` for every non-user peer
    pub fn user_id(self) -> Option<i64> {
        match self {
            PeerReference::User { user_id } => Some(user_id),
            _ => None,
        }
    }
}

/// User profile returned by a user lookup or a participant listing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User identifier
    pub id: i64,
    /// Public username without the `@`
    #[serde(default)]
    pub username: Option<String>,
    /// First name
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Channel or chat profile returned by a lookup
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelProfile {
    /// Channel or chat identifier
    pub id: i64,
    /// Creation timestamp
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    /// Title
    #[serde(default)]
    pub title: Option<String>,
}

/// Kind of entity looked up during enrichment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A user
    User,
    /// A channel or basic chat
    Channel,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => f.write_str("user"),
            EntityKind::Channel => f.write_str("channel"),
        }
    }
}

/// Event emitted while building datasets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// All records of a dialog were fetched and classified
    DialogFetched {
        /// Dialog name
        dialog: String,
        /// Number of records received
        records: usize,
    },

    /// Recognized service records were dropped without producing rows
    RecordsIgnored {
        /// Dialog name
        dialog: String,
        /// Number of dropped records
        count: usize,
    },

    /// A user or channel could not be looked up and was left out
    EntityNotFound {
        /// Entity kind
        kind: EntityKind,
        /// Entity identifier
        id: i64,
    },

    /// A snapshot directory was written
    DatasetSaved {
        /// Snapshot directory
        path: PathBuf,
        /// Dialogs included in the snapshot
        dialogs: Vec<String>,
    },
}
