//! Record classification
//!
//! Partitions a dialog's record stream into one bucket per record kind. Plain
//! messages are recognized by their top-level discriminator; service records
//! are dispatched on their nested action tag through [`ActionKind`].
//!
//! Classification is total over the known tags and fails fast on anything
//! else: a tag this crate has never seen aborts the whole call with
//! [`Error::UnrecognizedActionKind`] instead of being dropped.

use crate::error::{Error, Result};
use crate::types::RawRecord;
use tracing::debug;

/// Service actions that are recognized but produce no rows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoredAction {
    /// Group migrated from a basic chat
    ChannelMigrateFrom,
    /// A message was pinned
    PinMessage,
    /// The group photo changed
    ChatEditPhoto,
    /// A basic chat was created
    ChatCreate,
    /// The group title changed
    ChatEditTitle,
}

/// Every service action tag this crate knows about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Users were added by a member
    AddUser,
    /// A user left or was removed
    DeleteUser,
    /// A user joined through an invite link
    JoinedByLink,
    /// Known action without a table of its own
    Ignored(IgnoredAction),
}

impl ActionKind {
    /// All recognized kinds, in wire-tag order of the API schema
    pub const ALL: [ActionKind; 8] = [
        ActionKind::AddUser,
        ActionKind::DeleteUser,
        ActionKind::JoinedByLink,
        ActionKind::Ignored(IgnoredAction::ChannelMigrateFrom),
        ActionKind::Ignored(IgnoredAction::PinMessage),
        ActionKind::Ignored(IgnoredAction::ChatEditPhoto),
        ActionKind::Ignored(IgnoredAction::ChatCreate),
        ActionKind::Ignored(IgnoredAction::ChatEditTitle),
    ];

    /// Map a wire tag to its kind
    ///
    /// # Errors
    /// Returns [`Error::UnrecognizedActionKind`] for any tag outside [`ActionKind::ALL`].
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "MessageActionChatAddUser" => Ok(ActionKind::AddUser),
            "MessageActionChatDeleteUser" => Ok(ActionKind::DeleteUser),
            "MessageActionChatJoinedByLink" => Ok(ActionKind::JoinedByLink),
            "MessageActionChannelMigrateFrom" => {
                Ok(ActionKind::Ignored(IgnoredAction::ChannelMigrateFrom))
            }
            "MessageActionPinMessage" => Ok(ActionKind::Ignored(IgnoredAction::PinMessage)),
            "MessageActionChatEditPhoto" => Ok(ActionKind::Ignored(IgnoredAction::ChatEditPhoto)),
            "MessageActionChatCreate" => Ok(ActionKind::Ignored(IgnoredAction::ChatCreate)),
            "MessageActionChatEditTitle" => Ok(ActionKind::Ignored(IgnoredAction::ChatEditTitle)),
            other => Err(Error::UnrecognizedActionKind {
                tag: other.to_string(),
            }),
        }
    }

    /// Wire tag of this kind
    pub fn tag(self) -> &'static str {
        match self {
            ActionKind::AddUser => "MessageActionChatAddUser",
            ActionKind::DeleteUser => "MessageActionChatDeleteUser",
            ActionKind::JoinedByLink => "MessageActionChatJoinedByLink",
            ActionKind::Ignored(IgnoredAction::ChannelMigrateFrom) => {
                "MessageActionChannelMigrateFrom"
            }
            ActionKind::Ignored(IgnoredAction::PinMessage) => "MessageActionPinMessage",
            ActionKind::Ignored(IgnoredAction::ChatEditPhoto) => "MessageActionChatEditPhoto",
            ActionKind::Ignored(IgnoredAction::ChatCreate) => "MessageActionChatCreate",
            ActionKind::Ignored(IgnoredAction::ChatEditTitle) => "MessageActionChatEditTitle",
        }
    }
}

/// Records of one dialog, partitioned by kind
///
/// Order inside each bucket follows input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Buckets {
    /// Plain messages
    pub messages: Vec<RawRecord>,
    /// Add-user service records
    pub add_user: Vec<RawRecord>,
    /// Delete-user service records
    pub delete_user: Vec<RawRecord>,
    /// Joined-by-link service records
    pub joined_by_link: Vec<RawRecord>,
    /// Number of recognized records dropped without a bucket
    pub ignored: usize,
}

impl Buckets {
    /// Number of input records accounted for, ignored ones included
    pub fn total(&self) -> usize {
        self.messages.len()
            + self.add_user.len()
            + self.delete_user.len()
            + self.joined_by_link.len()
            + self.ignored
    }
}

/// Partition records into buckets
///
/// # Errors
/// - [`Error::UnrecognizedActionKind`] if any service record has an unknown action tag
/// - [`Error::MalformedRecord`] if a service record carries no action at all
///
/// No buckets are returned when either error occurs.
pub fn classify(records: Vec<RawRecord>) -> Result<Buckets> {
    let mut buckets = Buckets::default();

    for record in records {
        if record.is_message() {
            buckets.messages.push(record);
            continue;
        }

        let kind = match &record.action {
            Some(action) => ActionKind::from_tag(&action.tag)?,
            None => {
                return Err(Error::MalformedRecord {
                    message_id: record.id,
                    reason: format!("{} record without action", record.kind),
                });
            }
        };

        match kind {
            ActionKind::AddUser => buckets.add_user.push(record),
            ActionKind::DeleteUser => buckets.delete_user.push(record),
            ActionKind::JoinedByLink => buckets.joined_by_link.push(record),
            ActionKind::Ignored(_) => {
                debug!(message_id = record.id, action = kind.tag(), "ignoring service record");
                buckets.ignored += 1;
            }
        }
    }

    Ok(buckets)
}
