//! Row types, one per dataset

use super::Row;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One plain message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRow {
    /// Channel or chat the message was posted in
    pub channel_id: Option<i64>,
    /// Message ID
    pub message_id: i64,
    /// Posting time
    pub datetime: Option<DateTime<Utc>>,
    /// Sending user; written as an empty field when the message has no sender
    pub user_id: Option<i64>,
    /// Message text; empty for media without a caption
    #[serde(default)]
    pub message: String,
}

impl Row for MessageRow {
    const COLUMNS: &'static [&'static str] =
        &["channel_id", "message_id", "datetime", "user_id", "message"];
}

/// One added user of an add-user service record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddUserEventRow {
    /// Channel or chat
    pub channel_id: Option<i64>,
    /// Message ID of the service record
    pub message_id: i64,
    /// Action wire tag
    pub action: String,
    /// Event time
    pub datetime: Option<DateTime<Utc>>,
    /// User that was added
    pub added_user_id: i64,
    /// User that added them
    pub user_id: Option<i64>,
}

impl Row for AddUserEventRow {
    const COLUMNS: &'static [&'static str] = &[
        "channel_id",
        "message_id",
        "action",
        "datetime",
        "added_user_id",
        "user_id",
    ];
}

/// One delete-user service record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUserEventRow {
    /// Channel or chat
    pub channel_id: Option<i64>,
    /// Message ID of the service record
    pub message_id: i64,
    /// Action wire tag
    pub action: String,
    /// Event time
    pub datetime: Option<DateTime<Utc>>,
    /// User that left or was removed
    pub deleted_user_id: Option<i64>,
    /// User that performed the removal (the leaver themselves when leaving)
    pub user_id: Option<i64>,
}

impl Row for DeleteUserEventRow {
    const COLUMNS: &'static [&'static str] = &[
        "channel_id",
        "message_id",
        "action",
        "datetime",
        "deleted_user_id",
        "user_id",
    ];
}

/// One joined-by-link service record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedByLinkEventRow {
    /// Channel or chat
    pub channel_id: Option<i64>,
    /// Message ID of the service record
    pub message_id: i64,
    /// Action wire tag
    pub action: String,
    /// Event time
    pub datetime: Option<DateTime<Utc>>,
    /// Creator of the invite link
    pub inviter_id: Option<i64>,
    /// User that joined
    pub user_id: Option<i64>,
}

impl Row for JoinedByLinkEventRow {
    const COLUMNS: &'static [&'static str] = &[
        "channel_id",
        "message_id",
        "action",
        "datetime",
        "inviter_id",
        "user_id",
    ];
}

/// One looked-up user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    /// User ID
    pub user_id: i64,
    /// Username
    pub username: Option<String>,
    /// First name
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// First and last name joined by one space
    pub full_name: String,
}

impl Row for UserRow {
    const COLUMNS: &'static [&'static str] =
        &["user_id", "username", "first_name", "last_name", "full_name"];
}

/// One looked-up channel or basic chat
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRow {
    /// Channel or chat ID
    pub channel_id: i64,
    /// Creation time
    pub creation_datetime: Option<DateTime<Utc>>,
    /// Title
    pub title: Option<String>,
    /// `true` when the ID resolved as a channel, `false` for a basic chat
    pub is_supergroup: bool,
}

impl Row for ChannelRow {
    const COLUMNS: &'static [&'static str] =
        &["channel_id", "creation_datetime", "title", "is_supergroup"];
}

/// One current participant of a dialog
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRow {
    /// Dialog the participant was listed for
    pub channel_name: String,
    /// User ID
    pub user_id: i64,
    /// Username
    pub username: Option<String>,
    /// First name
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// First and last name joined by one space
    pub full_name: String,
}

impl Row for ParticipantRow {
    const COLUMNS: &'static [&'static str] = &[
        "channel_name",
        "user_id",
        "username",
        "first_name",
        "last_name",
        "full_name",
    ];
}
