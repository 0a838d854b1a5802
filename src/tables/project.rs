//! Projections from raw records and profiles to rows
//!
//! Every projection is pure. Bucket projections expect records of the kind
//! they are named after but never fail: a missing optional part just leaves
//! the corresponding cell empty.

use super::Table;
use super::rows::{
    AddUserEventRow, ChannelRow, DeleteUserEventRow, JoinedByLinkEventRow, MessageRow,
    ParticipantRow, UserRow,
};
use crate::classify::ActionKind;
use crate::types::{ChannelProfile, RawRecord, UserProfile};

/// Join first and last name with one space
///
/// A missing half becomes an empty string; the separator is always present,
/// so a profile with neither name yields `" "`.
///
/// # Examples
///
/// ```
/// use telegram_datasets::tables::full_name;
///
/// assert_eq!(full_name(Some("Ada"), Some("Lovelace")), "Ada Lovelace");
/// assert_eq!(full_name(Some("Ada"), None), "Ada ");
/// assert_eq!(full_name(None, None), " ");
/// ```
pub fn full_name(first: Option<&str>, last: Option<&str>) -> String {
    format!("{} {}", first.unwrap_or(""), last.unwrap_or(""))
}

/// Project plain messages
pub fn project_messages(records: &[RawRecord]) -> Table<MessageRow> {
    Table::from_rows(
        records
            .iter()
            .map(|record| MessageRow {
                channel_id: record.channel_id(),
                message_id: record.id,
                datetime: record.date,
                user_id: record.sender_id(),
                message: record.message.clone().unwrap_or_default(),
            })
            .collect(),
    )
}

/// Project add-user records, one row per added user
pub fn project_add_user_events(records: &[RawRecord]) -> Table<AddUserEventRow> {
    let action = ActionKind::AddUser.tag();
    Table::from_rows(
        records
            .iter()
            .flat_map(|record| {
                let added = record
                    .action
                    .as_ref()
                    .map(|a| a.users.as_slice())
                    .unwrap_or_default();
                added.iter().map(move |&added_user_id| AddUserEventRow {
                    channel_id: record.channel_id(),
                    message_id: record.id,
                    action: action.to_string(),
                    datetime: record.date,
                    added_user_id,
                    user_id: record.sender_id(),
                })
            })
            .collect(),
    )
}

/// Project delete-user records
pub fn project_delete_user_events(records: &[RawRecord]) -> Table<DeleteUserEventRow> {
    let action = ActionKind::DeleteUser.tag();
    Table::from_rows(
        records
            .iter()
            .map(|record| DeleteUserEventRow {
                channel_id: record.channel_id(),
                message_id: record.id,
                action: action.to_string(),
                datetime: record.date,
                deleted_user_id: record.action.as_ref().and_then(|a| a.user_id),
                user_id: record.sender_id(),
            })
            .collect(),
    )
}

/// Project joined-by-link records
pub fn project_joined_by_link_events(records: &[RawRecord]) -> Table<JoinedByLinkEventRow> {
    let action = ActionKind::JoinedByLink.tag();
    Table::from_rows(
        records
            .iter()
            .map(|record| JoinedByLinkEventRow {
                channel_id: record.channel_id(),
                message_id: record.id,
                action: action.to_string(),
                datetime: record.date,
                inviter_id: record.action.as_ref().and_then(|a| a.inviter_id),
                user_id: record.sender_id(),
            })
            .collect(),
    )
}

/// Project a looked-up user
pub fn project_user(profile: &UserProfile) -> UserRow {
    UserRow {
        user_id: profile.id,
        username: profile.username.clone(),
        first_name: profile.first_name.clone(),
        last_name: profile.last_name.clone(),
        full_name: full_name(profile.first_name.as_deref(), profile.last_name.as_deref()),
    }
}

/// Project a looked-up channel or chat
pub fn project_channel(profile: &ChannelProfile, is_supergroup: bool) -> ChannelRow {
    ChannelRow {
        channel_id: profile.id,
        creation_datetime: profile.date,
        title: profile.title.clone(),
        is_supergroup,
    }
}

/// Project a participant of `dialog`
pub fn project_participant(dialog: &str, profile: &UserProfile) -> ParticipantRow {
    ParticipantRow {
        channel_name: dialog.to_string(),
        user_id: profile.id,
        username: profile.username.clone(),
        first_name: profile.first_name.clone(),
        last_name: profile.last_name.clone(),
        full_name: full_name(profile.first_name.as_deref(), profile.last_name.as_deref()),
    }
}
