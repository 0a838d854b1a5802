//! Shared test helpers: an in-memory Telegram API and record builders.

use super::{EntityLookup, ParticipantSource, RecordSource};
use crate::error::{Error, Result};
use crate::types::{ChannelProfile, PeerReference, RawAction, RawRecord, UserProfile};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory API; unknown dialogs fail like a bad request would
#[derive(Default)]
pub(crate) struct FakeTelegram {
    pub(crate) dialogs: HashMap<String, Vec<RawRecord>>,
    pub(crate) users: HashMap<i64, UserProfile>,
    pub(crate) channels: HashMap<i64, ChannelProfile>,
    pub(crate) chats: HashMap<i64, ChannelProfile>,
    pub(crate) participants: HashMap<String, Vec<UserProfile>>,
    pub(crate) fetched: Mutex<Vec<String>>,
}

impl FakeTelegram {
    pub(crate) fn with_dialog(mut self, dialog: &str, records: Vec<RawRecord>) -> Self {
        self.dialogs.insert(dialog.to_string(), records);
        self
    }

    pub(crate) fn with_user(mut self, id: i64, first: Option<&str>, last: Option<&str>) -> Self {
        self.users.insert(
            id,
            UserProfile {
                id,
                username: Some(format!("user{id}")),
                first_name: first.map(String::from),
                last_name: last.map(String::from),
            },
        );
        self
    }

    pub(crate) fn with_channel(mut self, id: i64, title: &str) -> Self {
        self.channels.insert(id, profile(id, title));
        self
    }

    pub(crate) fn with_chat(mut self, id: i64, title: &str) -> Self {
        self.chats.insert(id, profile(id, title));
        self
    }

    pub(crate) fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

fn profile(id: i64, title: &str) -> ChannelProfile {
    ChannelProfile {
        id,
        date: Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()),
        title: Some(title.to_string()),
    }
}

#[async_trait]
impl RecordSource for FakeTelegram {
    async fn fetch_records(&self, dialog: &str) -> Result<Vec<RawRecord>> {
        self.fetched.lock().unwrap().push(dialog.to_string());
        self.dialogs.get(dialog).cloned().ok_or_else(|| Error::Api {
            status: 400,
            url: format!("/dialogs/{dialog}/messages"),
        })
    }
}

#[async_trait]
impl EntityLookup for FakeTelegram {
    async fn lookup_user(&self, id: i64) -> Result<Option<UserProfile>> {
        Ok(self.users.get(&id).cloned())
    }

    async fn lookup_channel(&self, id: i64) -> Result<Option<ChannelProfile>> {
        Ok(self.channels.get(&id).cloned())
    }

    async fn lookup_chat(&self, id: i64) -> Result<Option<ChannelProfile>> {
        Ok(self.chats.get(&id).cloned())
    }
}

#[async_trait]
impl ParticipantSource for FakeTelegram {
    async fn fetch_participants(&self, dialog: &str) -> Result<Vec<UserProfile>> {
        Ok(self.participants.get(dialog).cloned().unwrap_or_default())
    }
}

fn base(id: i64, kind: &str, channel: i64, from: Option<i64>) -> RawRecord {
    RawRecord {
        kind: kind.to_string(),
        id,
        peer_id: Some(PeerReference::Channel {
            channel_id: channel,
        }),
        date: Some(Utc.with_ymd_and_hms(2023, 6, 1, 8, 0, 0).unwrap() + chrono::Duration::minutes(id)),
        message: None,
        from_id: from.map(|user_id| PeerReference::User { user_id }),
        action: None,
    }
}

fn with_action(mut record: RawRecord, action: RawAction) -> RawRecord {
    record.action = Some(action);
    record
}

fn raw_action(tag: &str) -> RawAction {
    RawAction {
        tag: tag.to_string(),
        users: vec![],
        user_id: None,
        inviter_id: None,
    }
}

pub(crate) fn message(id: i64, channel: i64, from: Option<i64>) -> RawRecord {
    let mut record = base(id, "Message", channel, from);
    record.message = Some(format!("message {id}"));
    record
}

pub(crate) fn add_user(id: i64, channel: i64, by: i64, users: &[i64]) -> RawRecord {
    let mut action = raw_action("MessageActionChatAddUser");
    action.users = users.to_vec();
    with_action(base(id, "MessageService", channel, Some(by)), action)
}

pub(crate) fn delete_user(id: i64, channel: i64, by: i64, deleted: i64) -> RawRecord {
    let mut action = raw_action("MessageActionChatDeleteUser");
    action.user_id = Some(deleted);
    with_action(base(id, "MessageService", channel, Some(by)), action)
}

pub(crate) fn joined_by_link(id: i64, channel: i64, user: i64, inviter: i64) -> RawRecord {
    let mut action = raw_action("MessageActionChatJoinedByLink");
    action.inviter_id = Some(inviter);
    with_action(base(id, "MessageService", channel, Some(user)), action)
}

pub(crate) fn service(id: i64, channel: i64, tag: &str) -> RawRecord {
    with_action(base(id, "MessageService", channel, None), raw_action(tag))
}
