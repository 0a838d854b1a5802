//! Shared helpers for integration tests: JSON record fixtures and a mock API
//! server built on wiremock.

#![allow(dead_code)]

use serde_json::{Value, json};
use std::time::Duration;
use telegram_datasets::ApiConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// API settings pointing at a mock server
pub fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: server.uri(),
        api_id: 4242,
        api_hash: "feedface".to_string(),
        session: "integration".to_string(),
        timeout: Duration::from_secs(5),
        user_agent: "telegram-datasets integration tests".to_string(),
    }
}

fn date(id: i64) -> String {
    format!("2023-06-01T08:{:02}:00+00:00", id % 60)
}

/// A plain message in a channel
pub fn message(id: i64, channel: i64, from: Option<i64>, text: &str) -> Value {
    let mut record = json!({
        "_": "Message",
        "id": id,
        "peer_id": {"_": "PeerChannel", "channel_id": channel},
        "date": date(id),
        "message": text,
        "out": false,
    });
    if let Some(user_id) = from {
        record["from_id"] = json!({"_": "PeerUser", "user_id": user_id});
    }
    record
}

/// A service record in a basic chat
pub fn service(id: i64, chat: i64, from: i64, action: Value) -> Value {
    json!({
        "_": "MessageService",
        "id": id,
        "peer_id": {"_": "PeerChat", "chat_id": chat},
        "date": date(id),
        "from_id": {"_": "PeerUser", "user_id": from},
        "action": action,
    })
}

/// Add-user action
pub fn add_user(users: &[i64]) -> Value {
    json!({"_": "MessageActionChatAddUser", "users": users})
}

/// Joined-by-link action
pub fn joined_by_link(inviter: i64) -> Value {
    json!({"_": "MessageActionChatJoinedByLink", "inviter_id": inviter})
}

/// Action with only a tag
pub fn bare_action(tag: &str) -> Value {
    json!({"_": tag})
}

/// Serve `records` as the message stream of `dialog`
pub async fn mount_dialog(server: &MockServer, dialog: &str, records: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/dialogs/{dialog}/messages")))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(records)))
        .mount(server)
        .await;
}

/// Serve a user profile
pub async fn mount_user(server: &MockServer, id: i64, first: Option<&str>, last: Option<&str>) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_": "User",
            "id": id,
            "username": format!("user{id}"),
            "first_name": first,
            "last_name": last,
        })))
        .mount(server)
        .await;
}

/// Serve a channel (`supergroup`) or basic chat profile
pub async fn mount_group(server: &MockServer, id: i64, title: &str, supergroup: bool) {
    let collection = if supergroup { "channels" } else { "chats" };
    Mock::given(method("GET"))
        .and(path(format!("/{collection}/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": id,
            "date": "2019-02-03T04:05:06+00:00",
            "title": title,
        })))
        .mount(server)
        .await;
}
