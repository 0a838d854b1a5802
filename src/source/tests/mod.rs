use super::*;
use crate::config::ApiConfig;
use crate::error::Error;
use crate::types::PeerReference;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        api_id: 12345,
        api_hash: "0123456789abcdef".to_string(),
        session: "analyst".to_string(),
        timeout: Duration::from_secs(5),
        user_agent: "telegram-datasets tests".to_string(),
    }
}

async fn client_for(server: &MockServer) -> TelegramClient {
    TelegramClient::new(&api_config(&server.uri())).expect("Failed to create client")
}

#[tokio::test]
async fn fetch_records_decodes_records_and_sends_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dialogs/rustaceans/messages"))
        .and(header("x-api-id", "12345"))
        .and(header("x-api-hash", "0123456789abcdef"))
        .and(header("x-session", "analyst"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "_": "Message",
                "id": 2,
                "peer_id": {"_": "PeerChannel", "channel_id": 1001},
                "date": "2023-06-01T08:00:00+00:00",
                "message": "hello",
                "from_id": {"_": "PeerUser", "user_id": 7}
            },
            {
                "_": "MessageService",
                "id": 1,
                "peer_id": {"_": "PeerChannel", "channel_id": 1001},
                "date": "2023-06-01T07:59:00+00:00",
                "from_id": {"_": "PeerUser", "user_id": 7},
                "action": {"_": "MessageActionChatAddUser", "users": [8, 9]}
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let records = client.fetch_records("rustaceans").await.unwrap();

    assert_eq!(records.len(), 2);
    assert!(records[0].is_message());
    assert_eq!(
        records[0].peer_id,
        Some(PeerReference::Channel { channel_id: 1001 })
    );
    assert_eq!(records[1].action.as_ref().unwrap().users, vec![8, 9]);
}

#[tokio::test]
async fn dialog_names_are_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dialogs/Rust%20Berlin/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let records = client.fetch_records("Rust Berlin").await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bridge/users/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5, "username": "ada", "first_name": "Ada", "last_name": null
        })))
        .mount(&server)
        .await;

    let client = TelegramClient::new(&api_config(&format!("{}/bridge/", server.uri()))).unwrap();
    let user = client.lookup_user(5).await.unwrap().unwrap();

    assert_eq!(user.username.as_deref(), Some("ada"));
    assert_eq!(user.last_name, None);
}

#[tokio::test]
async fn lookup_maps_404_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/404404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(client.lookup_user(404404).await.unwrap().is_none());
}

#[tokio::test]
async fn channel_and_chat_lookups_use_their_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels/1001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1001, "date": "2019-02-03T04:05:06+00:00", "title": "Rust"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/chats/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 77, "title": "Old chat"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let channel = client.lookup_channel(1001).await.unwrap().unwrap();
    let chat = client.lookup_chat(77).await.unwrap().unwrap();

    assert_eq!(channel.title.as_deref(), Some("Rust"));
    assert!(channel.date.is_some());
    assert_eq!(chat.title.as_deref(), Some("Old chat"));
    assert_eq!(chat.date, None);
}

#[tokio::test]
async fn server_error_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    match client.lookup_user(1).await {
        Err(Error::Api { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/users/1"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_dialog_is_an_error_not_an_empty_stream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dialogs/ghost/messages"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    match client.fetch_records("ghost").await {
        Err(Error::Api { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dialogs/broken/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(matches!(
        client.fetch_records("broken").await,
        Err(Error::Serialization(_))
    ));
}

#[tokio::test]
async fn participants_are_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dialogs/rustaceans/participants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "first_name": "Ada"},
            {"id": 2, "username": "grace", "first_name": "Grace", "last_name": "Hopper", "bot": false}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let participants = client.fetch_participants("rustaceans").await.unwrap();

    assert_eq!(participants.len(), 2);
    assert_eq!(participants[0].username, None);
    assert_eq!(participants[1].last_name.as_deref(), Some("Hopper"));
}

#[test]
fn invalid_base_url_is_rejected() {
    match TelegramClient::new(&api_config("::not a url::")) {
        Err(Error::Config { key, .. }) => assert_eq!(key.as_deref(), Some("base_url")),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn credential_with_newline_is_rejected() {
    let mut config = api_config("http://127.0.0.1:1");
    config.api_hash = "abc\ndef".to_string();

    match TelegramClient::new(&config) {
        Err(Error::Config { key, .. }) => assert_eq!(key.as_deref(), Some("api_hash")),
        other => panic!("expected config error, got {other:?}"),
    }
}
