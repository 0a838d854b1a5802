//! HTTP client for the Telegram API bridge

use super::{EntityLookup, ParticipantSource, RecordSource};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::types::{ChannelProfile, RawRecord, UserProfile};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

const HEADER_API_ID: &str = "x-api-id";
const HEADER_API_HASH: &str = "x-api-hash";
const HEADER_SESSION: &str = "x-session";

/// Client for a JSON bridge in front of the Telegram API
///
/// The bridge holds the authorized MTProto session named by
/// [`ApiConfig::session`]; this client sends the credentials with every request
/// and decodes the JSON answers. Records arrive in the shape of the API's
/// `to_dict()` output (`"_"` discriminator keys).
///
/// Endpoints, relative to [`ApiConfig::base_url`]:
///
/// | Request | Answer |
/// |---------|--------|
/// | `GET /dialogs/{dialog}/messages` | array of records |
/// | `GET /dialogs/{dialog}/participants` | array of user profiles |
/// | `GET /users/{id}` | user profile, `404` if unknown |
/// | `GET /channels/{id}` | channel profile, `404` if unknown |
/// | `GET /chats/{id}` | chat profile, `404` if unknown |
#[derive(Clone, Debug)]
pub struct TelegramClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    /// Create a client from API settings
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the base URL or a credential cannot be used
    /// in a request, or [`Error::Network`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = url::Url::parse(&config.base_url)
            .map_err(|e| Error::config(format!("invalid base_url: {e}"), "base_url"))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(HEADER_API_ID),
            HeaderValue::from(config.api_id),
        );
        headers.insert(
            HeaderName::from_static(HEADER_API_HASH),
            header_value(&config.api_hash, "api_hash")?,
        );
        headers.insert(
            HeaderName::from_static(HEADER_SESSION),
            header_value(&config.session, "session")?,
        );

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn dialog_url(&self, dialog: &str, resource: &str) -> String {
        format!(
            "{}/dialogs/{}/{}",
            self.base_url,
            urlencoding::encode(dialog),
            resource
        )
    }

    fn entity_url(&self, collection: &str, id: i64) -> String {
        format!("{}/{}/{}", self.base_url, collection, id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get_optional(url).await?.ok_or_else(|| Error::Api {
            status: StatusCode::NOT_FOUND.as_u16(),
            url: url.to_string(),
        })
    }

    /// GET `url`, mapping `404` to `None`
    async fn get_optional<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        debug!(url = %url, "requesting");
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(Some(serde_json::from_slice(&body)?))
    }
}

fn header_value(value: &str, key: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::config(format!("{key} contains characters not allowed in a header"), key))
}

#[async_trait]
impl RecordSource for TelegramClient {
    async fn fetch_records(&self, dialog: &str) -> Result<Vec<RawRecord>> {
        let records: Vec<RawRecord> = self.get_json(&self.dialog_url(dialog, "messages")).await?;
        debug!(dialog = %dialog, count = records.len(), "fetched records");
        Ok(records)
    }
}

#[async_trait]
impl EntityLookup for TelegramClient {
    async fn lookup_user(&self, id: i64) -> Result<Option<UserProfile>> {
        self.get_optional(&self.entity_url("users", id)).await
    }

    async fn lookup_channel(&self, id: i64) -> Result<Option<ChannelProfile>> {
        self.get_optional(&self.entity_url("channels", id)).await
    }

    async fn lookup_chat(&self, id: i64) -> Result<Option<ChannelProfile>> {
        self.get_optional(&self.entity_url("chats", id)).await
    }
}

#[async_trait]
impl ParticipantSource for TelegramClient {
    async fn fetch_participants(&self, dialog: &str) -> Result<Vec<UserProfile>> {
        let participants: Vec<UserProfile> = self
            .get_json(&self.dialog_url(dialog, "participants"))
            .await?;
        debug!(dialog = %dialog, count = participants.len(), "fetched participants");
        Ok(participants)
    }
}
