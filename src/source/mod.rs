//! Access to the Telegram API
//!
//! The dataset pipeline never talks to the network directly. It consumes three
//! narrow capabilities, each an async trait, so callers can inject the real
//! client or an in-memory fake:
//!
//! - [`RecordSource`] - the message stream of one dialog
//! - [`EntityLookup`] - user, channel and chat profiles by ID
//! - [`ParticipantSource`] - current members of one dialog
//!
//! [`TelegramClient`] implements all three over an HTTP bridge to the
//! Telegram API.
//!
//! ## Usage
//!
//! ```no_run
//! use telegram_datasets::Config;
//! use telegram_datasets::source::{RecordSource, TelegramClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = TelegramClient::new(&config.api)?;
//!
//!     let records = client.fetch_records("rustaceans").await?;
//!     println!("fetched {} records", records.len());
//!
//!     Ok(())
//! }
//! ```

mod client;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use client::TelegramClient;

use crate::error::Result;
use crate::types::{ChannelProfile, RawRecord, UserProfile};
use async_trait::async_trait;

/// Delivers the record stream of a dialog
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch every record of `dialog`, in delivery order
    ///
    /// # Errors
    ///
    /// Any transport or decoding failure. Callers abort the current
    /// assembly on error.
    async fn fetch_records(&self, dialog: &str) -> Result<Vec<RawRecord>>;
}

/// Looks up profiles of users, channels and basic chats
///
/// `Ok(None)` means the API does not know the ID. That is not an error: the
/// enrichment step skips the ID and reports it.
#[async_trait]
pub trait EntityLookup: Send + Sync {
    /// Look up a user
    async fn lookup_user(&self, id: i64) -> Result<Option<UserProfile>>;

    /// Look up a channel (supergroup or broadcast)
    async fn lookup_channel(&self, id: i64) -> Result<Option<ChannelProfile>>;

    /// Look up a basic chat
    async fn lookup_chat(&self, id: i64) -> Result<Option<ChannelProfile>>;
}

/// Lists the current members of a dialog
#[async_trait]
pub trait ParticipantSource: Send + Sync {
    /// Fetch all participants of `dialog`
    async fn fetch_participants(&self, dialog: &str) -> Result<Vec<UserProfile>>;
}

/// Everything the exporter needs from the API
pub trait TelegramApi: RecordSource + EntityLookup + ParticipantSource {}

impl<T> TelegramApi for T where T: RecordSource + EntityLookup + ParticipantSource {}
