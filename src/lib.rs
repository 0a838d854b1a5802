//! # telegram-datasets
//!
//! Downloads the message history of Telegram dialogs and turns it into flat
//! CSV datasets for analysis.
//!
//! ## Pipeline
//!
//! 1. **Fetch** - the records of every dialog are fetched through a
//!    [`RecordSource`](source::RecordSource), one dialog after another
//! 2. **Classify** - records are partitioned into plain messages and the
//!    membership service actions (add user, delete user, joined by link);
//!    an unknown action aborts the run
//! 3. **Project** - each bucket is flattened into a table with a fixed schema
//! 4. **Enrich** - every user and channel referenced by the tables is looked up
//! 5. **Save** - all tables are written to a new timestamped snapshot directory
//!
//! ## Quick Start
//!
//! ```no_run
//! use telegram_datasets::{Config, DatasetExporter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads TELEGRAM_API_ID, TELEGRAM_API_HASH and TELEGRAM_USERNAME (or .env)
//!     let config = Config::from_env()?;
//!     let exporter = DatasetExporter::from_config(&config)?;
//!
//!     // Subscribe to events
//!     let mut events = exporter.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let dialogs = vec!["rustaceans".to_string(), "rust_berlin".to_string()];
//!     let snapshot = exporter.save_dataset_to_disk(&dialogs).await?;
//!     println!("saved to {}", snapshot.display());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Record classification
pub mod classify;
/// Configuration types
pub mod config;
/// Dataset assembly across dialogs
pub mod dataset;
/// Profile lookups for referenced users and channels
pub mod enrich;
/// Error types
pub mod error;
/// End-to-end export into snapshots
pub mod exporter;
/// Telegram API access
pub mod source;
/// Snapshot persistence
pub mod storage;
/// Row types, tables and projections
pub mod tables;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use classify::{ActionKind, Buckets, IgnoredAction, classify};
pub use config::{ApiConfig, Config, StorageConfig};
pub use dataset::{
    Dataset, DatasetBundle, DialogSummary, IdentifierSets, assemble, assemble_with,
    extract_identifier_sets,
};
pub use enrich::Enrichment;
pub use error::{Error, Result};
pub use exporter::DatasetExporter;
pub use source::{EntityLookup, ParticipantSource, RecordSource, TelegramApi, TelegramClient};
pub use storage::{DatasetStore, Snapshot};
pub use tables::{Row, Table};
pub use types::{
    ChannelProfile, EntityKind, Event, PeerReference, RawAction, RawRecord, UserProfile,
};
