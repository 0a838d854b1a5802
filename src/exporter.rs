//! One-shot export of dialogs into a snapshot
//!
//! [`DatasetExporter`] wires the pipeline together: assemble the event tables,
//! extract the referenced IDs, look up their profiles and write everything to
//! a new snapshot directory. Progress and skipped lookups are broadcast as
//! [`Event`]s.

use crate::config::Config;
use crate::dataset::{DatasetBundle, DialogSummary, assemble_with, extract_identifier_sets};
use crate::enrich::{build_channel_table, build_participant_table, build_user_table};
use crate::error::Result;
use crate::source::{TelegramApi, TelegramClient};
use crate::storage::{DatasetStore, Snapshot};
use crate::tables::{ParticipantRow, Table};
use crate::types::{EntityKind, Event};
use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;

/// Capacity of the event channel
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Exports dialogs from the Telegram API into snapshots on disk
pub struct DatasetExporter {
    api: Arc<dyn TelegramApi>,
    store: DatasetStore,
    event_tx: broadcast::Sender<Event>,
}

impl DatasetExporter {
    /// Exporter over any API implementation
    pub fn new(api: Arc<dyn TelegramApi>, store: DatasetStore) -> Self {
        let (event_tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            api,
            store,
            event_tx,
        }
    }

    /// Exporter using [`TelegramClient`] and the configured data directory
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let client = TelegramClient::new(&config.api)?;
        Ok(Self::new(
            Arc::new(client),
            DatasetStore::new(config.storage.data_dir.clone()),
        ))
    }

    /// Subscribe to export events
    ///
    /// Each subscriber receives every event sent after it subscribed. A
    /// subscriber lagging by more than 1000 events misses the oldest ones.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Snapshot store
    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    fn emit(&self, event: Event) {
        // No subscribers is fine.
        self.event_tx.send(event).ok();
    }

    /// Assemble the event tables of `dialogs`
    ///
    /// Each dialog is reported as soon as it has been classified, so
    /// subscribers see progress even when a later dialog fails.
    pub async fn create_message_datasets(&self, dialogs: &[String]) -> Result<DatasetBundle> {
        assemble_with(self.api.as_ref(), dialogs, |summary| self.report_dialog(summary)).await
    }

    fn report_dialog(&self, summary: &DialogSummary) {
        self.emit(Event::DialogFetched {
            dialog: summary.dialog.clone(),
            records: summary.records,
        });
        if summary.ignored > 0 {
            info!(dialog = %summary.dialog, count = summary.ignored, "ignored service records");
            self.emit(Event::RecordsIgnored {
                dialog: summary.dialog.clone(),
                count: summary.ignored,
            });
        }
    }

    /// Export `dialogs` into a new snapshot and return its directory
    ///
    /// Nothing is written unless assembly and every lookup succeed; IDs the
    /// API does not know are skipped and reported as
    /// [`Event::EntityNotFound`].
    pub async fn save_dataset_to_disk(&self, dialogs: &[String]) -> Result<PathBuf> {
        let loadtime = Local::now().naive_local();

        let bundle = self.create_message_datasets(dialogs).await?;
        let ids = extract_identifier_sets(&bundle);

        let users = build_user_table(self.api.as_ref(), ids.user_ids).await?;
        for id in &users.missing {
            self.emit(Event::EntityNotFound {
                kind: EntityKind::User,
                id: *id,
            });
        }
        let channels = build_channel_table(self.api.as_ref(), ids.channel_ids).await?;
        for id in &channels.missing {
            self.emit(Event::EntityNotFound {
                kind: EntityKind::Channel,
                id: *id,
            });
        }

        let snapshot = Snapshot {
            bundle,
            users: users.table,
            channels: channels.table,
        };
        let path = self.store.save(&snapshot, loadtime)?;

        info!(
            dialogs = %dialogs.join(", "),
            path = %path.display(),
            "successfully saved data"
        );
        self.emit(Event::DatasetSaved {
            path: path.clone(),
            dialogs: dialogs.to_vec(),
        });
        Ok(path)
    }

    /// List the current participants of `dialog`
    pub async fn generate_participants(&self, dialog: &str) -> Result<Table<ParticipantRow>> {
        build_participant_table(self.api.as_ref(), dialog).await
    }

    /// Write the participants of `dialog` into the latest snapshot
    pub async fn save_participants(&self, dialog: &str) -> Result<PathBuf> {
        let table = self.generate_participants(dialog).await?;
        self.store
            .save_participants(dialog, &table, Local::now().naive_local())
    }
}
