//! Snapshot persistence
//!
//! A snapshot is one directory under the data directory, named by the time
//! the data was loaded, holding one CSV file per [`Dataset`]. Directory names
//! sort lexicographically in time order, so the latest snapshot is the
//! greatest name. Entries whose name is not a snapshot time are ignored.

use crate::dataset::{Dataset, DatasetBundle};
use crate::error::{Error, Result};
use crate::tables::{ChannelRow, ParticipantRow, Row, Table, UserRow};
use chrono::NaiveDateTime;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Format of snapshot directory names
pub const SNAPSHOT_DIR_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.6f";

/// Everything written to one snapshot directory
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    /// Event tables
    pub bundle: DatasetBundle,
    /// Looked-up users
    pub users: Table<UserRow>,
    /// Looked-up channels and chats
    pub channels: Table<ChannelRow>,
}

/// Reads and writes snapshots below a data directory
#[derive(Clone, Debug)]
pub struct DatasetStore {
    data_dir: PathBuf,
}

impl DatasetStore {
    /// Store rooted at `data_dir`; the directory is created on first save
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Root directory of all snapshots
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory a snapshot loaded at `loadtime` is written to
    pub fn snapshot_dir(&self, loadtime: NaiveDateTime) -> PathBuf {
        self.data_dir
            .join(loadtime.format(SNAPSHOT_DIR_FORMAT).to_string())
    }

    /// Write a snapshot into a new directory named after `loadtime`
    ///
    /// # Errors
    /// Fails with an I/O error if the snapshot directory already exists.
    pub fn save(&self, snapshot: &Snapshot, loadtime: NaiveDateTime) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_dir)?;
        let dir = self.snapshot_dir(loadtime);
        fs::create_dir(&dir)?;

        let bundle = &snapshot.bundle;
        write_table(&dir, Dataset::Messages, bundle.messages())?;
        write_table(&dir, Dataset::AddUserEvents, bundle.add_user_events())?;
        write_table(&dir, Dataset::DeleteUserEvents, bundle.delete_user_events())?;
        write_table(&dir, Dataset::ChatJoinedByLinkEvents, bundle.joined_by_link_events())?;
        write_table(&dir, Dataset::Users, &snapshot.users)?;
        write_table(&dir, Dataset::Channels, &snapshot.channels)?;

        info!(path = %dir.display(), "saved snapshot");
        Ok(dir)
    }

    /// Most recent snapshot directory
    ///
    /// # Errors
    /// [`Error::NotFound`] if the data directory holds no snapshot.
    pub fn latest_dir(&self) -> Result<PathBuf> {
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(format!(
                    "data directory {}",
                    self.data_dir.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let mut latest: Option<PathBuf> = None;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if !is_snapshot_name(&entry.file_name().to_string_lossy()) {
                debug!(path = %entry.path().display(), "skipping non-snapshot directory");
                continue;
            }
            let path = entry.path();
            if latest.as_ref().is_none_or(|current| path.file_name() > current.file_name()) {
                latest = Some(path);
            }
        }

        latest.ok_or_else(|| {
            Error::NotFound(format!("no snapshot in {}", self.data_dir.display()))
        })
    }

    /// Load a dataset from the most recent snapshot
    pub fn load_latest<R: Row>(&self, dataset: Dataset) -> Result<Table<R>> {
        let dir = self.latest_dir()?;
        info!(path = %dir.display(), dataset = %dataset, "loading dataset");
        self.load_from(&dir, dataset)
    }

    /// Load a dataset from a given snapshot directory
    pub fn load_from<R: Row>(&self, dir: &Path, dataset: Dataset) -> Result<Table<R>> {
        read_table(&dir.join(dataset.file_name()))
    }

    /// Write a participant listing into the latest snapshot
    ///
    /// A new snapshot directory named after `loadtime` is created when none
    /// exists yet.
    pub fn save_participants(
        &self,
        dialog: &str,
        table: &Table<ParticipantRow>,
        loadtime: NaiveDateTime,
    ) -> Result<PathBuf> {
        let dir = match self.latest_dir() {
            Ok(dir) => dir,
            Err(Error::NotFound(_)) => {
                let dir = self.snapshot_dir(loadtime);
                fs::create_dir_all(&dir)?;
                dir
            }
            Err(e) => return Err(e),
        };

        let path = dir.join(participants_file_name(dialog));
        let file = fs::File::create(&path)?;
        table.write_csv(BufWriter::new(file))?;
        info!(path = %path.display(), rows = table.len(), "saved participants");
        Ok(path)
    }

    /// Load a participant listing from the latest snapshot
    pub fn load_participants(&self, dialog: &str) -> Result<Table<ParticipantRow>> {
        let dir = self.latest_dir()?;
        read_table(&dir.join(participants_file_name(dialog)))
    }
}

/// File name of a dialog's participant listing
///
/// The dialog name is percent-encoded, so distinct dialogs never share a file.
pub fn participants_file_name(dialog: &str) -> String {
    format!("participants_{}.csv", urlencoding::encode(dialog))
}

fn is_snapshot_name(name: &str) -> bool {
    NaiveDateTime::parse_from_str(name, SNAPSHOT_DIR_FORMAT).is_ok()
}

fn write_table<R: Row>(dir: &Path, dataset: Dataset, table: &Table<R>) -> Result<()> {
    let path = dir.join(dataset.file_name());
    let file = fs::File::create(&path)?;
    table.write_csv(BufWriter::new(file))?;
    debug!(dataset = %dataset, rows = table.len(), "wrote dataset");
    Ok(())
}

fn read_table<R: Row>(path: &Path) -> Result<Table<R>> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::NotFound(path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    Table::read_csv(std::io::BufReader::new(file))
}
