//! Dataset assembly across dialogs
//!
//! [`assemble`] fetches each dialog in turn, classifies its records, projects
//! every bucket and appends the rows to one [`DatasetBundle`]. Dialogs are
//! processed strictly in input order; the first failure aborts the whole
//! assembly and no bundle is returned.
//!
//! [`extract_identifier_sets`] then collects the user and channel IDs the
//! enrichment step looks up.

use crate::classify::classify;
use crate::error::Result;
use crate::source::RecordSource;
use crate::tables::{
    AddUserEventRow, DeleteUserEventRow, JoinedByLinkEventRow, MessageRow, Table,
    project_add_user_events, project_delete_user_events, project_joined_by_link_events,
    project_messages,
};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, info};

/// Named datasets of a snapshot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// Plain messages
    Messages,
    /// Add-user events
    AddUserEvents,
    /// Delete-user events
    DeleteUserEvents,
    /// Joined-by-link events
    ChatJoinedByLinkEvents,
    /// Looked-up users
    Users,
    /// Looked-up channels and chats
    Channels,
}

impl Dataset {
    /// Every dataset written to a snapshot
    pub const ALL: [Dataset; 6] = [
        Dataset::Messages,
        Dataset::AddUserEvents,
        Dataset::DeleteUserEvents,
        Dataset::ChatJoinedByLinkEvents,
        Dataset::Users,
        Dataset::Channels,
    ];

    /// Dataset name, also the file stem on disk
    pub const fn name(self) -> &'static str {
        match self {
            Dataset::Messages => "messages",
            Dataset::AddUserEvents => "add_user_events",
            Dataset::DeleteUserEvents => "delete_user_events",
            Dataset::ChatJoinedByLinkEvents => "chat_joined_by_link_events",
            Dataset::Users => "users",
            Dataset::Channels => "channels",
        }
    }

    /// File name inside a snapshot directory
    pub fn file_name(self) -> String {
        format!("{}.csv", self.name())
    }

    /// Parse a dataset name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What one dialog contributed to an assembly
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogSummary {
    /// Dialog name
    pub dialog: String,
    /// Records received from the API
    pub records: usize,
    /// Recognized records dropped without rows
    pub ignored: usize,
}

/// The four event tables of one assembly
///
/// Built only by [`assemble`]; read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatasetBundle {
    pub(crate) messages: Table<MessageRow>,
    pub(crate) add_user_events: Table<AddUserEventRow>,
    pub(crate) delete_user_events: Table<DeleteUserEventRow>,
    pub(crate) joined_by_link_events: Table<JoinedByLinkEventRow>,
    pub(crate) dialogs: Vec<DialogSummary>,
}

impl DatasetBundle {
    /// Messages table
    pub fn messages(&self) -> &Table<MessageRow> {
        &self.messages
    }

    /// Add-user events table
    pub fn add_user_events(&self) -> &Table<AddUserEventRow> {
        &self.add_user_events
    }

    /// Delete-user events table
    pub fn delete_user_events(&self) -> &Table<DeleteUserEventRow> {
        &self.delete_user_events
    }

    /// Joined-by-link events table
    pub fn joined_by_link_events(&self) -> &Table<JoinedByLinkEventRow> {
        &self.joined_by_link_events
    }

    /// Per-dialog summaries, in assembly order
    pub fn dialogs(&self) -> &[DialogSummary] {
        &self.dialogs
    }

    /// Row count of each event table, keyed by dataset
    pub fn row_counts(&self) -> [(Dataset, usize); 4] {
        [
            (Dataset::Messages, self.messages.len()),
            (Dataset::AddUserEvents, self.add_user_events.len()),
            (Dataset::DeleteUserEvents, self.delete_user_events.len()),
            (Dataset::ChatJoinedByLinkEvents, self.joined_by_link_events.len()),
        ]
    }
}

/// Fetch, classify and project every dialog into one bundle
///
/// # Errors
///
/// The first fetch or classification error of any dialog, unchanged.
/// Dialogs after the failing one are not fetched.
pub async fn assemble<S>(source: &S, dialogs: &[String]) -> Result<DatasetBundle>
where
    S: RecordSource + ?Sized,
{
    assemble_with(source, dialogs, |_| {}).await
}

/// Like [`assemble`], calling `on_dialog` as soon as each dialog is done
///
/// Dialogs finished before a failure have already been reported when the
/// error is returned.
pub async fn assemble_with<S, F>(
    source: &S,
    dialogs: &[String],
    mut on_dialog: F,
) -> Result<DatasetBundle>
where
    S: RecordSource + ?Sized,
    F: FnMut(&DialogSummary),
{
    let mut bundle = DatasetBundle::default();

    for dialog in dialogs {
        let records = source.fetch_records(dialog).await?;
        let received = records.len();

        let buckets = classify(records)?;
        debug!(
            dialog = %dialog,
            messages = buckets.messages.len(),
            add_user = buckets.add_user.len(),
            delete_user = buckets.delete_user.len(),
            joined_by_link = buckets.joined_by_link.len(),
            ignored = buckets.ignored,
            "classified dialog"
        );

        bundle.messages.append(project_messages(&buckets.messages));
        bundle
            .add_user_events
            .append(project_add_user_events(&buckets.add_user));
        bundle
            .delete_user_events
            .append(project_delete_user_events(&buckets.delete_user));
        bundle
            .joined_by_link_events
            .append(project_joined_by_link_events(&buckets.joined_by_link));
        let summary = DialogSummary {
            dialog: dialog.clone(),
            records: received,
            ignored: buckets.ignored,
        };
        on_dialog(&summary);
        bundle.dialogs.push(summary);
    }

    for (dataset, rows) in bundle.row_counts() {
        info!(dialogs = dialogs.len(), dataset = %dataset, rows, "assembled dataset");
    }
    Ok(bundle)
}

/// Distinct identifiers referenced by a bundle, in ascending order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentifierSets {
    /// Senders, added users, deleted users and inviters across all tables
    pub user_ids: BTreeSet<i64>,
    /// Channels and chats of the messages table
    pub channel_ids: BTreeSet<i64>,
}

/// Collect the IDs to look up during enrichment
pub fn extract_identifier_sets(bundle: &DatasetBundle) -> IdentifierSets {
    let mut sets = IdentifierSets::default();

    for row in bundle.messages() {
        sets.user_ids.extend(row.user_id);
        sets.channel_ids.extend(row.channel_id);
    }
    for row in bundle.add_user_events() {
        sets.user_ids.insert(row.added_user_id);
        sets.user_ids.extend(row.user_id);
    }
    for row in bundle.delete_user_events() {
        sets.user_ids.extend(row.deleted_user_id);
        sets.user_ids.extend(row.user_id);
    }
    for row in bundle.joined_by_link_events() {
        sets.user_ids.extend(row.inviter_id);
        sets.user_ids.extend(row.user_id);
    }

    sets
}
