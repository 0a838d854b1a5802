//! Enrichment: profile tables for the identifiers found during assembly
//!
//! Lookups run one at a time, in ascending ID order. An ID the API does not
//! know is logged, recorded in [`Enrichment::missing`] and skipped; any other
//! lookup error aborts.

use crate::error::{Error, Result};
use crate::source::{EntityLookup, ParticipantSource};
use crate::tables::{
    ChannelRow, ParticipantRow, Row, Table, UserRow, project_channel, project_participant,
    project_user,
};
use crate::types::EntityKind;
use tracing::{debug, warn};

/// A profile table plus the IDs that could not be looked up
#[derive(Clone, Debug, PartialEq)]
pub struct Enrichment<R> {
    /// Rows for every ID that resolved
    pub table: Table<R>,
    /// IDs the API did not know, in lookup order
    pub missing: Vec<i64>,
}

impl<R: Row> Enrichment<R> {
    fn new() -> Self {
        Self {
            table: Table::new(),
            missing: Vec::new(),
        }
    }
}

fn skip(kind: EntityKind, id: i64) {
    let notice = Error::EntityNotFound { kind, id };
    warn!(kind = %kind, id, "{notice}, skipping");
}

/// Look up every user in `ids`
pub async fn build_user_table<L>(
    lookup: &L,
    ids: impl IntoIterator<Item = i64>,
) -> Result<Enrichment<UserRow>>
where
    L: EntityLookup + ?Sized,
{
    let mut enrichment = Enrichment::new();
    let mut rows = Vec::new();

    for id in ids {
        match lookup.lookup_user(id).await? {
            Some(profile) => rows.push(project_user(&profile)),
            None => {
                skip(EntityKind::User, id);
                enrichment.missing.push(id);
            }
        }
    }

    debug!(found = rows.len(), missing = enrichment.missing.len(), "looked up users");
    enrichment.table = Table::from_rows(rows);
    Ok(enrichment)
}

/// Look up every channel in `ids`
///
/// Each ID is tried as a channel first and as a basic chat second;
/// `is_supergroup` records which lookup answered.
pub async fn build_channel_table<L>(
    lookup: &L,
    ids: impl IntoIterator<Item = i64>,
) -> Result<Enrichment<ChannelRow>>
where
    L: EntityLookup + ?Sized,
{
    let mut enrichment = Enrichment::new();
    let mut rows = Vec::new();

    for id in ids {
        if let Some(profile) = lookup.lookup_channel(id).await? {
            rows.push(project_channel(&profile, true));
        } else if let Some(profile) = lookup.lookup_chat(id).await? {
            rows.push(project_channel(&profile, false));
        } else {
            skip(EntityKind::Channel, id);
            enrichment.missing.push(id);
        }
    }

    debug!(found = rows.len(), missing = enrichment.missing.len(), "looked up channels");
    enrichment.table = Table::from_rows(rows);
    Ok(enrichment)
}

/// List the current participants of `dialog`
pub async fn build_participant_table<P>(source: &P, dialog: &str) -> Result<Table<ParticipantRow>>
where
    P: ParticipantSource + ?Sized,
{
    let participants = source.fetch_participants(dialog).await?;
    Ok(Table::from_rows(
        participants
            .iter()
            .map(|profile| project_participant(dialog, profile))
            .collect(),
    ))
}
