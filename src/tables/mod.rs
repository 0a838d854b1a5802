//! Flat tables and the projections that fill them
//!
//! A [`Table`] is an ordered list of rows of one [`Row`] type. The column
//! schema lives on the row type, not on the data, so an empty table still
//! knows its columns and writes a header-only CSV file.
//!
//! - [`rows`] - Row types, one per dataset
//! - [`project`] - Pure projections from raw records and profiles to rows

pub mod project;
pub mod rows;

pub use project::{
    full_name, project_add_user_events, project_channel, project_delete_user_events,
    project_joined_by_link_events, project_messages, project_participant, project_user,
};
pub use rows::{
    AddUserEventRow, ChannelRow, DeleteUserEventRow, JoinedByLinkEventRow, MessageRow,
    ParticipantRow, UserRow,
};

use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io;

/// A row with a fixed column schema
///
/// `COLUMNS` must list the serialized field names in declaration order.
pub trait Row: Serialize + DeserializeOwned {
    /// Column names, in CSV order
    const COLUMNS: &'static [&'static str];
}

/// Ordered rows of one kind
#[derive(Clone, Debug, PartialEq)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R: Row> Table<R> {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding `rows` in the given order
    pub fn from_rows(rows: Vec<R>) -> Self {
        Self { rows }
    }

    /// Column schema, present even when the table is empty
    pub fn columns(&self) -> &'static [&'static str] {
        R::COLUMNS
    }

    /// Rows in order
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Iterate rows in order
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append all rows of `other` after the rows of `self`
    pub fn append(&mut self, other: Table<R>) {
        self.rows.extend(other.rows);
    }

    /// Write the table as CSV, header first
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record(R::COLUMNS)?;
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Read a table written by [`Table::write_csv`]
    ///
    /// # Errors
    /// Returns [`Error::SchemaMismatch`] when the header is not exactly `R::COLUMNS`.
    pub fn read_csv<Rd: io::Read>(reader: Rd) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let found: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();
        if found.iter().map(String::as_str).ne(R::COLUMNS.iter().copied()) {
            return Err(Error::SchemaMismatch {
                expected: R::COLUMNS.iter().map(|c| c.to_string()).collect(),
                found,
            });
        }

        let rows = csv_reader
            .deserialize()
            .collect::<std::result::Result<Vec<R>, csv::Error>>()?;
        Ok(Self { rows })
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
