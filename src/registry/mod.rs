//! Lookup and storage services the UOF core depends on. The core never
//! manages storage itself; it is handed implementations of these traits.

use tracing::debug;

use crate::language::{
    Entry, EntryClassification, EntryId, Occurrence, OccurrenceId, Reference, Source, SourceId,
    UofError, Volume, VolumeId,
};

mod config;
mod error;
mod memory;

pub use config::*;
pub use error::*;
pub use memory::*;

pub trait SourceRegistry {
    fn source(&self, id: SourceId) -> Option<Source>;

    fn source_by_abbreviation(&self, abbreviation: &str) -> Option<Source>;

    fn source_by_name(&self, name: &str) -> Option<Source>;
}

pub trait VolumeRegistry {
    fn volume(&self, id: VolumeId) -> Option<Volume>;

    fn volume_by_number(&self, source: SourceId, number: u32) -> Option<Volume>;
}

pub trait EntryStore {
    fn entry(&self, id: EntryId) -> Option<Entry>;

    fn entry_by_name(&self, name: &str) -> Option<Entry>;

    /// All entries, in no particular order.
    fn entries(&self) -> Vec<Entry>;

    /// Create an entry, with the sort key defaulting to the name. Returns
    /// None, leaving the store untouched, if an entry of that name exists.
    fn create_entry(
        &mut self,
        name: &str,
        sort_key: Option<&str>,
        classification: EntryClassification,
    ) -> Option<Entry>;

    /// Give an entry a new name. Returns None, leaving the store untouched,
    /// if the entry does not exist or another entry already has that name.
    fn rename_entry(&mut self, id: EntryId, name: &str) -> Option<Entry>;

    /// Delete an entry along with all of its occurrences.
    fn delete_entry(&mut self, id: EntryId);
}

pub trait OccurrenceStore {
    fn occurrence(&self, id: OccurrenceId) -> Option<Occurrence>;

    fn occurrence_exists(&self, entry: EntryId, volume: VolumeId, reference: &Reference) -> bool;

    /// Create a new occurrence, failing with DuplicateOccurrence if an
    /// identical one is already present.
    fn insert_occurrence(
        &mut self,
        entry: EntryId,
        volume: VolumeId,
        reference: Reference,
    ) -> Result<Occurrence, UofError>;

    /// Replace the reference of an existing occurrence, failing with
    /// DuplicateOccurrence if its entry already has that reference in the
    /// same volume.
    fn update_occurrence(
        &mut self,
        id: OccurrenceId,
        reference: Reference,
    ) -> Result<Option<Occurrence>, UofError>;

    fn delete_occurrence(&mut self, id: OccurrenceId);

    fn occurrences_in_volume(&self, volume: VolumeId) -> Vec<Occurrence>;

    fn occurrences_of_entry(&self, entry: EntryId) -> Vec<Occurrence>;

    fn occurrences(&self) -> Vec<Occurrence>;
}

/// Everything needed to both parse UOF and record the occurrences it
/// describes.
pub trait Store: SourceRegistry + VolumeRegistry + EntryStore + OccurrenceStore {}

impl<T> Store for T where T: SourceRegistry + VolumeRegistry + EntryStore + OccurrenceStore {}

/// Find the source a UOF string refers to. Abbreviations are consulted
/// first, so a source whose full name happens to equal another source's
/// abbreviation can only be reached by its own abbreviation.
pub fn resolve_source(registry: &impl SourceRegistry, text: &str) -> Result<Source, UofError> {
    if let Some(source) = registry.source_by_abbreviation(text) {
        return Ok(source);
    }
    match registry.source_by_name(text) {
        Some(source) => Ok(source),
        None => {
            debug!(text, "no such source");
            Err(UofError::NonexistentSource(text.to_string()))
        }
    }
}
