use tracing::debug;

use crate::language::{Entry, Occurrence, ParsedReference, UofError};
use crate::parsing;
use crate::registry::{OccurrenceStore, Store};

/// The outcome of materializing a set of references for one entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Materialized {
    pub created: Vec<Occurrence>,
    pub duplicates: usize,
}

/// Create an occurrence of the entry for each parsed reference. References
/// that already exist for this entry are skipped and counted rather than
/// failing the batch.
pub fn materialize(
    store: &mut impl OccurrenceStore,
    entry: &Entry,
    references: &[ParsedReference],
) -> Result<Materialized, UofError> {
    let mut result = Materialized::default();

    for parsed in references {
        if store.occurrence_exists(entry.id, parsed.volume.id, &parsed.reference) {
            result.duplicates += 1;
            continue;
        }

        match store.insert_occurrence(entry.id, parsed.volume.id, parsed.reference.clone()) {
            Ok(occurrence) => result
                .created
                .push(occurrence),
            Err(UofError::DuplicateOccurrence { .. }) => result.duplicates += 1,
            Err(error) => return Err(error),
        }
    }

    if result.duplicates > 0 {
        debug!(entry = %entry.name, duplicates = result.duplicates, "skipped existing occurrences");
    }

    Ok(result)
}

/// Parse a UOF string and materialize the result for the given entry. If
/// the string is invalid nothing is created.
pub fn make_occurrences_from_string(
    store: &mut impl Store,
    entry: &Entry,
    text: &str,
) -> Result<Materialized, UofError> {
    let references = parsing::parse(&*store, text)?;
    materialize(store, entry, &references)
}
