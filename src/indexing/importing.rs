//! Batch import of entries and occurrences from tab-separated text. Each
//! line stands alone: a bad line is reported and skipped, and never undoes
//! the lines before it.

use std::path::Path;

use tracing::{debug, info};

use super::make_occurrences_from_string;
use crate::language::{EntryClassification, LoadingError, UofError};
use crate::parsing;
use crate::registry::Store;

/// A line that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportProblem {
    pub message: String,
    pub line: String,
    pub number: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Lines whose entry was found or created and whose occurrences were
    /// all recorded (or were already present).
    pub entries: usize,
    pub created: usize,
    pub duplicates: usize,
    pub problems: Vec<ImportProblem>,
}

/// Reported after each line has been processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub line: usize,
    pub total: usize,
}

/// Import every line of `content`. Lines have the form
///
/// ```text
/// entry name <TAB> UOF [<TAB> sort key]
/// ```
///
/// Blank lines and lines starting with `#` are skipped. Existing entries
/// are reused (their sort key is left alone); new entries take the sort key
/// from the third column, or their name if it is absent.
pub fn import<F>(store: &mut impl Store, content: &str, mut progress: F) -> ImportSummary
where
    F: FnMut(Progress),
{
    let mut summary = ImportSummary::default();
    let total = content
        .lines()
        .count();

    for (i, raw) in content
        .lines()
        .enumerate()
    {
        let number = i + 1;
        let line = raw.trim();

        if !(line.is_empty() || line.starts_with('#')) {
            match import_line(store, line) {
                Ok((created, duplicates)) => {
                    summary.entries += 1;
                    summary.created += created;
                    summary.duplicates += duplicates;
                }
                Err(message) => {
                    debug!(number, line, "rejected");
                    summary
                        .problems
                        .push(ImportProblem {
                            message,
                            line: line.to_string(),
                            number,
                        });
                }
            }
        }

        progress(Progress {
            line: number,
            total,
        });
    }

    info!(
        entries = summary.entries,
        created = summary.created,
        duplicates = summary.duplicates,
        problems = summary
            .problems
            .len(),
        "import finished"
    );
    summary
}

/// Read a file and import its content.
pub fn import_file<'i, F>(
    store: &mut impl Store,
    filename: &'i Path,
    progress: F,
) -> Result<ImportSummary, LoadingError<'i>>
where
    F: FnMut(Progress),
{
    let content = parsing::load(filename)?;
    Ok(import(store, &content, progress))
}

fn import_line(store: &mut impl Store, line: &str) -> Result<(usize, usize), String> {
    let columns: Vec<&str> = line
        .split('\t')
        .map(str::trim)
        .collect();

    let (name, uof, sort_key) = match columns[..] {
        [name, uof] => (name, uof, None),
        [name, uof, ""] => (name, uof, None),
        [name, uof, sort_key] => (name, uof, Some(sort_key)),
        _ => {
            return Err(
                "At least two tab-separated columns, entries and occurrences, are required."
                    .to_string(),
            )
        }
    };

    // validate before touching the store so a bad line leaves nothing behind
    parsing::parse(&*store, uof).map_err(describe)?;

    let (entry, fresh) = match store.entry_by_name(name) {
        Some(entry) => (entry, false),
        None => match store.create_entry(name, sort_key, EntryClassification::Unclassified) {
            Some(entry) => (entry, true),
            None => return Err(format!("The entry {} could not be created.", name)),
        },
    };

    match make_occurrences_from_string(store, &entry, uof) {
        Ok(result) => Ok((
            result
                .created
                .len(),
            result.duplicates,
        )),
        Err(error) => {
            if fresh {
                store.delete_entry(entry.id);
            }
            Err(describe(error))
        }
    }
}

fn describe(error: UofError) -> String {
    match error {
        UofError::InvalidFormat { .. } => "The occurrence (second) column does not contain valid \
            UOF. Please see the UOF section of the manual if you are unsure why you're getting \
            this error."
            .to_string(),
        other => other.to_string(),
    }
}
