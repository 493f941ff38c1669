//! parser for Unified Occurrence Format

use std::path::Path;
use tracing::debug;

use crate::formatting::render_uof;
use crate::language::{LoadingError, ParsedReference, UofError};
use crate::registry::{SourceRegistry, VolumeRegistry};

pub mod classify;
pub mod parser;
pub mod range;
mod scope;


/// Read a file and return an owned String. We pass that ownership back to the
/// main function so that anything parsed from it can borrow from the content.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Parse a UOF string into validated references, in the order they appear.
/// The first problem encountered aborts the whole string.
pub fn parse<R>(registry: &R, text: &str) -> Result<Vec<ParsedReference>, UofError>
where
    R: SourceRegistry + VolumeRegistry,
{
    let clauses = parser::split(text)?;

    let mut references = Vec::new();
    for clause in &clauses {
        for item in parser::expand(clause.reference)? {
            let reference = classify::classify(registry, clause.source, &item)?;
            references.push(reference);
        }
    }

    debug!(
        "Found {} reference{} in {} clause{}",
        references.len(),
        if references.len() == 1 { "" } else { "s" },
        clauses.len(),
        if clauses.len() == 1 { "" } else { "s" }
    );

    Ok(references)
}

/// Describe what a UOF string would create, one strict UOF string per
/// reference, without touching any store.
pub fn preview<R>(registry: &R, text: &str) -> Result<Vec<String>, UofError>
where
    R: SourceRegistry + VolumeRegistry,
{
    let references = parse(registry, text)?;

    Ok(references
        .iter()
        .map(|parsed| render_uof(&parsed.source, &parsed.volume, &parsed.reference))
        .collect())
}
