//! Personal indexing of notebooks, books, and diaries.
//!
//! Occurrences are entered in Unified Occurrence Format (UOF), parsed and
//! validated against a catalog of sources and volumes, and materialized
//! into occurrences belonging to entries.

#[macro_use]
mod regex;

pub mod formatting;
pub mod indexing;
pub mod language;
pub mod parsing;
pub mod registry;
pub mod templating;
