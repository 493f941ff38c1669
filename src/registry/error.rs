use std::fmt;

use crate::language::{Bounds, UofError};

/// Problems building or modifying a catalog of sources and volumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    DuplicateName(String),
    DuplicateAbbreviation(String),
    /// Names and abbreviations cannot contain '|', which separates clauses
    /// in UOF.
    InvalidName(String),
    InvalidBounds(&'static str, Bounds),
    DiaryExists(String),
    SingleVolume(String),
    VolumeOutOfRange {
        source: String,
        number: u32,
        bounds: Bounds,
    },
    DuplicateVolume {
        source: String,
        number: u32,
    },
    UnknownSource(String),
    Malformed(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicateName(name) => {
                write!(f, "the name {} is already used for a different source", name)
            }
            CatalogError::DuplicateAbbreviation(abbreviation) => write!(
                f,
                "the abbreviation {} is already used for a different source",
                abbreviation
            ),
            CatalogError::InvalidName(name) => write!(
                f,
                "the name {} is invalid: a source name cannot contain the character '|'",
                name
            ),
            CatalogError::InvalidBounds(what, bounds) => write!(
                f,
                "the {} range {}-{} ends lower than it begins",
                what, bounds.min, bounds.max
            ),
            CatalogError::DiaryExists(name) => write!(
                f,
                "there can only be one diary source, and yours is named {}",
                name
            ),
            CatalogError::SingleVolume(name) => {
                write!(f, "the source {} does not have multiple volumes", name)
            }
            CatalogError::VolumeOutOfRange {
                source,
                number,
                bounds,
            } => write!(
                f,
                "volume {} is invalid; the source {} only allows volume numbers between {}",
                number, source, bounds
            ),
            CatalogError::DuplicateVolume { source, number } => {
                write!(f, "volume {} of source {} already exists", number, source)
            }
            CatalogError::UnknownSource(text) => write!(f, "{}", UofError::NonexistentSource(text.clone())),
            CatalogError::Malformed(message) => write!(f, "malformed catalog: {}", message),
        }
    }
}

impl std::error::Error for CatalogError {}
