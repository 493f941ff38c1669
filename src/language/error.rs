use std::{fmt, path::Path};

use super::{Bounds, EntryId, VolumeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
}

impl<'i> fmt::Display for LoadingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.problem, self.details)
    }
}

/// Which number in a reference failed its source's validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Volume,
    Page,
    PageRange,
}

impl Subject {
    fn noun(&self) -> &'static str {
        match self {
            Subject::Volume => "volume",
            Subject::Page | Subject::PageRange => "page",
        }
    }

    fn plural(&self) -> &'static str {
        match self {
            Subject::Volume => "volumes",
            Subject::Page | Subject::PageRange => "pages",
        }
    }
}

/// Everything that can go wrong turning a UOF string into occurrences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UofError {
    /// The text does not follow the UOF grammar.
    InvalidFormat {
        fragment: String,
        expected: &'static str,
    },
    /// The second number of a range is not larger than the first, even after
    /// uncollapsing.
    InvalidPageRange(String),
    /// Neither an abbreviation nor a full source name.
    NonexistentSource(String),
    NonexistentVolume {
        source: String,
        volume: u32,
    },
    /// A volume or page outside the source's validation parameters.
    InvalidReference {
        subject: Subject,
        value: u32,
        source: String,
        bounds: Bounds,
    },
    DuplicateOccurrence {
        entry: EntryId,
        volume: VolumeId,
        reference: String,
    },
}

impl UofError {
    pub(crate) fn invalid(fragment: &str, expected: &'static str) -> UofError {
        UofError::InvalidFormat {
            fragment: fragment.to_string(),
            expected,
        }
    }

    /// The piece of the original input this error is about, if it can be
    /// pointed at.
    pub fn fragment(&self) -> Option<String> {
        match self {
            UofError::InvalidFormat { fragment, .. } => Some(fragment.clone()),
            UofError::InvalidPageRange(text) => Some(text.clone()),
            UofError::NonexistentSource(text) => Some(text.clone()),
            UofError::NonexistentVolume { volume, .. } => Some(volume.to_string()),
            UofError::InvalidReference { value, .. } => Some(value.to_string()),
            UofError::DuplicateOccurrence { .. } => None,
        }
    }
}

impl fmt::Display for UofError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UofError::InvalidFormat { fragment, expected } => {
                write!(f, "Invalid UOF: expected {} in \"{}\".", expected, fragment)
            }
            UofError::InvalidPageRange(text) => write!(
                f,
                "The second number in a range must be larger than the first ({}).",
                text
            ),
            UofError::NonexistentSource(text) => write!(
                f,
                "The abbreviation or source name {} does not exist.",
                text
            ),
            UofError::NonexistentVolume { source, volume } => write!(
                f,
                "The volume {} in source {} does not exist.",
                volume, source
            ),
            UofError::InvalidReference {
                subject,
                value,
                source,
                bounds,
            } => write!(
                f,
                "The {} {} does not meet the validation parameters for {}, which state that {} must be between {}.",
                subject.noun(),
                value,
                source,
                subject.plural(),
                bounds
            ),
            UofError::DuplicateOccurrence { .. } => write!(f, "That occurrence already exists."),
        }
    }
}

impl std::error::Error for UofError {}
