//! Types representing sources, volumes, entries, and the occurrences tying
//! them together

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VolumeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OccurrenceId(pub u32);

/// An inclusive range of valid volume or page numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Bounds {
    pub min: u32,
    pub max: u32,
}

impl Bounds {
    pub fn new(min: u32, max: u32) -> Bounds {
        Bounds { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

impl From<(u32, u32)> for Bounds {
    fn from((min, max): (u32, u32)) -> Self {
        Bounds { min, max }
    }
}

impl From<Bounds> for (u32, u32) {
    fn from(bounds: Bounds) -> Self {
        (bounds.min, bounds.max)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} and {}", self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    #[default]
    Other,
    Book,
    NotebookType,
    ComputerFile,
    Diary,
}

/// A named collection of references: a book, a type of notebook, a diary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub id: SourceId,
    pub name: String,
    pub abbreviation: String,
    pub volumes: Bounds,
    pub pages: Bounds,
    pub nearby: u32,
    pub kind: SourceKind,
}

impl Source {
    /// A volume validation of exactly (1, 1) marks a source that has only
    /// one volume; in UOF its volume number may be omitted.
    pub fn is_single_volume(&self) -> bool {
        self.volumes.min == 1 && self.volumes.max == 1
    }

    pub fn is_valid_volume(&self, number: u32) -> bool {
        self.volumes
            .contains(number)
    }

    pub fn is_valid_page(&self, number: u32) -> bool {
        self.pages
            .contains(number)
    }

    /// The window of pages considered "nearby" a range of pages. This may
    /// extend past the page validation; it is only ever used for searching.
    pub fn nearby_spread(&self, start: u32, end: u32) -> (u32, u32) {
        (
            start.saturating_sub(self.nearby),
            end.saturating_add(self.nearby),
        )
    }
}

/// One numbered instance of a Source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    pub id: VolumeId,
    pub source: SourceId,
    pub number: u32,
    pub notes: String,
    pub opened: Option<NaiveDate>,
    pub closed: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryClassification {
    #[default]
    Unclassified,
    Ord,
    Person,
    Place,
    Quote,
    Title,
}

/// A named index term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    pub sort_key: String,
    pub classification: EntryClassification,
    pub added: NaiveDate,
    pub edited: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Number,
    Range,
    Redirect,
}

/// Where in a volume an occurrence points. Ranges are always stored
/// uncollapsed with the first page strictly smaller than the second.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    Number(u32),
    Range(u32, u32),
    Redirect(String),
}

impl Reference {
    pub fn kind(&self) -> ReferenceKind {
        match self {
            Reference::Number(_) => ReferenceKind::Number,
            Reference::Range(_, _) => ReferenceKind::Range,
            Reference::Redirect(_) => ReferenceKind::Redirect,
        }
    }

    /// The payload as it would be stored: a page number, a normalized
    /// "first-second" range, or the name of the entry redirected to.
    pub fn payload(&self) -> String {
        match self {
            Reference::Number(page) => page.to_string(),
            Reference::Range(first, second) => format!("{}-{}", first, second),
            Reference::Redirect(target) => target.clone(),
        }
    }

    /// First page for ranges, the page for numbers, nothing for redirects.
    pub fn start_page(&self) -> Option<u32> {
        match self {
            Reference::Number(page) => Some(*page),
            Reference::Range(first, _) => Some(*first),
            Reference::Redirect(_) => None,
        }
    }

    pub fn end_page(&self) -> Option<u32> {
        match self {
            Reference::Number(page) => Some(*page),
            Reference::Range(_, second) => Some(*second),
            Reference::Redirect(_) => None,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Redirect(target) => write!(f, "see {}", target),
            _ => write!(f, "{}", self.payload()),
        }
    }
}

/// A single reference from an Entry into a Volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub id: OccurrenceId,
    pub entry: EntryId,
    pub volume: VolumeId,
    pub reference: Reference,
    pub added: NaiveDate,
    pub edited: NaiveDate,
}

/// One validated reference produced from a UOF string. Together with an
/// Entry this is everything needed to create an Occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference {
    pub source: Source,
    pub volume: Volume,
    pub reference: Reference,
}
