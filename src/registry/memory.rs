use std::collections::{BTreeMap, HashMap};

use chrono::{Local, NaiveDate};
use tracing::debug;

use super::{CatalogError, EntryStore, OccurrenceStore, SourceRegistry, VolumeRegistry};
use crate::language::*;

/// Everything needed to create a Source; the id is assigned by the catalog.
#[derive(Debug, Clone)]
pub struct NewSource<'a> {
    pub name: &'a str,
    pub abbreviation: &'a str,
    pub volumes: Bounds,
    pub pages: Bounds,
    pub nearby: u32,
    pub kind: SourceKind,
}

/// An in-memory catalog of sources, volumes, entries, and occurrences
/// implementing every repository trait the core needs.
#[derive(Debug, Default)]
pub struct Catalog {
    sources: BTreeMap<SourceId, Source>,
    abbreviations: HashMap<String, SourceId>,
    names: HashMap<String, SourceId>,
    volumes: BTreeMap<VolumeId, Volume>,
    numbers: HashMap<(SourceId, u32), VolumeId>,
    entries: BTreeMap<EntryId, Entry>,
    entry_names: HashMap<String, EntryId>,
    occurrences: BTreeMap<OccurrenceId, Occurrence>,
    next: u32,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl Catalog {
    pub fn new() -> Catalog {
        Catalog::default()
    }

    fn allocate(&mut self) -> u32 {
        self.next += 1;
        self.next
    }

    /// Add a source. Single-volume sources get their one volume created at
    /// the same time.
    pub fn add_source(&mut self, fields: NewSource<'_>) -> Result<Source, CatalogError> {
        if self
            .names
            .contains_key(fields.name)
        {
            return Err(CatalogError::DuplicateName(fields.name.to_string()));
        }
        if self
            .abbreviations
            .contains_key(fields.abbreviation)
        {
            return Err(CatalogError::DuplicateAbbreviation(
                fields.abbreviation
                    .to_string(),
            ));
        }
        if !fields
            .volumes
            .is_ordered()
        {
            return Err(CatalogError::InvalidBounds("volume", fields.volumes));
        }
        if !fields
            .pages
            .is_ordered()
        {
            return Err(CatalogError::InvalidBounds("page", fields.pages));
        }
        for text in [fields.name, fields.abbreviation] {
            if text.contains('|') {
                return Err(CatalogError::InvalidName(text.to_string()));
            }
        }
        if fields.kind == SourceKind::Diary {
            if let Some(diary) = self
                .sources
                .values()
                .find(|source| source.kind == SourceKind::Diary)
            {
                return Err(CatalogError::DiaryExists(
                    diary
                        .name
                        .clone(),
                ));
            }
        }

        let id = SourceId(self.allocate());
        let source = Source {
            id,
            name: fields
                .name
                .to_string(),
            abbreviation: fields
                .abbreviation
                .to_string(),
            volumes: fields.volumes,
            pages: fields.pages,
            nearby: fields.nearby,
            kind: fields.kind,
        };

        self.names
            .insert(
                source
                    .name
                    .clone(),
                id,
            );
        self.abbreviations
            .insert(
                source
                    .abbreviation
                    .clone(),
                id,
            );
        self.sources
            .insert(id, source.clone());

        if source.is_single_volume() {
            self.insert_volume(&source, 1, "", None, None);
        }

        debug!(name = %source.name, abbreviation = %source.abbreviation, "added source");
        Ok(source)
    }

    pub fn add_volume(
        &mut self,
        source: SourceId,
        number: u32,
        notes: &str,
        opened: Option<NaiveDate>,
        closed: Option<NaiveDate>,
    ) -> Result<Volume, CatalogError> {
        let source = self
            .sources
            .get(&source)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownSource(format!("#{}", source.0)))?;

        if source.is_single_volume() {
            return Err(CatalogError::SingleVolume(source.name));
        }
        if !source.is_valid_volume(number) {
            return Err(CatalogError::VolumeOutOfRange {
                source: source.name,
                number,
                bounds: source.volumes,
            });
        }
        if self
            .numbers
            .contains_key(&(source.id, number))
        {
            return Err(CatalogError::DuplicateVolume {
                source: source.name,
                number,
            });
        }

        Ok(self.insert_volume(&source, number, notes, opened, closed))
    }

    fn insert_volume(
        &mut self,
        source: &Source,
        number: u32,
        notes: &str,
        opened: Option<NaiveDate>,
        closed: Option<NaiveDate>,
    ) -> Volume {
        let id = VolumeId(self.allocate());
        let volume = Volume {
            id,
            source: source.id,
            number,
            notes: notes.to_string(),
            opened,
            closed,
        };
        self.numbers
            .insert((source.id, number), id);
        self.volumes
            .insert(id, volume.clone());
        volume
    }

    pub fn sources(&self) -> Vec<Source> {
        let mut sources: Vec<Source> = self
            .sources
            .values()
            .cloned()
            .collect();
        sources.sort_by_key(|source| {
            source
                .name
                .to_lowercase()
        });
        sources
    }

    pub fn volumes_in_source(&self, source: SourceId) -> Vec<Volume> {
        self.volumes
            .values()
            .filter(|volume| volume.source == source)
            .cloned()
            .collect()
    }

    /// Delete a volume and every occurrence in it. Entries left without any
    /// occurrence are removed as well.
    pub fn delete_volume(&mut self, id: VolumeId) {
        self.occurrences
            .retain(|_, occurrence| occurrence.volume != id);
        if let Some(volume) = self
            .volumes
            .remove(&id)
        {
            self.numbers
                .remove(&(volume.source, volume.number));
        }
        self.delete_orphaned_entries();
    }

    /// Remove all entries that no longer have any occurrences, returning how
    /// many were removed.
    pub fn delete_orphaned_entries(&mut self) -> usize {
        let orphans: Vec<EntryId> = self
            .entries
            .keys()
            .filter(|id| {
                !self
                    .occurrences
                    .values()
                    .any(|occurrence| occurrence.entry == **id)
            })
            .copied()
            .collect();

        for id in &orphans {
            self.delete_entry(*id);
        }
        orphans.len()
    }
}

#[cfg(test)]
impl Catalog {
    /// A catalog with one multi-volume diary and three single-volume
    /// sources, used throughout the unit tests.
    pub(crate) fn sample() -> Catalog {
        let mut catalog = Catalog::new();

        let chrono = catalog
            .add_source(NewSource {
                name: "Chrono Book",
                abbreviation: "CB",
                volumes: Bounds::new(1, 100),
                pages: Bounds::new(5, 80),
                nearby: 2,
                kind: SourceKind::Diary,
            })
            .unwrap();
        catalog
            .add_source(NewSource {
                name: "Random Thoughts",
                abbreviation: "RT",
                volumes: Bounds::new(1, 1),
                pages: Bounds::new(1, 20000),
                nearby: 2,
                kind: SourceKind::ComputerFile,
            })
            .unwrap();
        catalog
            .add_source(NewSource {
                name: "The Invisible Man",
                abbreviation: "TIM",
                volumes: Bounds::new(1, 1),
                pages: Bounds::new(1, 200),
                nearby: 3,
                kind: SourceKind::Book,
            })
            .unwrap();
        catalog
            .add_source(NewSource {
                name: "The 160th Book",
                abbreviation: "T1B",
                volumes: Bounds::new(1, 1),
                pages: Bounds::new(1, 200),
                nearby: 3,
                kind: SourceKind::Book,
            })
            .unwrap();

        catalog
            .add_volume(
                chrono.id,
                1,
                "",
                NaiveDate::from_ymd_opt(2015, 6, 1),
                NaiveDate::from_ymd_opt(2015, 7, 6),
            )
            .unwrap();
        catalog
            .add_volume(
                chrono.id,
                2,
                "",
                NaiveDate::from_ymd_opt(2015, 7, 7),
                NaiveDate::from_ymd_opt(2015, 8, 10),
            )
            .unwrap();

        catalog
    }
}

impl SourceRegistry for Catalog {
    fn source(&self, id: SourceId) -> Option<Source> {
        self.sources
            .get(&id)
            .cloned()
    }

    fn source_by_abbreviation(&self, abbreviation: &str) -> Option<Source> {
        self.abbreviations
            .get(abbreviation)
            .and_then(|id| self.source(*id))
    }

    fn source_by_name(&self, name: &str) -> Option<Source> {
        self.names
            .get(name)
            .and_then(|id| self.source(*id))
    }
}

impl VolumeRegistry for Catalog {
    fn volume(&self, id: VolumeId) -> Option<Volume> {
        self.volumes
            .get(&id)
            .cloned()
    }

    fn volume_by_number(&self, source: SourceId, number: u32) -> Option<Volume> {
        self.numbers
            .get(&(source, number))
            .and_then(|id| self.volume(*id))
    }
}

impl EntryStore for Catalog {
    fn entry(&self, id: EntryId) -> Option<Entry> {
        self.entries
            .get(&id)
            .cloned()
    }

    fn entry_by_name(&self, name: &str) -> Option<Entry> {
        self.entry_names
            .get(name)
            .and_then(|id| self.entry(*id))
    }

    fn entries(&self) -> Vec<Entry> {
        self.entries
            .values()
            .cloned()
            .collect()
    }

    fn create_entry(
        &mut self,
        name: &str,
        sort_key: Option<&str>,
        classification: EntryClassification,
    ) -> Option<Entry> {
        if self
            .entry_names
            .contains_key(name)
        {
            return None;
        }

        let id = EntryId(self.allocate());
        let date = today();
        let entry = Entry {
            id,
            name: name.to_string(),
            sort_key: sort_key
                .unwrap_or(name)
                .to_string(),
            classification,
            added: date,
            edited: date,
        };
        self.entry_names
            .insert(name.to_string(), id);
        self.entries
            .insert(id, entry.clone());
        Some(entry)
    }

    fn rename_entry(&mut self, id: EntryId, name: &str) -> Option<Entry> {
        if self
            .entry_names
            .get(name)
            .is_some_and(|other| *other != id)
        {
            return None;
        }
        let entry = self
            .entries
            .get_mut(&id)?;

        self.entry_names
            .remove(&entry.name);
        self.entry_names
            .insert(name.to_string(), id);
        entry.name = name.to_string();
        entry.edited = today();

        debug!(id = id.0, to = name, "renamed entry");
        Some(entry.clone())
    }

    fn delete_entry(&mut self, id: EntryId) {
        self.occurrences
            .retain(|_, occurrence| occurrence.entry != id);
        if let Some(entry) = self
            .entries
            .remove(&id)
        {
            self.entry_names
                .remove(&entry.name);
        }
    }
}

impl OccurrenceStore for Catalog {
    fn occurrence(&self, id: OccurrenceId) -> Option<Occurrence> {
        self.occurrences
            .get(&id)
            .cloned()
    }

    fn occurrence_exists(&self, entry: EntryId, volume: VolumeId, reference: &Reference) -> bool {
        self.occurrences
            .values()
            .any(|occurrence| {
                occurrence.entry == entry
                    && occurrence.volume == volume
                    && occurrence.reference == *reference
            })
    }

    fn insert_occurrence(
        &mut self,
        entry: EntryId,
        volume: VolumeId,
        reference: Reference,
    ) -> Result<Occurrence, UofError> {
        if self.occurrence_exists(entry, volume, &reference) {
            return Err(UofError::DuplicateOccurrence {
                entry,
                volume,
                reference: reference.payload(),
            });
        }

        let id = OccurrenceId(self.allocate());
        let date = today();
        let occurrence = Occurrence {
            id,
            entry,
            volume,
            reference,
            added: date,
            edited: date,
        };
        self.occurrences
            .insert(id, occurrence.clone());
        Ok(occurrence)
    }

    fn update_occurrence(
        &mut self,
        id: OccurrenceId,
        reference: Reference,
    ) -> Result<Option<Occurrence>, UofError> {
        let (entry, volume) = match self
            .occurrences
            .get(&id)
        {
            Some(occurrence) => (occurrence.entry, occurrence.volume),
            None => return Ok(None),
        };

        let clash = self
            .occurrences
            .values()
            .any(|other| {
                other.id != id
                    && other.entry == entry
                    && other.volume == volume
                    && other.reference == reference
            });
        if clash {
            return Err(UofError::DuplicateOccurrence {
                entry,
                volume,
                reference: reference.payload(),
            });
        }

        Ok(self
            .occurrences
            .get_mut(&id)
            .map(|occurrence| {
                occurrence.reference = reference;
                occurrence.edited = today();
                occurrence.clone()
            }))
    }

    fn delete_occurrence(&mut self, id: OccurrenceId) {
        self.occurrences
            .remove(&id);
    }

    fn occurrences_in_volume(&self, volume: VolumeId) -> Vec<Occurrence> {
        self.occurrences
            .values()
            .filter(|occurrence| occurrence.volume == volume)
            .cloned()
            .collect()
    }

    fn occurrences_of_entry(&self, entry: EntryId) -> Vec<Occurrence> {
        self.occurrences
            .values()
            .filter(|occurrence| occurrence.entry == entry)
            .cloned()
            .collect()
    }

    fn occurrences(&self) -> Vec<Occurrence> {
        self.occurrences
            .values()
            .cloned()
            .collect()
    }
}
