//! Templates for rendering the index into printable output

use serde::Serialize;
use tracing::warn;

mod mindex;
mod plain;
mod template;

pub use mindex::Mindex;
pub use plain::Plain;
pub use template::Template;

use crate::formatting::render_uof;
use crate::language::Occurrence;
use crate::registry::Store;

/// The content of an index, ready to be handed to a template.
#[derive(Debug, Serialize)]
pub struct Index {
    pub entries: Vec<IndexEntry>,
}

#[derive(Debug, Serialize)]
pub struct IndexEntry {
    pub name: String,
    pub sort_key: String,
    /// Occurrences in strict UOF, separated by "; ".
    pub references: String,
    /// The same occurrences as one UOF string, separated by " | ".
    pub uof: String,
}

/// Render every entry in the store using the specified template. Entries are
/// ordered by sort key ignoring case; each entry's occurrences are ordered
/// by source abbreviation, volume, and page.
pub fn fill(template: &impl Template, store: &impl Store) -> Result<String, tinytemplate::error::Error> {
    let index = collect(store);
    template.render(&index)
}

fn collect(store: &impl Store) -> Index {
    let mut entries = store.entries();
    entries.sort_by_key(|entry| {
        entry
            .sort_key
            .to_lowercase()
    });

    let entries = entries
        .iter()
        .map(|entry| {
            let mut rendered: Vec<((String, u32, u32, String), String)> = store
                .occurrences_of_entry(entry.id)
                .iter()
                .filter_map(|occurrence| describe(store, occurrence))
                .collect();
            rendered.sort();

            let texts: Vec<String> = rendered
                .into_iter()
                .map(|(_, text)| text)
                .collect();

            IndexEntry {
                name: entry
                    .name
                    .clone(),
                sort_key: entry
                    .sort_key
                    .clone(),
                references: texts.join("; "),
                uof: texts.join(" | "),
            }
        })
        .collect();

    Index { entries }
}

/// Sort key and strict UOF of one occurrence.
fn describe(
    store: &impl Store,
    occurrence: &Occurrence,
) -> Option<((String, u32, u32, String), String)> {
    let volume = store.volume(occurrence.volume)?;
    let source = match store.source(volume.source) {
        Some(source) => source,
        None => {
            warn!(volume = volume.number, "volume without a source");
            return None;
        }
    };

    let key = (
        source
            .abbreviation
            .to_lowercase(),
        volume.number,
        occurrence
            .reference
            .start_page()
            .unwrap_or(0),
        occurrence
            .reference
            .payload(),
    );
    let text = render_uof(&source, &volume, &occurrence.reference);

    Some((key, text))
}
