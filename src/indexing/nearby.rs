use tracing::{debug, warn};

use crate::language::{Entry, EntryId, Occurrence};
use crate::registry::Store;

/// Find the other entries with a page or range occurrence close to this one
/// in the same volume. The window is the occurrence's pages widened by the
/// source's nearby radius on both sides; a candidate range qualifies if any
/// part of it falls within the window. The occurrence itself is excluded,
/// but other occurrences of its entry are not.
///
/// Returns None for redirects, which have no position in a volume, and
/// nothing nearby if the occurrence's volume is gone.
pub fn nearby(store: &impl Store, occurrence: &Occurrence) -> Option<Vec<Entry>> {
    let start = occurrence
        .reference
        .start_page()?;
    let end = occurrence
        .reference
        .end_page()?;

    let source = store
        .volume(occurrence.volume)
        .and_then(|volume| store.source(volume.source));
    let (bottom, top) = match source {
        Some(source) => source.nearby_spread(start, end),
        None => {
            warn!(occurrence = occurrence.id.0, "occurrence without a volume or source");
            return Some(Vec::new());
        }
    };

    let mut seen: Vec<EntryId> = Vec::new();
    for candidate in store.occurrences_in_volume(occurrence.volume) {
        if candidate.id == occurrence.id {
            continue;
        }
        let (first, last) = match (
            candidate
                .reference
                .start_page(),
            candidate
                .reference
                .end_page(),
        ) {
            (Some(first), Some(last)) => (first, last),
            _ => continue,
        };
        if first <= top && last >= bottom && !seen.contains(&candidate.entry) {
            seen.push(candidate.entry);
        }
    }

    let mut entries: Vec<Entry> = seen
        .into_iter()
        .filter_map(|id| store.entry(id))
        .collect();
    entries.sort_by_key(|entry| {
        entry
            .sort_key
            .to_lowercase()
    });

    debug!(bottom, top, found = entries.len(), "nearby");
    Some(entries)
}
