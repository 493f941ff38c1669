use tracing::debug;

use crate::language::{Entry, EntryId, Occurrence, Reference};
use crate::registry::Store;

/// All redirects whose target does not match the name of any entry. These
/// are allowed to exist since entries may be added in any order, but a
/// finished index should have none.
pub fn broken_redirects(store: &impl Store) -> Vec<Occurrence> {
    store
        .occurrences()
        .into_iter()
        .filter(|occurrence| match &occurrence.reference {
            Reference::Redirect(target) => store
                .entry_by_name(target)
                .is_none(),
            _ => false,
        })
        .collect()
}

/// Point every redirect targeting `old` at `new` instead, returning how many
/// were changed. A redirect that would duplicate one its entry already has
/// is removed.
pub fn retarget_redirects(store: &mut impl Store, old: &str, new: &str) -> usize {
    let stale: Vec<Occurrence> = store
        .occurrences()
        .into_iter()
        .filter(|occurrence| {
            matches!(&occurrence.reference, Reference::Redirect(target) if target == old)
        })
        .collect();

    for occurrence in &stale {
        let reference = Reference::Redirect(new.to_string());
        if store
            .update_occurrence(occurrence.id, reference)
            .is_err()
        {
            store.delete_occurrence(occurrence.id);
        }
    }

    debug!(old, new, changed = stale.len(), "retargeted redirects");
    stale.len()
}

/// Rename an entry and keep the redirects pointing at it working. Returns
/// None if there is no such entry or the new name is already taken.
pub fn rename(store: &mut impl Store, id: EntryId, name: &str) -> Option<Entry> {
    let old = store.entry(id)?;
    let renamed = store.rename_entry(id, name)?;
    retarget_redirects(store, &old.name, name);
    Some(renamed)
}
