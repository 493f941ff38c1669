use std::fmt;

use tracing::debug;

use crate::language::{Occurrence, OccurrenceId, Reference, UofError};
use crate::registry::Store;

/// Why an occurrence could not be extended or retracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    /// Redirects have no pages to move.
    Redirect,
    /// The end would fall before the first page.
    Retracted { reference: String, amount: i32 },
    /// The occurrence, or its volume or source, is no longer in the store.
    Missing(OccurrenceId),
    /// The entry already has an occurrence with the new reference.
    Duplicate(UofError),
}

impl fmt::Display for ExtensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionError::Redirect => write!(
                f,
                "You cannot extend or retract a redirect, as it has no page numbers to adjust. \
                 Try this operation on a page or range reference."
            ),
            ExtensionError::Retracted { reference, amount } => write!(
                f,
                "Retracting {} by {} would leave it ending before it begins.",
                reference,
                amount.unsigned_abs()
            ),
            ExtensionError::Missing(id) => write!(f, "The occurrence #{} does not exist.", id.0),
            ExtensionError::Duplicate(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for ExtensionError {}

/// Move the last page of an occurrence by `amount` pages. Extending a page
/// turns it into a range; retracting a range down to its first page turns
/// it back into a page. The new end never goes past the last valid page of
/// the source.
pub fn extend(
    store: &mut impl Store,
    id: OccurrenceId,
    amount: i32,
) -> Result<Occurrence, ExtensionError> {
    let occurrence = store
        .occurrence(id)
        .ok_or(ExtensionError::Missing(id))?;
    let source = store
        .volume(occurrence.volume)
        .and_then(|volume| store.source(volume.source))
        .ok_or(ExtensionError::Missing(id))?;

    let (start, end) = match occurrence.reference {
        Reference::Number(page) => (page, page),
        Reference::Range(first, last) => (first, last),
        Reference::Redirect(_) => return Err(ExtensionError::Redirect),
    };

    let moved = i64::from(end) + i64::from(amount);
    if moved < i64::from(start) {
        return Err(ExtensionError::Retracted {
            reference: occurrence
                .reference
                .payload(),
            amount,
        });
    }
    let moved = u32::try_from(moved)
        .unwrap_or(u32::MAX)
        .min(source.pages.max)
        .max(start);

    let reference = if moved == start {
        Reference::Number(start)
    } else {
        Reference::Range(start, moved)
    };
    if reference == occurrence.reference {
        return Ok(occurrence);
    }

    debug!(from = %occurrence.reference, to = %reference, "extending occurrence");
    match store.update_occurrence(id, reference) {
        Ok(Some(updated)) => Ok(updated),
        Ok(None) => Err(ExtensionError::Missing(id)),
        Err(error) => Err(ExtensionError::Duplicate(error)),
    }
}
