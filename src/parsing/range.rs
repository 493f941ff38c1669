//! Expansion of collapsed page ranges such as `56-7`.

use crate::language::UofError;

/// Expand a collapsed range by borrowing leading digits from the first
/// number until the second is no longer smaller. Ranges that are already in
/// order come back unchanged.
pub fn uncollapse(first: u32, second: u32) -> Result<(u32, u32), UofError> {
    let digits = first.to_string();
    let mut borrowed = second.to_string();
    let mut expanded = second;

    while first > expanded {
        let place = borrowed.len();
        if place >= digits.len() {
            return Err(UofError::InvalidPageRange(format!("{}-{}", first, second)));
        }

        let digit = &digits[digits.len() - place - 1..digits.len() - place];
        borrowed.insert_str(0, digit);

        expanded = borrowed
            .parse()
            .map_err(|_| UofError::InvalidPageRange(format!("{}-{}", first, second)))?;
    }

    Ok((first, expanded))
}
