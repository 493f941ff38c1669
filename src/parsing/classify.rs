//! Classify each expanded reference as a page number, a page range, or a
//! redirect, then validate it against the source and volume it names.

use tracing::debug;

use crate::language::{ParsedReference, Reference, Source, Subject, UofError};
use crate::parsing::parser::redirect_keyword;
use crate::parsing::range::uncollapse;
use crate::registry::{resolve_source, SourceRegistry, VolumeRegistry};

/// Turn one reference (after brace expansion) belonging to the given source
/// text into a validated ParsedReference. Syntax is checked before any
/// lookups are made; the volume lookup comes last.
pub fn classify<R>(registry: &R, source: &str, item: &str) -> Result<ParsedReference, UofError>
where
    R: SourceRegistry + VolumeRegistry,
{
    let (number, page) = split_volume(item)?;
    let reference = classify_page(page)?;

    let source = resolve_source(registry, source)?;
    validate(&source, number, &reference)?;

    let volume = registry
        .volume_by_number(source.id, number)
        .ok_or_else(|| UofError::NonexistentVolume {
            source: source
                .name
                .clone(),
            volume: number,
        })?;

    debug!(source = %source.abbreviation, volume = number, reference = %reference);

    Ok(ParsedReference {
        source,
        volume,
        reference,
    })
}

/// Separate the volume number from the page part. Without a '.' the volume
/// is taken to be 1. Redirect targets may contain periods of their own, so
/// further periods are only allowed when a redirect is present.
pub(crate) fn split_volume(item: &str) -> Result<(u32, &str), UofError> {
    let dot = match item.find('.') {
        Some(dot) => dot,
        None => return Ok((1, item.trim())),
    };

    let left = item[..dot].trim();
    let right = item[dot + 1..].trim();

    match left.parse::<u32>() {
        Ok(number) => {
            if right.contains('.') && redirect_keyword(right).is_none() {
                Err(UofError::invalid(item, "a single '.' between volume and page"))
            } else {
                Ok((number, right))
            }
        }
        Err(_) => {
            if redirect_keyword(item).is_some() {
                Ok((1, item.trim()))
            } else {
                Err(UofError::invalid(item, "a volume number before the '.'"))
            }
        }
    }
}

/// Determine the kind of reference from the page part alone.
pub(crate) fn classify_page(page: &str) -> Result<Reference, UofError> {
    let re = regex!(r"^see\s+");
    if let Some(m) = re.find(page) {
        let target = page[m.end()..].trim();
        if target.is_empty() {
            return Err(UofError::invalid(page, "the name of an entry after \"see\""));
        }
        return Ok(Reference::Redirect(target.to_string()));
    }

    if page.contains('-') || page.contains('–') {
        let normalized = page.replace('–', "-");
        let re = regex!(r"-+");
        let normalized = re.replace_all(&normalized, "-");

        let parts: Vec<&str> = normalized
            .split('-')
            .map(str::trim)
            .collect();
        if parts.len() != 2 {
            return Err(UofError::invalid(page, "two page numbers joined by a hyphen"));
        }

        let first = parse_page(page, parts[0])?;
        let second = parse_page(page, parts[1])?;

        let (first, second) =
            uncollapse(first, second).map_err(|_| UofError::InvalidPageRange(page.to_string()))?;
        if first >= second {
            return Err(UofError::InvalidPageRange(page.to_string()));
        }
        return Ok(Reference::Range(first, second));
    }

    Ok(Reference::Number(parse_page(page, page)?))
}

fn parse_page(page: &str, digits: &str) -> Result<u32, UofError> {
    if digits.is_empty()
        || !digits
            .chars()
            .all(|c| c.is_ascii_digit())
    {
        return Err(UofError::invalid(page, "a page number"));
    }
    digits
        .parse()
        .map_err(|_| UofError::invalid(page, "a page number"))
}

fn validate(source: &Source, volume: u32, reference: &Reference) -> Result<(), UofError> {
    let out_of_bounds = |subject: Subject, value: u32| UofError::InvalidReference {
        subject,
        value,
        source: source
            .name
            .clone(),
        bounds: match subject {
            Subject::Volume => source.volumes,
            Subject::Page | Subject::PageRange => source.pages,
        },
    };

    if !source.is_valid_volume(volume) {
        return Err(out_of_bounds(Subject::Volume, volume));
    }

    match reference {
        Reference::Number(page) => {
            if !source.is_valid_page(*page) {
                return Err(out_of_bounds(Subject::Page, *page));
            }
        }
        Reference::Range(first, second) => {
            for page in [*first, *second] {
                if !source.is_valid_page(page) {
                    return Err(out_of_bounds(Subject::PageRange, page));
                }
            }
        }
        // targets are not required to exist yet
        Reference::Redirect(_) => {}
    }

    Ok(())
}
