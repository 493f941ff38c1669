//! Splitting a UOF string into clauses, each with a source part and a
//! reference part, and expanding brace lists within a reference part.

use crate::language::UofError;
use crate::parsing::scope::{Layer, Scope};

/// One pipe-separated clause of a UOF string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause<'i> {
    pub source: &'i str,
    pub reference: &'i str,
}

/// Characters which lose their special meaning when preceded by a
/// backslash. Any other backslash is kept as written.
pub(crate) const ESCAPABLE: &[char] = &['\\', ',', '{', '}', ':', '|'];

/// Split a UOF string into its clauses. Brace lists in the reference part
/// are left for `expand()`.
pub fn split(input: &str) -> Result<Vec<Clause<'_>>, UofError> {
    let pieces = split_pipes(input);

    if pieces.len() == 1 {
        return Ok(vec![split_clause(input.trim())?]);
    }

    let mut clauses = Vec::new();
    for piece in pieces {
        clauses.extend(split(piece.trim())?);
    }
    Ok(clauses)
}

/// Break on every '|' that isn't escaped.
fn split_pipes(input: &str) -> Vec<&str> {
    let mut scope = Scope::new();
    let mut pieces = Vec::new();
    let mut begin = 0;

    for (i, c) in input.char_indices() {
        match scope.current() {
            Layer::Escape => {
                scope.pop();
            }
            _ => match c {
                '\\' => scope.push(Layer::Escape),
                '|' => {
                    pieces.push(&input[begin..i]);
                    begin = i + 1;
                }
                _ => {}
            },
        }
    }
    pieces.push(&input[begin..]);

    pieces
}

fn split_clause(text: &str) -> Result<Clause<'_>, UofError> {
    if text.is_empty() {
        return Err(UofError::invalid(text, "a source followed by a reference"));
    }

    let (source, reference) = match find_colon(text) {
        Some(i) => (text[..i].trim(), text[i + 1..].trim()),
        None => split_colonless(text)?,
    };

    if source.is_empty() {
        return Err(UofError::invalid(text, "a source name or abbreviation"));
    }
    if reference.is_empty() {
        return Err(UofError::invalid(text, "a reference after the source"));
    }

    Ok(Clause { source, reference })
}

/// Find the colon separating source from reference. Source names may
/// contain colons, so this is the last one outside of braces, except that
/// once a redirect has begun the rest of the text is its target and any
/// colons there belong to it. A redirect begins at a "see" following a
/// colon, or following a volume number and its '.'.
fn find_colon(text: &str) -> Option<usize> {
    let keywords = redirect_keywords(text);

    let mut scope = Scope::new();
    let mut colon = None;

    for (i, c) in text.char_indices() {
        match scope.current() {
            Layer::Escape => {
                scope.pop();
            }
            Layer::Brace => match c {
                '\\' => scope.push(Layer::Escape),
                '{' => scope.push(Layer::Brace),
                '}' => {
                    scope.pop();
                }
                _ => {}
            },
            Layer::Reference => match c {
                '\\' => scope.push(Layer::Escape),
                '{' => scope.push(Layer::Brace),
                _ => {}
            },
            Layer::Source => {
                if keywords.contains(&i) && (colon.is_some() || follows_volume(&text[..i])) {
                    scope.push(Layer::Reference);
                    continue;
                }
                match c {
                    '\\' => scope.push(Layer::Escape),
                    '{' => scope.push(Layer::Brace),
                    ':' => colon = Some(i),
                    _ => {}
                }
            }
        }
    }

    colon
}

fn follows_volume(head: &str) -> bool {
    let re = regex!(r"[0-9]\s*\.\s*$");
    re.is_match(head)
}

fn split_colonless(text: &str) -> Result<(&str, &str), UofError> {
    if !is_colonless_valid(text) {
        return Err(UofError::invalid(
            text,
            "a colon after a source name containing numbers",
        ));
    }

    match unescaped_brace(text) {
        Some(brace) => split_at_brace(text, brace),
        None => split_at_digit(text),
    }
}

/// Without a colon the boundary between source and reference can only be
/// found if there is a single run of numbers (possibly joined into a
/// volume.page or a range) outside of braces and before any redirect.
pub(crate) fn is_colonless_valid(text: &str) -> bool {
    let re = regex!(r"\\.");
    let unescaped = re.replace_all(text, " ");

    let re = regex!(r"\{[^}]*\}?");
    let stripped = re.replace_all(&unescaped, " ");
    let stripped = &*stripped;

    let head = match redirect_keyword(stripped) {
        Some(i) => &stripped[..i],
        None => stripped,
    };

    let re = regex!(r"[0-9]+(?:\s*(?:\.|-+|–)\s*[0-9]+)*");
    re.find_iter(head)
        .count()
        <= 1
}

/// Position of the first '{' which opens a brace list, skipping escaped ones.
fn unescaped_brace(text: &str) -> Option<usize> {
    let mut scope = Scope::new();

    for (i, c) in text.char_indices() {
        match scope.current() {
            Layer::Escape => {
                scope.pop();
            }
            _ => match c {
                '\\' => scope.push(Layer::Escape),
                '{' => return Some(i),
                _ => {}
            },
        }
    }
    None
}

/// The source runs up to the brace, less any volume number and '.'
/// immediately before it, which belong to the reference.
fn split_at_brace(text: &str, brace: usize) -> Result<(&str, &str), UofError> {
    let head = &text[..brace];

    let re = regex!(r"[0-9]+\s*\.\s*$");
    let begin = match re.find(head) {
        Some(m) => m.start(),
        None => brace,
    };

    let source = text[..begin].trim();
    let reference = &text[begin..];

    // a dangling '.' means a volume number was intended but is missing
    if source.ends_with('.') {
        return Err(UofError::invalid(text, "a volume number before the '.'"));
    }

    Ok((source, reference))
}

fn split_at_digit(text: &str) -> Result<(&str, &str), UofError> {
    let keyword = redirect_keyword(text);
    let head = match keyword {
        Some(i) => &text[..i],
        None => text,
    };

    let re = regex!(r"[^0-9][0-9]");
    if let Some(m) = re.find(head) {
        let i = m.end() - 1;
        return Ok((text[..i].trim(), text[i..].trim()));
    }

    match keyword {
        Some(i) => Ok((text[..i].trim(), text[i..].trim())),
        None => Err(UofError::invalid(text, "a page number or redirect")),
    }
}

/// Position of the first "see " which begins a redirect. The keyword must
/// start the text or follow whitespace or one of the UOF delimiters.
pub(crate) fn redirect_keyword(text: &str) -> Option<usize> {
    redirect_keywords(text)
        .first()
        .copied()
}

fn redirect_keywords(text: &str) -> Vec<usize> {
    let re = regex!(r"(?:^|[\s.:{,])(see\s)");

    re.captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|m| m.start())
        .collect()
}

/// Expand a reference part into its individual references. A brace list is
/// split on unescaped commas, with any text before the opening brace
/// (typically a volume number) distributed onto each item. Escaped
/// delimiters lose their backslash: `\,` becomes a literal comma.
pub fn expand(reference: &str) -> Result<Vec<String>, UofError> {
    let mut scope = Scope::new();
    scope.push(Layer::Reference);

    let mut prefix = String::new();
    let mut current = String::new();
    let mut items = Vec::new();
    let mut opened = false;
    let mut closed = None;

    for (i, c) in reference.char_indices() {
        match scope.current() {
            Layer::Escape => {
                scope.pop();
                if !ESCAPABLE.contains(&c) {
                    current.push('\\');
                }
                current.push(c);
            }
            Layer::Brace => match c {
                '\\' => scope.push(Layer::Escape),
                ',' => items.push(std::mem::take(&mut current)),
                '{' => return Err(UofError::invalid(reference, "only one level of braces")),
                '}' => {
                    scope.pop();
                    items.push(std::mem::take(&mut current));
                    closed = Some(i);
                    break;
                }
                _ => current.push(c),
            },
            Layer::Source | Layer::Reference => match c {
                '\\' => scope.push(Layer::Escape),
                '{' => {
                    prefix = std::mem::take(&mut current);
                    opened = true;
                    scope.push(Layer::Brace);
                }
                '}' => return Err(UofError::invalid(reference, "an opening brace")),
                _ => current.push(c),
            },
        }
    }

    if !opened {
        if scope.current() == Layer::Escape {
            current.push('\\');
        }
        return Ok(vec![current
            .trim()
            .to_string()]);
    }

    let end = match closed {
        Some(end) => end,
        None => return Err(UofError::invalid(reference, "a closing brace")),
    };

    if !reference[end + 1..]
        .trim()
        .is_empty()
    {
        return Err(UofError::invalid(
            reference,
            "nothing after the closing brace",
        ));
    }

    let items: Vec<String> = items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| format!("{}{}", prefix, item))
        .collect();

    if items.is_empty() {
        return Err(UofError::invalid(reference, "a reference inside the braces"));
    }

    Ok(items)
}
