//! Formatter producing UOF fragments for a single occurrence

use crate::formatting::*;
use crate::language::*;
use crate::parsing::parser::ESCAPABLE;

/// Which of the two textual forms of a reference to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Valid UOF: `CB 3.12`, `RT 12-15`, `CB 3.see Target`.
    Strict,
    /// For reading: redirects become `CB 3: see "Target"`.
    Display,
}

pub fn format_occurrence(
    source: &Source,
    volume: &Volume,
    reference: &Reference,
    style: Style,
) -> Vec<(Syntax, String)> {
    let mut output = Formatter::new();

    output.append(Syntax::Source, &source.abbreviation);

    match (reference, style) {
        (Reference::Redirect(target), Style::Display) => {
            if !source.is_single_volume() {
                output.append(Syntax::Neutral, " ");
                output.append(
                    Syntax::Volume,
                    &volume
                        .number
                        .to_string(),
                );
            }
            output.append(Syntax::Separator, ":");
            output.append(Syntax::Neutral, " ");
            output.append(Syntax::Keyword, "see");
            output.append(Syntax::Neutral, " ");
            output.append(Syntax::Target, &format!("\"{}\"", target));
        }
        _ => {
            output.append(Syntax::Neutral, " ");
            if !source.is_single_volume() {
                output.append(
                    Syntax::Volume,
                    &volume
                        .number
                        .to_string(),
                );
                output.append(Syntax::Separator, ".");
            }
            output.format_reference(reference);
        }
    }

    output.fragments
}

struct Formatter {
    fragments: Vec<(Syntax, String)>,
}

impl Formatter {
    fn new() -> Formatter {
        Formatter {
            fragments: Vec::new(),
        }
    }

    fn append(&mut self, syntax: Syntax, content: &str) {
        self.fragments
            .push((syntax, content.to_string()));
    }

    fn format_reference(&mut self, reference: &Reference) {
        match reference {
            Reference::Number(page) => {
                self.append(Syntax::Page, &page.to_string());
            }
            Reference::Range(first, second) => {
                self.append(Syntax::Page, &first.to_string());
                self.append(Syntax::Separator, "-");
                self.append(Syntax::Page, &second.to_string());
            }
            Reference::Redirect(target) => {
                self.append(Syntax::Keyword, "see");
                self.append(Syntax::Neutral, " ");
                self.append(Syntax::Target, &escape(target));
            }
        }
    }
}

/// Backslash the UOF delimiters in a redirect target so the strict form
/// parses back to the same target.
fn escape(target: &str) -> String {
    let mut result = String::with_capacity(target.len());
    for c in target.chars() {
        if ESCAPABLE.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }
    result
}
