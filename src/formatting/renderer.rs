//! Turning occurrences back into text

use crate::formatting::*;
use crate::language::*;

/// We do the formatting in two passes. First we convert the occurrence into
/// a Vec of "fragments" (Syntax tag, String pairs). Then second we apply the
/// specified renderer to each pair to result in an embellished/highlighted
/// String.
pub fn render(
    renderer: &dyn Render,
    source: &Source,
    volume: &Volume,
    reference: &Reference,
    style: Style,
) -> String {
    // Pass 1: format to tagged fragments
    let fragments = formatter::format_occurrence(source, volume, reference, style);

    // Pass 2: render tagged fragments to final output
    render_to_string(renderer, fragments)
}

/// Strict UOF for a single reference. Strings produced here parse back to
/// the same reference, and can be joined with '|'.
pub fn render_uof(source: &Source, volume: &Volume, reference: &Reference) -> String {
    render(&Identity, source, volume, reference, Style::Strict)
}

/// The friendlier form of a reference used when showing occurrences to a
/// person rather than feeding them back into the parser.
pub fn render_display(
    renderer: &dyn Render,
    source: &Source,
    volume: &Volume,
    reference: &Reference,
) -> String {
    render(renderer, source, volume, reference, Style::Display)
}

/// Pass 2: apply markup to fragments via style() and combine.
fn render_to_string(renderer: &dyn Render, fragments: Vec<(Syntax, String)>) -> String {
    let mut output = String::new();

    for (syntax, content) in fragments {
        let rendered = renderer.style(syntax, &content);
        output.push_str(&rendered);
    }

    output
}
