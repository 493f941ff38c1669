use tabularium::formatting::{Render, Syntax};
use tabularium::language::{Subject, UofError};

/// Generate problem and detail messages for UOF errors
pub fn generate_error_message(error: &UofError, renderer: &dyn Render) -> (String, String) {
    let example = |text: &str| renderer.style(Syntax::Source, text);

    match error {
        UofError::InvalidFormat { expected, .. } => (
            format!("Expected {}", expected),
            format!(
                r#"
A reference in Unified Occurrence Format names a source, then optionally a
volume number and a '.', then a page, a range, or a redirect. For example:

    {}
    {}
    {}
    {}

Several references to the same source can be grouped in braces, and clauses
for different sources are separated by '|'. If a source's name contains
numbers, put a ':' after it so the reference can be told apart from the name.
                "#,
                example("CB 12.34"),
                example("CB 12.34-7"),
                example("RT: see Doe, Jane"),
                example("The 160th Book: {45, 88}"),
            )
            .trim_ascii()
            .to_string(),
        ),
        UofError::InvalidPageRange(text) => (
            "Invalid page range".to_string(),
            format!(
                r#"
The second number in a range must be larger than the first, but {} is not.
The second number may be abbreviated by leaving off leading digits it shares
with the first, so {} means 56 through 57.
                "#,
                renderer.style(Syntax::Page, text),
                renderer.style(Syntax::Page, "56-7"),
            )
            .trim_ascii()
            .to_string(),
        ),
        UofError::NonexistentSource(text) => (
            "Unknown source".to_string(),
            format!(
                r#"
There is no source with the abbreviation or name {}. Abbreviations and names
must match exactly, including capitalization.
                "#,
                renderer.style(Syntax::Source, text),
            )
            .trim_ascii()
            .to_string(),
        ),
        UofError::NonexistentVolume { source, volume } => (
            "Unknown volume".to_string(),
            format!(
                r#"
The volume number {} is valid for {}, but that volume hasn't been created
yet. Add it to the catalog before entering references to it.
                "#,
                renderer.style(Syntax::Volume, &volume.to_string()),
                renderer.style(Syntax::Source, source),
            )
            .trim_ascii()
            .to_string(),
        ),
        UofError::InvalidReference { subject, .. } => (
            match subject {
                Subject::Volume => "Volume out of range".to_string(),
                Subject::Page => "Page out of range".to_string(),
                Subject::PageRange => "Page range out of range".to_string(),
            },
            error.to_string(),
        ),
        UofError::DuplicateOccurrence { .. } => (
            "Duplicate occurrence".to_string(),
            "That occurrence already exists, so nothing new was added.".to_string(),
        ),
    }
}
