use super::messages::generate_error_message;
use owo_colors::OwoColorize;
use std::path::Path;
use tabularium::{
    formatting::Render,
    indexing::ImportProblem,
    language::{LoadingError, UofError},
    registry::CatalogError,
};

/// Format a UOF error with full details, pointing at the offending part of
/// the input
pub fn full_uof_error(error: &UofError, input: &str, renderer: &dyn Render) -> String {
    let (problem, details) = generate_error_message(error, renderer);

    let offset = error
        .fragment()
        .and_then(|fragment| input.find(&fragment))
        .unwrap_or(0);
    let column = input[..offset]
        .chars()
        .count()
        + 1;

    format!(
        r#"
{}: {}

{} {}
{} {:>column$}

{}
        "#,
        "error".bright_red(),
        problem.bold(),
        '|'.bright_blue(),
        input,
        '|'.bright_blue(),
        '^'.bright_red(),
        details
    )
    .trim_ascii()
    .to_string()
}

/// Format a line that failed to import with concise single-line output
pub fn concise_import_problem(problem: &ImportProblem, filename: &Path) -> String {
    format!(
        "{}: {}:{} {}",
        "error".bright_red(),
        filename.to_string_lossy(),
        problem.number,
        problem
            .message
            .bold(),
    )
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .problem
            .bold()
    )
}

/// Format a problem with the catalog of sources and volumes
pub fn concise_catalog_error(error: &CatalogError, filename: &Path) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        filename.display(),
        error
            .to_string()
            .bold()
    )
}
