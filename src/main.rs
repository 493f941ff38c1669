use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::IsTerminal;
use std::path::Path;
use tracing::{debug, Level};

use tabularium::formatting::{render_display, Identity, Render, Terminal};
use tabularium::indexing::{self, ImportSummary};
use tabularium::parsing;
use tabularium::registry::{self, Catalog, EntryStore, OccurrenceStore, SourceRegistry, VolumeRegistry};
use tabularium::templating::{self, Mindex, Plain, Template};

mod problem;

use crate::problem::{
    concise_catalog_error, concise_import_problem, concise_loading_error, full_uof_error, Present,
};

fn catalog_argument() -> Arg {
    Arg::new("catalog")
        .long("catalog")
        .default_value("catalog.toml")
        .value_name("FILE")
        .help("The TOML file describing your sources and their volumes.")
}

fn raw_argument() -> Arg {
    Arg::new("raw-control-chars")
        .short('R')
        .long("raw-control-chars")
        .action(ArgAction::SetTrue)
        .help("Emit ANSI escape codes for colour even if output is redirected to a pipe or file.")
}

fn filename_argument() -> Arg {
    Arg::new("filename")
        .required(true)
        .help("Tab-separated file of entries, UOF, and optional sort keys.")
}

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("tabularium")
        .version(VERSION)
        .propagate_version(true)
        .author("Soren Bjornstad")
        .about("Personal indexes of notebooks, books, and diaries.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging to standard error."),
        )
        .subcommand(
            Command::new("check")
                .about("Parse and validate occurrences written in UOF")
                .arg(catalog_argument())
                .arg(raw_argument())
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Show each occurrence in strict UOF rather than the friendlier display form."),
                )
                .arg(
                    Arg::new("uof")
                        .required(true)
                        .num_args(1..)
                        .help("One or more strings in Unified Occurrence Format."),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import entries and occurrences from a tab-separated file")
                .arg(catalog_argument())
                .arg(
                    Arg::new("index")
                        .long("index")
                        .action(ArgAction::SetTrue)
                        .help("Print the resulting index after importing."),
                )
                .arg(filename_argument()),
        )
        .subcommand(
            Command::new("export")
                .about("Write an index back out in the tab-separated import format")
                .arg(catalog_argument())
                .arg(filename_argument()),
        )
        .subcommand(
            Command::new("nearby")
                .about("List the entries near each occurrence of an entry")
                .arg(catalog_argument())
                .arg(raw_argument())
                .arg(
                    Arg::new("entry")
                        .long("entry")
                        .required(true)
                        .help("The name of the entry whose occurrences to look around."),
                )
                .arg(filename_argument()),
        )
        .subcommand(
            Command::new("redirects")
                .about("List redirects pointing at entries that do not exist")
                .arg(catalog_argument())
                .arg(raw_argument())
                .arg(filename_argument()),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match matches.subcommand() {
        Some(("check", submatches)) => {
            let catalog = load_catalog(submatches);
            let renderer = select_renderer(submatches);
            let strict = submatches.get_flag("strict");

            let mut failed = false;
            for input in submatches
                .get_many::<String>("uof")
                .into_iter()
                .flatten()
            {
                debug!(%input);
                let result = if strict {
                    parsing::preview(&catalog, input)
                } else {
                    parsing::parse(&catalog, input).map(|references| {
                        references
                            .iter()
                            .map(|reference| reference.present(renderer))
                            .collect()
                    })
                };

                match result {
                    Ok(lines) => {
                        for line in lines {
                            println!("{}", line);
                        }
                    }
                    Err(error) => {
                        eprintln!("{}", full_uof_error(&error, input, renderer));
                        failed = true;
                    }
                }
            }

            if failed {
                std::process::exit(1);
            }
        }
        Some(("import", submatches)) => {
            let (catalog, summary) = load_and_import(submatches);

            println!(
                "Imported {} entr{}: {} occurrence{} created, {} duplicate{} skipped.",
                summary.entries,
                if summary.entries == 1 { "y" } else { "ies" },
                summary.created,
                if summary.created == 1 { "" } else { "s" },
                summary.duplicates,
                if summary.duplicates == 1 { "" } else { "s" }
            );

            if submatches.get_flag("index") {
                print_index(&Plain, &catalog);
            }

            if !summary
                .problems
                .is_empty()
            {
                std::process::exit(1);
            }
        }
        Some(("export", submatches)) => {
            let (catalog, summary) = load_and_import(submatches);
            if !summary
                .problems
                .is_empty()
            {
                std::process::exit(1);
            }
            print_index(&Mindex, &catalog);
        }
        Some(("nearby", submatches)) => {
            let (catalog, _) = load_and_import(submatches);
            let renderer = select_renderer(submatches);

            let name = submatches
                .get_one::<String>("entry")
                .map(String::as_str)
                .unwrap_or_default();
            let entry = match catalog.entry_by_name(name) {
                Some(entry) => entry,
                None => {
                    eprintln!("error: no entry named {}", name);
                    std::process::exit(1);
                }
            };

            for occurrence in catalog.occurrences_of_entry(entry.id) {
                let label = describe(&catalog, &occurrence, renderer);
                match indexing::nearby(&catalog, &occurrence) {
                    Some(entries) => {
                        let names: Vec<String> = entries
                            .iter()
                            .map(|entry| entry.present(renderer))
                            .collect();
                        println!("{}: {}", label, names.join("; "));
                    }
                    None => println!("{}: (redirect)", label),
                }
            }
        }
        Some(("redirects", submatches)) => {
            let (catalog, _) = load_and_import(submatches);
            let renderer = select_renderer(submatches);

            let broken = indexing::broken_redirects(&catalog);
            for occurrence in &broken {
                if let Some(entry) = catalog.entry(occurrence.entry) {
                    println!(
                        "{}  {}",
                        entry.present(renderer),
                        describe(&catalog, occurrence, renderer)
                    );
                }
            }

            if !broken.is_empty() {
                std::process::exit(1);
            }
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: tabularium [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn select_renderer(submatches: &ArgMatches) -> &'static dyn Render {
    if submatches.get_flag("raw-control-chars")
        || std::io::stdout()
            .is_terminal()
    {
        &Terminal
    } else {
        &Identity
    }
}

fn path_argument<'a>(submatches: &'a ArgMatches, name: &str) -> &'a Path {
    match submatches.get_one::<String>(name) {
        Some(value) => Path::new(value),
        None => {
            eprintln!("error: missing {} argument", name);
            std::process::exit(1);
        }
    }
}

fn print_index(template: &impl Template, catalog: &Catalog) {
    match templating::fill(template, catalog) {
        Ok(result) => print!("{}", result),
        Err(error) => {
            eprintln!("error: {}", error);
            std::process::exit(1);
        }
    }
}

fn load_catalog(submatches: &ArgMatches) -> Catalog {
    let filename = path_argument(submatches, "catalog");

    let content = match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", concise_loading_error(&error));
            std::process::exit(1);
        }
    };

    match registry::parse_catalog(&content) {
        Ok(catalog) => catalog,
        Err(error) => {
            eprintln!("{}", concise_catalog_error(&error, filename));
            std::process::exit(1);
        }
    }
}

fn load_and_import(submatches: &ArgMatches) -> (Catalog, ImportSummary) {
    let mut catalog = load_catalog(submatches);

    let filename = path_argument(submatches, "filename");

    let result = indexing::import_file(&mut catalog, filename, |progress| {
        if progress.line % 1000 == 0 {
            debug!(line = progress.line, total = progress.total, "importing");
        }
    });

    let summary = match result {
        Ok(summary) => summary,
        Err(error) => {
            eprintln!("{}", concise_loading_error(&error));
            std::process::exit(1);
        }
    };

    for problem in &summary.problems {
        eprintln!("{}", concise_import_problem(problem, filename));
    }

    (catalog, summary)
}

fn describe(
    catalog: &Catalog,
    occurrence: &tabularium::language::Occurrence,
    renderer: &dyn Render,
) -> String {
    let volume = catalog.volume(occurrence.volume);
    let source = volume
        .as_ref()
        .and_then(|volume| catalog.source(volume.source));

    match (source, volume) {
        (Some(source), Some(volume)) => {
            render_display(renderer, &source, &volume, &occurrence.reference)
        }
        _ => occurrence
            .reference
            .to_string(),
    }
}
