use super::*;
use crate::language::{Bounds, Subject};

/// Helper function to check that parsing fails with the expected error
fn expect_error(input: &str, expected: UofError) {
    let catalog = Catalog::sample();

    match parse(&catalog, input) {
        Ok(references) => panic!(
            "Expected parsing to fail, but it succeeded for input {:?}: {:?}",
            input, references
        ),
        Err(error) => assert_eq!(error, expected, "for input {:?}", input),
    }
}

fn expect_invalid_format(input: &str) {
    let catalog = Catalog::sample();

    match parse(&catalog, input) {
        Err(UofError::InvalidFormat { .. }) => {}
        other => panic!(
            "Expected an invalid format error for input {:?} but got: {:?}",
            input, other
        ),
    }
}

#[test]
fn invalid_format() {
    for input in [
        "CB 2.{46, 48",
        "CB:htns.46",
        "CB: 2.46.58",
        "CB: 2.46--qq",
        "CB 2.gc",
        "CB: 4.{48{48}}",
        "Soren 23789 3.78",
        "",
        "CB: {2.2",
        "CB {2.2 {2.6}}",
        "CB .{6}",
    ] {
        expect_invalid_format(input);
    }
}

#[test]
fn invalid_format_empty_pieces() {
    expect_invalid_format("CB 1.56 |");
    expect_invalid_format("CB:");
    expect_invalid_format(": 1.56");
    expect_invalid_format("CB 1.see ");
}

#[test]
fn nonexistent_source() {
    expect_error(
        "Flibbertygibberty: 2.15",
        UofError::NonexistentSource("Flibbertygibberty".to_string()),
    );
}

#[test]
fn out_of_bounds_volume() {
    expect_error(
        "CB: 9000.15",
        UofError::InvalidReference {
            subject: Subject::Volume,
            value: 9000,
            source: "Chrono Book".to_string(),
            bounds: Bounds::new(1, 100),
        },
    );
}

#[test]
fn out_of_bounds_page() {
    expect_error(
        "CB: 1.800",
        UofError::InvalidReference {
            subject: Subject::Page,
            value: 800,
            source: "Chrono Book".to_string(),
            bounds: Bounds::new(5, 80),
        },
    );
    expect_error(
        "CB: 1.4",
        UofError::InvalidReference {
            subject: Subject::Page,
            value: 4,
            source: "Chrono Book".to_string(),
            bounds: Bounds::new(5, 80),
        },
    );
    expect_error(
        "CB: 1.81",
        UofError::InvalidReference {
            subject: Subject::Page,
            value: 81,
            source: "Chrono Book".to_string(),
            bounds: Bounds::new(5, 80),
        },
    );

    let catalog = Catalog::sample();
    assert!(parse(&catalog, "CB: 1.5").is_ok());
    assert!(parse(&catalog, "CB: 1.80").is_ok());
}

#[test]
fn out_of_bounds_range_endpoint() {
    expect_error(
        "CB: 2.16-2000",
        UofError::InvalidReference {
            subject: Subject::PageRange,
            value: 2000,
            source: "Chrono Book".to_string(),
            bounds: Bounds::new(5, 80),
        },
    );
    expect_error(
        "CB: 2.2000-16",
        UofError::InvalidReference {
            subject: Subject::PageRange,
            value: 2000,
            source: "Chrono Book".to_string(),
            bounds: Bounds::new(5, 80),
        },
    );
}

#[test]
fn invalid_page_range() {
    expect_error(
        "CB: 2.18-16",
        UofError::InvalidPageRange("18-16".to_string()),
    );
    expect_error(
        "CB: 2.16-16",
        UofError::InvalidPageRange("16-16".to_string()),
    );
    expect_error("CB 2.45-3", UofError::InvalidPageRange("45-3".to_string()));
}

#[test]
fn nonexistent_volume() {
    expect_error(
        "CB: 4.48",
        UofError::NonexistentVolume {
            source: "Chrono Book".to_string(),
            volume: 4,
        },
    );
}

#[test]
fn first_error_aborts_the_string() {
    // the later clause is fine but the earlier one names no source
    expect_error(
        "Nonesuch 5 | CB 1.56",
        UofError::NonexistentSource("Nonesuch".to_string()),
    );
}
