use super::*;
use crate::formatting::render_uof;
use crate::language::{Bounds, Reference, ReferenceKind, SourceKind};
use crate::registry::{NewSource, SourceRegistry, VolumeRegistry};
use crate::parsing::parser::{is_colonless_valid, split, Clause};

fn pairs(input: &str) -> Vec<(&str, &str)> {
    split(input)
        .unwrap_or_else(|error| panic!("failed to split {:?}: {}", input, error))
        .into_iter()
        .map(|Clause { source, reference }| (source, reference))
        .collect()
}

/// Describe each parsed reference as "ABBREV volume.payload (kind)".
fn describe(catalog: &Catalog, input: &str) -> Vec<String> {
    parse(catalog, input)
        .unwrap_or_else(|error| panic!("failed to parse {:?}: {}", input, error))
        .iter()
        .map(|parsed| {
            let kind = match parsed
                .reference
                .kind()
            {
                ReferenceKind::Number => "number",
                ReferenceKind::Range => "range",
                ReferenceKind::Redirect => "redirect",
            };
            format!(
                "{} {}.{} ({})",
                parsed
                    .source
                    .abbreviation,
                parsed
                    .volume
                    .number,
                parsed
                    .reference
                    .payload(),
                kind
            )
        })
        .collect()
}

#[test]
fn split_source_from_reference() {
    let table = [
        ("CB1.56", ("CB", "1.56")),
        ("CB 1.56", ("CB", "1.56")),
        ("CB: 1.56", ("CB", "1.56")),
        ("CB:1 . 56", ("CB", "1 . 56")),
        ("RT 2378", ("RT", "2378")),
        ("RT 1.2378", ("RT", "1.2378")),
        ("The Invisible Man 58", ("The Invisible Man", "58")),
        ("The 160th Book: 45", ("The 160th Book", "45")),
        ("CB:{1.56, 5.78}", ("CB", "{1.56, 5.78}")),
        ("CB {1.56, 5 .78,}", ("CB", "{1.56, 5 .78,}")),
        ("CB{1.56}", ("CB", "{1.56}")),
        ("The Invisible Man:234", ("The Invisible Man", "234")),
        ("The Invisible Man: 235", ("The Invisible Man", "235")),
        ("The Invisible Man: 1.235", ("The Invisible Man", "1.235")),
        ("The Invisible Man: {1.235}", ("The Invisible Man", "{1.235}")),
        ("The Invisible Man: 1.{235}", ("The Invisible Man", "1.{235}")),
        (
            "The Invisible Man: 1.{235,334}",
            ("The Invisible Man", "1.{235,334}"),
        ),
        ("The Invisible Man 588", ("The Invisible Man", "588")),
        (
            "The Invisible Man {588, 264}",
            ("The Invisible Man", "{588, 264}"),
        ),
        ("The Invisible Man 2.588", ("The Invisible Man", "2.588")),
        ("The Invisible Man 2.{588}", ("The Invisible Man", "2.{588}")),
        (
            "The Invisible Man 2.{220,588}",
            ("The Invisible Man", "2.{220,588}"),
        ),
        (
            "The Invisible Man {2.220, 1.588}",
            ("The Invisible Man", "{2.220, 1.588}"),
        ),
        ("CB:3.56", ("CB", "3.56")),
        ("Chrono Book 5.{21,54,16}", ("Chrono Book", "5.{21,54,16}")),
        ("CB 5.15", ("CB", "5.15")),
        ("CB5.58", ("CB", "5.58")),
        ("CB5.{58}", ("CB", "5.{58}")),
        ("CB 5.{58}", ("CB", "5.{58}")),
        ("CB5.{58, 79}", ("CB", "5.{58, 79}")),
        ("CB 5.{58,79}", ("CB", "5.{58,79}")),
        ("CB {5.58}", ("CB", "{5.58}")),
        ("CB{5.58}", ("CB", "{5.58}")),
        ("CB{5.58,6.17,}", ("CB", "{5.58,6.17,}")),
        (
            "The 121st Valid String {237, 348}",
            ("The 121st Valid String", "{237, 348}"),
        ),
        (
            "The 122nd Valid String {237}",
            ("The 122nd Valid String", "{237}"),
        ),
        (
            "The 123rd Valid. String {5.23}",
            ("The 123rd Valid. String", "{5.23}"),
        ),
        (
            "The 124th Valid: String: {5.23}",
            ("The 124th Valid: String", "{5.23}"),
        ),
        ("RT see foobar", ("RT", "see foobar")),
        ("CB 2.see seeing see foo", ("CB", "2.see seeing see foo")),
        ("Things I see Daily: 45", ("Things I see Daily", "45")),
        ("Things I see Daily:see Foo: Bar", ("Things I see Daily", "see Foo: Bar")),
        ("RT: see Other: Entry", ("RT", "see Other: Entry")),
        ("CB 2.see Other: Entry", ("CB", "2.see Other: Entry")),
        ("RT see Set \\{A\\, B\\}", ("RT", "see Set \\{A\\, B\\}")),
        ("RT see A \\| B", ("RT", "see A \\| B")),
    ];

    for (input, expected) in table {
        assert_eq!(pairs(input), vec![expected], "splitting {:?}", input);
    }
}

#[test]
fn split_on_pipes_in_order() {
    assert_eq!(
        pairs("CB 1.56 | CB 2.78 | CB 2.56"),
        vec![("CB", "1.56"), ("CB", "2.78"), ("CB", "2.56")]
    );
    assert_eq!(
        pairs("RT 2378 | The Invisible Man {56, 78}"),
        vec![("RT", "2378"), ("The Invisible Man", "{56, 78}")]
    );
}

#[test]
fn colonless_ambiguity() {
    assert!(is_colonless_valid("The Invisible Man 588"));
    assert!(is_colonless_valid("The Invisible Man {588, 264}"));
    assert!(is_colonless_valid("Chrono Book 5.{21,54,16}"));
    assert!(is_colonless_valid("The 121st Valid String {237, 348}"));
    assert!(is_colonless_valid("The 122st Valid String {237}"));
    assert!(is_colonless_valid("RT 1279-89"));
    assert!(is_colonless_valid("CB 2. see Mr. 5 Aoeui"));

    assert!(!is_colonless_valid("The 120th Invalid String 234"));
    assert!(!is_colonless_valid("Soren 23789 3.78"));
}

#[test]
fn successful_parses() {
    let catalog = Catalog::sample();

    let table: &[(&str, &[&str])] = &[
        ("CB1.56", &["CB 1.56 (number)"]),
        ("CB 1.56", &["CB 1.56 (number)"]),
        ("CB: 1.56", &["CB 1.56 (number)"]),
        ("Chrono Book 1.77-9", &["CB 1.77-79 (range)"]),
        ("CB:1 . 56", &["CB 1.56 (number)"]),
        ("RT 2378", &["RT 1.2378 (number)"]),
        ("RT 1.2378", &["RT 1.2378 (number)"]),
        ("The Invisible Man 58", &["TIM 1.58 (number)"]),
        ("TIM 58", &["TIM 1.58 (number)"]),
        ("The 160th Book: 45", &["T1B 1.45 (number)"]),
        ("T1B: 45", &["T1B 1.45 (number)"]),
        ("CB:{1.56, 2.78}", &["CB 1.56 (number)", "CB 2.78 (number)"]),
        ("CB {1.56,2 .78,}", &["CB 1.56 (number)", "CB 2.78 (number)"]),
        ("CB{1.56}", &["CB 1.56 (number)"]),
        (
            "CB 1.56 | CB 2.78 | CB 2.56",
            &["CB 1.56 (number)", "CB 2.78 (number)", "CB 2.56 (number)"],
        ),
        (
            "CB {1.56, 2.78} | CB 2.56",
            &["CB 1.56 (number)", "CB 2.78 (number)", "CB 2.56 (number)"],
        ),
        (
            "RT 2378 | The Invisible Man {56, 78}",
            &["RT 1.2378 (number)", "TIM 1.56 (number)", "TIM 1.78 (number)"],
        ),
        (
            "The 160th Book: 45 | CB1.62",
            &["T1B 1.45 (number)", "CB 1.62 (number)"],
        ),
        ("CB 2.45-56", &["CB 2.45-56 (range)"]),
        ("CB 2.45–6", &["CB 2.45-46 (range)"]),
        ("CB 2.45--56", &["CB 2.45-56 (range)"]),
        ("RT 2348-89", &["RT 1.2348-2389 (range)"]),
        ("RT 1279-89", &["RT 1.1279-1289 (range)"]),
        ("RT1.107-8", &["RT 1.107-108 (range)"]),
        ("RT: see Foobar Entry", &["RT 1.Foobar Entry (redirect)"]),
        (
            "CB{1.26--7,2    . 18, 2.see    Other Entry} |The 160th Book    : 45",
            &[
                "CB 1.26-27 (range)",
                "CB 2.18 (number)",
                "CB 2.Other Entry (redirect)",
                "T1B 1.45 (number)",
            ],
        ),
        ("CB 2. see Mr. Aoeui", &["CB 2.Mr. Aoeui (redirect)"]),
        ("RT 1. see foobar", &["RT 1.foobar (redirect)"]),
        ("RT 1. see Mr. Aoeui", &["RT 1.Mr. Aoeui (redirect)"]),
        ("RT: see foobar", &["RT 1.foobar (redirect)"]),
        ("RT see foobar", &["RT 1.foobar (redirect)"]),
        ("CB 2.see seeing see foo", &["CB 2.seeing see foo (redirect)"]),
        ("RT see Other. Entry.", &["RT 1.Other. Entry. (redirect)"]),
        ("RT:see Other. see Entry.", &["RT 1.Other. see Entry. (redirect)"]),
        (
            "RT see Other. see E. Entry",
            &["RT 1.Other. see E. Entry (redirect)"],
        ),
        (
            "RT see   Other . see   E. Entry",
            &["RT 1.Other . see   E. Entry (redirect)"],
        ),
        (
            "RT: see \"21st century classroom\"",
            &["RT 1.\"21st century classroom\" (redirect)"],
        ),
        (
            "RT {see \"21st century classroom\"}",
            &["RT 1.\"21st century classroom\" (redirect)"],
        ),
        (
            "Random Thoughts {see \"21st century classroom\",}",
            &["RT 1.\"21st century classroom\" (redirect)"],
        ),
        ("CB 2.see King, Heather", &["CB 2.King, Heather (redirect)"]),
        ("CB 2.{see King\\, Heather}", &["CB 2.King, Heather (redirect)"]),
        (
            "CB 2.{35, see King\\, Heather}",
            &["CB 2.35 (number)", "CB 2.King, Heather (redirect)"],
        ),
        ("CB 2. {see King\\, Heather}", &["CB 2.King, Heather (redirect)"]),
    ];

    for (input, expected) in table {
        assert_eq!(describe(&catalog, input), *expected, "parsing {:?}", input);
    }
}

#[test]
fn escaped_comma_in_brace_list() {
    let catalog = Catalog::sample();

    let result = parse(&catalog, "CB{1.56, 2.see Doe\\, Jane}").unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].reference, Reference::Number(56));
    assert_eq!(
        result[1].reference,
        Reference::Redirect("Doe, Jane".to_string())
    );
}

#[test]
fn pipes_compose_in_order() {
    let catalog = Catalog::sample();

    let combined = parse(&catalog, "CB 1.56 | CB 2.78").unwrap();

    let mut separate = parse(&catalog, "CB 1.56").unwrap();
    separate.extend(parse(&catalog, "CB 2.78").unwrap());

    assert_eq!(combined, separate);
}

#[test]
fn preview_renders_strict_uof() {
    let catalog = Catalog::sample();

    let result = preview(&catalog, "CB {1.56, 2.40-5} | RT see Other Entry | TIM 58");
    assert_eq!(
        result,
        Ok(vec![
            "CB 1.56".to_string(),
            "CB 2.40-45".to_string(),
            "RT see Other Entry".to_string(),
            "TIM 58".to_string(),
        ])
    );
}

#[test]
fn source_names_containing_see() {
    let mut catalog = Catalog::sample();
    catalog
        .add_source(NewSource {
            name: "Things I see Daily",
            abbreviation: "TSD",
            volumes: Bounds::new(1, 1),
            pages: Bounds::new(1, 100),
            nearby: 1,
            kind: SourceKind::Other,
        })
        .unwrap();

    assert_eq!(
        describe(&catalog, "Things I see Daily: 45"),
        vec!["TSD 1.45 (number)"]
    );
    assert_eq!(
        describe(&catalog, "Things I see Daily: {45, see Foo: Bar}"),
        vec!["TSD 1.45 (number)", "TSD 1.Foo: Bar (redirect)"]
    );
    assert_eq!(
        describe(&catalog, "Things I see Daily: see Foo: Bar"),
        vec!["TSD 1.Foo: Bar (redirect)"]
    );
}

#[test]
fn strict_redirects_parse_back() {
    let catalog = Catalog::sample();

    let random = catalog
        .source_by_abbreviation("RT")
        .unwrap();
    let thoughts = catalog
        .volume_by_number(random.id, 1)
        .unwrap();
    let chrono = catalog
        .source_by_abbreviation("CB")
        .unwrap();
    let two = catalog
        .volume_by_number(chrono.id, 2)
        .unwrap();

    let targets = [
        "Doe, Jane",
        "Set {A, B}",
        "Foo {bar}",
        "Ratio: 3",
        "Either | Or",
        "Back\\slash",
        "Mr. Room 101",
        "see also",
    ];

    for target in targets {
        for (source, volume) in [(&random, &thoughts), (&chrono, &two)] {
            let reference = Reference::Redirect(target.to_string());
            let text = render_uof(source, volume, &reference);

            let parsed = parse(&catalog, &text)
                .unwrap_or_else(|error| panic!("failed to parse {:?}: {}", text, error));
            assert_eq!(parsed.len(), 1, "parsing {:?}", text);
            assert_eq!(parsed[0].reference, reference, "parsing {:?}", text);
            assert_eq!(parsed[0].volume, *volume, "parsing {:?}", text);
        }
    }
}
