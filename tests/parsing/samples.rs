#[cfg(test)]
mod samples {
    use std::path::Path;

    use tabularium::language::{Reference, UofError};
    use tabularium::parsing;
    use tabularium::registry::{parse_catalog, Catalog};

    fn catalog() -> Catalog {
        let content = parsing::load(Path::new("tests/samples/catalog.toml"))
            .expect("Failed to load sample catalog");
        parse_catalog(&content).expect("Sample catalog should be valid")
    }

    #[test]
    fn ensure_samples_parse() {
        let catalog = catalog();

        let samples = [
            ("CB 1.56", 1),
            ("CB1.56", 1),
            ("Chrono Book 2.14-16", 1),
            ("CB {1.56, 2.40-5}", 2),
            ("CB 2.{21, 54, 16}", 3),
            ("RT 2378 | TIM 45 | T1B: 12", 3),
            ("The 160th Book: {5, 9--10}", 2),
            ("RT see Doe, Jane", 1),
            ("CB 2.see Mr. Aoeui | RT: see Other Entry", 2),
        ];

        let mut failures = Vec::new();

        for (input, count) in samples {
            match parsing::parse(&catalog, input) {
                Ok(references) if references.len() == count => {}
                Ok(references) => {
                    println!(
                        "Input {:?} gave {} references, expected {}",
                        input,
                        references.len(),
                        count
                    );
                    failures.push(input);
                }
                Err(e) => {
                    println!("Input {:?} failed to parse: {:?}", input, e);
                    failures.push(input);
                }
            }
        }

        if !failures.is_empty() {
            panic!(
                "Sample inputs should parse successfully, but {} failed",
                failures.len()
            );
        }
    }

    #[test]
    fn ensure_broken_fail() {
        let catalog = catalog();

        let broken = [
            "",
            "CB",
            "CB 1.",
            "The 160th Book 45",
            "CB 2.{46, 48",
            "CB 1.56 |",
            "CB 1.18-16",
            "CB 3.12",
            "CB 101.12",
            "TIM 201",
            "Chrono Bok 1.12",
        ];

        let mut unexpected = Vec::new();

        for input in broken {
            if let Ok(references) = parsing::parse(&catalog, input) {
                println!("Input {:?} should have failed: {:?}", input, references);
                unexpected.push(input);
            }
        }

        if !unexpected.is_empty() {
            panic!(
                "Broken inputs should fail to parse, but {} succeeded",
                unexpected.len()
            );
        }
    }

    #[test]
    fn strict_output_parses_again() {
        let catalog = catalog();

        let input = "CB {1.56-7, 2.see Doe\\, Jane} | RT see Other Entry | The Invisible Man: 58";
        let strict = parsing::preview(&catalog, input).unwrap();
        assert_eq!(
            strict,
            vec![
                "CB 1.56-57",
                "CB 2.see Doe\\, Jane",
                "RT see Other Entry",
                "TIM 58"
            ]
        );

        let original = parsing::parse(&catalog, input).unwrap();
        let again = parsing::parse(&catalog, &strict.join(" | ")).unwrap();
        assert_eq!(original, again);
        assert_eq!(
            again[1].reference,
            Reference::Redirect("Doe, Jane".to_string())
        );
    }

    #[test]
    fn errors_name_the_problem() {
        let catalog = catalog();

        assert_eq!(
            parsing::parse(&catalog, "CB 1.12 | ZZ 4"),
            Err(UofError::NonexistentSource("ZZ".to_string()))
        );
        assert_eq!(
            parsing::parse(&catalog, "CB 3.12"),
            Err(UofError::NonexistentVolume {
                source: "Chrono Book".to_string(),
                volume: 3
            })
        );
        assert_eq!(
            parsing::parse(&catalog, "RT 45-3"),
            Err(UofError::InvalidPageRange("45-3".to_string()))
        );
    }
}
