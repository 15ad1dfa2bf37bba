use super::*;

macro_rules! test_enum_completeness {
    ($enum_type:ty, $test_name:ident) => {
        #[test]
        fn $test_name() {
            for variant in <$enum_type>::value_variants() {
                let possible_value = variant.to_possible_value();
                assert!(
                    possible_value.is_some(),
                    "PossibleValue should exist for all variants"
                );

                // Round-trip through the primary name
                let possible_val = possible_value.unwrap();
                let primary_name = possible_val.get_name();
                let parsed: Result<$enum_type, _> = primary_name.parse();
                assert_eq!(
                    parsed.unwrap(),
                    *variant,
                    "Round-trip should preserve variant"
                );
            }
        }
    };
}

macro_rules! test_fromstr_aliases {
    ($enum_type:ty, $test_name:ident, $expected_mappings:expr) => {
        #[test]
        fn $test_name() {
            let mappings: &[(&str, $enum_type)] = &$expected_mappings;

            for (input, expected) in mappings {
                let parsed: Result<$enum_type, _> = input.parse();
                assert_eq!(
                    parsed.unwrap_or_else(|e| panic!("Failed to parse '{}': {}", input, e)),
                    *expected,
                    "Wrong variant for input '{}'",
                    input
                );
            }
        }
    };
}

test_enum_completeness!(LogLevel, test_log_level_completeness);
test_enum_completeness!(LogFormat, test_log_format_completeness);
test_enum_completeness!(LogOutput, test_log_output_completeness);
test_enum_completeness!(ColorIntent, test_color_intent_completeness);
test_enum_completeness!(SourceMode, test_source_mode_completeness);
test_enum_completeness!(TraversalOrder, test_traversal_order_completeness);
test_enum_completeness!(FailurePolicy, test_failure_policy_completeness);

test_fromstr_aliases!(
    SourceMode,
    test_source_mode_aliases,
    [
        ("real", SourceMode::Real),
        ("REAL", SourceMode::Real),
        ("  test  ", SourceMode::Test),
        ("Test", SourceMode::Test),
    ]
);

#[test]
fn test_source_mode_accepts_only_real_or_test() {
    for input in ["registry", "fixture", "live", ""] {
        let err = input.parse::<SourceMode>().unwrap_err();
        assert!(err.to_string().ends_with("expected 'real' or 'test'"));
    }
}

test_fromstr_aliases!(
    TraversalOrder,
    test_traversal_order_aliases,
    [
        ("depth-first", TraversalOrder::DepthFirst),
        ("dfs", TraversalOrder::DepthFirst),
        ("breadth-first", TraversalOrder::BreadthFirst),
        ("BFS", TraversalOrder::BreadthFirst),
    ]
);

test_fromstr_aliases!(
    FailurePolicy,
    test_failure_policy_aliases,
    [
        ("warn", FailurePolicy::Lenient),
        ("lenient", FailurePolicy::Lenient),
        ("fail", FailurePolicy::Strict),
        ("strict", FailurePolicy::Strict),
    ]
);

test_fromstr_aliases!(
    ColorIntent,
    test_color_intent_aliases,
    [
        ("auto", ColorIntent::Auto),
        ("always", ColorIntent::Always),
        ("on", ColorIntent::Always),
        ("never", ColorIntent::Never),
        ("off", ColorIntent::Never),
    ]
);

#[test]
fn test_unknown_value_reports_reason() {
    let err = "sideways".parse::<TraversalOrder>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to parse configuration value 'sideways': expected 'depth-first' or 'breadth-first'"
    );
}

#[test]
fn test_log_level_from_verbosity_boundary_conditions() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(1), LogLevel::Warning);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(3), LogLevel::Debug);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(u8::MAX), LogLevel::Trace);
}

#[test]
fn test_try_from_string_for_every_value_enum() {
    // LogLevel has an `Error` variant, which must not clash with the conversion error type
    assert_eq!(LogLevel::try_from("debug".to_string()).unwrap(), LogLevel::Debug);
    assert_eq!(LogLevel::try_from("err".to_string()).unwrap(), LogLevel::Error);
    assert!(LogLevel::try_from("loud".to_string()).is_err());

    assert_eq!(LogFormat::try_from("yml".to_string()).unwrap(), LogFormat::Yaml);
    assert_eq!(LogOutput::try_from("stdout".to_string()).unwrap(), LogOutput::Stdout);
    assert_eq!(
        TraversalOrder::try_from("bfs".to_string()).unwrap(),
        TraversalOrder::BreadthFirst
    );
}

#[test]
fn test_defaults_match_documented_policy() {
    assert_eq!(TraversalOrder::default(), TraversalOrder::DepthFirst);
    assert_eq!(FailurePolicy::default(), FailurePolicy::Lenient);
    assert_eq!(FailurePolicy::Strict.as_str(), "fail");
    assert_eq!(TraversalOrder::BreadthFirst.as_str(), "breadth-first");
}
