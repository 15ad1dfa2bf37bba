use super::*;

#[test]
fn test_filter_directives_scope_library_and_quiet_http_crates() {
    let directives = Logger::filter_directives(LogLevel::Debug);
    assert!(directives.starts_with("depgraph=debug,depgraph_lib=debug"));
    assert!(directives.contains("reqwest=warn"));
    assert!(directives.contains("hyper_util=warn"));
    assert!(directives.ends_with(",debug"));
}

#[test]
fn test_filter_directives_parse_as_env_filter() {
    for verbosity in 0..=4 {
        let level = LogLevel::from_verbosity(verbosity);
        let directives = Logger::filter_directives(level);
        assert!(
            EnvFilter::try_new(&directives).is_ok(),
            "directives should parse: {}",
            directives
        );
    }
}
