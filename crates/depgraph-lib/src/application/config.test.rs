use super::*;

#[test]
fn test_config_loading_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.config, PathBuf::from("config.yaml"));
    assert_eq!(config.log_level, 0);
    assert_eq!(config.net_timeout, 30);
    assert_eq!(config.color, ColorIntent::Auto);
    assert!(config.traversal.is_none());
    assert!(config.on_lookup_failure.is_none());
}

#[test]
fn test_string_defaults_match_typed_defaults() {
    assert_eq!(defaults::LOG_LEVEL.parse::<u8>().unwrap(), default_fns::log_level());
    assert_eq!(defaults::NET_TIMEOUT.parse::<u64>().unwrap(), default_fns::net_timeout());
    assert_eq!(defaults::LOG_FORMAT.parse::<LogFormat>().unwrap(), default_fns::log_format());
    assert_eq!(defaults::LOG_OUTPUT.parse::<LogOutput>().unwrap(), default_fns::log_output());
    assert_eq!(defaults::COLOR.parse::<ColorIntent>().unwrap(), default_fns::color());
}

#[test]
fn test_parse_without_arguments_gives_defaults() {
    let parsed = AppConfig::try_parse_from(["depgraph"]).unwrap();
    let defaults = AppConfig::default();

    assert_eq!(parsed.config, defaults.config);
    assert_eq!(parsed.log_level, defaults.log_level);
    assert_eq!(parsed.net_timeout, defaults.net_timeout);
}

#[test]
fn test_parse_policy_overrides() {
    let parsed = AppConfig::try_parse_from([
        "depgraph",
        "--traversal",
        "bfs",
        "--on-lookup-failure",
        "fail",
        "--config",
        "other.yaml",
    ])
    .unwrap();

    assert_eq!(parsed.traversal, Some(TraversalOrder::BreadthFirst));
    assert_eq!(parsed.on_lookup_failure, Some(FailurePolicy::Strict));
    assert_eq!(parsed.config, PathBuf::from("other.yaml"));
}

#[test]
fn test_config_merging() {
    let base = AppConfig::default();
    let override_config = AppConfig {
        log_level: 4,
        color: ColorIntent::Always,
        traversal: Some(TraversalOrder::BreadthFirst),
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorIntent::Always);
    assert_eq!(merged.traversal, Some(TraversalOrder::BreadthFirst));
    assert_eq!(merged.net_timeout, 30);
    assert!(merged.on_lookup_failure.is_none());
}

#[test]
fn test_merging_defaults_keeps_earlier_layer() {
    let env_layer = AppConfig {
        color: ColorIntent::Never,
        net_timeout: 5,
        ..AppConfig::default()
    };

    let merged = env_layer.merge_with(AppConfig::default());
    assert_eq!(merged.color, ColorIntent::Never);
    assert_eq!(merged.net_timeout, 5);
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let config = AppConfig {
        net_timeout: 0,
        ..AppConfig::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    assert!(err.to_string().contains("net_timeout"));
}

#[test]
fn test_validate_rejects_out_of_range_level() {
    let config = AppConfig {
        log_level: 9,
        ..AppConfig::default()
    };
    assert!(config.validate().is_err());
    assert!(AppConfig::default().validate().is_ok());
}

#[test]
fn test_logger_config_from_app_config() {
    let config = AppConfig {
        log_level: 2,
        log_format: LogFormat::Json,
        ..AppConfig::default()
    };

    let logger = config.to_logger_config(true);
    assert_eq!(logger.level, LogLevel::Info);
    assert_eq!(logger.format, LogFormat::Json);
    assert_eq!(logger.output, LogOutput::Stderr);
    assert!(logger.ansi);
}
