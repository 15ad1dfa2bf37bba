use super::*;
use crate::primitives::ColorIntent;

#[test]
fn test_resolve_defaults() {
    let config = AppConfig::resolve(&EnvironmentConfig::default(), AppConfig::default()).unwrap();
    assert_eq!(config.color, ColorIntent::Auto);
    assert_eq!(config.net_timeout, 30);
}

#[test]
fn test_environment_color_applies_without_cli_choice() {
    let env = EnvironmentConfig {
        no_color: Some("1".into()),
        ..EnvironmentConfig::default()
    };

    let config = AppConfig::resolve(&env, AppConfig::default()).unwrap();
    assert_eq!(config.color, ColorIntent::Never);
}

#[test]
fn test_cli_color_beats_environment() {
    let env = EnvironmentConfig {
        no_color: Some("1".into()),
        ..EnvironmentConfig::default()
    };
    let cli = AppConfig {
        color: ColorIntent::Always,
        ..AppConfig::default()
    };

    let config = AppConfig::resolve(&env, cli).unwrap();
    assert_eq!(config.color, ColorIntent::Always);
}

#[test]
fn test_resolve_validates() {
    let cli = AppConfig {
        net_timeout: 0,
        ..AppConfig::default()
    };
    assert!(AppConfig::resolve(&EnvironmentConfig::default(), cli).is_err());
}
