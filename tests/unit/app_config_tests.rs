/*!
 * Tests for configuration loading and validation
 */

use karaoke_maker::app_config::{Config, LogLevel};

#[test]
fn test_defaultConfig_shouldBeValid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.video.width, 400);
    assert_eq!(config.video.height, 320);
    assert_eq!(config.video.line_height, 30);
    assert_eq!(config.display.font_name, "Arial");
    assert_eq!(config.display.font_size, 20);
    assert_eq!(config.player.command, "ffplay");
    assert_eq!(config.splitter.model, "spleeter:2stems");
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_partialJson_shouldFillDefaults() {
    let json = r#"{"display": {"FontName": "Verdana"}, "video": {"height": 720}, "log_level": "debug"}"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.display.font_name, "Verdana");
    assert_eq!(config.display.font_size, 20);
    assert_eq!(config.video.height, 720);
    assert_eq!(config.video.width, 400);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.validate().is_ok());
}

#[test]
fn test_serializedConfig_shouldParseBack() {
    let mut config = Config::default();
    config.display.primary_color = "&H0000FFFF".to_string();
    config.splitter.timeout_secs = 30;

    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.display, config.display);
    assert_eq!(parsed.splitter, config.splitter);
}

#[test]
fn test_validate_withBrokenValues_shouldFail() {
    let breakers: Vec<fn(&mut Config)> = vec![
        |c| c.display.font_name = "  ".to_string(),
        |c| c.display.font_size = 0,
        |c| c.display.secondary_color = String::new(),
        |c| c.video.width = 0,
        |c| c.video.height = 0,
        |c| c.video.line_height = 0,
        |c| c.player.command = String::new(),
        |c| c.splitter.command = String::new(),
        |c| c.splitter.timeout_secs = 0,
    ];

    for (idx, breaker) in breakers.into_iter().enumerate() {
        let mut config = Config::default();
        breaker(&mut config);
        assert!(config.validate().is_err(), "case {} should be rejected", idx);
    }
}
