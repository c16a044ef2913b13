//! 設定システム統合テスト

use std::fs;
use tempfile::TempDir;

use othello::{
    ai::{AiConfig, SearchConfig, SimulationMode, StrategyKind},
    config::{Config, ConfigError, LoggingConfig},
    game::{GameConfig, NoMovePolicy, NullObserver, Side},
    session::GameSession,
};

fn create_test_config() -> Config {
    Config {
        game: GameConfig {
            first_side: Side::Black,
            no_move_policy: NoMovePolicy::Pass,
        },
        search: SearchConfig {
            max_depth: 2,
            simulation: SimulationMode::Placement,
        },
        ai: AiConfig {
            strategy: StrategyKind::Random,
        },
        logging: LoggingConfig {
            level: "warn".to_string(),
            dump_board: false,
        },
    }
}

#[test]
fn test_config_serialization_deserialization() {
    let config = create_test_config();

    let json_str = serde_json::to_string_pretty(&config).unwrap();
    assert!(json_str.contains("Placement"));
    assert!(json_str.contains("Pass"));

    let deserialized: Config = serde_json::from_str(&json_str).unwrap();
    assert_eq!(deserialized, config);
}

#[test]
fn test_config_file_operations() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("othello.json");

    let original_config = create_test_config();

    original_config.save_to_file(&config_path).unwrap();
    assert!(config_path.exists());

    let loaded_config = Config::from_file(&config_path).unwrap();
    assert_eq!(loaded_config, original_config);
}

#[test]
fn test_partial_config_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("partial.json");
    fs::write(&config_path, r#"{ "search": { "max_depth": 3 } }"#).unwrap();

    let config = Config::from_file(&config_path).unwrap();

    assert_eq!(config.search.max_depth, 3);
    assert_eq!(config.search.simulation, SimulationMode::Flip);
    assert_eq!(config.game, GameConfig::default());
    assert_eq!(config.logging, LoggingConfig::default());
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();

    let result = Config::from_file(temp_dir.path().join("missing.json"));

    assert!(matches!(result, Err(ConfigError::FileReadError(_))));
}

#[test]
fn test_invalid_json_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("broken.json");
    fs::write(&config_path, "{ not json").unwrap();

    let result = Config::from_file(&config_path);

    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.search.max_depth = 0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("search.max_depth"));

    config.search.max_depth = 4;
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_session_from_loaded_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("othello.json");
    create_test_config().save_to_file(&config_path).unwrap();

    let config = Config::from_file(&config_path).unwrap();
    let mut session = GameSession::from_config(&config, NullObserver);

    assert_eq!(session.controller().side_to_move(), Side::Black);
    assert!(session.request_ai_move(Side::Black).is_ok());
    assert_eq!(session.controller().side_to_move(), Side::White);
}
