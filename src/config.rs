//! アプリケーション設定管理モジュール
//! 対局ルール、探索、AI戦略、ログの設定を
//! 設定ファイルと環境変数から読み込んで管理する。

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

use crate::ai::search::{SearchConfig, SimulationMode, MAX_SEARCH_DEPTH};
use crate::ai::strategies::{AiConfig, StrategyKind};
use crate::game::{GameConfig, NoMovePolicy, Side};

/// 設定ファイルの探索順
const CONFIG_PATHS: [&str; 2] = ["othello.json", "config/othello.json"];

/// 受け付けるログレベル
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// ログ出力の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracingのフィルタに渡すレベル
    pub level: String,
    /// 着手ごとに盤面を表示するか
    pub dump_board: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dump_board: true,
        }
    }
}

/// アプリケーションの全設定を統合するメイン設定構造体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
    pub search: SearchConfig,
    pub ai: AiConfig,
    pub logging: LoggingConfig,
}

/// 設定関連のエラーを表すenum
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("設定ファイル読み込みエラー: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("設定ファイル解析エラー: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("環境変数エラー: {name} = {value}")]
    EnvVarError { name: String, value: String },

    #[error("設定値が無効です: {field} = {value}")]
    InvalidValue { field: String, value: String },
}

fn env_error(name: &str, value: String) -> ConfigError {
    ConfigError::EnvVarError {
        name: name.to_string(),
        value,
    }
}

impl Config {
    /// 指定したファイルパスから設定を読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 環境変数から設定を読み込む
    /// デフォルト値をベースに環境変数で上書きする
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides(|name| env::var(name).ok())?;
        Ok(config)
    }

    /// lookupが返した値で設定を上書きする
    /// 値がない項目はそのまま残す
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("OTHELLO_FIRST_SIDE") {
            self.game.first_side = match value.to_lowercase().as_str() {
                "white" => Side::White,
                "black" => Side::Black,
                _ => return Err(env_error("OTHELLO_FIRST_SIDE", value)),
            };
        }

        if let Some(value) = lookup("OTHELLO_NO_MOVE_POLICY") {
            self.game.no_move_policy = match value.to_lowercase().as_str() {
                "end" | "endgame" => NoMovePolicy::EndGame,
                "pass" => NoMovePolicy::Pass,
                _ => return Err(env_error("OTHELLO_NO_MOVE_POLICY", value)),
            };
        }

        if let Some(value) = lookup("OTHELLO_SEARCH_MAX_DEPTH") {
            self.search.max_depth = value
                .parse()
                .map_err(|_| env_error("OTHELLO_SEARCH_MAX_DEPTH", value))?;
        }

        if let Some(value) = lookup("OTHELLO_SEARCH_SIMULATION") {
            self.search.simulation = match value.to_lowercase().as_str() {
                "flip" => SimulationMode::Flip,
                "placement" => SimulationMode::Placement,
                _ => return Err(env_error("OTHELLO_SEARCH_SIMULATION", value)),
            };
        }

        if let Some(value) = lookup("OTHELLO_AI_STRATEGY") {
            self.ai.strategy = match value.to_lowercase().as_str() {
                "minimax" => StrategyKind::Minimax,
                "random" => StrategyKind::Random,
                _ => return Err(env_error("OTHELLO_AI_STRATEGY", value)),
            };
        }

        if let Some(value) = lookup("OTHELLO_LOG_LEVEL") {
            self.logging.level = value;
        }

        Ok(())
    }

    /// 設定ファイルと環境変数を結合して設定を読み込む
    /// 設定ファイルがなくてもデフォルト値で動作する
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = CONFIG_PATHS
            .iter()
            .find_map(|path| Self::from_file(path).ok())
            .unwrap_or_default();

        // 環境変数で設定を上書き
        config.apply_env_overrides(|name| env::var(name).ok())?;

        Ok(config)
    }

    /// 現在の設定を指定したファイルに保存する
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 設定値の妥当性をチェックする
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_depth == 0 || self.search.max_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::InvalidValue {
                field: "search.max_depth".to_string(),
                value: self.search.max_depth.to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
            });
        }

        Ok(())
    }
}
