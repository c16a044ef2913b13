pub mod game;
pub mod ai;
pub mod session;
pub mod error;
pub mod config;

pub use error::{GameError, AIError, Result};
pub use config::{Config, ConfigError};
