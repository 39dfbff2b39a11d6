pub mod config;

pub use config::{Config, ConfigError, get_config, reload_config};
