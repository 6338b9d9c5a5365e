pub mod app_config;
pub mod database;

pub use app_config::{AdminBootstrap, AppConfig, ConfigError};
pub use database::{create_tables, establish_connection};
