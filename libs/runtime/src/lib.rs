//! Process-level plumbing shared by the garden binaries: layered
//! configuration loading and logging bootstrap.

pub mod config;
pub mod logging;
mod paths;

pub use config::{
    default_logging_config, AppConfig, CliArgs, DatabaseConfig, LoggingConfig, Section,
    ServerConfig,
};
pub use paths::resolve_home_dir;
