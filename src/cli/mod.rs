mod config;
pub use self::config::Config;

pub mod actions;

mod start;
pub use self::start::{action, get_config_path, settings, start};

mod commands;
pub use self::commands::new as command;
