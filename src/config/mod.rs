mod config;

pub use config::{Config, LogSettings, StatusSettings};
