pub mod config;
pub mod git;
