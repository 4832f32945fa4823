pub mod cli;
pub mod config;
pub mod demo;
pub mod observability;

pub use config::Config;
