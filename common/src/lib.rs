pub mod config;
pub mod severity;
