//! Configuration management for the Ariel search client.
//!
//! This crate provides types and loaders for managing QRadar console
//! connection settings from environment variables and `.env` files.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{Config, ConnectionConfig};
