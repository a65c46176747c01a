//! Shared types, errors, and configuration for Hydra.
//!
//! This crate holds everything that is needed across layer boundaries:
//! the application error taxonomy and the layered configuration loader.

pub mod config;
pub mod error;

pub use config::{AppConfig, DatabaseConfig, ServerConfig};
pub use error::{AppError, AppResult};
