//! # Core Library
//!
//! Core models, database store, configuration, and DTOs for the exchange API.

pub mod config;
pub mod error;
pub mod model;
pub mod dto;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::store::{DbPool, create_pool};
