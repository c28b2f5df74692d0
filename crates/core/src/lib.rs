//! Core types and configuration for the ic-market system.
//!
//! This crate provides shared types used across all other crates:
//! - Listing record types (raw, normalized, persisted row form)
//! - The static chip family catalog
//! - Case-insensitive keyword matching shared by filtering and classification
//! - Configuration structures
//! - Common error types

pub mod catalog;
pub mod config;
pub mod error;
pub mod text;
pub mod types;

pub use catalog::{Category, VariantRule, CATALOG, GLOBAL_EXCLUSIONS};
pub use config::Config;
pub use error::{Error, Result};
pub use text::FoldedText;
pub use types::*;
