//! # Ennode Common Library
//!
//! Shared code for the Visual Ennode site including:
//! - Backend resource models
//! - Work grouping, search, and filter pipeline
//! - Project title alias table
//! - Locale handling
//! - Header theme state
//! - Configuration loading

pub mod config;
pub mod error;
pub mod header_theme;
pub mod locale;
pub mod models;
pub mod works;

pub use error::{Error, Result};
pub use locale::Locale;
