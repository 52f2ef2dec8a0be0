//! # AI Fuel Hub Common Library
//!
//! Shared code for the AI Fuel Hub web service and seed CLI:
//! - Database schema, migrations and models
//! - Content queries (categories, blog posts, tools, comparisons)
//! - SEO metadata, hreflang alternates and JSON-LD structured data
//! - Configuration loading
//! - Embedded seed content catalogue

pub mod config;
pub mod db;
pub mod error;
pub mod pagination;
pub mod seed;
pub mod seo;

pub use error::{Error, Result};
