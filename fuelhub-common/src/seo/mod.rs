//! SEO helpers: page metadata, hreflang alternates, JSON-LD and content heuristics
//!
//! Everything here is a formatting layer over static tables and page data;
//! nothing touches the database.

pub mod analysis;
pub mod head;
pub mod jsonld;
pub mod locales;
pub mod metadata;

pub use head::{escape_html, render_head};
pub use locales::{hreflang_alternates, HreflangLink, SUPPORTED_LOCALES};
pub use metadata::{generate_world_class_metadata, MetadataInput, PageMetadata, PageType};
