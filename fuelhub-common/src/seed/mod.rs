//! Embedded seed content
//!
//! Each seed is a TOML document compiled into the binary. A seed may carry:
//! - `[category]` and `[post]`: one long-form blog post and the category it is
//!   filed under (`category_slug` names an existing category instead; when
//!   neither resolves, any category is used)
//! - `[[categories]]`, `[[tools]]` and `[[comparisons]]`: directory content
//!
//! Every write is an upsert keyed by slug, so applying a seed twice leaves the
//! database exactly as applying it once.

use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::categories::{resolve_category, upsert_category};
use crate::db::comparisons::upsert_comparison;
use crate::db::models::{NewBlogPost, NewCategory, NewComparison, NewTool};
use crate::db::posts::upsert_post;
use crate::db::tools::upsert_tool;
use crate::{Error, Result};

/// A named seed document embedded at compile time
#[derive(Debug, Clone, Copy)]
pub struct SeedSource {
    pub name: &'static str,
    pub source: &'static str,
}

static CATALOGUE: &[SeedSource] = &[
    SeedSource {
        name: "directory-starter",
        source: include_str!("../../seeds/directory-starter.toml"),
    },
    SeedSource {
        name: "add-ai-customer-service-blog",
        source: include_str!("../../seeds/add-ai-customer-service-blog.toml"),
    },
    SeedSource {
        name: "add-ai-writing-tools-blog",
        source: include_str!("../../seeds/add-ai-writing-tools-blog.toml"),
    },
    SeedSource {
        name: "add-ai-marketing-automation-blog",
        source: include_str!("../../seeds/add-ai-marketing-automation-blog.toml"),
    },
    SeedSource {
        name: "update-ai-seo-tools-blog",
        source: include_str!("../../seeds/update-ai-seo-tools-blog.toml"),
    },
];

/// All embedded seeds, directory content first
pub fn catalogue() -> &'static [SeedSource] {
    CATALOGUE
}

pub fn find_seed(name: &str) -> Option<&'static SeedSource> {
    CATALOGUE.iter().find(|s| s.name == name)
}

impl SeedSource {
    pub fn parse(&self) -> Result<SeedDocument> {
        toml::from_str(self.source)
            .map_err(|e| Error::Config(format!("Seed '{}' is invalid: {}", self.name, e)))
    }
}

/// A tool entry plus the slug of its category
#[derive(Debug, Clone, Deserialize)]
pub struct ToolSeed {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(flatten)]
    pub tool: NewTool,
}

/// Parsed seed document
#[derive(Debug, Clone, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub category: Option<NewCategory>,
    #[serde(default)]
    pub category_slug: Option<String>,
    #[serde(default)]
    pub post: Option<NewBlogPost>,
    #[serde(default)]
    pub categories: Vec<NewCategory>,
    #[serde(default)]
    pub tools: Vec<ToolSeed>,
    #[serde(default)]
    pub comparisons: Vec<NewComparison>,
}

/// Rows written by one seed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub posts: usize,
    pub tools: usize,
    pub comparisons: usize,
}

impl SeedReport {
    fn absorb(&mut self, other: SeedReport) {
        self.categories += other.categories;
        self.posts += other.posts;
        self.tools += other.tools;
        self.comparisons += other.comparisons;
    }
}

/// Apply one seed document
pub async fn apply_seed(pool: &SqlitePool, document: &SeedDocument) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for category in &document.categories {
        upsert_category(pool, category).await?;
        report.categories += 1;
    }

    for entry in &document.tools {
        let mut tool = entry.tool.clone();
        if let Some(slug) = &entry.category {
            let category = resolve_category(pool, Some(slug)).await?;
            tool.category_id = category.map(|c| c.id);
        }
        upsert_tool(pool, &tool).await?;
        report.tools += 1;
    }

    for comparison in &document.comparisons {
        upsert_comparison(pool, comparison).await?;
        report.comparisons += 1;
    }

    if let Some(post) = &document.post {
        let category = match &document.category {
            Some(category) => {
                report.categories += 1;
                Some(upsert_category(pool, category).await?)
            }
            None => resolve_category(pool, document.category_slug.as_deref()).await?,
        };

        if category.is_none() {
            warn!("No category available for post '{}', storing uncategorized", post.slug);
        }

        let mut post = post.clone();
        post.category_id = category.map(|c| c.id);
        upsert_post(pool, &post).await?;
        report.posts += 1;
    }

    Ok(report)
}

/// Parse and apply the named seeds in order, stopping at the first failure
pub async fn run_seeds(pool: &SqlitePool, names: &[String]) -> Result<SeedReport> {
    // Resolve every name before writing anything
    let sources = names
        .iter()
        .map(|name| {
            find_seed(name).ok_or_else(|| Error::NotFound(format!("seed '{}'", name)))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut total = SeedReport::default();
    for source in sources {
        let document = source.parse()?;
        let report = apply_seed(pool, &document).await?;
        info!(
            "Seed '{}' applied: {} categories, {} posts, {} tools, {} comparisons",
            source.name, report.categories, report.posts, report.tools, report.comparisons
        );
        total.absorb(report);
    }

    Ok(total)
}

/// Names of every embedded seed
pub fn all_seed_names() -> Vec<String> {
    CATALOGUE.iter().map(|s| s.name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_catalogue_entry_parses() {
        for source in catalogue() {
            let document = source.parse().unwrap_or_else(|e| panic!("{}: {}", source.name, e));
            assert!(
                document.post.is_some() || !document.tools.is_empty(),
                "seed '{}' writes nothing",
                source.name
            );
        }
    }

    #[test]
    fn test_customer_service_seed_slug() {
        let document = find_seed("add-ai-customer-service-blog").unwrap().parse().unwrap();
        let post = document.post.unwrap();
        assert_eq!(post.slug, "ai-customer-service-tools");
        assert!(post.published);
        assert!(post.content.len() > 1000);
    }

    #[test]
    fn test_unknown_seed() {
        assert!(find_seed("add-nothing").is_none());
    }
}
