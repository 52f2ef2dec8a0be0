//! Tool directory queries
//!
//! `query_tools` backs both the `/api/tools` endpoint and the directory page.
//! Every filter adds an AND clause, so adding a filter can only narrow the
//! result set, and the count query shares the exact WHERE clause of the page
//! query so `pagination.total` always matches the matching rows.

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::categories::find_category_by_id;
use super::models::{slugify, NewTool, PricingType, Tag, ToolDetail, ToolRow, ToolSummary};
use crate::pagination::{calculate_pagination, Pagination};
use crate::{Error, Result};

/// Directory sort order; ties always break on id ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolSort {
    /// Most reviewed first
    #[default]
    Popular,
    /// Highest rated first
    Rating,
    /// Most recently added first
    Newest,
    /// Alphabetical by name
    Name,
}

impl ToolSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolSort::Popular => "popular",
            ToolSort::Rating => "rating",
            ToolSort::Newest => "newest",
            ToolSort::Name => "name",
        }
    }

    fn order_by(&self) -> &'static str {
        match self {
            ToolSort::Popular => " ORDER BY t.review_count DESC, t.id ASC",
            ToolSort::Rating => " ORDER BY t.rating DESC, t.id ASC",
            ToolSort::Newest => " ORDER BY t.created_at DESC, t.id ASC",
            ToolSort::Name => " ORDER BY t.name COLLATE NOCASE ASC, t.id ASC",
        }
    }
}

impl fmt::Display for ToolSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolSort {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "popular" => Ok(ToolSort::Popular),
            "rating" => Ok(ToolSort::Rating),
            "newest" => Ok(ToolSort::Newest),
            "name" => Ok(ToolSort::Name),
            other => Err(Error::InvalidInput(format!("Unknown sort order: {}", other))),
        }
    }
}

/// Directory filter state (mirrors the `/api/tools` query string)
#[derive(Debug, Clone, Default)]
pub struct ToolFilter {
    pub page: i64,
    pub limit: i64,
    /// Category slug
    pub category: Option<String>,
    pub pricing_type: Option<PricingType>,
    /// Minimum rating (inclusive)
    pub min_rating: Option<f64>,
    /// Tag slugs; a tool must carry all of them
    pub tags: Vec<String>,
    /// Case-insensitive substring of name or description
    pub search: Option<String>,
    pub sort: ToolSort,
}

impl ToolFilter {
    /// Split a comma-separated tag list into distinct non-empty slugs
    ///
    /// Entries go through `slugify`, so a displayed tag name ("Help Desk")
    /// and its slug ("help-desk") select the same tag.
    pub fn parse_tags(raw: &str) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for tag in raw.split(',').map(slugify).filter(|t| !t.is_empty()) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }
}

/// One page of directory results
#[derive(Debug, Clone, Serialize)]
pub struct ToolPage {
    pub tools: Vec<ToolSummary>,
    pub pagination: Pagination,
}

#[derive(Debug, sqlx::FromRow)]
struct ToolSummaryRow {
    id: i64,
    name: String,
    slug: String,
    description: String,
    pricing_type: String,
    rating: f64,
    review_count: i64,
    featured: bool,
    trending: bool,
    category_name: Option<String>,
    category_slug: Option<String>,
    tag_names: Option<String>,
}

impl From<ToolSummaryRow> for ToolSummary {
    fn from(row: ToolSummaryRow) -> Self {
        let mut tags: Vec<String> = row
            .tag_names
            .as_deref()
            .unwrap_or_default()
            .split('\u{1f}')
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        tags.sort();

        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            pricing_type: row.pricing_type,
            rating: row.rating,
            review_count: row.review_count,
            featured: row.featured,
            trending: row.trending,
            category_name: row.category_name,
            category_slug: row.category_slug,
            tags,
        }
    }
}

const SUMMARY_SELECT: &str = r#"
    SELECT t.id, t.name, t.slug, t.description, t.pricing_type, t.rating,
           t.review_count, t.featured, t.trending,
           c.name AS category_name, c.slug AS category_slug,
           (SELECT GROUP_CONCAT(tg.name, char(31))
            FROM tool_tags tt JOIN tags tg ON tg.id = tt.tag_id
            WHERE tt.tool_id = t.id) AS tag_names
    FROM tools t
    LEFT JOIN categories c ON c.id = t.category_id
"#;

/// Folded text stored in `tools.search_text`
///
/// Both the column and the search term go through `to_lowercase`, so
/// matching is case-insensitive beyond ASCII. The unit separator keeps a
/// term from matching across the name/description boundary.
pub fn fold_search_text(name: &str, description: &str) -> String {
    format!("{}\u{1f}{}", name.to_lowercase(), description.to_lowercase())
}

/// Escape LIKE wildcards so user input matches literally
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Append the WHERE clause for `filter`
fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, filter: &ToolFilter) {
    builder.push(" WHERE t.published = 1");

    if let Some(category) = filter.category.as_deref().filter(|c| !c.is_empty()) {
        builder.push(" AND c.slug = ");
        builder.push_bind(category.to_string());
    }

    if let Some(pricing) = filter.pricing_type {
        builder.push(" AND t.pricing_type = ");
        builder.push_bind(pricing.as_str());
    }

    if let Some(rating) = filter.min_rating {
        builder.push(" AND t.rating >= ");
        builder.push_bind(rating);
    }

    if !filter.tags.is_empty() {
        builder.push(
            " AND t.id IN (SELECT tt.tool_id FROM tool_tags tt \
             JOIN tags tg ON tg.id = tt.tag_id WHERE tg.slug IN (",
        );
        let mut separated = builder.separated(", ");
        for tag in &filter.tags {
            separated.push_bind(tag.clone());
        }
        separated.push_unseparated(") GROUP BY tt.tool_id HAVING COUNT(DISTINCT tg.slug) = ");
        builder.push_bind(filter.tags.len() as i64);
        builder.push(")");
    }

    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        builder.push(" AND t.search_text LIKE ");
        builder.push_bind(like_pattern(search));
        builder.push(" ESCAPE '\\'");
    }
}

/// Run the directory query: filter, count, sort and page
pub async fn query_tools(pool: &SqlitePool, filter: &ToolFilter) -> Result<ToolPage> {
    let mut count_builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT COUNT(*) FROM tools t LEFT JOIN categories c ON c.id = t.category_id",
    );
    push_filters(&mut count_builder, filter);
    let total: i64 = count_builder
        .build_query_scalar()
        .fetch_one(pool)
        .await?;

    let pagination = calculate_pagination(total, filter.page, filter.limit);

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(SUMMARY_SELECT);
    push_filters(&mut builder, filter);
    builder.push(filter.sort.order_by());
    builder.push(" LIMIT ");
    builder.push_bind(pagination.limit);
    builder.push(" OFFSET ");
    builder.push_bind(pagination.offset);

    let rows: Vec<ToolSummaryRow> = builder.build_query_as().fetch_all(pool).await?;

    debug!(
        "Tool query matched {} rows (page {}/{})",
        total, pagination.page, pagination.total_pages
    );

    Ok(ToolPage {
        tools: rows.into_iter().map(ToolSummary::from).collect(),
        pagination,
    })
}

async fn summaries_where(pool: &SqlitePool, condition: &str, limit: i64) -> Result<Vec<ToolSummary>> {
    let sql = format!(
        "{} WHERE t.published = 1 AND {} ORDER BY t.rating DESC, t.id ASC LIMIT ?",
        SUMMARY_SELECT, condition
    );
    let rows = sqlx::query_as::<_, ToolSummaryRow>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(ToolSummary::from).collect())
}

/// Featured tools, best rated first
pub async fn featured_tools(pool: &SqlitePool, limit: i64) -> Result<Vec<ToolSummary>> {
    summaries_where(pool, "t.featured = 1", limit).await
}

/// Trending tools, best rated first
pub async fn trending_tools(pool: &SqlitePool, limit: i64) -> Result<Vec<ToolSummary>> {
    summaries_where(pool, "t.trending = 1", limit).await
}

const TOOL_COLUMNS: &str = "id, name, slug, description, website_url, pricing_type, \
     pricing_details, features, pros, cons, faqs, use_cases, rating, review_count, \
     featured, trending, published, category_id, created_at, updated_at";

pub async fn find_tool_row(pool: &SqlitePool, slug: &str) -> Result<Option<ToolRow>> {
    let sql = format!("SELECT {} FROM tools WHERE slug = ?", TOOL_COLUMNS);
    let row = sqlx::query_as::<_, ToolRow>(&sql)
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn tags_for_tool(pool: &SqlitePool, tool_id: i64) -> Result<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT tg.id, tg.name, tg.slug
        FROM tags tg JOIN tool_tags tt ON tt.tag_id = tg.id
        WHERE tt.tool_id = ?
        ORDER BY tg.name ASC
        "#,
    )
    .bind(tool_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}

/// Published tool with category, tags and decoded list fields
pub async fn find_published_tool(pool: &SqlitePool, slug: &str) -> Result<Option<ToolDetail>> {
    let Some(row) = find_tool_row(pool, slug).await?.filter(|t| t.published) else {
        return Ok(None);
    };

    let category = match row.category_id {
        Some(id) => find_category_by_id(pool, id).await?,
        None => None,
    };
    let tags = tags_for_tool(pool, row.id).await?;

    Ok(Some(ToolDetail::from_row(row, category, tags)))
}

/// Slugs and last-modified times of every published tool (sitemap)
pub async fn published_tool_slugs(
    pool: &SqlitePool,
) -> Result<Vec<(String, chrono::NaiveDateTime)>> {
    let rows = sqlx::query_as::<_, (String, chrono::NaiveDateTime)>(
        "SELECT slug, updated_at FROM tools WHERE published = 1 ORDER BY slug ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Insert or update a tool by slug and replace its tag set
///
/// Runs in a single transaction so a failed tag insert leaves the previous
/// tool row and tags untouched.
pub async fn upsert_tool(pool: &SqlitePool, tool: &NewTool) -> Result<ToolRow> {
    if tool.slug.trim().is_empty() {
        return Err(Error::InvalidInput("Tool slug cannot be empty".to_string()));
    }
    if !(0.0..=5.0).contains(&tool.rating) {
        return Err(Error::InvalidInput(format!(
            "Tool '{}' rating {} outside 0-5",
            tool.slug, tool.rating
        )));
    }

    let mut tx = pool.begin().await?;

    let sql = format!(
        r#"
        INSERT INTO tools (
            name, slug, description, website_url, pricing_type, pricing_details,
            features, pros, cons, faqs, use_cases, search_text, rating, review_count,
            featured, trending, published, category_id
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(slug) DO UPDATE SET
            name = excluded.name,
            description = excluded.description,
            website_url = excluded.website_url,
            pricing_type = excluded.pricing_type,
            pricing_details = excluded.pricing_details,
            features = excluded.features,
            pros = excluded.pros,
            cons = excluded.cons,
            faqs = excluded.faqs,
            use_cases = excluded.use_cases,
            search_text = excluded.search_text,
            rating = excluded.rating,
            review_count = excluded.review_count,
            featured = excluded.featured,
            trending = excluded.trending,
            published = excluded.published,
            category_id = excluded.category_id,
            updated_at = CURRENT_TIMESTAMP
        RETURNING {}
        "#,
        TOOL_COLUMNS
    );

    let row = sqlx::query_as::<_, ToolRow>(&sql)
        .bind(&tool.name)
        .bind(&tool.slug)
        .bind(&tool.description)
        .bind(&tool.website_url)
        .bind(tool.pricing_type.as_str())
        .bind(&tool.pricing_details)
        .bind(serde_json::to_string(&tool.features)?)
        .bind(serde_json::to_string(&tool.pros)?)
        .bind(serde_json::to_string(&tool.cons)?)
        .bind(serde_json::to_string(&tool.faqs)?)
        .bind(serde_json::to_string(&tool.use_cases)?)
        .bind(fold_search_text(&tool.name, &tool.description))
        .bind(tool.rating)
        .bind(tool.review_count)
        .bind(tool.featured)
        .bind(tool.trending)
        .bind(tool.published)
        .bind(tool.category_id)
        .fetch_one(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM tool_tags WHERE tool_id = ?")
        .bind(row.id)
        .execute(&mut *tx)
        .await?;

    for name in &tool.tags {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(Error::InvalidInput(format!("Tag '{}' has no usable slug", name)));
        }

        let tag_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO tags (name, slug) VALUES (?, ?)
            ON CONFLICT(slug) DO UPDATE SET name = excluded.name
            RETURNING id
            "#,
        )
        .bind(name.trim())
        .bind(&slug)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT OR IGNORE INTO tool_tags (tool_id, tag_id) VALUES (?, ?)")
            .bind(row.id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    debug!("Upserted tool '{}' with {} tags", row.slug, tool.tags.len());
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags_dedupes_and_trims() {
        assert_eq!(
            ToolFilter::parse_tags(" chatbot, Writing,,chatbot "),
            vec!["chatbot".to_string(), "writing".to_string()]
        );
        assert!(ToolFilter::parse_tags(" , ").is_empty());
    }

    #[test]
    fn test_parse_tags_accepts_display_names() {
        assert_eq!(
            ToolFilter::parse_tags("Help Desk, help-desk, SEO"),
            vec!["help-desk".to_string(), "seo".to_string()]
        );
    }

    #[test]
    fn test_fold_search_text_lowercases_unicode() {
        assert_eq!(fold_search_text("Écrivain", "ÜBER AI"), "écrivain\u{1f}über ai");
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!("".parse::<ToolSort>().unwrap(), ToolSort::Popular);
        assert_eq!("Rating".parse::<ToolSort>().unwrap(), ToolSort::Rating);
        assert!("random".parse::<ToolSort>().is_err());
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Chat"), "%chat%");
        assert_eq!(like_pattern("100%_off"), "%100\\%\\_off%");
    }
}
