//! Tool directory API
//!
//! `GET /api/tools` takes the same query parameters as the `/tools` page:
//! `page`, `limit`, `category`, `pricingType`, `rating`, `tags`, `search`
//! and `sort`. Empty parameters are treated as absent so an HTML form can
//! submit every field.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use fuelhub_common::db::models::{PricingType, ToolDetail};
use fuelhub_common::db::tools::{self, ToolFilter, ToolPage, ToolSort};
use fuelhub_common::pagination::sanitize_limit;
use serde::Deserialize;
use tracing::debug;

use super::ApiError;
use crate::AppState;

/// Raw directory query parameters
///
/// Kept as strings so malformed values produce a JSON 400 instead of the
/// extractor's plain-text rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub pricing_type: Option<String>,
    pub rating: Option<String>,
    pub tags: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number(name: &str, raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid {}: {}", name, raw)))
}

impl ToolsQuery {
    /// Validate and normalize into a [`ToolFilter`]
    pub fn to_filter(&self) -> Result<ToolFilter, ApiError> {
        let page = match present(&self.page) {
            Some(raw) => parse_number("page", raw)?.max(1),
            None => 1,
        };

        let limit = match present(&self.limit) {
            Some(raw) => sanitize_limit(Some(parse_number("limit", raw)?)),
            None => sanitize_limit(None),
        };

        let pricing_type = present(&self.pricing_type)
            .map(str::parse::<PricingType>)
            .transpose()?;

        let min_rating = match present(&self.rating) {
            Some(raw) => {
                let rating = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|r| (0.0..=5.0).contains(r))
                    .ok_or_else(|| {
                        ApiError::BadRequest(format!("Invalid rating: {} (expected 0-5)", raw))
                    })?;
                Some(rating)
            }
            None => None,
        };

        let sort = match present(&self.sort) {
            Some(raw) => raw.parse::<ToolSort>()?,
            None => ToolSort::default(),
        };

        Ok(ToolFilter {
            page,
            limit,
            category: present(&self.category).map(str::to_string),
            pricing_type,
            min_rating,
            tags: present(&self.tags).map(ToolFilter::parse_tags).unwrap_or_default(),
            search: present(&self.search).map(str::to_string),
            sort,
        })
    }
}

/// GET /api/tools
///
/// Returns `{tools, pagination}`.
pub async fn list_tools(
    State(state): State<AppState>,
    Query(query): Query<ToolsQuery>,
) -> Result<Json<ToolPage>, ApiError> {
    let filter = query.to_filter()?;
    debug!("Tool directory query: {:?}", filter);

    let page = tools::query_tools(&state.db, &filter).await?;
    Ok(Json(page))
}

/// GET /api/tools/:slug
pub async fn get_tool(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ToolDetail>, ApiError> {
    tools::find_published_tool(&state.db, &slug)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("tool '{}'", slug)))
}
