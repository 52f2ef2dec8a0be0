//! Homepage data
//!
//! The homepage sections are independent queries, fetched concurrently.

use axum::{extract::State, Json};
use fuelhub_common::db::models::{BlogPostSummary, CategoryWithCount, Comparison, ToolSummary};
use fuelhub_common::db::{categories, comparisons, posts, tools};
use serde::Serialize;
use sqlx::SqlitePool;

use super::ApiError;
use crate::AppState;

pub const FEATURED_TOOLS: i64 = 6;
pub const TRENDING_TOOLS: i64 = 6;
pub const LATEST_COMPARISONS: i64 = 3;
pub const LATEST_POSTS: i64 = 3;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeData {
    pub categories: Vec<CategoryWithCount>,
    pub featured_tools: Vec<ToolSummary>,
    pub trending_tools: Vec<ToolSummary>,
    pub comparisons: Vec<Comparison>,
    pub latest_posts: Vec<BlogPostSummary>,
}

/// Load every homepage section; the first failing query fails the whole load
pub async fn load_home(pool: &SqlitePool) -> fuelhub_common::Result<HomeData> {
    let (categories, featured_tools, trending_tools, comparisons, latest_posts) = tokio::try_join!(
        categories::list_categories(pool),
        tools::featured_tools(pool, FEATURED_TOOLS),
        tools::trending_tools(pool, TRENDING_TOOLS),
        comparisons::latest_comparisons(pool, LATEST_COMPARISONS),
        posts::latest_posts(pool, LATEST_POSTS),
    )?;

    Ok(HomeData {
        categories,
        featured_tools,
        trending_tools,
        comparisons,
        latest_posts,
    })
}

/// GET /api/home
pub async fn get_home(State(state): State<AppState>) -> Result<Json<HomeData>, ApiError> {
    Ok(Json(load_home(&state.db).await?))
}
