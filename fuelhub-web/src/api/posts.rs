//! Blog post API

use axum::{
    extract::{Path, Query, State},
    Json,
};
use fuelhub_common::db::models::{BlogPost, BlogPostSummary};
use fuelhub_common::db::posts::{self, PostQuery};
use fuelhub_common::pagination::{sanitize_limit, Pagination};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
}

impl PostsQuery {
    pub fn to_query(&self) -> Result<PostQuery, ApiError> {
        let number = |name: &str, raw: &Option<String>| -> Result<Option<i64>, ApiError> {
            match raw.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                Some(v) => v
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| ApiError::BadRequest(format!("Invalid {}: {}", name, v))),
                None => Ok(None),
            }
        };

        Ok(PostQuery {
            page: number("page", &self.page)?.unwrap_or(1).max(1),
            limit: sanitize_limit(number("limit", &self.limit)?),
            category: self
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PostsResponse {
    pub posts: Vec<BlogPostSummary>,
    pub pagination: Pagination,
}

/// GET /api/posts
///
/// Published posts, newest first.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostsQuery>,
) -> Result<Json<PostsResponse>, ApiError> {
    let (posts, pagination) = posts::list_posts(&state.db, &query.to_query()?).await?;
    Ok(Json(PostsResponse { posts, pagination }))
}

/// GET /api/posts/:slug
///
/// Counts as a view of the post.
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    let mut post = posts::find_published_post(&state.db, &slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("post '{}'", slug)))?;

    posts::increment_post_views(&state.db, &slug).await?;
    post.view_count += 1;

    Ok(Json(post))
}
