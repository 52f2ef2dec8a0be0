//! Category listing

use axum::{extract::State, Json};
use fuelhub_common::db::categories;
use fuelhub_common::db::models::CategoryWithCount;
use serde::Serialize;

use super::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryWithCount>,
}

/// GET /api/categories
///
/// Published categories ordered by name, each with its published tool count.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = categories::list_categories(&state.db).await?;
    Ok(Json(CategoriesResponse { categories }))
}
