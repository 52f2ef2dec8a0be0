//! JSON API handlers for fuelhub-web

pub mod buildinfo;
pub mod categories;
pub mod error;
pub mod health;
pub mod home;
pub mod posts;
pub mod tools;

use axum::{routing::get, Router};

use crate::AppState;

pub use buildinfo::get_build_info;
pub use categories::list_categories;
pub use error::ApiError;
pub use health::health_routes;
pub use home::get_home;
pub use posts::{get_post, list_posts};
pub use tools::{get_tool, list_tools, ToolsQuery};

/// Routes under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/buildinfo", get(get_build_info))
        .route("/api/categories", get(list_categories))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/:slug", get(get_tool))
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(get_post))
        .route("/api/home", get(get_home))
}
