//! Server-rendered HTML pages
//!
//! Every page goes through [`layout::render_document`], which injects the
//! generated metadata, all hreflang alternates and the site-wide
//! Organization and WebSite JSON-LD into `<head>`.
//!
//! Each hreflang alternate (`/de-de/tools`) is served by the same handlers:
//! [`fallback`] strips a supported locale prefix and replays the request
//! through [`localized_routes`] with a [`RequestLocale`] extension.

pub mod blog;
pub mod crawl;
pub mod directory;
pub mod home;
pub mod layout;
pub mod markdown;
pub mod review;

use axum::{
    extract::{OriginalUri, Request, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Extension, Router,
};
use fuelhub_common::config::SiteConfig;
use fuelhub_common::seo::locales::{split_locale_prefix, Locale};
use fuelhub_common::seo::{generate_world_class_metadata, MetadataInput};
use tower::ServiceExt;
use tracing::{debug, error};

use crate::api::ApiError;
use crate::AppState;
use layout::{render_document, Page};

/// Pages that are also served under every locale prefix
pub fn localized_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home_page))
        .route("/tools", get(directory::directory_page))
        .route("/tools/:slug", get(review::review_page))
        .route("/blog", get(blog::blog_index))
        .route("/blog/:slug", get(blog::blog_post_page))
}

/// HTML routes
pub fn page_routes() -> Router<AppState> {
    localized_routes()
        .route("/robots.txt", get(crawl::robots_txt))
        .route("/sitemap.xml", get(crawl::sitemap_xml))
}

/// Locale taken from the request path prefix
#[derive(Debug, Clone, Copy)]
pub struct RequestLocale(pub &'static Locale);

impl RequestLocale {
    /// Locale code for `MetadataInput::locale`; `None` on unprefixed paths
    pub fn code(locale: Option<Extension<RequestLocale>>) -> Option<String> {
        locale.map(|Extension(RequestLocale(l))| l.code.to_string())
    }
}

/// A failed page request, already rendered as an HTML document
#[derive(Debug)]
pub struct PageError {
    status: StatusCode,
    html: String,
}

impl PageError {
    fn render(site: &SiteConfig, status: StatusCode, heading: &str, detail: &str) -> Self {
        let meta = generate_world_class_metadata(
            site,
            &MetadataInput {
                title: format!("{} | {}", heading, site.name),
                description: detail.to_string(),
                no_index: true,
                ..Default::default()
            },
        );
        let body = format!(
            r#"<section class="error-page"><h1>{}</h1><p>{}</p><p><a href="/">Back to the homepage</a> or <a href="/tools">browse all AI tools</a>.</p></section>"#,
            fuelhub_common::seo::escape_html(heading),
            fuelhub_common::seo::escape_html(detail)
        );

        Self {
            status,
            html: render_document(
                site,
                &Page {
                    meta,
                    structured_data: Vec::new(),
                    body,
                },
            ),
        }
    }

    pub fn not_found(site: &SiteConfig, path: &str) -> Self {
        Self::render(
            site,
            StatusCode::NOT_FOUND,
            "Page not found",
            &format!("Nothing lives at {}.", path),
        )
    }

    pub fn bad_request(site: &SiteConfig, message: &str) -> Self {
        Self::render(site, StatusCode::BAD_REQUEST, "Invalid request", message)
    }

    pub fn internal(site: &SiteConfig, message: &str) -> Self {
        error!("Page render failed: {}", message);
        Self::render(
            site,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Something went wrong",
            "The page could not be loaded. Please try again shortly.",
        )
    }

    /// Map an API-level failure onto the matching HTML page
    pub fn from_api(site: &SiteConfig, path: &str, err: ApiError) -> Self {
        match err {
            ApiError::BadRequest(msg) => Self::bad_request(site, &msg),
            ApiError::NotFound(_) => Self::not_found(site, path),
            ApiError::Internal(msg) => Self::internal(site, &msg),
        }
    }

    pub fn from_common(site: &SiteConfig, path: &str, err: fuelhub_common::Error) -> Self {
        Self::from_api(site, path, err.into())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.status, Html(self.html)).into_response()
    }
}

/// Fallback for unknown paths
pub async fn not_found(State(state): State<AppState>, OriginalUri(uri): OriginalUri) -> PageError {
    PageError::not_found(&state.site, uri.path())
}

/// Top-level fallback: locale-prefixed pages, otherwise the 404 page
pub async fn fallback(State(state): State<AppState>, mut request: Request) -> Response {
    let Some((locale, rest)) = split_locale_prefix(request.uri().path()) else {
        return PageError::not_found(&state.site, request.uri().path()).into_response();
    };

    let target = match request.uri().query() {
        Some(query) => format!("{}?{}", rest, query),
        None => rest,
    };
    let uri = match target.parse::<Uri>() {
        Ok(uri) => uri,
        Err(_) => return PageError::not_found(&state.site, request.uri().path()).into_response(),
    };

    debug!("Serving {} as {} in {}", request.uri(), uri, locale.code);
    *request.uri_mut() = uri;
    request.extensions_mut().insert(RequestLocale(locale));

    let router = localized_routes().fallback(not_found).with_state(state);
    match router.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}
