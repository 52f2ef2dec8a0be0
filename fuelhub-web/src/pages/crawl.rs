//! robots.txt and sitemap.xml

use std::fmt::Write;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use fuelhub_common::config::SiteConfig;
use fuelhub_common::db::posts::published_post_slugs;
use fuelhub_common::db::tools::published_tool_slugs;
use fuelhub_common::seo::escape_html;

use super::PageError;
use crate::AppState;

/// Crawlers named explicitly so AI answer engines are invited alongside search
const AI_CRAWLERS: [&str; 8] = [
    "GPTBot",
    "ChatGPT-User",
    "OAI-SearchBot",
    "ClaudeBot",
    "PerplexityBot",
    "Google-Extended",
    "Applebot-Extended",
    "CCBot",
];

pub fn robots_body(site: &SiteConfig) -> String {
    let mut out = String::from("User-agent: *\nAllow: /\nDisallow: /api/\n\n");
    for bot in AI_CRAWLERS {
        let _ = write!(out, "User-agent: {}\nAllow: /\n\n", bot);
    }
    let _ = writeln!(out, "Sitemap: {}", site.absolute_url("/sitemap.xml"));
    out
}

/// GET /robots.txt
pub async fn robots_txt(State(state): State<AppState>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_body(&state.site),
    )
        .into_response()
}

/// One `<url>` entry
#[derive(Debug, Clone)]
pub struct SitemapEntry {
    pub path: String,
    pub last_modified: Option<NaiveDateTime>,
    pub change_frequency: &'static str,
    pub priority: f32,
}

impl SitemapEntry {
    fn fixed(path: &str, change_frequency: &'static str, priority: f32) -> Self {
        Self {
            path: path.to_string(),
            last_modified: None,
            change_frequency,
            priority,
        }
    }
}

pub fn sitemap_body(site: &SiteConfig, entries: &[SitemapEntry]) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        let _ = write!(
            out,
            "<url><loc>{}</loc>",
            escape_html(&site.absolute_url(&entry.path))
        );
        if let Some(modified) = entry.last_modified {
            let _ = write!(out, "<lastmod>{}</lastmod>", modified.format("%Y-%m-%d"));
        }
        let _ = writeln!(
            out,
            "<changefreq>{}</changefreq><priority>{:.1}</priority></url>",
            entry.change_frequency, entry.priority
        );
    }
    out.push_str("</urlset>\n");
    out
}

/// GET /sitemap.xml
///
/// Home, directory and blog index, then every published tool and post.
pub async fn sitemap_xml(State(state): State<AppState>) -> Result<Response, PageError> {
    let site = &state.site;
    let (tools, posts) = tokio::try_join!(
        published_tool_slugs(&state.db),
        published_post_slugs(&state.db)
    )
    .map_err(|e| PageError::from_common(site, "/sitemap.xml", e))?;

    let mut entries = vec![
        SitemapEntry::fixed("/", "daily", 1.0),
        SitemapEntry::fixed("/tools", "daily", 0.9),
        SitemapEntry::fixed("/blog", "daily", 0.8),
    ];
    entries.extend(tools.into_iter().map(|(slug, updated)| SitemapEntry {
        path: format!("/tools/{}", slug),
        last_modified: Some(updated),
        change_frequency: "weekly",
        priority: 0.8,
    }));
    entries.extend(posts.into_iter().map(|(slug, updated)| SitemapEntry {
        path: format!("/blog/{}", slug),
        last_modified: Some(updated),
        change_frequency: "monthly",
        priority: 0.7,
    }));

    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        sitemap_body(site, &entries),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots_allows_ai_crawlers_and_points_to_sitemap() {
        let body = robots_body(&SiteConfig::default());
        assert!(body.starts_with("User-agent: *\nAllow: /\n"));
        assert!(body.contains("User-agent: GPTBot\nAllow: /"));
        assert!(body.contains("User-agent: ClaudeBot\nAllow: /"));
        assert!(body.contains("Sitemap: https://aifuelhub.com/sitemap.xml"));
    }

    #[test]
    fn test_sitemap_entries() {
        let entries = vec![
            SitemapEntry::fixed("/", "daily", 1.0),
            SitemapEntry::fixed("/tools/a&b", "weekly", 0.8),
        ];
        let xml = sitemap_body(&SiteConfig::default(), &entries);
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://aifuelhub.com/</loc>"));
        assert!(xml.contains("<loc>https://aifuelhub.com/tools/a&amp;b</loc>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}
