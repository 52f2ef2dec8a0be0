//! Document shell and shared page fragments

use std::fmt::Write;

use chrono::NaiveDateTime;
use fuelhub_common::config::SiteConfig;
use fuelhub_common::db::models::{slugify, BlogPostSummary, PricingType, ToolSummary};
use fuelhub_common::pagination::Pagination;
use fuelhub_common::seo::jsonld;
use fuelhub_common::seo::locales::{find_locale, TextDirection};
use fuelhub_common::seo::{escape_html, render_head, PageMetadata};
use serde_json::Value;

/// Everything a handler produces for one page
#[derive(Debug, Clone)]
pub struct Page {
    pub meta: PageMetadata,
    /// Page-specific JSON-LD; Organization and WebSite are always added
    pub structured_data: Vec<Value>,
    pub body: String,
}

/// Render a complete HTML document
pub fn render_document(site: &SiteConfig, page: &Page) -> String {
    let mut structured_data = vec![jsonld::organization(site), jsonld::website(site)];
    structured_data.extend(page.structured_data.iter().cloned());

    let direction = match find_locale(&page.meta.locale).map(|l| l.direction) {
        Some(TextDirection::Rtl) => "rtl",
        _ => "ltr",
    };

    let mut out = String::with_capacity(page.body.len() + 16 * 1024);
    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="{lang}" dir="{direction}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{head}</head>
<body>
<header class="site-header">
<a class="brand" href="/">{name}</a>
<nav>
<a href="/tools">AI Tools</a>
<a href="/blog">Blog</a>
</nav>
<form class="site-search" action="/tools" method="get">
<input type="search" name="search" placeholder="Search AI tools" aria-label="Search AI tools">
</form>
</header>
<main>
{body}
</main>
<footer class="site-footer">
<p>{description}</p>
<p>&copy; {name}</p>
</footer>
</body>
</html>
"#,
        lang = escape_html(&page.meta.locale),
        direction = direction,
        head = render_head(&page.meta, &structured_data),
        name = escape_html(&site.name),
        body = page.body,
        description = escape_html(&site.description),
    );
    out
}

pub fn format_date(time: NaiveDateTime) -> String {
    time.format("%B %-d, %Y").to_string()
}

pub fn pricing_label(raw: &str) -> String {
    raw.parse::<PricingType>()
        .map(|p| p.label().to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// `4.6 (312 reviews)`, or "No reviews yet"
pub fn rating_text(rating: f64, review_count: i64) -> String {
    match review_count {
        0 => "No reviews yet".to_string(),
        1 => format!("{:.1} (1 review)", rating),
        n => format!("{:.1} ({} reviews)", rating, n),
    }
}

pub fn tool_card(tool: &ToolSummary) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<article class="tool-card"><h3><a href="/tools/{slug}">{name}</a></h3><p>{description}</p><p class="tool-meta"><span class="pricing">{pricing}</span> <span class="rating">{rating}</span>"#,
        slug = escape_html(&tool.slug),
        name = escape_html(&tool.name),
        description = escape_html(&tool.description),
        pricing = escape_html(&pricing_label(&tool.pricing_type)),
        rating = escape_html(&rating_text(tool.rating, tool.review_count)),
    );
    if let (Some(name), Some(slug)) = (&tool.category_name, &tool.category_slug) {
        let _ = write!(
            out,
            r#" <a class="category" href="/tools?category={}">{}</a>"#,
            urlencoding::encode(slug),
            escape_html(name)
        );
    }
    out.push_str("</p>");
    if !tool.tags.is_empty() {
        out.push_str(r#"<ul class="tags">"#);
        for tag in &tool.tags {
            let _ = write!(
                out,
                r#"<li><a href="/tools?tags={}">{}</a></li>"#,
                urlencoding::encode(&slugify(tag)),
                escape_html(tag)
            );
        }
        out.push_str("</ul>");
    }
    out.push_str("</article>");
    out
}

pub fn post_card(post: &BlogPostSummary) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<article class="post-card"><h3><a href="/blog/{}">{}</a></h3>"#,
        escape_html(&post.slug),
        escape_html(&post.title)
    );
    if let Some(excerpt) = &post.excerpt {
        let _ = write!(out, "<p>{}</p>", escape_html(excerpt));
    }
    out.push_str(r#"<p class="post-meta">"#);
    if let Some(published) = post.published_at {
        let _ = write!(out, "<time>{}</time>", format_date(published));
    }
    if let Some(category) = &post.category_name {
        let _ = write!(out, r#" <span class="category">{}</span>"#, escape_html(category));
    }
    out.push_str("</p></article>");
    out
}

/// Previous/next links; `href_for(page)` builds each target URL
pub fn pagination_nav(pagination: &Pagination, href_for: impl Fn(i64) -> String) -> String {
    if pagination.total_pages <= 1 {
        return String::new();
    }

    let mut out = String::from(r#"<nav class="pagination">"#);
    if pagination.has_prev {
        let _ = write!(
            out,
            r#"<a rel="prev" href="{}">Previous</a>"#,
            escape_html(&href_for(pagination.page - 1))
        );
    }
    let _ = write!(
        out,
        "<span>Page {} of {}</span>",
        pagination.page, pagination.total_pages
    );
    if pagination.has_next {
        let _ = write!(
            out,
            r#"<a rel="next" href="{}">Next</a>"#,
            escape_html(&href_for(pagination.page + 1))
        );
    }
    out.push_str("</nav>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelhub_common::pagination::calculate_pagination;
    use fuelhub_common::seo::{generate_world_class_metadata, MetadataInput};

    #[test]
    fn test_document_carries_site_wide_structured_data() {
        let site = SiteConfig::default();
        let meta = generate_world_class_metadata(
            &site,
            &MetadataInput {
                title: "Test".to_string(),
                description: "Test page".to_string(),
                path: "/".to_string(),
                ..Default::default()
            },
        );
        let html = render_document(
            &site,
            &Page {
                meta,
                structured_data: Vec::new(),
                body: "<p>hello</p>".to_string(),
            },
        );

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="en-US" dir="ltr">"#));
        assert!(html.contains(r#""@type":"Organization""#));
        assert!(html.contains(r#""@type":"WebSite""#));
        assert!(html.contains("<p>hello</p>"));
    }

    #[test]
    fn test_tool_card_links_tags_by_slug() {
        let card = tool_card(&ToolSummary {
            id: 1,
            name: "Intercom Fin".to_string(),
            slug: "intercom-fin".to_string(),
            description: "AI support agent".to_string(),
            pricing_type: "paid".to_string(),
            rating: 4.6,
            review_count: 312,
            featured: true,
            trending: true,
            category_name: None,
            category_slug: None,
            tags: vec!["Help Desk".to_string()],
        });
        assert!(card.contains(r#"<li><a href="/tools?tags=help-desk">Help Desk</a></li>"#));
    }

    #[test]
    fn test_rating_text() {
        assert_eq!(rating_text(0.0, 0), "No reviews yet");
        assert_eq!(rating_text(4.56, 1), "4.6 (1 review)");
        assert_eq!(rating_text(4.0, 12), "4.0 (12 reviews)");
    }

    #[test]
    fn test_pagination_nav() {
        let single = calculate_pagination(5, 1, 12);
        assert!(pagination_nav(&single, |p| format!("/blog?page={}", p)).is_empty());

        let middle = calculate_pagination(30, 2, 12);
        let nav = pagination_nav(&middle, |p| format!("/blog?page={}", p));
        assert!(nav.contains(r#"href="/blog?page=1""#));
        assert!(nav.contains(r#"href="/blog?page=3""#));
        assert!(nav.contains("Page 2 of 3"));
    }
}
