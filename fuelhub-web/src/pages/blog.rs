//! Blog index and post pages

use std::fmt::Write;

use axum::{
    extract::{Path, Query, State},
    response::Html,
    Extension,
};
use fuelhub_common::config::SiteConfig;
use fuelhub_common::db::categories::find_category_by_id;
use fuelhub_common::db::models::{BlogPost, Category};
use fuelhub_common::db::posts::{find_published_post, increment_post_views, list_posts, PostQuery};
use fuelhub_common::pagination::DEFAULT_LIMIT;
use fuelhub_common::seo::analysis::{reading_time_minutes, summarize, word_count};
use fuelhub_common::seo::jsonld::{blog_posting, breadcrumb_list, BlogPostingInput};
use fuelhub_common::seo::metadata::DESCRIPTION_MAX_CHARS;
use fuelhub_common::seo::{escape_html, generate_world_class_metadata, MetadataInput, PageType};
use tracing::warn;

use super::layout::{format_date, pagination_nav, post_card, render_document, Page};
use super::markdown::{render_markdown, TocEntry};
use super::{PageError, RequestLocale};
use crate::api::posts::PostsQuery;
use crate::AppState;

/// `/blog` URL for `query` at `page`
fn blog_href(query: &PostQuery, page: i64) -> String {
    let mut params = Vec::new();
    if let Some(category) = &query.category {
        params.push(format!("category={}", urlencoding::encode(category)));
    }
    if query.limit != DEFAULT_LIMIT {
        params.push(format!("limit={}", query.limit));
    }
    if page > 1 {
        params.push(format!("page={}", page));
    }

    if params.is_empty() {
        "/blog".to_string()
    } else {
        format!("/blog?{}", params.join("&"))
    }
}

/// GET /blog
pub async fn blog_index(
    State(state): State<AppState>,
    locale: Option<Extension<RequestLocale>>,
    Query(query): Query<PostsQuery>,
) -> Result<Html<String>, PageError> {
    let site = &state.site;
    let query = query
        .to_query()
        .map_err(|e| PageError::from_api(site, "/blog", e))?;

    let (posts, pagination) = list_posts(&state.db, &query)
        .await
        .map_err(|e| PageError::from_common(site, "/blog", e))?;

    let mut body = String::from(
        r#"<section class="blog-index"><h1>AI Fuel Hub Blog</h1><p>Guides, comparisons and playbooks for putting AI tools to work.</p>"#,
    );
    if posts.is_empty() {
        body.push_str(r#"<p class="empty">No articles published yet.</p>"#);
    }
    for post in &posts {
        body.push_str(&post_card(post));
    }
    body.push_str(&pagination_nav(&pagination, |n| blog_href(&query, n)));
    body.push_str("</section>");

    let meta = generate_world_class_metadata(
        site,
        &MetadataInput {
            title: format!("Blog | {}", site.name),
            description: "In-depth guides, tool comparisons and playbooks for customer service, writing, marketing and SEO teams adopting AI.".to_string(),
            path: "/blog".to_string(),
            keywords: vec!["AI blog".to_string(), "AI tools guides".to_string()],
            locale: RequestLocale::code(locale),
            ..Default::default()
        },
    );
    let structured_data = vec![breadcrumb_list(site, &[("Home", "/"), ("Blog", "/blog")])];

    Ok(Html(render_document(
        site,
        &Page {
            meta,
            structured_data,
            body,
        },
    )))
}

/// Meta description: explicit, then excerpt, then the opening sentences
fn post_description(post: &BlogPost) -> String {
    post.meta_description
        .clone()
        .or_else(|| post.excerpt.clone())
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| summarize(&post.content, DESCRIPTION_MAX_CHARS))
}

fn table_of_contents(headings: &[TocEntry]) -> String {
    let sections: Vec<&TocEntry> = headings.iter().filter(|h| h.level == 2).collect();
    if sections.len() < 2 {
        return String::new();
    }

    let mut out = String::from(r#"<nav class="toc"><h2>In this article</h2><ol>"#);
    for heading in sections {
        let _ = write!(
            out,
            r##"<li><a href="#{}">{}</a></li>"##,
            escape_html(&heading.id),
            escape_html(&heading.text)
        );
    }
    out.push_str("</ol></nav>");
    out
}

fn post_body(post: &BlogPost, category: Option<&Category>) -> String {
    let rendered = render_markdown(&post.content);
    let minutes = reading_time_minutes(&post.content);

    let mut out = String::from(r#"<article class="blog-post"><nav class="breadcrumbs"><a href="/">Home</a> / <a href="/blog">Blog</a></nav>"#);
    let _ = write!(out, "<header><h1>{}</h1><p class=\"post-meta\">", escape_html(&post.title));
    if let Some(author) = &post.author {
        let _ = write!(out, r#"<span class="author">{}</span> "#, escape_html(author));
    }
    if let Some(published) = post.published_at {
        let _ = write!(
            out,
            r#"<time datetime="{}">{}</time> "#,
            published.and_utc().to_rfc3339(),
            format_date(published)
        );
    }
    let _ = write!(out, r#"<span class="reading-time">{} min read</span>"#, minutes);
    if let Some(category) = category {
        let _ = write!(
            out,
            r#" <a class="category" href="/blog?category={}">{}</a>"#,
            urlencoding::encode(&category.slug),
            escape_html(&category.name)
        );
    }
    out.push_str("</p></header>");

    out.push_str(&table_of_contents(&rendered.headings));
    let _ = write!(out, r#"<div class="post-content">{}</div>"#, rendered.html);
    out.push_str(r#"<footer><p><a href="/tools">Explore the AI tools directory</a></p></footer></article>"#);
    out
}

fn post_metadata(site: &SiteConfig, post: &BlogPost, path: &str) -> MetadataInput {
    MetadataInput {
        title: post.meta_title.clone().unwrap_or_else(|| post.title.clone()),
        description: post_description(post),
        path: path.to_string(),
        keywords: post.focus_keyword.iter().cloned().collect(),
        page_type: PageType::Article,
        published_time: post.published_at,
        modified_time: Some(post.updated_at),
        author: Some(
            post.author
                .clone()
                .unwrap_or_else(|| format!("{} Team", site.name)),
        ),
        ..Default::default()
    }
}

/// GET /blog/:slug
///
/// Counts as a view of the post.
pub async fn blog_post_page(
    State(state): State<AppState>,
    locale: Option<Extension<RequestLocale>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let site = &state.site;
    let path = format!("/blog/{}", slug);

    let post = find_published_post(&state.db, &slug)
        .await
        .map_err(|e| PageError::from_common(site, &path, e))?
        .ok_or_else(|| PageError::not_found(site, &path))?;

    let category = match post.category_id {
        Some(id) => find_category_by_id(&state.db, id)
            .await
            .map_err(|e| PageError::from_common(site, &path, e))?,
        None => None,
    };

    // A failed counter update must not fail the page
    if let Err(e) = increment_post_views(&state.db, &slug).await {
        warn!("Failed to count view of '{}': {}", slug, e);
    }

    let posting = blog_posting(
        site,
        &BlogPostingInput {
            headline: post.title.clone(),
            description: post_description(&post),
            path: path.clone(),
            image: None,
            author: post.author.clone(),
            published: post.published_at,
            modified: Some(post.updated_at),
            keywords: post.focus_keyword.iter().cloned().collect(),
            word_count: word_count(&post.content),
            section: category.as_ref().map(|c| c.name.clone()),
        },
    );
    let breadcrumbs = breadcrumb_list(
        site,
        &[("Home", "/"), ("Blog", "/blog"), (post.title.as_str(), path.as_str())],
    );

    let mut input = post_metadata(site, &post, &path);
    input.locale = RequestLocale::code(locale);
    let meta = generate_world_class_metadata(site, &input);
    let body = post_body(&post, category.as_ref());

    Ok(Html(render_document(
        site,
        &Page {
            meta,
            structured_data: vec![posting, breadcrumbs],
            body,
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn post(content: &str) -> BlogPost {
        let time = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        BlogPost {
            id: 1,
            title: "AI Customer Service Tools".to_string(),
            slug: "ai-customer-service-tools".to_string(),
            excerpt: None,
            content: content.to_string(),
            meta_title: None,
            meta_description: None,
            focus_keyword: Some("AI customer service".to_string()),
            published: true,
            featured: false,
            author: None,
            category_id: None,
            published_at: Some(time),
            view_count: 0,
            created_at: time,
            updated_at: time,
        }
    }

    #[test]
    fn test_blog_href() {
        let mut query = PostQuery {
            page: 1,
            limit: DEFAULT_LIMIT,
            category: None,
        };
        assert_eq!(blog_href(&query, 1), "/blog");
        query.category = Some("seo".to_string());
        assert_eq!(blog_href(&query, 2), "/blog?category=seo&page=2");
    }

    #[test]
    fn test_description_falls_back_to_content() {
        let post = post("# Title\nAI support cuts wait times. It also scales.");
        assert_eq!(post_description(&post), "AI support cuts wait times. It also scales.");
    }

    #[test]
    fn test_post_body_has_toc_and_reading_time() {
        let body = post_body(
            &post("## Why it matters\n\nText.\n\n## Top tools\n\nMore text."),
            None,
        );
        assert!(body.contains(r##"<a href="#why-it-matters">Why it matters</a>"##));
        assert!(body.contains(r##"<a href="#top-tools">Top tools</a>"##));
        assert!(body.contains("1 min read"));
        assert!(body.contains("March 5, 2024"));
    }
}
