//! Homepage

use std::fmt::Write;

use axum::{extract::State, response::Html, Extension};
use fuelhub_common::seo::{escape_html, generate_world_class_metadata, MetadataInput};

use super::layout::{post_card, render_document, tool_card, Page};
use super::{PageError, RequestLocale};
use crate::api::home::load_home;
use crate::AppState;

/// GET /
pub async fn home_page(
    State(state): State<AppState>,
    locale: Option<Extension<RequestLocale>>,
) -> Result<Html<String>, PageError> {
    let site = &state.site;
    let data = load_home(&state.db)
        .await
        .map_err(|e| PageError::from_common(site, "/", e))?;

    let mut body = String::new();
    let _ = write!(
        body,
        r#"<section class="hero"><h1>Find the right AI tool for the job</h1><p>{}</p><form action="/tools" method="get"><input type="search" name="search" placeholder="Try &quot;chatbot&quot; or &quot;SEO&quot;" aria-label="Search AI tools"><button type="submit">Search</button></form></section>"#,
        escape_html(&site.description)
    );

    if !data.categories.is_empty() {
        body.push_str(r#"<section class="categories"><h2>Browse by category</h2><ul>"#);
        for category in &data.categories {
            let _ = write!(
                body,
                r#"<li><a href="/tools?category={}">{}</a> <span class="count">{}</span></li>"#,
                urlencoding::encode(&category.slug),
                escape_html(&category.name),
                category.tool_count
            );
        }
        body.push_str("</ul></section>");
    }

    for (heading, tools) in [
        ("Featured AI tools", &data.featured_tools),
        ("Trending now", &data.trending_tools),
    ] {
        if tools.is_empty() {
            continue;
        }
        let _ = write!(body, r#"<section class="tool-grid"><h2>{}</h2>"#, heading);
        for tool in tools {
            body.push_str(&tool_card(tool));
        }
        body.push_str("</section>");
    }

    if !data.comparisons.is_empty() {
        body.push_str(r#"<section class="comparisons"><h2>Head-to-head comparisons</h2><ul>"#);
        for comparison in &data.comparisons {
            let _ = write!(
                body,
                r#"<li><strong>{}</strong>: <a href="/tools/{}">{}</a> vs <a href="/tools/{}">{}</a>"#,
                escape_html(&comparison.title),
                escape_html(&comparison.tool_a_slug),
                escape_html(&comparison.tool_a_name),
                escape_html(&comparison.tool_b_slug),
                escape_html(&comparison.tool_b_name)
            );
            if let Some(summary) = &comparison.summary {
                let _ = write!(body, "<p>{}</p>", escape_html(summary));
            }
            body.push_str("</li>");
        }
        body.push_str("</ul></section>");
    }

    if !data.latest_posts.is_empty() {
        body.push_str(r#"<section class="latest-posts"><h2>From the blog</h2>"#);
        for post in &data.latest_posts {
            body.push_str(&post_card(post));
        }
        body.push_str(r#"<p><a href="/blog">All articles</a></p></section>"#);
    }

    let meta = generate_world_class_metadata(
        site,
        &MetadataInput {
            title: format!("{} - Discover the Best AI Tools", site.name),
            description: site.description.clone(),
            path: "/".to_string(),
            keywords: vec![
                "AI tools".to_string(),
                "AI directory".to_string(),
                "AI software reviews".to_string(),
            ],
            locale: RequestLocale::code(locale),
            ..Default::default()
        },
    );

    Ok(Html(render_document(
        site,
        &Page {
            meta,
            structured_data: Vec::new(),
            body,
        },
    )))
}
