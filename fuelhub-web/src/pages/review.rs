//! Tool review page
//!
//! Pros and cons, features, use cases, pricing and FAQs, with
//! SoftwareApplication, FAQPage and BreadcrumbList JSON-LD.

use std::fmt::Write;

use axum::{
    extract::{Path, State},
    response::Html,
    Extension,
};
use fuelhub_common::config::SiteConfig;
use fuelhub_common::db::models::ToolDetail;
use fuelhub_common::db::tools::find_published_tool;
use fuelhub_common::seo::jsonld::{breadcrumb_list, faq_page, software_application};
use fuelhub_common::seo::{escape_html, generate_world_class_metadata, MetadataInput, PageType};

use super::layout::{pricing_label, rating_text, render_document, Page};
use super::{PageError, RequestLocale};
use crate::AppState;

fn list_section(out: &mut String, class: &str, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = write!(out, r#"<section class="{}"><h2>{}</h2><ul>"#, class, heading);
    for item in items {
        let _ = write!(out, "<li>{}</li>", escape_html(item));
    }
    out.push_str("</ul></section>");
}

fn review_body(tool: &ToolDetail) -> String {
    let mut out = String::new();

    let _ = write!(
        out,
        r#"<article class="tool-review"><nav class="breadcrumbs"><a href="/">Home</a> / <a href="/tools">AI Tools</a> / <span>{name}</span></nav><h1>{name} Review</h1><p class="lead">{description}</p><p class="tool-meta"><span class="rating">{rating}</span> <span class="pricing">{pricing}</span>"#,
        name = escape_html(&tool.name),
        description = escape_html(&tool.description),
        rating = escape_html(&rating_text(tool.rating, tool.review_count)),
        pricing = escape_html(&pricing_label(&tool.pricing_type)),
    );
    if let Some(category) = &tool.category {
        let _ = write!(
            out,
            r#" <a class="category" href="/tools?category={}">{}</a>"#,
            urlencoding::encode(&category.slug),
            escape_html(&category.name)
        );
    }
    out.push_str("</p>");

    if let Some(url) = &tool.website_url {
        let _ = write!(
            out,
            r#"<p><a class="visit" href="{}" rel="nofollow noopener" target="_blank">Visit {}</a></p>"#,
            escape_html(url),
            escape_html(&tool.name)
        );
    }

    if !tool.tags.is_empty() {
        out.push_str(r#"<ul class="tags">"#);
        for tag in &tool.tags {
            let _ = write!(
                out,
                r#"<li><a href="/tools?tags={}">{}</a></li>"#,
                urlencoding::encode(&tag.slug),
                escape_html(&tag.name)
            );
        }
        out.push_str("</ul>");
    }

    if !tool.pros.is_empty() || !tool.cons.is_empty() {
        out.push_str(r#"<div class="pros-cons">"#);
        list_section(&mut out, "pros", "Pros", &tool.pros);
        list_section(&mut out, "cons", "Cons", &tool.cons);
        out.push_str("</div>");
    }

    list_section(&mut out, "features", "Key features", &tool.features);
    list_section(&mut out, "use-cases", "Use cases", &tool.use_cases);

    let _ = write!(
        out,
        r#"<section class="pricing"><h2>Pricing</h2><p><strong>{}</strong></p>"#,
        escape_html(&pricing_label(&tool.pricing_type))
    );
    if let Some(details) = &tool.pricing_details {
        let _ = write!(out, "<p>{}</p>", escape_html(details));
    }
    out.push_str("</section>");

    if !tool.faqs.is_empty() {
        out.push_str(r#"<section class="faqs"><h2>Frequently asked questions</h2>"#);
        for faq in &tool.faqs {
            let _ = write!(
                out,
                "<details><summary>{}</summary><p>{}</p></details>",
                escape_html(&faq.question),
                escape_html(&faq.answer)
            );
        }
        out.push_str("</section>");
    }

    out.push_str("</article>");
    out
}

fn review_metadata(site: &SiteConfig, tool: &ToolDetail, path: &str) -> MetadataInput {
    let mut keywords = vec![
        tool.name.clone(),
        format!("{} review", tool.name),
        format!("{} pricing", tool.name),
    ];
    if let Some(category) = &tool.category {
        keywords.push(format!("{} AI tools", category.name));
    }
    keywords.extend(tool.tags.iter().map(|t| t.name.clone()));

    MetadataInput {
        title: format!("{} Review: Pricing, Pros & Cons | {}", tool.name, site.name),
        description: tool.description.clone(),
        path: path.to_string(),
        keywords,
        page_type: PageType::Article,
        modified_time: Some(tool.updated_at),
        ..Default::default()
    }
}

/// GET /tools/:slug
pub async fn review_page(
    State(state): State<AppState>,
    locale: Option<Extension<RequestLocale>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let site = &state.site;
    let path = format!("/tools/{}", slug);

    let tool = find_published_tool(&state.db, &slug)
        .await
        .map_err(|e| PageError::from_common(site, &path, e))?
        .ok_or_else(|| PageError::not_found(site, &path))?;

    let mut structured_data = vec![
        software_application(site, &tool),
        breadcrumb_list(
            site,
            &[("Home", "/"), ("AI Tools", "/tools"), (tool.name.as_str(), path.as_str())],
        ),
    ];
    if !tool.faqs.is_empty() {
        structured_data.push(faq_page(&tool.faqs));
    }

    let mut input = review_metadata(site, &tool, &path);
    input.locale = RequestLocale::code(locale);
    let meta = generate_world_class_metadata(site, &input);

    Ok(Html(render_document(
        site,
        &Page {
            meta,
            structured_data,
            body: review_body(&tool),
        },
    )))
}
