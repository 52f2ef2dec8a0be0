//! Tool directory page
//!
//! Filter state lives in the query string, using the same parameters as
//! `/api/tools`, so every filtered view is linkable and pagination links
//! carry the active filters forward.

use std::fmt::Write;

use axum::{
    extract::{Query, State},
    response::Html,
    Extension,
};
use fuelhub_common::config::SiteConfig;
use fuelhub_common::db::categories::list_categories;
use fuelhub_common::db::models::{CategoryWithCount, PricingType};
use fuelhub_common::db::tools::{query_tools, ToolFilter, ToolSort};
use fuelhub_common::pagination::DEFAULT_LIMIT;
use fuelhub_common::seo::jsonld::breadcrumb_list;
use fuelhub_common::seo::{escape_html, generate_world_class_metadata, MetadataInput};

use super::layout::{pagination_nav, render_document, tool_card, Page};
use super::{PageError, RequestLocale};
use crate::api::ToolsQuery;
use crate::AppState;

const SORTS: [ToolSort; 4] = [ToolSort::Popular, ToolSort::Rating, ToolSort::Newest, ToolSort::Name];

const RATING_STEPS: [&str; 4] = ["4.5", "4", "3.5", "3"];

/// `/tools` URL reproducing `filter` at `page`; default values are omitted
pub fn directory_href(filter: &ToolFilter, page: i64) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();

    if let Some(category) = &filter.category {
        params.push(("category", category.clone()));
    }
    if let Some(pricing) = filter.pricing_type {
        params.push(("pricingType", pricing.as_str().to_string()));
    }
    if let Some(rating) = filter.min_rating {
        params.push(("rating", rating.to_string()));
    }
    if !filter.tags.is_empty() {
        params.push(("tags", filter.tags.join(",")));
    }
    if let Some(search) = &filter.search {
        params.push(("search", search.clone()));
    }
    if filter.sort != ToolSort::default() {
        params.push(("sort", filter.sort.as_str().to_string()));
    }
    if filter.limit != DEFAULT_LIMIT {
        params.push(("limit", filter.limit.to_string()));
    }
    if page > 1 {
        params.push(("page", page.to_string()));
    }

    if params.is_empty() {
        return "/tools".to_string();
    }

    let query: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect();
    format!("/tools?{}", query.join("&"))
}

fn selected(is_selected: bool) -> &'static str {
    if is_selected {
        " selected"
    } else {
        ""
    }
}

fn filter_form(filter: &ToolFilter, categories: &[CategoryWithCount]) -> String {
    let mut out = String::from(r#"<form class="filters" action="/tools" method="get">"#);

    let _ = write!(
        out,
        r#"<input type="search" name="search" value="{}" placeholder="Search tools" aria-label="Search tools">"#,
        escape_html(filter.search.as_deref().unwrap_or_default())
    );

    out.push_str(r#"<select name="category" aria-label="Category"><option value="">All categories</option>"#);
    for category in categories {
        let _ = write!(
            out,
            r#"<option value="{}"{}>{} ({})</option>"#,
            escape_html(&category.slug),
            selected(filter.category.as_deref() == Some(category.slug.as_str())),
            escape_html(&category.name),
            category.tool_count
        );
    }
    out.push_str("</select>");

    out.push_str(r#"<select name="pricingType" aria-label="Pricing"><option value="">Any pricing</option>"#);
    for pricing in PricingType::ALL {
        let _ = write!(
            out,
            r#"<option value="{}"{}>{}</option>"#,
            pricing.as_str(),
            selected(filter.pricing_type == Some(pricing)),
            pricing.label()
        );
    }
    out.push_str("</select>");

    out.push_str(r#"<select name="rating" aria-label="Minimum rating"><option value="">Any rating</option>"#);
    for step in RATING_STEPS {
        let value: f64 = step.parse().unwrap_or_default();
        let _ = write!(
            out,
            r#"<option value="{}"{}>{}+ stars</option>"#,
            step,
            selected(filter.min_rating == Some(value)),
            step
        );
    }
    out.push_str("</select>");

    let _ = write!(
        out,
        r#"<input type="text" name="tags" value="{}" placeholder="Tags, comma separated" aria-label="Tags">"#,
        escape_html(&filter.tags.join(","))
    );

    out.push_str(r#"<select name="sort" aria-label="Sort">"#);
    for sort in SORTS {
        let label = match sort {
            ToolSort::Popular => "Most popular",
            ToolSort::Rating => "Highest rated",
            ToolSort::Newest => "Newest",
            ToolSort::Name => "Name",
        };
        let _ = write!(
            out,
            r#"<option value="{}"{}>{}</option>"#,
            sort.as_str(),
            selected(filter.sort == sort),
            label
        );
    }
    out.push_str(r#"</select><button type="submit">Apply</button><a href="/tools">Reset</a></form>"#);

    out
}

fn heading(filter: &ToolFilter, categories: &[CategoryWithCount]) -> String {
    let category = filter
        .category
        .as_deref()
        .and_then(|slug| categories.iter().find(|c| c.slug == slug));

    match (category, &filter.search) {
        (Some(category), _) => format!("Best {} AI Tools", category.name),
        (None, Some(search)) => format!("AI Tools matching \"{}\"", search),
        (None, None) => "AI Tools Directory".to_string(),
    }
}

fn page_metadata(site: &SiteConfig, title: &str, filter: &ToolFilter, total: i64) -> MetadataInput {
    // Search and tag combinations are unbounded; keep them out of the index
    let no_index = filter.search.is_some() || !filter.tags.is_empty();
    let path = match &filter.category {
        Some(category) if !no_index => format!("/tools?category={}", urlencoding::encode(category)),
        _ => "/tools".to_string(),
    };

    MetadataInput {
        title: format!("{} | {}", title, site.name),
        description: format!(
            "Compare {} AI tools by pricing, rating and features. Honest reviews, pros and cons, and FAQs to help you choose.",
            total
        ),
        path,
        keywords: vec!["AI tools".to_string(), title.to_string()],
        no_index,
        ..Default::default()
    }
}

/// GET /tools
pub async fn directory_page(
    State(state): State<AppState>,
    locale: Option<Extension<RequestLocale>>,
    Query(query): Query<ToolsQuery>,
) -> Result<Html<String>, PageError> {
    let site = &state.site;
    let filter = query
        .to_filter()
        .map_err(|e| PageError::from_api(site, "/tools", e))?;

    let (categories, page) = tokio::try_join!(
        list_categories(&state.db),
        query_tools(&state.db, &filter)
    )
    .map_err(|e| PageError::from_common(site, "/tools", e))?;

    let title = heading(&filter, &categories);

    let mut body = String::new();
    let _ = write!(
        body,
        r#"<section class="directory"><h1>{}</h1>{}<p class="result-count">{} tools found</p>"#,
        escape_html(&title),
        filter_form(&filter, &categories),
        page.pagination.total
    );

    if page.tools.is_empty() {
        body.push_str(r#"<p class="empty">No tools match these filters. <a href="/tools">Clear all filters</a>.</p>"#);
    } else {
        body.push_str(r#"<div class="tool-grid">"#);
        for tool in &page.tools {
            body.push_str(&tool_card(tool));
        }
        body.push_str("</div>");
    }
    body.push_str(&pagination_nav(&page.pagination, |n| directory_href(&filter, n)));
    body.push_str("</section>");

    let mut input = page_metadata(site, &title, &filter, page.pagination.total);
    input.locale = RequestLocale::code(locale);
    let meta = generate_world_class_metadata(site, &input);
    let structured_data = vec![breadcrumb_list(site, &[("Home", "/"), ("AI Tools", "/tools")])];

    Ok(Html(render_document(
        site,
        &Page {
            meta,
            structured_data,
            body,
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_links_to_bare_path() {
        let filter = ToolFilter {
            page: 1,
            limit: DEFAULT_LIMIT,
            ..Default::default()
        };
        assert_eq!(directory_href(&filter, 1), "/tools");
        assert_eq!(directory_href(&filter, 2), "/tools?page=2");
    }

    #[test]
    fn test_links_preserve_filters() {
        let filter = ToolFilter {
            page: 1,
            limit: DEFAULT_LIMIT,
            category: Some("customer-service".to_string()),
            pricing_type: Some(PricingType::Freemium),
            min_rating: Some(4.5),
            tags: vec!["chatbot".to_string(), "help-desk".to_string()],
            search: Some("live chat".to_string()),
            sort: ToolSort::Rating,
        };

        assert_eq!(
            directory_href(&filter, 3),
            "/tools?category=customer-service&pricingType=freemium&rating=4.5\
             &tags=chatbot%2Chelp-desk&search=live%20chat&sort=rating&page=3"
        );
    }

    #[test]
    fn test_filter_form_marks_selection() {
        let filter = ToolFilter {
            pricing_type: Some(PricingType::Paid),
            sort: ToolSort::Name,
            ..Default::default()
        };
        let form = filter_form(&filter, &[]);
        assert!(form.contains(r#"<option value="paid" selected>"#));
        assert!(form.contains(r#"<option value="name" selected>"#));
        assert!(!form.contains(r#"<option value="free" selected>"#));
    }
}
