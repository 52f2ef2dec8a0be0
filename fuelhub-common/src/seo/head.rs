//! `<head>` rendering for generated metadata

use serde_json::Value;
use std::fmt::Write;

use super::jsonld::script_tag;
use super::metadata::PageMetadata;

/// Escape text for HTML element content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn meta_name(out: &mut String, name: &str, content: &str) {
    let _ = writeln!(
        out,
        r#"<meta name="{}" content="{}">"#,
        name,
        escape_html(content)
    );
}

fn meta_property(out: &mut String, property: &str, content: &str) {
    let _ = writeln!(
        out,
        r#"<meta property="{}" content="{}">"#,
        property,
        escape_html(content)
    );
}

/// Title, meta tags, canonical and hreflang links, then JSON-LD blocks
pub fn render_head(meta: &PageMetadata, structured_data: &[Value]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "<title>{}</title>", escape_html(&meta.title));
    meta_name(&mut out, "description", &meta.description);
    if !meta.keywords.is_empty() {
        meta_name(&mut out, "keywords", &meta.keywords.join(", "));
    }
    if let Some(author) = &meta.author {
        meta_name(&mut out, "author", author);
    }
    meta_name(&mut out, "robots", &meta.robots);

    let _ = writeln!(
        out,
        r#"<link rel="canonical" href="{}">"#,
        escape_html(&meta.canonical)
    );
    for alternate in &meta.alternates {
        let _ = writeln!(
            out,
            r#"<link rel="alternate" hreflang="{}" href="{}">"#,
            escape_html(&alternate.hreflang),
            escape_html(&alternate.href)
        );
    }

    let og = &meta.open_graph;
    meta_property(&mut out, "og:type", &og.og_type);
    meta_property(&mut out, "og:title", &og.title);
    meta_property(&mut out, "og:description", &og.description);
    meta_property(&mut out, "og:url", &og.url);
    meta_property(&mut out, "og:site_name", &og.site_name);
    meta_property(&mut out, "og:locale", &og.locale);
    if let Some(image) = &og.image {
        meta_property(&mut out, "og:image", image);
    }
    if let Some(published) = &og.published_time {
        meta_property(&mut out, "article:published_time", published);
    }
    if let Some(modified) = &og.modified_time {
        meta_property(&mut out, "article:modified_time", modified);
    }

    let tw = &meta.twitter;
    meta_name(&mut out, "twitter:card", &tw.card);
    meta_name(&mut out, "twitter:site", &tw.site);
    meta_name(&mut out, "twitter:title", &tw.title);
    meta_name(&mut out, "twitter:description", &tw.description);
    if let Some(image) = &tw.image {
        meta_name(&mut out, "twitter:image", image);
    }

    for value in structured_data {
        out.push_str(&script_tag(value));
        out.push('\n');
    }

    out
}
