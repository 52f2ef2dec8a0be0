//! Markdown rendering for blog posts
//!
//! Headings get slug ids so the table of contents can link to them. Seeded
//! post bodies may embed raw HTML, which passes through unchanged.

use std::collections::HashSet;

use fuelhub_common::db::models::slugify;
use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// A heading in the rendered document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub level: u8,
    pub id: String,
    pub text: String,
}

/// Rendered HTML plus the headings it contains
#[derive(Debug, Clone)]
pub struct RenderedMarkdown {
    pub html: String,
    pub headings: Vec<TocEntry>,
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options
}

fn level_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Unique id for a heading; repeats get `-2`, `-3`, ... skipping ids
/// already taken by other headings
fn unique_id(used: &mut HashSet<String>, text: &str) -> String {
    let base = match slugify(text) {
        s if s.is_empty() => "section".to_string(),
        s => s,
    };
    let mut candidate = base.clone();
    let mut n = 1;
    while used.contains(&candidate) {
        n += 1;
        candidate = format!("{}-{}", base, n);
    }
    used.insert(candidate.clone());
    candidate
}

pub fn render_markdown(source: &str) -> RenderedMarkdown {
    let mut events: Vec<Event> = Vec::new();
    let mut headings = Vec::new();
    let mut used_ids = HashSet::new();

    // Heading events are buffered until the heading closes so its text is
    // known before the opening tag (which carries the id) is emitted
    let mut open_heading: Option<(HeadingLevel, Vec<Event>)> = None;

    for event in Parser::new_ext(source, options()) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                open_heading = Some((level, Vec::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some((level, inner)) = open_heading.take() else {
                    continue;
                };

                let text: String = inner
                    .iter()
                    .filter_map(|e| match e {
                        Event::Text(t) | Event::Code(t) => Some(&**t),
                        _ => None,
                    })
                    .collect();
                let id = unique_id(&mut used_ids, &text);

                headings.push(TocEntry {
                    level: level_number(level),
                    id: id.clone(),
                    text: text.trim().to_string(),
                });

                events.push(Event::Start(Tag::Heading {
                    level,
                    id: Some(CowStr::from(id)),
                    classes: Vec::new(),
                    attrs: Vec::new(),
                }));
                events.extend(inner);
                events.push(Event::End(TagEnd::Heading(level)));
            }
            other => match open_heading.as_mut() {
                Some((_, inner)) => inner.push(other),
                None => events.push(other),
            },
        }
    }

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());

    RenderedMarkdown { html: out, headings }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_get_ids() {
        let rendered = render_markdown("# Intro\n\nText.\n\n## Why `AI` helps\n\nMore.");
        assert!(rendered.html.contains(r#"<h1 id="intro">Intro</h1>"#));
        assert!(rendered.html.contains(r#"<h2 id="why-ai-helps">Why <code>AI</code> helps</h2>"#));
        assert_eq!(
            rendered.headings,
            vec![
                TocEntry { level: 1, id: "intro".to_string(), text: "Intro".to_string() },
                TocEntry { level: 2, id: "why-ai-helps".to_string(), text: "Why AI helps".to_string() },
            ]
        );
    }

    #[test]
    fn test_duplicate_headings_get_unique_ids() {
        let rendered = render_markdown("## Pricing\n\n## Pricing\n\n## !!!");
        let ids: Vec<&str> = rendered.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["pricing", "pricing-2", "section"]);
    }

    #[test]
    fn test_numbered_heading_does_not_collide_with_repeat() {
        let rendered = render_markdown("## Intro\n\n## Intro\n\n## Intro 2");
        let ids: Vec<&str> = rendered.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["intro", "intro-2", "intro-2-2"]);

        let rendered = render_markdown("## Intro 2\n\n## Intro\n\n## Intro");
        let ids: Vec<&str> = rendered.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["intro-2", "intro", "intro-3"]);
    }

    #[test]
    fn test_tables_and_lists_render() {
        let rendered = render_markdown("| Tool | Price |\n|---|---|\n| Tidio | Free |\n\n- one\n- two\n");
        assert!(rendered.html.contains("<table>"));
        assert!(rendered.html.contains("<li>one</li>"));
    }
}
