//! Page metadata generation
//!
//! Titles and descriptions are clipped to what search result snippets show:
//! 60 and 160 characters, counted in chars rather than bytes.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::locales::{
    find_locale, hreflang_alternates, localized_url, og_locale, HreflangLink, DEFAULT_LOCALE,
};
use crate::config::SiteConfig;

pub const TITLE_MAX_CHARS: usize = 60;
pub const DESCRIPTION_MAX_CHARS: usize = 160;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    #[default]
    Website,
    Article,
}

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Website => "website",
            PageType::Article => "article",
        }
    }
}

/// Everything a page knows about itself before metadata is generated
#[derive(Debug, Clone, Default)]
pub struct MetadataInput {
    pub title: String,
    pub description: String,
    /// Site-relative path, e.g. `/blog/ai-customer-service-tools`
    pub path: String,
    pub keywords: Vec<String>,
    /// Site-relative or absolute image URL
    pub image: Option<String>,
    pub page_type: PageType,
    pub published_time: Option<NaiveDateTime>,
    pub modified_time: Option<NaiveDateTime>,
    pub author: Option<String>,
    /// `noindex, follow`: kept out of the index, links still crawled
    pub no_index: bool,
    /// Locale the page is served in; the canonical URL carries its prefix.
    /// Falls back to the site default (unprefixed) when unset or unsupported.
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraph {
    pub og_type: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub locale: String,
    pub image: Option<String>,
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub site: String,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

/// Generated metadata, ready for `render_head`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: String,
    pub alternates: Vec<HreflangLink>,
    pub robots: String,
    pub author: Option<String>,
    pub locale: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
}

/// Clip `text` to `max_chars`, replacing the tail with `...` when it overflows
///
/// Input over the limit keeps its first `max_chars - 3` characters.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut clipped: String = text.chars().take(keep).collect();
    clipped.push_str(ELLIPSIS);
    clipped
}

/// Keywords in input order, blanks dropped, duplicates removed ignoring case
pub fn normalize_keywords(keywords: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut result = Vec::new();

    for keyword in keywords.iter().map(|k| k.trim()).filter(|k| !k.is_empty()) {
        let key = keyword.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            result.push(keyword.to_string());
        }
    }

    result
}

fn format_time(time: Option<NaiveDateTime>) -> Option<String> {
    time.map(|t| t.and_utc().to_rfc3339())
}

/// Build the full metadata set for a page
pub fn generate_world_class_metadata(site: &SiteConfig, input: &MetadataInput) -> PageMetadata {
    let title = truncate_with_ellipsis(&input.title, TITLE_MAX_CHARS);
    let description = truncate_with_ellipsis(&input.description, DESCRIPTION_MAX_CHARS);
    let image = input.image.as_deref().map(|i| site.absolute_url(i));

    let requested = input.locale.as_deref().and_then(find_locale);
    let canonical = match requested {
        Some(locale) => localized_url(site.base(), locale.code, &input.path),
        None => site.absolute_url(&input.path),
    };

    let locale = requested
        .or_else(|| find_locale(&site.default_locale))
        .map(|l| l.code)
        .unwrap_or(DEFAULT_LOCALE)
        .to_string();

    let robots = if input.no_index {
        "noindex, follow".to_string()
    } else {
        "index, follow, max-image-preview:large, max-snippet:-1".to_string()
    };

    let open_graph = OpenGraph {
        og_type: input.page_type.as_str().to_string(),
        title: title.clone(),
        description: description.clone(),
        url: canonical.clone(),
        site_name: site.name.clone(),
        locale: og_locale(&locale),
        image: image.clone(),
        published_time: format_time(input.published_time),
        modified_time: format_time(input.modified_time),
    };

    let twitter = TwitterCard {
        card: if image.is_some() { "summary_large_image" } else { "summary" }.to_string(),
        site: site.twitter_handle.clone(),
        title: title.clone(),
        description: description.clone(),
        image,
    };

    PageMetadata {
        alternates: hreflang_alternates(site.base(), &input.path),
        keywords: normalize_keywords(&input.keywords),
        author: input.author.clone(),
        title,
        description,
        canonical,
        robots,
        locale,
        open_graph,
        twitter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seo::locales::{SUPPORTED_LOCALES, X_DEFAULT};

    fn input(title: &str) -> MetadataInput {
        MetadataInput {
            title: title.to_string(),
            description: "A description".to_string(),
            path: "/tools".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_seventy_char_title_truncates_to_57_plus_ellipsis() {
        let long_title = "a".repeat(70);
        let meta = generate_world_class_metadata(&SiteConfig::default(), &input(&long_title));

        assert_eq!(meta.title.chars().count(), 60);
        assert_eq!(meta.title, format!("{}...", "a".repeat(57)));
        assert!(meta.keywords.is_empty());
    }

    #[test]
    fn test_short_title_untouched() {
        let meta = generate_world_class_metadata(&SiteConfig::default(), &input("Best AI Tools"));
        assert_eq!(meta.title, "Best AI Tools");
    }

    #[test]
    fn test_title_exactly_sixty_chars_untouched() {
        let title = "b".repeat(60);
        assert_eq!(truncate_with_ellipsis(&title, TITLE_MAX_CHARS), title);
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let title = "é".repeat(61);
        let clipped = truncate_with_ellipsis(&title, TITLE_MAX_CHARS);
        assert_eq!(clipped.chars().count(), 60);
        assert!(clipped.ends_with("..."));
    }

    #[test]
    fn test_description_clipped_to_160() {
        let mut i = input("T");
        i.description = "d".repeat(200);
        let meta = generate_world_class_metadata(&SiteConfig::default(), &i);
        assert_eq!(meta.description.chars().count(), 160);
        assert!(meta.description.ends_with("..."));
    }

    #[test]
    fn test_alternates_cover_all_locales_plus_x_default() {
        let meta = generate_world_class_metadata(&SiteConfig::default(), &input("T"));
        assert_eq!(meta.alternates.len(), SUPPORTED_LOCALES.len() + 1);
        assert!(meta.alternates.iter().any(|a| a.hreflang == X_DEFAULT));
        for locale in SUPPORTED_LOCALES {
            assert!(meta.alternates.iter().any(|a| a.hreflang == locale.code));
        }
    }

    #[test]
    fn test_keywords_deduplicated_in_order() {
        let mut i = input("T");
        i.keywords = vec![
            "AI tools".to_string(),
            " ".to_string(),
            "ai TOOLS".to_string(),
            "Chatbots".to_string(),
        ];
        let meta = generate_world_class_metadata(&SiteConfig::default(), &i);
        assert_eq!(meta.keywords, vec!["AI tools", "Chatbots"]);
    }

    #[test]
    fn test_open_graph_and_robots() {
        let mut i = input("T");
        i.page_type = PageType::Article;
        i.image = Some("/img/cover.png".to_string());
        i.locale = Some("de-de".to_string());
        i.no_index = true;

        let meta = generate_world_class_metadata(&SiteConfig::default(), &i);
        assert_eq!(meta.canonical, "https://aifuelhub.com/de-de/tools");
        assert_eq!(meta.open_graph.url, meta.canonical);
        assert_eq!(meta.open_graph.og_type, "article");
        assert_eq!(meta.open_graph.locale, "de_DE");
        assert_eq!(meta.open_graph.image.as_deref(), Some("https://aifuelhub.com/img/cover.png"));
        assert_eq!(meta.twitter.card, "summary_large_image");
        assert_eq!(meta.robots, "noindex, follow");
    }

    #[test]
    fn test_unsupported_locale_falls_back_to_site_default() {
        let mut i = input("T");
        i.locale = Some("xx-XX".to_string());
        let meta = generate_world_class_metadata(&SiteConfig::default(), &i);
        assert_eq!(meta.locale, "en-US");
        assert_eq!(meta.canonical, "https://aifuelhub.com/tools");
    }

    #[test]
    fn test_localized_canonical_is_listed_as_its_alternate() {
        let mut i = input("T");
        i.locale = Some("fr-FR".to_string());
        let meta = generate_world_class_metadata(&SiteConfig::default(), &i);

        let fr = meta.alternates.iter().find(|a| a.hreflang == "fr-FR").unwrap();
        assert_eq!(meta.canonical, fr.href);
        assert_eq!(meta.locale, "fr-FR");
    }
}
