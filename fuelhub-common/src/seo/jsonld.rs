//! schema.org structured data (JSON-LD)

use chrono::NaiveDateTime;
use serde_json::{json, Map, Value};

use crate::config::SiteConfig;
use crate::db::models::{Faq, ToolDetail};

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Article fields needed for a `BlogPosting`
#[derive(Debug, Clone, Default)]
pub struct BlogPostingInput {
    pub headline: String,
    pub description: String,
    pub path: String,
    pub image: Option<String>,
    pub author: Option<String>,
    pub published: Option<NaiveDateTime>,
    pub modified: Option<NaiveDateTime>,
    pub keywords: Vec<String>,
    pub word_count: usize,
    pub section: Option<String>,
}

fn iso(time: NaiveDateTime) -> String {
    time.and_utc().to_rfc3339()
}

pub fn organization(site: &SiteConfig) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Organization",
        "@id": format!("{}/#organization", site.base()),
        "name": site.name,
        "url": site.base(),
        "logo": {
            "@type": "ImageObject",
            "url": site.absolute_url(&site.logo),
        },
        "description": site.description,
    })
}

/// `WebSite` with a sitelinks search box targeting the directory search
pub fn website(site: &SiteConfig) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "WebSite",
        "@id": format!("{}/#website", site.base()),
        "name": site.name,
        "url": site.base(),
        "inLanguage": site.default_locale,
        "publisher": { "@id": format!("{}/#organization", site.base()) },
        "potentialAction": {
            "@type": "SearchAction",
            "target": {
                "@type": "EntryPoint",
                "urlTemplate": format!("{}/tools?search={{search_term_string}}", site.base()),
            },
            "query-input": "required name=search_term_string",
        },
    })
}

pub fn blog_posting(site: &SiteConfig, post: &BlogPostingInput) -> Value {
    let url = site.absolute_url(&post.path);
    let author_name = post.author.clone().unwrap_or_else(|| format!("{} Team", site.name));

    let mut value = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BlogPosting",
        "headline": post.headline,
        "description": post.description,
        "url": url,
        "mainEntityOfPage": { "@type": "WebPage", "@id": url },
        "author": { "@type": "Person", "name": author_name },
        "publisher": {
            "@type": "Organization",
            "name": site.name,
            "logo": { "@type": "ImageObject", "url": site.absolute_url(&site.logo) },
        },
        "wordCount": post.word_count,
        "inLanguage": site.default_locale,
    });

    // Optional properties are omitted rather than emitted as null
    if let Value::Object(map) = &mut value {
        if let Some(image) = &post.image {
            map.insert("image".into(), Value::String(site.absolute_url(image)));
        }
        if let Some(published) = post.published {
            map.insert("datePublished".into(), Value::String(iso(published)));
        }
        if let Some(modified) = post.modified.or(post.published) {
            map.insert("dateModified".into(), Value::String(iso(modified)));
        }
        if !post.keywords.is_empty() {
            map.insert("keywords".into(), Value::String(post.keywords.join(", ")));
        }
        if let Some(section) = &post.section {
            map.insert("articleSection".into(), Value::String(section.clone()));
        }
    }

    value
}

pub fn faq_page(faqs: &[Faq]) -> Value {
    let entities: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": { "@type": "Answer", "text": faq.answer },
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "FAQPage",
        "mainEntity": entities,
    })
}

/// Breadcrumb trail of `(name, path)` pairs; positions are 1-based
pub fn breadcrumb_list(site: &SiteConfig, crumbs: &[(&str, &str)]) -> Value {
    let items: Vec<Value> = crumbs
        .iter()
        .enumerate()
        .map(|(i, (name, path))| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": name,
                "item": site.absolute_url(path),
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

/// `SoftwareApplication` for a tool review
///
/// `aggregateRating` is only present once the tool has reviews; rich results
/// reject a rating with zero reviews.
pub fn software_application(site: &SiteConfig, tool: &ToolDetail) -> Value {
    let mut map = Map::new();
    map.insert("@context".into(), json!(SCHEMA_CONTEXT));
    map.insert("@type".into(), json!("SoftwareApplication"));
    map.insert("name".into(), json!(tool.name));
    map.insert("description".into(), json!(tool.description));
    map.insert("url".into(), json!(site.absolute_url(&format!("/tools/{}", tool.slug))));
    map.insert("applicationCategory".into(), json!("BusinessApplication"));
    map.insert("operatingSystem".into(), json!("Web"));
    map.insert("dateModified".into(), json!(iso(tool.updated_at)));

    if let Some(category) = &tool.category {
        map.insert("applicationSubCategory".into(), json!(category.name));
    }
    if let Some(website) = &tool.website_url {
        map.insert("sameAs".into(), json!(website));
    }
    if !tool.features.is_empty() {
        map.insert("featureList".into(), json!(tool.features));
    }

    let mut offer = Map::new();
    offer.insert("@type".into(), json!("Offer"));
    offer.insert("priceCurrency".into(), json!("USD"));
    if tool.pricing_type == "free" {
        offer.insert("price".into(), json!("0"));
    }
    if let Some(details) = &tool.pricing_details {
        offer.insert("description".into(), json!(details));
    }
    map.insert("offers".into(), Value::Object(offer));

    if tool.review_count > 0 {
        map.insert(
            "aggregateRating".into(),
            json!({
                "@type": "AggregateRating",
                "ratingValue": format!("{:.1}", tool.rating),
                "bestRating": "5",
                "worstRating": "1",
                "ratingCount": tool.review_count,
            }),
        );
    }

    Value::Object(map)
}

/// Render a `<script type="application/ld+json">` block
///
/// `</` is escaped so copy containing `</script>` cannot close the tag early.
pub fn script_tag(value: &Value) -> String {
    let body = value.to_string().replace("</", "<\\/");
    format!(r#"<script type="application/ld+json">{}</script>"#, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tool(review_count: i64) -> ToolDetail {
        ToolDetail {
            id: 1,
            name: "ChatDesk".to_string(),
            slug: "chatdesk".to_string(),
            description: "Support chatbot".to_string(),
            website_url: Some("https://chatdesk.example".to_string()),
            pricing_type: "freemium".to_string(),
            pricing_details: Some("Free tier, Pro from $29/mo".to_string()),
            features: vec!["Live chat".to_string()],
            pros: vec![],
            cons: vec![],
            faqs: vec![],
            use_cases: vec![],
            rating: 4.56,
            review_count,
            category: None,
            tags: vec![],
            updated_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_website_search_action() {
        let value = website(&SiteConfig::default());
        assert_eq!(value["@type"], "WebSite");
        assert_eq!(
            value["potentialAction"]["target"]["urlTemplate"],
            "https://aifuelhub.com/tools?search={search_term_string}"
        );
    }

    #[test]
    fn test_breadcrumb_positions_start_at_one() {
        let value = breadcrumb_list(&SiteConfig::default(), &[("Home", "/"), ("Blog", "/blog")]);
        let items = value["itemListElement"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["position"], 1);
        assert_eq!(items[1]["position"], 2);
        assert_eq!(items[1]["item"], "https://aifuelhub.com/blog");
    }

    #[test]
    fn test_faq_page_entities() {
        let faqs = vec![Faq {
            question: "Is there a free plan?".to_string(),
            answer: "Yes.".to_string(),
        }];
        let value = faq_page(&faqs);
        assert_eq!(value["mainEntity"][0]["@type"], "Question");
        assert_eq!(value["mainEntity"][0]["acceptedAnswer"]["text"], "Yes.");
    }

    #[test]
    fn test_software_application_rating_only_with_reviews() {
        let site = SiteConfig::default();
        let without = software_application(&site, &tool(0));
        assert!(without.get("aggregateRating").is_none());

        let with = software_application(&site, &tool(12));
        assert_eq!(with["aggregateRating"]["ratingValue"], "4.6");
        assert_eq!(with["aggregateRating"]["ratingCount"], 12);
        assert_eq!(with["offers"]["description"], "Free tier, Pro from $29/mo");
        assert!(with["offers"].get("price").is_none());
    }

    #[test]
    fn test_blog_posting_omits_missing_fields() {
        let value = blog_posting(
            &SiteConfig::default(),
            &BlogPostingInput {
                headline: "Hello".to_string(),
                description: "World".to_string(),
                path: "/blog/hello".to_string(),
                word_count: 2,
                ..Default::default()
            },
        );
        assert_eq!(value["@type"], "BlogPosting");
        assert!(value.get("datePublished").is_none());
        assert!(value.get("image").is_none());
        assert_eq!(value["author"]["name"], "AI Fuel Hub Team");
    }

    #[test]
    fn test_script_tag_escapes_closing_tags() {
        let value = json!({ "text": "</script><script>alert(1)</script>" });
        let tag = script_tag(&value);
        assert!(tag.starts_with(r#"<script type="application/ld+json">"#));
        assert_eq!(tag.matches("</script>").count(), 1);
    }
}
