//! Database models
//!
//! Serialized field names are camelCase to match the JSON the directory UI
//! consumes.

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::Error;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Category row with its number of published tools
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub tool_count: i64,
}

/// Category fields accepted by `upsert_category`
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub published: bool,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub focus_keyword: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub author: Option<String>,
    pub category_id: Option<i64>,
    pub published_at: Option<NaiveDateTime>,
    pub view_count: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Listing projection of a blog post (no body)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostSummary {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub featured: bool,
    pub author: Option<String>,
    pub published_at: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
}

/// Blog post fields accepted by `upsert_post`
#[derive(Debug, Clone, Deserialize)]
pub struct NewBlogPost {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub focus_keyword: Option<String>,
    #[serde(default = "default_true")]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub author: Option<String>,
    /// Resolved by the caller; never read from seed documents
    #[serde(skip)]
    pub category_id: Option<i64>,
}

fn default_true() -> bool {
    true
}

/// Tool pricing model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingType {
    Free,
    Freemium,
    Paid,
    Subscription,
    Contact,
}

impl PricingType {
    pub const ALL: [PricingType; 5] = [
        PricingType::Free,
        PricingType::Freemium,
        PricingType::Paid,
        PricingType::Subscription,
        PricingType::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PricingType::Free => "free",
            PricingType::Freemium => "freemium",
            PricingType::Paid => "paid",
            PricingType::Subscription => "subscription",
            PricingType::Contact => "contact",
        }
    }

    /// Human-readable label for page rendering
    pub fn label(&self) -> &'static str {
        match self {
            PricingType::Free => "Free",
            PricingType::Freemium => "Freemium",
            PricingType::Paid => "Paid",
            PricingType::Subscription => "Subscription",
            PricingType::Contact => "Contact for pricing",
        }
    }
}

impl fmt::Display for PricingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(PricingType::Free),
            "freemium" => Ok(PricingType::Freemium),
            "paid" => Ok(PricingType::Paid),
            "subscription" => Ok(PricingType::Subscription),
            "contact" => Ok(PricingType::Contact),
            other => Err(Error::InvalidInput(format!("Unknown pricing type: {}", other))),
        }
    }
}

/// Raw tools row; JSON list columns are undecoded
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ToolRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub website_url: Option<String>,
    pub pricing_type: String,
    pub pricing_details: Option<String>,
    pub features: Option<String>,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub faqs: Option<String>,
    pub use_cases: Option<String>,
    pub rating: f64,
    pub review_count: i64,
    pub featured: bool,
    pub trending: bool,
    pub published: bool,
    pub category_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Card projection used by the directory grid and the tools API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSummary {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub pricing_type: String,
    pub rating: f64,
    pub review_count: i64,
    pub featured: bool,
    pub trending: bool,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// Everything the review page needs for one tool
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDetail {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub website_url: Option<String>,
    pub pricing_type: String,
    pub pricing_details: Option<String>,
    pub features: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub faqs: Vec<Faq>,
    pub use_cases: Vec<String>,
    pub rating: f64,
    pub review_count: i64,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
    pub updated_at: NaiveDateTime,
}

impl ToolDetail {
    /// Decode the JSON list columns of `row`
    pub fn from_row(row: ToolRow, category: Option<Category>, tags: Vec<Tag>) -> Self {
        Self {
            features: decode_json_list(&row.slug, "features", row.features.as_deref()),
            pros: decode_json_list(&row.slug, "pros", row.pros.as_deref()),
            cons: decode_json_list(&row.slug, "cons", row.cons.as_deref()),
            faqs: decode_json_list(&row.slug, "faqs", row.faqs.as_deref()),
            use_cases: decode_json_list(&row.slug, "use_cases", row.use_cases.as_deref()),
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            website_url: row.website_url,
            pricing_type: row.pricing_type,
            pricing_details: row.pricing_details,
            rating: row.rating,
            review_count: row.review_count,
            category,
            tags,
            updated_at: row.updated_at,
        }
    }

    pub fn pricing(&self) -> Option<PricingType> {
        self.pricing_type.parse().ok()
    }
}

/// Tool fields accepted by `upsert_tool`
#[derive(Debug, Clone, Deserialize)]
pub struct NewTool {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub website_url: Option<String>,
    pub pricing_type: PricingType,
    #[serde(default)]
    pub pricing_details: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default)]
    pub use_cases: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: i64,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub trending: bool,
    #[serde(default = "default_true")]
    pub published: bool,
    /// Tag names; slugs are derived with `slugify`
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip)]
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub tool_a_name: String,
    pub tool_a_slug: String,
    pub tool_b_name: String,
    pub tool_b_slug: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewComparison {
    pub title: String,
    pub slug: String,
    pub tool_a: String,
    pub tool_b: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default = "default_true")]
    pub published: bool,
}

/// Decode a JSON-encoded list column
///
/// NULL, empty or malformed JSON decodes to an empty list so a single bad
/// column never takes the review page down.
pub fn decode_json_list<T: DeserializeOwned>(slug: &str, column: &str, raw: Option<&str>) -> Vec<T> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<T>>(raw) {
        Ok(items) => items,
        Err(e) => {
            warn!("Malformed JSON in tools.{} for '{}': {}", column, slug, e);
            Vec::new()
        }
    }
}

/// Lowercase ASCII slug: alphanumerics kept, every other run collapsed to `-`
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_type_parse() {
        assert_eq!("Freemium".parse::<PricingType>().unwrap(), PricingType::Freemium);
        assert_eq!(" paid ".parse::<PricingType>().unwrap(), PricingType::Paid);
        assert!("cheap".parse::<PricingType>().is_err());
    }

    #[test]
    fn test_decode_json_list_lenient() {
        let ok: Vec<String> = decode_json_list("t", "pros", Some(r#"["Fast", "Cheap"]"#));
        assert_eq!(ok, vec!["Fast", "Cheap"]);

        let null: Vec<String> = decode_json_list("t", "pros", None);
        assert!(null.is_empty());

        let broken: Vec<String> = decode_json_list("t", "pros", Some("[\"unterminated"));
        assert!(broken.is_empty());

        let faqs: Vec<Faq> = decode_json_list(
            "t",
            "faqs",
            Some(r#"[{"question": "Is it free?", "answer": "Yes."}]"#),
        );
        assert_eq!(faqs[0].question, "Is it free?");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Customer Service"), "customer-service");
        assert_eq!(slugify("  AI / ML -- Tools! "), "ai-ml-tools");
        assert_eq!(slugify("GPT-4o"), "gpt-4o");
        assert_eq!(slugify("???"), "");
    }
}
