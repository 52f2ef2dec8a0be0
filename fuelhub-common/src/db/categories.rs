//! Category queries

use sqlx::SqlitePool;
use tracing::{debug, warn};

use super::models::{Category, CategoryWithCount, NewCategory};
use crate::{Error, Result};

/// Insert a category or update the existing row with the same slug
pub async fn upsert_category(pool: &SqlitePool, category: &NewCategory) -> Result<Category> {
    if category.slug.trim().is_empty() {
        return Err(Error::InvalidInput("Category slug cannot be empty".to_string()));
    }

    let row = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (name, slug, description, published)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(slug) DO UPDATE SET
            name = excluded.name,
            description = excluded.description,
            published = excluded.published,
            updated_at = CURRENT_TIMESTAMP
        RETURNING id, name, slug, description, published, created_at, updated_at
        "#,
    )
    .bind(&category.name)
    .bind(&category.slug)
    .bind(&category.description)
    .bind(category.published)
    .fetch_one(pool)
    .await?;

    debug!("Upserted category '{}' (id {})", row.slug, row.id);
    Ok(row)
}

pub async fn find_category_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Category>> {
    let row = sqlx::query_as::<_, Category>(
        "SELECT id, name, slug, description, published, created_at, updated_at
         FROM categories WHERE slug = ?",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn find_category_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Category>> {
    let row = sqlx::query_as::<_, Category>(
        "SELECT id, name, slug, description, published, created_at, updated_at
         FROM categories WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Resolve the category a post should be filed under
///
/// Returns the category with `preferred_slug` when it exists, otherwise falls
/// back to any published category (lowest id). `None` only when the table is
/// empty of published categories.
pub async fn resolve_category(
    pool: &SqlitePool,
    preferred_slug: Option<&str>,
) -> Result<Option<Category>> {
    if let Some(slug) = preferred_slug {
        if let Some(category) = find_category_by_slug(pool, slug).await? {
            return Ok(Some(category));
        }
        warn!("Category '{}' not found, falling back to any category", slug);
    }

    let fallback = sqlx::query_as::<_, Category>(
        "SELECT id, name, slug, description, published, created_at, updated_at
         FROM categories WHERE published = 1 ORDER BY id ASC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(fallback)
}

/// Published categories ordered by name, each with its published tool count
pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<CategoryWithCount>> {
    let rows = sqlx::query_as::<_, CategoryWithCount>(
        r#"
        SELECT c.id, c.name, c.slug, c.description,
               (SELECT COUNT(*) FROM tools t
                WHERE t.category_id = c.id AND t.published = 1) AS tool_count
        FROM categories c
        WHERE c.published = 1
        ORDER BY c.name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::init_memory_database;

    fn category(name: &str, slug: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            published: true,
        }
    }

    #[tokio::test]
    async fn test_upsert_category_updates_by_slug() {
        let pool = init_memory_database().await.unwrap();

        let first = upsert_category(&pool, &category("Writing", "writing")).await.unwrap();
        let second = upsert_category(&pool, &category("AI Writing", "writing")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "AI Writing");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_upsert_category_rejects_empty_slug() {
        let pool = init_memory_database().await.unwrap();
        let err = upsert_category(&pool, &category("Nothing", "  ")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_resolve_category_falls_back() {
        let pool = init_memory_database().await.unwrap();

        assert!(resolve_category(&pool, Some("missing")).await.unwrap().is_none());

        let marketing = upsert_category(&pool, &category("Marketing", "marketing")).await.unwrap();
        upsert_category(&pool, &category("Sales", "sales")).await.unwrap();

        let resolved = resolve_category(&pool, Some("sales")).await.unwrap().unwrap();
        assert_eq!(resolved.slug, "sales");

        let fallback = resolve_category(&pool, Some("missing")).await.unwrap().unwrap();
        assert_eq!(fallback.id, marketing.id);

        let any = resolve_category(&pool, None).await.unwrap().unwrap();
        assert_eq!(any.id, marketing.id);
    }
}
