//! Blog post queries

use sqlx::SqlitePool;
use tracing::{debug, info};

use super::models::{BlogPost, BlogPostSummary, NewBlogPost};
use crate::pagination::{calculate_pagination, Pagination};
use crate::{Error, Result};

const POST_COLUMNS: &str = "id, title, slug, excerpt, content, meta_title, meta_description, \
     focus_keyword, published, featured, author, category_id, published_at, view_count, \
     created_at, updated_at";

/// Blog index query
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub page: i64,
    pub limit: i64,
    /// Category slug
    pub category: Option<String>,
}

/// Insert a post or update the existing row with the same slug
///
/// Running the same upsert twice leaves exactly one row. `published_at` is set
/// the first time the post is stored as published and kept afterwards.
pub async fn upsert_post(pool: &SqlitePool, post: &NewBlogPost) -> Result<BlogPost> {
    if post.slug.trim().is_empty() {
        return Err(Error::InvalidInput("Post slug cannot be empty".to_string()));
    }
    if post.title.trim().is_empty() {
        return Err(Error::InvalidInput(format!("Post '{}' has an empty title", post.slug)));
    }

    let sql = format!(
        r#"
        INSERT INTO blog_posts (
            title, slug, excerpt, content, meta_title, meta_description, focus_keyword,
            published, featured, author, category_id, published_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, CASE WHEN ? THEN CURRENT_TIMESTAMP ELSE NULL END)
        ON CONFLICT(slug) DO UPDATE SET
            title = excluded.title,
            excerpt = excluded.excerpt,
            content = excluded.content,
            meta_title = excluded.meta_title,
            meta_description = excluded.meta_description,
            focus_keyword = excluded.focus_keyword,
            published = excluded.published,
            featured = excluded.featured,
            author = excluded.author,
            category_id = excluded.category_id,
            published_at = COALESCE(blog_posts.published_at, excluded.published_at),
            updated_at = CURRENT_TIMESTAMP
        RETURNING {}
        "#,
        POST_COLUMNS
    );

    let row = sqlx::query_as::<_, BlogPost>(&sql)
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.excerpt)
        .bind(&post.content)
        .bind(&post.meta_title)
        .bind(&post.meta_description)
        .bind(&post.focus_keyword)
        .bind(post.published)
        .bind(post.featured)
        .bind(&post.author)
        .bind(post.category_id)
        .bind(post.published)
        .fetch_one(pool)
        .await?;

    info!("Upserted blog post '{}' (id {})", row.slug, row.id);
    Ok(row)
}

/// Published post by slug
pub async fn find_published_post(pool: &SqlitePool, slug: &str) -> Result<Option<BlogPost>> {
    let sql = format!(
        "SELECT {} FROM blog_posts WHERE slug = ? AND published = 1",
        POST_COLUMNS
    );

    let row = sqlx::query_as::<_, BlogPost>(&sql)
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Paginated published posts, newest first
pub async fn list_posts(
    pool: &SqlitePool,
    query: &PostQuery,
) -> Result<(Vec<BlogPostSummary>, Pagination)> {
    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM blog_posts p
        LEFT JOIN categories c ON c.id = p.category_id
        WHERE p.published = 1 AND (?1 IS NULL OR c.slug = ?1)
        "#,
    )
    .bind(&query.category)
    .fetch_one(pool)
    .await?;

    let p = calculate_pagination(total, query.page, query.limit);

    let rows = sqlx::query_as::<_, BlogPostSummary>(
        r#"
        SELECT p.id, p.title, p.slug, p.excerpt, p.featured, p.author,
               p.published_at, p.updated_at,
               c.name AS category_name, c.slug AS category_slug
        FROM blog_posts p
        LEFT JOIN categories c ON c.id = p.category_id
        WHERE p.published = 1 AND (?1 IS NULL OR c.slug = ?1)
        ORDER BY COALESCE(p.published_at, p.created_at) DESC, p.id DESC
        LIMIT ?2 OFFSET ?3
        "#,
    )
    .bind(&query.category)
    .bind(p.limit)
    .bind(p.offset)
    .fetch_all(pool)
    .await?;

    debug!("Listed {} of {} posts (page {})", rows.len(), total, p.page);
    Ok((rows, p))
}

/// Most recent published posts
pub async fn latest_posts(pool: &SqlitePool, limit: i64) -> Result<Vec<BlogPostSummary>> {
    let query = PostQuery {
        page: 1,
        limit,
        category: None,
    };
    let (rows, _) = list_posts(pool, &query).await?;
    Ok(rows)
}

/// Slugs and last-modified times of every published post (sitemap)
pub async fn published_post_slugs(
    pool: &SqlitePool,
) -> Result<Vec<(String, chrono::NaiveDateTime)>> {
    let rows = sqlx::query_as::<_, (String, chrono::NaiveDateTime)>(
        "SELECT slug, updated_at FROM blog_posts WHERE published = 1 ORDER BY slug ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Increment the view counter of a published post
pub async fn increment_post_views(pool: &SqlitePool, slug: &str) -> Result<()> {
    sqlx::query("UPDATE blog_posts SET view_count = view_count + 1 WHERE slug = ? AND published = 1")
        .bind(slug)
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::categories::upsert_category;
    use crate::db::init::init_memory_database;
    use crate::db::models::NewCategory;

    fn post(slug: &str, title: &str) -> NewBlogPost {
        NewBlogPost {
            title: title.to_string(),
            slug: slug.to_string(),
            excerpt: Some("Short excerpt".to_string()),
            content: "# Heading\n\nBody text.".to_string(),
            meta_title: None,
            meta_description: None,
            focus_keyword: None,
            published: true,
            featured: false,
            author: Some("AI Fuel Hub Team".to_string()),
            category_id: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_post_is_idempotent() {
        let pool = init_memory_database().await.unwrap();

        let first = upsert_post(&pool, &post("hello", "Hello")).await.unwrap();
        let second = upsert_post(&pool, &post("hello", "Hello again")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.title, "Hello again");
        assert_eq!(first.published_at, second.published_at);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts WHERE slug = 'hello'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_unpublished_post_is_hidden() {
        let pool = init_memory_database().await.unwrap();

        let mut draft = post("draft", "Draft");
        draft.published = false;
        let stored = upsert_post(&pool, &draft).await.unwrap();
        assert!(stored.published_at.is_none());

        assert!(find_published_post(&pool, "draft").await.unwrap().is_none());

        draft.published = true;
        let stored = upsert_post(&pool, &draft).await.unwrap();
        assert!(stored.published_at.is_some());
        assert!(find_published_post(&pool, "draft").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_posts_filters_by_category() {
        let pool = init_memory_database().await.unwrap();
        let guides = upsert_category(
            &pool,
            &NewCategory {
                name: "Guides".to_string(),
                slug: "guides".to_string(),
                description: None,
                published: true,
            },
        )
        .await
        .unwrap();

        let mut in_guides = post("a", "A");
        in_guides.category_id = Some(guides.id);
        upsert_post(&pool, &in_guides).await.unwrap();
        upsert_post(&pool, &post("b", "B")).await.unwrap();

        let all = PostQuery { page: 1, limit: 10, category: None };
        let (rows, p) = list_posts(&pool, &all).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(p.total, 2);

        let filtered = PostQuery { page: 1, limit: 10, category: Some("guides".to_string()) };
        let (rows, p) = list_posts(&pool, &filtered).await.unwrap();
        assert_eq!(p.total, 1);
        assert_eq!(rows[0].slug, "a");
        assert_eq!(rows[0].category_slug.as_deref(), Some("guides"));
    }

    #[tokio::test]
    async fn test_increment_post_views() {
        let pool = init_memory_database().await.unwrap();
        upsert_post(&pool, &post("counted", "Counted")).await.unwrap();

        increment_post_views(&pool, "counted").await.unwrap();
        increment_post_views(&pool, "counted").await.unwrap();

        let stored = find_published_post(&pool, "counted").await.unwrap().unwrap();
        assert_eq!(stored.view_count, 2);
    }
}
