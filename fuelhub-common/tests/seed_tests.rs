//! Tests for the embedded seed catalogue
//!
//! - Seeding is idempotent (slug is the natural key)
//! - Every catalogue entry applies cleanly to a fresh database
//! - Unknown seed names fail before anything is written

use fuelhub_common::db::init::init_memory_database;
use fuelhub_common::db::posts::find_published_post;
use fuelhub_common::seed::{all_seed_names, run_seeds};
use fuelhub_common::Error;
use sqlx::SqlitePool;

async fn count(pool: &SqlitePool, sql: &str) -> i64 {
    sqlx::query_scalar(sql).fetch_one(pool).await.unwrap()
}

#[tokio::test]
async fn test_customer_service_seed_twice_leaves_one_row() {
    let pool = init_memory_database().await.unwrap();
    let names = vec!["add-ai-customer-service-blog".to_string()];

    run_seeds(&pool, &names).await.unwrap();
    run_seeds(&pool, &names).await.unwrap();

    let rows = count(
        &pool,
        "SELECT COUNT(*) FROM blog_posts WHERE slug = 'ai-customer-service-tools'",
    )
    .await;
    assert_eq!(rows, 1);

    let post = find_published_post(&pool, "ai-customer-service-tools")
        .await
        .unwrap()
        .expect("seeded post should be published");
    assert!(post.content.len() > 1000);
    assert!(post.published_at.is_some());
    assert!(post.category_id.is_some());
}

#[tokio::test]
async fn test_all_seeds_apply_and_are_idempotent() {
    let pool = init_memory_database().await.unwrap();
    let names = all_seed_names();

    let first = run_seeds(&pool, &names).await.unwrap();
    assert_eq!(first.tools, 8);
    assert_eq!(first.comparisons, 3);
    assert_eq!(first.posts, 4);

    let tools = count(&pool, "SELECT COUNT(*) FROM tools").await;
    let tags = count(&pool, "SELECT COUNT(*) FROM tags").await;
    let links = count(&pool, "SELECT COUNT(*) FROM tool_tags").await;
    let posts = count(&pool, "SELECT COUNT(*) FROM blog_posts").await;
    let categories = count(&pool, "SELECT COUNT(*) FROM categories").await;

    run_seeds(&pool, &names).await.unwrap();

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM tools").await, tools);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM tags").await, tags);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM tool_tags").await, links);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM blog_posts").await, posts);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM categories").await, categories);
    assert_eq!(tools, 8);
    assert_eq!(posts, 4);
}

#[tokio::test]
async fn test_blog_seed_without_directory_uses_category_from_seed() {
    let pool = init_memory_database().await.unwrap();

    run_seeds(&pool, &["add-ai-writing-tools-blog".to_string()])
        .await
        .unwrap();

    let category: String = sqlx::query_scalar(
        "SELECT c.slug FROM blog_posts p JOIN categories c ON c.id = p.category_id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(category, "writing");
}

#[tokio::test]
async fn test_unknown_seed_writes_nothing() {
    let pool = init_memory_database().await.unwrap();
    let names = vec![
        "add-ai-customer-service-blog".to_string(),
        "add-ai-nonexistent-blog".to_string(),
    ];

    let result = run_seeds(&pool, &names).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM blog_posts").await, 0);
}
