//! Database schema migrations
//!
//! Versioned, idempotent migrations tracked in the `schema_version` table.
//! Tables are created with the current schema by `init`; migrations only patch
//! databases created by older builds.
//!
//! # Migration Guidelines
//!
//! 1. **Never modify existing migrations** - add a new one for each schema change
//! 2. **Check before altering** - every migration must be safe to run twice
//! 3. **Use ALTER TABLE** - prefer it over DROP/CREATE to preserve content

use crate::db::tools::fold_search_text;
use crate::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Current schema version
///
/// **IMPORTANT:** Increment this when adding new migrations
pub const CURRENT_SCHEMA_VERSION: i32 = 3;

/// Get current schema version from database
///
/// Returns 0 if schema_version table doesn't exist or has no rows
pub async fn get_schema_version(pool: &SqlitePool) -> Result<i32> {
    let table_exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type='table' AND name='schema_version'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> =
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(pool)
            .await?;

    Ok(version.unwrap_or(0))
}

async fn set_schema_version(pool: &SqlitePool, version: i32) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO schema_version (version) VALUES (?)")
        .bind(version)
        .execute(pool)
        .await?;

    Ok(())
}

/// Run all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let current_version = get_schema_version(pool).await?;

    if current_version == CURRENT_SCHEMA_VERSION {
        info!("Database schema is up to date (v{})", current_version);
        return Ok(());
    }

    if current_version > CURRENT_SCHEMA_VERSION {
        warn!(
            "Database schema version ({}) is newer than code version ({})",
            current_version, CURRENT_SCHEMA_VERSION
        );
        return Ok(());
    }

    info!(
        "Running database migrations: v{} -> v{}",
        current_version, CURRENT_SCHEMA_VERSION
    );

    if current_version < 1 {
        migrate_v1(pool).await?;
        set_schema_version(pool, 1).await?;
        info!("✓ Migration v1 completed");
    }

    if current_version < 2 {
        migrate_v2(pool).await?;
        set_schema_version(pool, 2).await?;
        info!("✓ Migration v2 completed");
    }

    if current_version < 3 {
        migrate_v3(pool).await?;
        set_schema_version(pool, 3).await?;
        info!("✓ Migration v3 completed");
    }

    Ok(())
}

/// Returns true when `table` exists and lacks `column`
async fn column_missing(pool: &SqlitePool, table: &str, column: &str) -> Result<bool> {
    let table_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name = ?)",
    )
    .bind(table)
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(false);
    }

    let has_column: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info(?) WHERE name = ?")
            .bind(table)
            .bind(column)
            .fetch_one(pool)
            .await?;

    Ok(has_column == 0)
}

/// Migration v1: Add focus_keyword column to blog_posts
///
/// Early databases stored only meta title/description.
async fn migrate_v1(pool: &SqlitePool) -> Result<()> {
    info!("Running migration v1: Add focus_keyword column to blog_posts");

    if !column_missing(pool, "blog_posts", "focus_keyword").await? {
        info!("  focus_keyword column already present - skipping");
        return Ok(());
    }

    sqlx::query("ALTER TABLE blog_posts ADD COLUMN focus_keyword TEXT")
        .execute(pool)
        .await?;

    info!("  ✓ Added focus_keyword column to blog_posts table");
    Ok(())
}

/// Migration v2: Add view_count column to blog_posts
async fn migrate_v2(pool: &SqlitePool) -> Result<()> {
    info!("Running migration v2: Add view_count column to blog_posts");

    if !column_missing(pool, "blog_posts", "view_count").await? {
        info!("  view_count column already present - skipping");
        return Ok(());
    }

    sqlx::query("ALTER TABLE blog_posts ADD COLUMN view_count INTEGER NOT NULL DEFAULT 0")
        .execute(pool)
        .await?;

    info!("  ✓ Added view_count column to blog_posts table");
    Ok(())
}

/// Migration v3: Add search_text column to tools and fill it
///
/// SQLite's `LOWER()` only folds ASCII, so search matches a column folded
/// on the Rust side instead.
async fn migrate_v3(pool: &SqlitePool) -> Result<()> {
    info!("Running migration v3: Add search_text column to tools");

    if !column_missing(pool, "tools", "search_text").await? {
        info!("  search_text column already present - skipping");
        return Ok(());
    }

    sqlx::query("ALTER TABLE tools ADD COLUMN search_text TEXT NOT NULL DEFAULT ''")
        .execute(pool)
        .await?;

    let rows: Vec<(i64, String, String)> =
        sqlx::query_as("SELECT id, name, description FROM tools")
            .fetch_all(pool)
            .await?;
    for (id, name, description) in &rows {
        sqlx::query("UPDATE tools SET search_text = ? WHERE id = ?")
            .bind(fold_search_text(name, description))
            .bind(id)
            .execute(pool)
            .await?;
    }

    info!("  ✓ Added search_text column, filled {} tools", rows.len());
    Ok(())
}
