//! Head-to-head tool comparisons

use sqlx::SqlitePool;

use super::models::{Comparison, NewComparison};
use super::tools::find_tool_row;
use crate::{Error, Result};

/// Insert or update a comparison by slug; both tools must already exist
pub async fn upsert_comparison(pool: &SqlitePool, comparison: &NewComparison) -> Result<i64> {
    let tool_a = find_tool_row(pool, &comparison.tool_a)
        .await?
        .ok_or_else(|| Error::NotFound(format!("tool '{}'", comparison.tool_a)))?;
    let tool_b = find_tool_row(pool, &comparison.tool_b)
        .await?
        .ok_or_else(|| Error::NotFound(format!("tool '{}'", comparison.tool_b)))?;

    if tool_a.id == tool_b.id {
        return Err(Error::InvalidInput(format!(
            "Comparison '{}' compares '{}' with itself",
            comparison.slug, comparison.tool_a
        )));
    }

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO comparisons (title, slug, tool_a_id, tool_b_id, summary, published)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(slug) DO UPDATE SET
            title = excluded.title,
            tool_a_id = excluded.tool_a_id,
            tool_b_id = excluded.tool_b_id,
            summary = excluded.summary,
            published = excluded.published
        RETURNING id
        "#,
    )
    .bind(&comparison.title)
    .bind(&comparison.slug)
    .bind(tool_a.id)
    .bind(tool_b.id)
    .bind(&comparison.summary)
    .bind(comparison.published)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Most recent published comparisons whose tools are both published
pub async fn latest_comparisons(pool: &SqlitePool, limit: i64) -> Result<Vec<Comparison>> {
    let rows = sqlx::query_as::<_, Comparison>(
        r#"
        SELECT cmp.id, cmp.title, cmp.slug, cmp.summary,
               a.name AS tool_a_name, a.slug AS tool_a_slug,
               b.name AS tool_b_name, b.slug AS tool_b_slug,
               cmp.created_at
        FROM comparisons cmp
        JOIN tools a ON a.id = cmp.tool_a_id
        JOIN tools b ON b.id = cmp.tool_b_id
        WHERE cmp.published = 1 AND a.published = 1 AND b.published = 1
        ORDER BY cmp.created_at DESC, cmp.id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
