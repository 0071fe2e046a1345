//! `sort_order` helpers shared by the ordered collection tables.

use atelier_core::content::ReorderItem;
use atelier_core::types::DbId;
use sqlx::PgPool;

/// Result of a batch reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// Every row was updated.
    Applied,
    /// The id does not exist; the transaction was rolled back.
    Missing(DbId),
}

/// SQL expression for an insert's `sort_order`: the bound value if present,
/// otherwise one past the current maximum (0 for an empty table).
pub(crate) fn next_order(table: &str, param: usize) -> String {
    format!("COALESCE(${param}, (SELECT COALESCE(MAX(sort_order), -1) + 1 FROM {table}))")
}

/// Apply `{id, order}` pairs to `table` in one statement, all-or-nothing.
///
/// Callers validate the payload first (no duplicates, no negative orders).
pub(crate) async fn reorder(
    pool: &PgPool,
    table: &str,
    items: &[ReorderItem],
) -> Result<ReorderOutcome, sqlx::Error> {
    let ids: Vec<DbId> = items.iter().map(|i| i.id).collect();
    let orders: Vec<i32> = items.iter().map(|i| i.order).collect();

    let mut tx = pool.begin().await?;

    let query = format!(
        "UPDATE {table} AS t SET sort_order = u.sort_order \
         FROM UNNEST($1::bigint[], $2::int[]) AS u(id, sort_order) \
         WHERE t.id = u.id"
    );
    let result = sqlx::query(&query)
        .bind(&ids)
        .bind(&orders)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() as usize == ids.len() {
        tx.commit().await?;
        return Ok(ReorderOutcome::Applied);
    }

    let existing: Vec<DbId> =
        sqlx::query_scalar(&format!("SELECT id FROM {table} WHERE id = ANY($1)"))
            .bind(&ids)
            .fetch_all(&mut *tx)
            .await?;
    tx.rollback().await?;

    let missing = ids
        .into_iter()
        .find(|id| !existing.contains(id))
        .unwrap_or_default();
    tracing::debug!(table, missing, "Reorder rolled back: unknown id");
    Ok(ReorderOutcome::Missing(missing))
}
