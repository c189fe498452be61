/// Load Module
///
/// Replaces the contents of the match table with a freshly captured snapshot.
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::{LoadError, LoadPhase};
use crate::models::MatchRow;

/// Fully qualified destination table.
const MATCH_TABLE: &str = "fifa4.match";

/// Replace the match table with `rows` in a single transaction
///
/// The delete and the bulk insert commit together, so readers only ever
/// observe the previous snapshot or the new one, never an intermediate
/// state. If `rows` is empty the insert is skipped and the table
/// legitimately ends the run empty.
///
/// Returns the number of rows inserted.
pub async fn replace_match_table(pool: &PgPool, rows: &[MatchRow]) -> Result<u64, LoadError> {
    tracing::info!("Load started ({} rows)", rows.len());

    let mut tx = pool.begin().await.map_err(|source| LoadError { phase: LoadPhase::Begin, source })?;

    sqlx::query(&format!("DELETE FROM {}", MATCH_TABLE))
        .execute(&mut *tx)
        .await
        .map_err(|source| LoadError { phase: LoadPhase::Clear, source })?;

    let mut inserted = 0;
    if !rows.is_empty() {
        let result = insert_rows(rows)
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|source| LoadError { phase: LoadPhase::Insert, source })?;
        inserted = result.rows_affected();
    }

    // Dropping an uncommitted sqlx transaction rolls it back, so any failure
    // above leaves the previous snapshot in place.
    tx.commit().await.map_err(|source| LoadError { phase: LoadPhase::Commit, source })?;

    tracing::info!("Load done ({} rows inserted)", inserted);
    Ok(inserted)
}

/// Build the bulk insert with bound parameters
///
/// Record values are never interpolated into the SQL text.
fn insert_rows(rows: &[MatchRow]) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new(format!("INSERT INTO {} (record, last_updated) ", MATCH_TABLE));

    builder.push_values(rows, |mut b, row| {
        b.push_bind(&row.record).push_bind(row.last_updated);
    });

    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::etl::transform::kst;
    use chrono::{DateTime, TimeZone, Utc};

    fn captured_at() -> DateTime<chrono::FixedOffset> {
        Utc.with_ymd_and_hms(2024, 8, 15, 2, 0, 0).unwrap().with_timezone(&kst())
    }

    #[test]
    fn test_insert_sql_binds_every_row() {
        let rows = vec![
            MatchRow { record: "m1".to_string(), last_updated: captured_at() },
            MatchRow { record: "m2".to_string(), last_updated: captured_at() },
        ];

        let builder = insert_rows(&rows);

        assert_eq!(builder.sql(), "INSERT INTO fifa4.match (record, last_updated) VALUES ($1, $2), ($3, $4)");
    }

    #[test]
    fn test_record_values_never_reach_sql_text() {
        let rows = vec![MatchRow {
            record: "m1'); DROP TABLE fifa4.match; --".to_string(),
            last_updated: captured_at(),
        }];

        let builder = insert_rows(&rows);

        assert!(!builder.sql().contains("DROP TABLE"));
        assert!(builder.sql().ends_with("VALUES ($1, $2)"));
    }
}
