//! Offboard Ledger Repository
//!
//! Append-only event log plus a running summary counter. The event insert
//! and the summary increment are two separate writes with no cross-write
//! atomicity: a failure between them leaves the two out of step. That
//! window is part of the observable contract, not something to paper over
//! with a hidden transaction.

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{OffboardEvent, OffboardSummary};
use crate::utils::time;

/// Fixed key of the singleton summary record
const SUMMARY_KEY: &str = "current";

#[derive(Clone)]
pub struct OffboardRepository {
    base: BaseRepository,
}

impl OffboardRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append one offboarding event and bump the running summary
    pub async fn record(&self, date: i64) -> RepoResult<OffboardEvent> {
        let mut result = self
            .base
            .db()
            .query("CREATE offboard_event SET date = $date RETURN AFTER")
            .bind(("date", date))
            .await?;
        let event: Option<OffboardEvent> = result.take(0)?;
        let event =
            event.ok_or_else(|| RepoError::Database("Failed to record offboard".to_string()))?;

        // Second, non-atomic write: the summary increment
        let mut summary = self.summary().await?;
        summary.total_offboards += 1;
        *summary.per_month.entry(time::month_key(date)).or_insert(0) += 1;
        self.write_summary(&summary).await?;

        Ok(event)
    }

    /// Current summary; zeroed when nothing has been recorded yet
    pub async fn summary(&self) -> RepoResult<OffboardSummary> {
        let summary: Option<OffboardSummary> = self
            .base
            .db()
            .select(RecordId::from_table_key("offboard_summary", SUMMARY_KEY))
            .await?;
        Ok(summary.unwrap_or_default())
    }

    async fn write_summary(&self, summary: &OffboardSummary) -> RepoResult<()> {
        self.base
            .db()
            .query(
                r#"UPSERT $thing SET
                    total_offboards = $total_offboards,
                    per_month = $per_month"#,
            )
            .bind(("thing", RecordId::from_table_key("offboard_summary", SUMMARY_KEY)))
            .bind(("total_offboards", summary.total_offboards))
            .bind(("per_month", summary.per_month.clone()))
            .await?;
        Ok(())
    }

    /// Most recent events, newest first
    pub async fn recent(&self, limit: i64) -> RepoResult<Vec<OffboardEvent>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM offboard_event ORDER BY date DESC LIMIT $limit")
            .bind(("limit", limit))
            .await?;
        let events: Vec<OffboardEvent> = result.take(0)?;
        Ok(events)
    }

    /// Number of events actually on the ledger (vs. the summary's counter)
    pub async fn count_events(&self) -> RepoResult<i64> {
        #[derive(serde::Deserialize)]
        struct CountRow {
            count: i64,
        }

        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM offboard_event GROUP ALL")
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }

    /// Delete every event on the ledger.
    ///
    /// The summary is deliberately left untouched; the asymmetry matches
    /// the shipped behavior and is asserted by tests.
    pub async fn reset(&self) -> RepoResult<bool> {
        self.base.db().query("DELETE offboard_event").await?;
        Ok(true)
    }
}
