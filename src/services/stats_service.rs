use chrono::{Datelike, TimeZone, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::dto::candidate_dto::{MonthlyCount, StatisticsResponse};
use crate::error::{Error, Result};
use crate::models::candidate::offer_status;
use crate::services::scope::CandidateScope;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Clone)]
pub struct StatsService {
    pool: PgPool,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Scoped KPI counts plus a fixed calendar-year monthly series
    /// (Jan-Dec of the current year, reset every January). The counts are
    /// not taken under one transaction; small mutual inconsistency under
    /// concurrent writes is accepted.
    pub async fn statistics(&self, scope: &CandidateScope) -> Result<StatisticsResponse> {
        let total_candidates = self.scoped_count(scope, None).await?;
        let offers_made = self
            .scoped_count(scope, Some(&[offer_status::RELEASED, offer_status::ACCEPTED]))
            .await?;
        let candidates_joined = self
            .scoped_count(scope, Some(&[offer_status::ACCEPTED]))
            .await?;
        let monthly_data = self.monthly_series(scope).await?;

        Ok(StatisticsResponse {
            total_candidates,
            offers_made,
            candidates_joined,
            monthly_data,
        })
    }

    async fn scoped_count(
        &self,
        scope: &CandidateScope,
        offer_statuses: Option<&[&str]>,
    ) -> Result<i64> {
        let mut qb = count_query(scope, offer_statuses);
        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn monthly_series(&self, scope: &CandidateScope) -> Result<Vec<MonthlyCount>> {
        let year = Utc::now().year();
        let start = Utc
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| Error::Internal("Invalid year start".to_string()))?;
        let end = Utc
            .with_ymd_and_hms(year + 1, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| Error::Internal("Invalid year end".to_string()))?;

        let mut qb = QueryBuilder::new(
            "SELECT EXTRACT(MONTH FROM created_at)::INT, COUNT(*) FROM candidates WHERE created_at >= ",
        );
        qb.push_bind(start);
        qb.push(" AND created_at < ");
        qb.push_bind(end);
        qb.push(" AND ");
        scope.push_predicate(&mut qb);
        qb.push(" GROUP BY 1");

        let rows: Vec<(i32, i64)> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(fill_monthly(&rows))
    }
}

/// Scoped count with an optional offer-status restriction, every value
/// bound rather than spliced into the SQL text.
fn count_query<'args>(
    scope: &CandidateScope,
    offer_statuses: Option<&[&str]>,
) -> QueryBuilder<'args, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM candidates WHERE ");
    scope.push_predicate(&mut qb);
    if let Some(statuses) = offer_statuses {
        qb.push(" AND offer_status = ANY(");
        qb.push_bind(statuses.iter().map(|s| s.to_string()).collect::<Vec<_>>());
        qb.push(")");
    }
    qb
}

/// Expands sparse (month, count) rows into the full 12-bucket series,
/// zero-filling the months with no applications.
fn fill_monthly(rows: &[(i32, i64)]) -> Vec<MonthlyCount> {
    let mut counts = [0i64; 12];
    for (month, count) in rows {
        if (1..=12).contains(month) {
            counts[(*month - 1) as usize] = *count;
        }
    }
    MONTH_LABELS
        .iter()
        .zip(counts)
        .map(|(month, applications)| MonthlyCount {
            month,
            applications,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn count_queries_bind_offer_statuses() {
        let scope = CandidateScope::Owners(vec![Uuid::new_v4()]);

        let qb = count_query(&scope, None);
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM candidates WHERE user_id = ANY($1)");

        let qb = count_query(&scope, Some(&[offer_status::RELEASED, offer_status::ACCEPTED]));
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM candidates WHERE user_id = ANY($1) AND offer_status = ANY($2)"
        );
        assert!(!qb.sql().contains("Released"));
    }

    #[test]
    fn monthly_series_always_has_twelve_buckets() {
        let series = fill_monthly(&[]);
        assert_eq!(series.len(), 12);
        assert!(series.iter().all(|m| m.applications == 0));
        assert_eq!(series[0].month, "Jan");
        assert_eq!(series[11].month, "Dec");
    }

    #[test]
    fn sparse_rows_land_in_the_right_buckets() {
        let series = fill_monthly(&[(2, 3), (12, 7)]);
        assert_eq!(series[1].month, "Feb");
        assert_eq!(series[1].applications, 3);
        assert_eq!(series[11].applications, 7);
        assert_eq!(series.iter().map(|m| m.applications).sum::<i64>(), 10);
    }

    #[test]
    fn out_of_range_months_are_ignored() {
        let series = fill_monthly(&[(0, 5), (13, 5), (6, 1)]);
        assert_eq!(series.iter().map(|m| m.applications).sum::<i64>(), 1);
        assert_eq!(series[5].applications, 1);
    }
}
