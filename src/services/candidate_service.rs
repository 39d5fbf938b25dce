use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::candidate_dto::{CreateCandidatePayload, UpdateCandidatePayload};
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, SubmissionDate};
use crate::services::scope::CandidateScope;

pub const CANDIDATE_COLUMNS: &str = "id, user_id, tl_name, ta_name, am, client, position, \
     date_of_requirement, date_of_submission, candidate_name, location, nationality, \
     work_status, phone_number, email, experience_years, notice_period, work_mode, \
     current_salary, expected_salary, first_interview_date, first_interview_status, \
     second_interview_date, second_interview_status, selection_date, salary_offered, \
     offer_date, offer_status, ep_request, joining_date, remarks, created_at, updated_at";

#[derive(Clone)]
pub struct CandidateService {
    pool: PgPool,
}

impl CandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Scoped list, unordered.
    pub async fn list(&self, scope: &CandidateScope) -> Result<Vec<Candidate>> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {} FROM candidates WHERE ",
            CANDIDATE_COLUMNS
        ));
        scope.push_predicate(&mut qb);
        let candidates = qb
            .build_query_as::<Candidate>()
            .fetch_all(&self.pool)
            .await?;
        Ok(candidates)
    }

    /// Scoped list ordered by creation time descending, truncated to
    /// `limit`.
    pub async fn recent(&self, scope: &CandidateScope, limit: i64) -> Result<Vec<Candidate>> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {} FROM candidates WHERE ",
            CANDIDATE_COLUMNS
        ));
        scope.push_predicate(&mut qb);
        qb.push(" ORDER BY created_at DESC LIMIT ");
        qb.push_bind(limit.max(0));
        let candidates = qb
            .build_query_as::<Candidate>()
            .fetch_all(&self.pool)
            .await?;
        Ok(candidates)
    }

    /// Scoped single fetch. A record outside the caller's scope is
    /// indistinguishable from an absent one.
    pub async fn get(&self, scope: &CandidateScope, id: Uuid) -> Result<Candidate> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {} FROM candidates WHERE id = ",
            CANDIDATE_COLUMNS
        ));
        qb.push_bind(id);
        qb.push(" AND ");
        scope.push_predicate(&mut qb);
        let candidate = qb
            .build_query_as::<Candidate>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;
        Ok(candidate)
    }

    /// Inserts a new pipeline record owned by `owner`. The payload cannot
    /// set ownership; `date_of_submission` defaults to now.
    pub async fn create(
        &self,
        payload: CreateCandidatePayload,
        owner: Uuid,
    ) -> Result<Candidate> {
        let client = payload
            .client
            .ok_or_else(|| Error::BadRequest("client is required".to_string()))?;
        let phone_number = payload
            .phone_number
            .ok_or_else(|| Error::BadRequest("phoneNumber is required".to_string()))?;
        let email = payload
            .email
            .ok_or_else(|| Error::BadRequest("email is required".to_string()))?;

        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            r#"
            INSERT INTO candidates (
                user_id, tl_name, ta_name, am, client, position,
                date_of_requirement, date_of_submission, candidate_name, location,
                nationality, work_status, phone_number, email, experience_years,
                notice_period, work_mode, current_salary, expected_salary,
                first_interview_date, first_interview_status,
                second_interview_date, second_interview_status,
                selection_date, salary_offered, offer_date, offer_status,
                ep_request, joining_date, remarks
            ) VALUES (
                $1, $2, $3, $4, $5, $6,
                $7, COALESCE($8, NOW()), $9, $10,
                $11, $12, $13, $14, $15,
                $16, $17, $18, $19,
                $20, $21,
                $22, $23,
                $24, $25, $26, $27,
                $28, $29, $30
            )
            RETURNING {}
            "#,
            CANDIDATE_COLUMNS
        ))
        .bind(owner)
        .bind(payload.tl_name)
        .bind(payload.ta_name)
        .bind(payload.am)
        .bind(client)
        .bind(payload.position)
        .bind(payload.date_of_requirement)
        .bind(payload.date_of_submission)
        .bind(payload.candidate_name)
        .bind(payload.location)
        .bind(payload.nationality)
        .bind(payload.work_status)
        .bind(phone_number)
        .bind(email)
        .bind(payload.experience_years)
        .bind(payload.notice_period)
        .bind(payload.work_mode)
        .bind(payload.current_salary)
        .bind(payload.expected_salary)
        .bind(payload.first_interview_date)
        .bind(payload.first_interview_status)
        .bind(payload.second_interview_date)
        .bind(payload.second_interview_status)
        .bind(payload.selection_date)
        .bind(payload.salary_offered)
        .bind(payload.offer_date)
        .bind(payload.offer_status)
        .bind(payload.ep_request)
        .bind(payload.joining_date)
        .bind(payload.remarks)
        .fetch_one(&self.pool)
        .await?;

        Ok(candidate)
    }

    /// Merges present fields into the existing record; absent fields keep
    /// their stored value. Last writer wins, no conflict detection.
    pub async fn update(
        &self,
        scope: &CandidateScope,
        id: Uuid,
        payload: UpdateCandidatePayload,
    ) -> Result<Candidate> {
        self.get(scope, id).await?;

        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            r#"
            UPDATE candidates
            SET
                tl_name = COALESCE($2, tl_name),
                ta_name = COALESCE($3, ta_name),
                am = COALESCE($4, am),
                client = COALESCE($5, client),
                position = COALESCE($6, position),
                date_of_requirement = COALESCE($7, date_of_requirement),
                date_of_submission = COALESCE($8, date_of_submission),
                candidate_name = COALESCE($9, candidate_name),
                location = COALESCE($10, location),
                nationality = COALESCE($11, nationality),
                work_status = COALESCE($12, work_status),
                phone_number = COALESCE($13, phone_number),
                email = COALESCE($14, email),
                experience_years = COALESCE($15, experience_years),
                notice_period = COALESCE($16, notice_period),
                work_mode = COALESCE($17, work_mode),
                current_salary = COALESCE($18, current_salary),
                expected_salary = COALESCE($19, expected_salary),
                first_interview_date = COALESCE($20, first_interview_date),
                first_interview_status = COALESCE($21, first_interview_status),
                second_interview_date = COALESCE($22, second_interview_date),
                second_interview_status = COALESCE($23, second_interview_status),
                selection_date = COALESCE($24, selection_date),
                salary_offered = COALESCE($25, salary_offered),
                offer_date = COALESCE($26, offer_date),
                offer_status = COALESCE($27, offer_status),
                ep_request = COALESCE($28, ep_request),
                joining_date = COALESCE($29, joining_date),
                remarks = COALESCE($30, remarks),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CANDIDATE_COLUMNS
        ))
        .bind(id)
        .bind(payload.tl_name)
        .bind(payload.ta_name)
        .bind(payload.am)
        .bind(payload.client)
        .bind(payload.position)
        .bind(payload.date_of_requirement)
        .bind(payload.date_of_submission)
        .bind(payload.candidate_name)
        .bind(payload.location)
        .bind(payload.nationality)
        .bind(payload.work_status)
        .bind(payload.phone_number)
        .bind(payload.email)
        .bind(payload.experience_years)
        .bind(payload.notice_period)
        .bind(payload.work_mode)
        .bind(payload.current_salary)
        .bind(payload.expected_salary)
        .bind(payload.first_interview_date)
        .bind(payload.first_interview_status)
        .bind(payload.second_interview_date)
        .bind(payload.second_interview_status)
        .bind(payload.selection_date)
        .bind(payload.salary_offered)
        .bind(payload.offer_date)
        .bind(payload.offer_status)
        .bind(payload.ep_request)
        .bind(payload.joining_date)
        .bind(payload.remarks)
        .fetch_one(&self.pool)
        .await?;

        Ok(candidate)
    }

    pub async fn delete(&self, scope: &CandidateScope, id: Uuid) -> Result<()> {
        self.get(scope, id).await?;
        sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Returns submission dates of existing records matching
    /// (phone OR email) AND client, case-insensitively. Deliberately
    /// unscoped: the resubmission rule spans teams. The 30-day window check
    /// belongs to the caller.
    pub async fn cooling_period_check(
        &self,
        phone_number: &str,
        email: &str,
        client: &str,
    ) -> Result<Vec<SubmissionDate>> {
        let dates = sqlx::query_as::<_, SubmissionDate>(
            r#"
            SELECT date_of_submission
            FROM candidates
            WHERE (LOWER(phone_number) = LOWER($1) OR LOWER(email) = LOWER($2))
              AND LOWER(client) = LOWER($3)
            ORDER BY date_of_submission DESC
            "#,
        )
        .bind(phone_number)
        .bind(email)
        .bind(client)
        .fetch_all(&self.pool)
        .await?;
        Ok(dates)
    }
}
