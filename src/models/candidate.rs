use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One recruitment pipeline instance: one person against one client
/// requirement, from requisition through offer. No phase-ordering is
/// enforced; an offer can legally be recorded before an interview.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    /// Owning user; drives role scoping.
    pub user_id: Option<Uuid>,

    // Requisition
    pub tl_name: Option<String>,
    pub ta_name: Option<String>,
    pub am: Option<String>,
    pub client: String,
    pub position: Option<String>,
    pub date_of_requirement: Option<DateTime<Utc>>,

    // Submission
    pub date_of_submission: DateTime<Utc>,

    // Personal / contact
    pub candidate_name: Option<String>,
    pub location: Option<String>,
    pub nationality: Option<String>,
    pub work_status: Option<String>,
    pub phone_number: String,
    pub email: String,
    pub experience_years: Option<String>,

    // Commercial terms
    pub notice_period: Option<String>,
    pub work_mode: Option<String>,
    pub current_salary: Option<String>,
    pub expected_salary: Option<String>,

    // Internal assessment
    pub first_interview_date: Option<DateTime<Utc>>,
    pub first_interview_status: Option<String>,

    // Client assessment
    pub second_interview_date: Option<DateTime<Utc>>,
    pub second_interview_status: Option<String>,

    // Offer lifecycle
    pub selection_date: Option<DateTime<Utc>>,
    pub salary_offered: Option<String>,
    pub offer_date: Option<DateTime<Utc>>,
    pub offer_status: Option<String>,
    pub ep_request: Option<String>,
    pub joining_date: Option<DateTime<Utc>>,
    pub remarks: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Offer lifecycle states recognised by the statistics aggregator.
pub mod offer_status {
    pub const PENDING: &str = "Pending";
    pub const RELEASED: &str = "Released";
    pub const ACCEPTED: &str = "Accepted";
    pub const DECLINED: &str = "Declined";
}

/// Row returned by the cooling-period lookup; the 30-day comparison stays
/// with the caller.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDate {
    pub date_of_submission: DateTime<Utc>,
}
