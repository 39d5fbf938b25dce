use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Creation payload. Phone, email and client are the only hard
/// requirements; everything else is filled in as the pipeline advances.
/// Ownership is stamped from the caller's identity, never from the body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidatePayload {
    pub tl_name: Option<String>,
    pub ta_name: Option<String>,
    pub am: Option<String>,
    #[validate(required, length(min = 1))]
    pub client: Option<String>,
    pub position: Option<String>,
    pub date_of_requirement: Option<DateTime<Utc>>,
    pub date_of_submission: Option<DateTime<Utc>>,
    pub candidate_name: Option<String>,
    pub location: Option<String>,
    pub nationality: Option<String>,
    pub work_status: Option<String>,
    #[validate(required, length(min = 1))]
    pub phone_number: Option<String>,
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    pub experience_years: Option<String>,
    pub notice_period: Option<String>,
    pub work_mode: Option<String>,
    pub current_salary: Option<String>,
    pub expected_salary: Option<String>,
    pub first_interview_date: Option<DateTime<Utc>>,
    pub first_interview_status: Option<String>,
    pub second_interview_date: Option<DateTime<Utc>>,
    pub second_interview_status: Option<String>,
    pub selection_date: Option<DateTime<Utc>>,
    pub salary_offered: Option<String>,
    pub offer_date: Option<DateTime<Utc>>,
    pub offer_status: Option<String>,
    pub ep_request: Option<String>,
    pub joining_date: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidatePayload {
    pub tl_name: Option<String>,
    pub ta_name: Option<String>,
    pub am: Option<String>,
    #[validate(length(min = 1))]
    pub client: Option<String>,
    pub position: Option<String>,
    pub date_of_requirement: Option<DateTime<Utc>>,
    pub date_of_submission: Option<DateTime<Utc>>,
    pub candidate_name: Option<String>,
    pub location: Option<String>,
    pub nationality: Option<String>,
    pub work_status: Option<String>,
    #[validate(length(min = 1))]
    pub phone_number: Option<String>,
    #[validate(length(min = 1))]
    pub email: Option<String>,
    pub experience_years: Option<String>,
    pub notice_period: Option<String>,
    pub work_mode: Option<String>,
    pub current_salary: Option<String>,
    pub expected_salary: Option<String>,
    pub first_interview_date: Option<DateTime<Utc>>,
    pub first_interview_status: Option<String>,
    pub second_interview_date: Option<DateTime<Utc>>,
    pub second_interview_status: Option<String>,
    pub selection_date: Option<DateTime<Utc>>,
    pub salary_offered: Option<String>,
    pub offer_date: Option<DateTime<Utc>>,
    pub offer_status: Option<String>,
    pub ep_request: Option<String>,
    pub joining_date: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CoolingPeriodQuery {
    #[validate(length(min = 1))]
    pub phone_number: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub client: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    pub month: &'static str,
    pub applications: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub total_candidates: i64,
    pub offers_made: i64,
    pub candidates_joined: i64,
    pub monthly_data: Vec<MonthlyCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_phone_email_and_client() {
        let payload: CreateCandidatePayload = serde_json::from_str("{}").expect("deserialize");
        let errs = payload.validate().expect_err("must fail validation");
        let fields = errs.field_errors();
        assert!(fields.contains_key("phone_number"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("client"));
    }

    #[test]
    fn create_accepts_minimal_payload() {
        let payload: CreateCandidatePayload = serde_json::from_value(serde_json::json!({
            "phoneNumber": "5551234",
            "email": "a@x.com",
            "client": "Acme"
        }))
        .expect("deserialize");
        payload.validate().expect("valid");
    }

    #[test]
    fn update_payload_tolerates_absent_fields() {
        let payload: UpdateCandidatePayload =
            serde_json::from_value(serde_json::json!({ "offerStatus": "Accepted" }))
                .expect("deserialize");
        payload.validate().expect("valid");
        assert_eq!(payload.offer_status.as_deref(), Some("Accepted"));
        assert!(payload.joining_date.is_none());
    }
}
