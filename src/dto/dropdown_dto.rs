use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDropdownPayload {
    #[validate(length(min = 1))]
    pub field: String,
    pub placeholder: Option<String>,
    pub options: Vec<String>,
}

/// Full replacement: the stored option list becomes exactly `options`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDropdownPayload {
    #[validate(length(min = 1))]
    pub field: Option<String>,
    pub placeholder: Option<String>,
    pub options: Vec<String>,
}
