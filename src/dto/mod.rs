pub mod auth_dto;
pub mod candidate_dto;
pub mod dropdown_dto;
pub mod user_dto;
