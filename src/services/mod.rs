pub mod candidate_service;
pub mod dropdown_service;
pub mod scope;
pub mod stats_service;
pub mod user_service;
