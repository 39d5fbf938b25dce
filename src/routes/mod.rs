pub mod auth;
pub mod candidate_routes;
pub mod dropdowns;
pub mod health;
pub mod users;
