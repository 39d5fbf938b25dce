pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    candidate_service::CandidateService, dropdown_service::DropdownService,
    stats_service::StatsService, user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub candidate_service: CandidateService,
    pub stats_service: StatsService,
    pub dropdown_service: DropdownService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let user_service = UserService::new(pool.clone());
        let candidate_service = CandidateService::new(pool.clone());
        let stats_service = StatsService::new(pool.clone());
        let dropdown_service = DropdownService::new(pool.clone());

        Self {
            pool,
            user_service,
            candidate_service,
            stats_service,
            dropdown_service,
        }
    }
}
