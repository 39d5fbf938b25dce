use axum::{
    middleware::from_fn,
    routing::{delete, get, post},
    Router,
};
use hiring_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::auth::{require_admin, require_admin_or_leader, require_bearer_auth},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/logout", post(routes::auth::logout));

    // Everything below requires a resolved identity; candidate reads and
    // writes are additionally scope-filtered inside the services.
    let authed_api = Router::new()
        .route("/api/auth/me", get(routes::auth::me))
        .route(
            "/api/candidates",
            get(routes::candidate_routes::list_candidates)
                .post(routes::candidate_routes::create_candidate),
        )
        .route(
            "/api/candidates/recent/limit",
            get(routes::candidate_routes::recent_candidates),
        )
        .route(
            "/api/candidates/statistics/st",
            get(routes::candidate_routes::statistics),
        )
        // Route path keeps the original client-facing spelling.
        .route(
            "/api/candidates/colingPeriodCheck/cool",
            get(routes::candidate_routes::cooling_period_check),
        )
        .route(
            "/api/candidates/:id",
            get(routes::candidate_routes::get_candidate)
                .put(routes::candidate_routes::update_candidate)
                .delete(routes::candidate_routes::delete_candidate),
        )
        .route(
            "/api/dropdowns",
            get(routes::dropdowns::get_dropdowns).post(routes::dropdowns::create_dropdown),
        )
        .route(
            "/api/dropdowns/:id",
            get(routes::dropdowns::get_dropdown)
                .put(routes::dropdowns::update_dropdown)
                .delete(routes::dropdowns::delete_dropdown),
        )
        .layer(from_fn(require_bearer_auth));

    let user_admin_api = Router::new()
        .route("/api/users/create", post(routes::users::create_user))
        .route("/api/users", get(routes::users::list_users))
        .layer(from_fn(require_admin_or_leader));

    let user_delete_api = Router::new()
        .route("/api/users/:id", delete(routes::users::delete_user))
        .layer(from_fn(require_admin));

    let app = base_routes
        .merge(authed_api)
        .merge(user_admin_api)
        .merge(user_delete_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
