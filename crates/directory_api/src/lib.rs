//! HTTP API Layer
//!
//! This crate provides the REST API for the member directory using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for members, teams, and items
//! - **DTOs**: Request/Response data transfer objects with form validation
//! - **Error Handling**: Consistent error responses, including per-field
//!   validation details
//!
//! # Example
//!
//! ```rust,ignore
//! use directory_api::create_router;
//!
//! let app = create_router(pool, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{health, item, member, team};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
}

/// Creates the main API router
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    let state = AppState { pool, config };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let member_routes = Router::new()
        .route("/", post(member::create_member))
        .route("/", get(member::list_members))
        .route("/:id", get(member::get_member))
        .route("/:id", delete(member::delete_member));

    let team_routes = Router::new()
        .route("/", post(team::create_team))
        .route("/", get(team::list_teams))
        .route("/:id", get(team::get_team))
        .route("/:id/members", get(team::team_members));

    let item_routes = Router::new().route("/:id", put(item::update_item));

    let api_routes = Router::new()
        .nest("/members", member_routes)
        .nest("/teams", team_routes)
        .nest("/items", item_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
