//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::DirectoryService;

use super::common::{DirectoryState, ErrorResponse, MessageResponse};
use super::modules::health::{self, HealthState};
use super::modules::metrics::{self, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{skills, swap_requests, users};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Users
        users::create_user,
        users::get_user,
        users::search_users,
        users::list_user_swap_requests,
        // Skills
        skills::list_skills,
        // Swap requests
        swap_requests::create_swap_request,
        swap_requests::decide_swap_request,
        swap_requests::delete_swap_request,
        swap_requests::add_rating,
    ),
    components(
        schemas(
            // Common
            ErrorResponse,
            MessageResponse,
            health::HealthResponse,
            health::ComponentHealth,
            // Users
            users::CreateUserRequest,
            users::UserCreatedResponse,
            users::UserProfileDto,
            users::SearchResponse,
            users::SwapRequestSummaryDto,
            users::UserSwapRequestsResponse,
            // Skills
            skills::SkillListResponse,
            // Swap requests
            swap_requests::CreateSwapRequest,
            swap_requests::SwapCreatedResponse,
            swap_requests::DecideSwapRequest,
            swap_requests::SwapDecisionResponse,
            swap_requests::AddRatingRequest,
            swap_requests::RatingCreatedResponse,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Users", description = "Registration, public profiles, skill search and per-user swap listings"),
        (name = "Skills", description = "Known skill names"),
        (name = "Swap Requests", description = "Swap request lifecycle (pending -> accepted | rejected) and ratings"),
    ),
    info(
        title = "Skill Swap Directory API",
        version = "1.0.0",
        description = "Users list skills they offer and want, find each other by skill and negotiate one-to-one swaps",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is mounted only when a Prometheus handle is supplied.
pub fn create_api_router(
    directory: Arc<DirectoryService>,
    db: DatabaseConnection,
    prometheus: Option<PrometheusHandle>,
) -> Router {
    let directory_state = DirectoryState { directory };

    let user_routes = Router::new()
        .route("/users", post(users::create_user))
        .route("/users/{id}", get(users::get_user))
        .route("/users/{id}/swap_requests", get(users::list_user_swap_requests))
        .route("/search", get(users::search_users))
        .route("/skills", get(skills::list_skills))
        .with_state(directory_state.clone());

    let swap_routes = Router::new()
        .route("/swap_requests", post(swap_requests::create_swap_request))
        .route(
            "/swap_requests/{id}",
            patch(swap_requests::decide_swap_request).delete(swap_requests::delete_swap_request),
        )
        .route("/swap_requests/{id}/rating", post(swap_requests::add_rating))
        .with_state(directory_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let mut router = Router::new()
        .merge(health_routes)
        .merge(user_routes)
        .merge(swap_routes);

    if let Some(handle) = prometheus {
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    router
        // Route-level so MatchedPath is available for metric labels
        .route_layer(middleware::from_fn(metrics::http_metrics_middleware))
        // Swagger UI
        .merge(swagger_routes)
        // Middleware
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
