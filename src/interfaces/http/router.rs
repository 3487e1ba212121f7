//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    AssignmentService, IdentityService, ShiftCatalog, ShiftRequestWorkflow, WorkflowSettings,
};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, EmptyData};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};

use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{assignments, auth, health, shift_requests, shifts, users};

/// Unified state for every `/api` route. Axum hands each handler its own
/// state type through `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub identity: IdentityService,
    pub workflow: Arc<ShiftRequestWorkflow>,
    pub catalog: Arc<ShiftCatalog>,
    pub assignments: Arc<AssignmentService>,
}

impl ApiState {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        jwt_config: JwtConfig,
        workflow_settings: WorkflowSettings,
    ) -> Self {
        Self {
            identity: IdentityService::new(repos.clone(), jwt_config),
            workflow: Arc::new(ShiftRequestWorkflow::new(repos.clone(), workflow_settings)),
            catalog: Arc::new(ShiftCatalog::new(repos.clone())),
            assignments: Arc::new(AssignmentService::new(repos)),
        }
    }
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for AuthState {
    fn from_ref(s: &ApiState) -> Self {
        AuthState {
            identity: s.identity.clone(),
        }
    }
}

impl FromRef<ApiState> for auth::AuthHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        auth::AuthHandlerState {
            identity: s.identity.clone(),
        }
    }
}

impl FromRef<ApiState> for users::UserHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        users::UserHandlerState {
            identity: s.identity.clone(),
        }
    }
}

impl FromRef<ApiState> for shifts::ShiftHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        shifts::ShiftHandlerState {
            catalog: Arc::clone(&s.catalog),
        }
    }
}

impl FromRef<ApiState> for shift_requests::ShiftRequestHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        shift_requests::ShiftRequestHandlerState {
            workflow: Arc::clone(&s.workflow),
        }
    }
}

impl FromRef<ApiState> for assignments::AssignmentHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        assignments::AssignmentHandlerState {
            assignments: Arc::clone(&s.assignments),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT from POST /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::get_current_user,
        users::create_user,
        shifts::list_shifts,
        shifts::get_shift,
        shifts::create_shift,
        shifts::update_shift,
        shifts::delete_shift,
        shift_requests::create_shift_request,
        shift_requests::list_shift_requests,
        shift_requests::approve_shift_request,
        shift_requests::reject_shift_request,
        assignments::list_assignments,
        assignments::create_assignment,
        assignments::update_assignment,
    ),
    components(
        schemas(
            ApiResponse<String>,
            EmptyData,
            health::HealthResponse,
            health::ComponentHealth,
            auth::LoginRequest,
            auth::LoginResponse,
            users::UserDto,
            users::CreateUserRequest,
            shifts::ShiftDto,
            shifts::CreateShiftInput,
            shifts::UpdateShiftInput,
            shift_requests::CreateShiftRequestInput,
            shift_requests::ShiftRequestDto,
            assignments::AssignmentDto,
            assignments::CreateAssignmentInput,
            assignments::UpdateAssignmentInput,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Authentication", description = "Email login (JWT) and current user"),
        (name = "Users", description = "Admin user management"),
        (name = "Shifts", description = "Shift catalog"),
        (name = "Shift Requests", description = "Worker shift requests and admin decisions"),
        (name = "Assignments", description = "Materialized shift assignments"),
    ),
    info(
        title = "Shiftdesk API",
        version = "1.0.0",
        description = "Shift scheduling: catalog, requests, approvals and assignments",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    state: ApiState,
    db: DatabaseConnection,
    metrics_handle: PrometheusHandle,
) -> Router {
    let auth_state = AuthState::from_ref(&state);

    // Public API routes
    let public_routes = Router::new().route("/api/auth/login", post(auth::login));

    // Everything else requires a resolved caller
    let protected_routes = Router::new()
        .route("/api/auth/me", get(auth::get_current_user))
        .route("/api/users", post(users::create_user))
        .route("/api/shifts", get(shifts::list_shifts).post(shifts::create_shift))
        .route(
            "/api/shifts/{id}",
            get(shifts::get_shift)
                .put(shifts::update_shift)
                .delete(shifts::delete_shift),
        )
        .route(
            "/api/shift_requests",
            get(shift_requests::list_shift_requests).post(shift_requests::create_shift_request),
        )
        .route(
            "/api/shift_requests/approve/{id}",
            put(shift_requests::approve_shift_request),
        )
        .route(
            "/api/shift_requests/reject/{id}",
            put(shift_requests::reject_shift_request),
        )
        .route(
            "/api/assignments",
            get(assignments::list_assignments).post(assignments::create_assignment),
        )
        .route("/api/assignments/{id}", put(assignments::update_assignment))
        .route_layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let api_routes = public_routes.merge(protected_routes).with_state(state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: metrics_handle,
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .merge(api_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
