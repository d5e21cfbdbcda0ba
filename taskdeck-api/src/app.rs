/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskdeck_api::{app::{build_router, AppState}, config::Config};
/// use taskdeck_shared::{registry, storage::Database};
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let db = Arc::new(Database::new());
/// let services = registry::wire(db.clone(), config.token_issuer())?;
/// let state = AppState::new(db, services, config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use taskdeck_shared::auth::jwt::TokenIssuer;
use taskdeck_shared::models::user::UserPublic;
use taskdeck_shared::registry::{EntityKind, ServiceContainer};
use taskdeck_shared::services::{GroupMemberService, GroupService, TaskService, UserService};
use taskdeck_shared::storage::Database;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use uuid::Uuid;

use crate::{config::Config, error::ApiError, routes};

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Uses Arc
/// internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Storage tables
    pub db: Arc<Database>,

    /// Booted service container
    pub services: Arc<ServiceContainer>,

    /// Token issuance/validation collaborator
    pub issuer: TokenIssuer,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: Arc<Database>, services: Arc<ServiceContainer>, config: Config) -> Self {
        let issuer = config.token_issuer();
        Self {
            db,
            services,
            issuer,
            config: Arc::new(config),
        }
    }

    /// Resolves the user service from the container
    pub fn user_service(&self) -> Result<Arc<UserService>, ApiError> {
        self.services.get(EntityKind::User).map_err(ApiError::from)
    }

    /// Resolves the group service from the container
    pub fn group_service(&self) -> Result<Arc<GroupService>, ApiError> {
        self.services.get(EntityKind::Group).map_err(ApiError::from)
    }

    /// Resolves the group-member service from the container
    pub fn group_member_service(&self) -> Result<Arc<GroupMemberService>, ApiError> {
        self.services
            .get(EntityKind::GroupMember)
            .map_err(ApiError::from)
    }

    /// Resolves the task service from the container
    pub fn task_service(&self) -> Result<Arc<TaskService>, ApiError> {
        self.services.get(EntityKind::Task).map_err(ApiError::from)
    }
}

/// Authenticated caller, injected into request extensions by the bearer
/// middleware
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Authenticated user ID (token subject)
    pub id: Uuid,

    /// Public projection embedded in the token
    pub user: UserPublic,
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                      # Health check (public)
/// └── /v1/                         # API v1 (versioned)
///     ├── /auth/                   # Public authentication endpoints
///     │   ├── POST /register
///     │   └── POST /login
///     ├── /admin/                  # Bearer-guarded admin endpoints
///     │   └── GET  /users
///     └── /user/                   # Bearer-guarded user endpoints
///         ├── GET|PUT  /profile
///         ├── GET|POST /groups  +  GET|PUT|DELETE /groups/:id
///         ├── GET      /groups/:id/members
///         └── GET|POST /tasks   +  GET|PUT|DELETE /tasks/:id
/// ```
pub fn build_router(state: AppState) -> Router {
    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Admin routes (require bearer authentication)
    let admin_routes = Router::new().route("/users", get(routes::users::list_users));

    // User routes (require bearer authentication)
    let user_routes = Router::new()
        .route(
            "/profile",
            get(routes::users::get_profile).put(routes::users::update_profile),
        )
        .route(
            "/groups",
            get(routes::groups::list_groups).post(routes::groups::create_group),
        )
        .route(
            "/groups/:id",
            get(routes::groups::get_group)
                .put(routes::groups::update_group)
                .delete(routes::groups::delete_group),
        )
        .route(
            "/groups/:id/members",
            get(routes::groups::list_group_members),
        )
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        );

    let guarded_routes = Router::new()
        .nest("/user", user_routes)
        .nest("/admin", admin_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    // Build complete v1 API
    let v1_routes = Router::new().nest("/auth", auth_routes).merge(guarded_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Bearer authentication middleware layer
///
/// Extracts and validates the token from the Authorization header, then
/// injects [`CurrentUser`] into request extensions.
async fn bearer_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    // Parse Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::BadRequest("Expected Bearer token".to_string()))?;

    // Validate token
    let claims = state.issuer.validate(token)?;

    // Insert the authenticated caller into request extensions
    req.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        user: claims.user,
    });

    Ok(next.run(req).await)
}
