/// Common test utilities for integration tests
///
/// Builds a fully wired application (in-process storage, booted service
/// container, real token issuer) and provides request helpers that drive
/// the router directly as a tower service.
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::{ApiConfig, Config, JwtConfig};
use taskdeck_shared::registry::{wire, ServiceContainer};
use taskdeck_shared::storage::Database;
use tower::Service as _;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: Arc<Database>,
    pub services: Arc<ServiceContainer>,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a new test context with a fresh in-process database
    pub fn new() -> Self {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            jwt: JwtConfig {
                secret: "test-secret-key-at-least-32-bytes!!".to_string(),
                ttl_hours: 24,
            },
        };

        let db = Arc::new(Database::new());
        let services = wire(db.clone(), config.token_issuer()).unwrap();

        let state = AppState::new(db.clone(), services.clone(), config.clone());
        let app = build_router(state);

        TestContext {
            db,
            services,
            app,
            config,
        }
    }

    /// Sends a request and returns the status plus the parsed JSON body
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    /// Registers an account, asserting success
    pub async fn register(&self, email: &str, password: &str, full_name: &str) -> Value {
        let (status, body) = self
            .send(
                "POST",
                "/v1/auth/register",
                None,
                Some(json!({
                    "email": email,
                    "password": password,
                    "password_confirm": password,
                    "full_name": full_name,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");
        body
    }

    /// Logs in and returns the signed token
    pub async fn login(&self, identity: &str, password: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/v1/auth/login",
                None,
                Some(json!({ "identity": identity, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Registers and logs in a default account, returning its token
    pub async fn authenticated_user(&self) -> (Value, String) {
        let user = self.register("tester@example.com", "secret12", "Tester").await;
        let token = self.login("tester@example.com", "secret12").await;
        (user, token)
    }
}
