//! Shared fixtures: in-memory and file-backed databases with migrations applied, seeded
//! users, and a router driven through `oneshot`.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{NaiveDate, NaiveTime};
use metrics_exporter_prometheus::PrometheusBuilder;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;

use shiftdesk::application::{Identity, WorkflowSettings};
use shiftdesk::domain::{NewUser, RepositoryProvider, Shift, ShiftDraft, User, UserRole};
use shiftdesk::infrastructure::crypto::jwt::{create_token, JwtConfig};
use shiftdesk::infrastructure::database::migrator::Migrator;
use shiftdesk::{create_api_router, init_database, ApiState, DatabaseConfig, SeaOrmRepositoryProvider};

pub struct TestApp {
    pub db: DatabaseConnection,
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt: JwtConfig,
    pub router: Router,
    pub worker: User,
    pub other_worker: User,
    pub admin: User,
}

pub async fn setup_db() -> (DatabaseConnection, Arc<dyn RepositoryProvider>) {
    let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    (db, repos)
}

/// File-backed SQLite with a real connection pool, for tests that need
/// several transactions in flight at once.
pub struct FileDb {
    pub db: DatabaseConnection,
    pub repos: Arc<dyn RepositoryProvider>,
    path: PathBuf,
}

impl FileDb {
    pub async fn new() -> Self {
        let path = std::env::temp_dir().join(format!("shiftdesk-{}.db", uuid::Uuid::new_v4()));
        let config = DatabaseConfig::sqlite(&path.to_string_lossy());
        assert!(config.max_connections > 1);

        let db = init_database(&config).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        Self { db, repos, path }
    }

    pub async fn close(self) {
        let _ = self.db.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", self.path.display(), suffix));
        }
    }
}

pub async fn seed_user(repos: &Arc<dyn RepositoryProvider>, name: &str, role: UserRole) -> User {
    repos
        .users()
        .create(NewUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role,
        })
        .await
        .unwrap()
}

pub async fn seed_shift(
    repos: &Arc<dyn RepositoryProvider>,
    date: &str,
    start: (u32, u32),
    end: (u32, u32),
) -> Shift {
    let draft = ShiftDraft::new(
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
        NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        "cashier",
        "Store 1",
    )
    .unwrap();
    repos.shifts().create(draft).await.unwrap()
}

pub fn identity(user: &User) -> Identity {
    Identity::from(user)
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_settings(WorkflowSettings::default()).await
    }

    pub async fn with_settings(settings: WorkflowSettings) -> Self {
        let (db, repos) = setup_db().await;
        let worker = seed_user(&repos, "Alice", UserRole::Worker).await;
        let other_worker = seed_user(&repos, "Bob", UserRole::Worker).await;
        let admin = seed_user(&repos, "Carol", UserRole::Admin).await;

        let jwt = JwtConfig::default();
        let state = ApiState::new(repos.clone(), jwt.clone(), settings);
        let metrics = PrometheusBuilder::new().build_recorder().handle();
        let router = create_api_router(state, db.clone(), metrics);

        Self {
            db,
            repos,
            jwt,
            router,
            worker,
            other_worker,
            admin,
        }
    }

    pub fn token_for(&self, user: &User) -> String {
        create_token(user.id, &user.email, &self.jwt).unwrap()
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn send_as(
        &self,
        user: &User,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let token = self.token_for(user);
        self.send(method, uri, Some(&token), body).await
    }
}
