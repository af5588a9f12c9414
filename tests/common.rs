use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use tour_booking_backend::{config::Config, entities::user, routes::create_router, AppState};

pub const ADMIN_EMAIL: &str = "admin@touragency.com";
pub const ADMIN_PASSWORD: &str = "admin123";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

impl TestApp {
    pub async fn new() -> Self {
        // One pooled connection so every query sees the same in-memory db.
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1);
        let db = Database::connect(options)
            .await
            .expect("Failed to open in-memory database");

        Migrator::up(&db, None).await.expect("Migrations failed");

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(ADMIN_PASSWORD.as_bytes(), &salt)
            .expect("Failed to hash password")
            .to_string();
        let admin = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(ADMIN_EMAIL.to_string()),
            password_hash: Set(password_hash),
            name: Set("Admin".to_string()),
            ..Default::default()
        };
        admin.insert(&db).await.expect("Failed to seed admin");

        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiration_hours: 1,
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
        };

        let router = create_router(AppState::new(db.clone(), config));

        Self { router, db }
    }

    pub async fn login(&self) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/api/auth/login",
                None,
                Some(serde_json::json!({
                    "email": ADMIN_EMAIL,
                    "password": ADMIN_PASSWORD,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().expect("token missing").to_string()
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }
}

/// Create a tour through the API and return its body.
#[allow(dead_code)]
pub async fn create_tour(app: &TestApp, token: &str, title: &str) -> Value {
    let (status, body) = app
        .request(
            "POST",
            "/api/admin/tours",
            Some(token),
            Some(serde_json::json!({ "title": title })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "create_tour failed: {body}");
    body
}

/// Flip a tour to published via the General section save.
#[allow(dead_code)]
pub async fn publish_tour(
    app: &TestApp,
    token: &str,
    tour_id: &str,
    title: &str,
    destination_id: Option<&str>,
) -> Value {
    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/admin/tours/{tour_id}/general"),
            Some(token),
            Some(serde_json::json!({
                "title": title,
                "destination_id": destination_id,
                "featured": false,
                "status": "published",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "publish_tour failed: {body}");
    body
}

/// Create a destination through the API and return its id.
#[allow(dead_code)]
pub async fn create_destination(app: &TestApp, token: &str, name: &str, country: &str) -> String {
    let (status, body) = app
        .request(
            "POST",
            "/api/admin/destinations",
            Some(token),
            Some(serde_json::json!({ "name": name, "country": country })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "create_destination failed: {body}");
    body["id"].as_str().unwrap().to_string()
}
