// tests/auth_tests.rs

use church_backend::{config::Config, routes, state::AppState, utils::hash::hash_password};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

async fn spawn_app() -> String {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: database_url.clone(),
        jwt_secret: "auth_test_secret".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        port: 0,
        admin_email: None,
        admin_password: None,
        admin_name: None,
    };

    let state = AppState { pool, config };
    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn test_pool() -> PgPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .unwrap()
}

/// Inserts an admin account directly into the database.
async fn seed_admin(pool: &PgPool, role: &str, password: &str) -> String {
    let email = format!("a_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8]);
    let hashed = hash_password(password).unwrap();

    sqlx::query("INSERT INTO admin_users (email, password, name, role) VALUES ($1, $2, $3, $4)")
        .bind(&email)
        .bind(&hashed)
        .bind("Seeded Admin")
        .bind(role)
        .execute(pool)
        .await
        .unwrap();

    email
}

async fn login(address: &str, email: &str, password: &str) -> String {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();
    resp["token"].as_str().expect("Token not found").to_string()
}

#[tokio::test]
async fn login_returns_token_and_profile() {
    // Arrange
    let address = spawn_app().await;
    let pool = test_pool().await;
    let email = seed_admin(&pool, "admin", "correct-horse").await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({ "email": email, "password": "correct-horse" }))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["type"], "Bearer");
    assert_eq!(body["admin"]["email"], serde_json::json!(email));
    assert_eq!(body["admin"]["role"], "admin");
    // The password hash must never appear in a response
    assert!(body["admin"].get("password").is_none());
}

#[tokio::test]
async fn failed_logins_are_indistinguishable() {
    // Arrange
    let address = spawn_app().await;
    let pool = test_pool().await;
    let email = seed_admin(&pool, "admin", "right-password").await;
    let client = reqwest::Client::new();

    // Act: wrong password on an existing account
    let wrong_password = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({ "email": email, "password": "wrong-password" }))
        .send()
        .await
        .unwrap();
    let wrong_password_status = wrong_password.status().as_u16();
    let wrong_password_body: serde_json::Value = wrong_password.json().await.unwrap();

    // Act: account that does not exist at all
    let unknown_email = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({
            "email": "nobody@example.com",
            "password": "whatever"
        }))
        .send()
        .await
        .unwrap();
    let unknown_email_status = unknown_email.status().as_u16();
    let unknown_email_body: serde_json::Value = unknown_email.json().await.unwrap();

    // Assert: identical status and body, no account-existence leak
    assert_eq!(wrong_password_status, 401);
    assert_eq!(unknown_email_status, 401);
    assert_eq!(wrong_password_body, unknown_email_body);
    assert_eq!(wrong_password_body["error"], "Invalid credentials");
}

#[tokio::test]
async fn admin_user_management_requires_superadmin() {
    // Arrange
    let address = spawn_app().await;
    let pool = test_pool().await;
    let admin_email = seed_admin(&pool, "admin", "password123").await;
    let super_email = seed_admin(&pool, "superadmin", "password123").await;
    let client = reqwest::Client::new();

    let admin_token = login(&address, &admin_email, "password123").await;
    let super_token = login(&address, &super_email, "password123").await;

    // A plain admin is rejected
    let forbidden = client
        .get(format!("{}/api/admin/users", address))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .unwrap();
    assert_eq!(forbidden.status().as_u16(), 403);

    // A superadmin gets the list
    let allowed = client
        .get(format!("{}/api/admin/users", address))
        .header("Authorization", format!("Bearer {}", super_token))
        .send()
        .await
        .unwrap();
    assert_eq!(allowed.status().as_u16(), 200);
    let users: Vec<serde_json::Value> = allowed.json().await.unwrap();
    assert!(users.iter().any(|u| u["email"] == serde_json::json!(admin_email)));
}

#[tokio::test]
async fn duplicate_admin_email_conflicts() {
    // Arrange
    let address = spawn_app().await;
    let pool = test_pool().await;
    let super_email = seed_admin(&pool, "superadmin", "password123").await;
    let existing_email = seed_admin(&pool, "admin", "password123").await;
    let client = reqwest::Client::new();

    let token = login(&address, &super_email, "password123").await;

    // Act
    let response = client
        .post(format!("{}/api/admin/users", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "email": existing_email,
            "password": "another-password",
            "name": "Duplicate"
        }))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn superadmin_cannot_delete_self() {
    // Arrange
    let address = spawn_app().await;
    let pool = test_pool().await;
    let super_email = seed_admin(&pool, "superadmin", "password123").await;
    let client = reqwest::Client::new();

    let token = login(&address, &super_email, "password123").await;

    let me: serde_json::Value = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({ "email": super_email, "password": "password123" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let my_id = me["admin"]["id"].as_i64().unwrap();

    // Act
    let response = client
        .delete(format!("{}/api/admin/users/{}", address, my_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/events", address))
        .header("Authorization", "Bearer not-a-real-token")
        .json(&serde_json::json!({
            "title": "Sneaky",
            "description": "Should not be created",
            "date": "2026-05-01T00:00:00Z"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}
