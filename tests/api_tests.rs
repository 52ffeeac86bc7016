// tests/api_tests.rs

use church_backend::{config::Config, routes, state::AppState, utils::hash::hash_password};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    // Note: For Postgres, you must have a running database.
    // We'll read from DATABASE_URL environment variable.
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    // 1. Create a pool
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing. Make sure DATABASE_URL is set.");

    // 2. Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    // 3. Create test configuration and state
    let config = Config {
        database_url: database_url.clone(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
        port: 0,
        admin_email: None,
        admin_password: None,
        admin_name: None,
    };

    let state = AppState { pool, config };

    // 4. Create the router with the app state
    let app = routes::create_router(state);

    // 5. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 6. Spawn the server in the background
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
        .expect("Failed to connect to test DB")
}

/// Inserts an admin account directly and logs in through the API.
/// Returns a bearer token.
async fn seed_and_login(address: &str, pool: &PgPool, role: &str) -> String {
    let email = format!("t_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8]);
    let password = "password123";
    let hashed = hash_password(password).unwrap();

    sqlx::query("INSERT INTO admin_users (email, password, name, role) VALUES ($1, $2, $3, $4)")
        .bind(&email)
        .bind(&hashed)
        .bind("Test Admin")
        .bind(role)
        .execute(pool)
        .await
        .unwrap();

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Login failed")
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse login json");

    resp["token"].as_str().expect("Token not found").to_string()
}

#[tokio::test]
async fn unknown_path_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn sermon_crud_flow() {
    // Arrange
    let address = spawn_app().await;
    let pool = test_pool().await;
    let token = seed_and_login(&address, &pool, "admin").await;
    let client = reqwest::Client::new();

    let marker = format!("Sermon {}", &uuid::Uuid::new_v4().to_string()[..8]);

    // 1. Create
    let create_resp = client
        .post(format!("{}/api/sermons", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "title": marker,
            "preacher": "Pastor Kim",
            "date": "2026-03-01T10:00:00Z",
            "videoUrl": "https://example.com/video"
        }))
        .send()
        .await
        .expect("Create failed");
    assert_eq!(create_resp.status().as_u16(), 201);
    let created: serde_json::Value = create_resp.json().await.unwrap();
    let id = created["id"].as_i64().expect("id missing");
    assert_eq!(created["title"], serde_json::json!(marker));

    // 2. List includes the created document
    let list: Vec<serde_json::Value> = client
        .get(format!("{}/api/sermons", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.iter().any(|s| s["id"].as_i64() == Some(id)));

    // 3. Get by id
    let fetched: serde_json::Value = client
        .get(format!("{}/api/sermons/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["preacher"], "Pastor Kim");

    // 4. Update returns the updated form
    let updated: serde_json::Value = client
        .put(format!("{}/api/sermons/{}", address, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({ "preacher": "Pastor Lee" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["preacher"], "Pastor Lee");
    assert_eq!(updated["title"], serde_json::json!(marker));

    // 5. Delete
    let delete_resp = client
        .delete(format!("{}/api/sermons/{}", address, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status().as_u16(), 204);

    // 6. Gone
    let get_resp = client
        .get(format!("{}/api/sermons/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(get_resp.status().as_u16(), 404);
}

#[tokio::test]
async fn sermon_preacher_filter_is_case_insensitive_substring() {
    // Arrange
    let address = spawn_app().await;
    let pool = test_pool().await;
    let token = seed_and_login(&address, &pool, "admin").await;
    let client = reqwest::Client::new();

    let unique = &uuid::Uuid::new_v4().to_string()[..8];
    let preacher = format!("Preacher{}", unique);

    client
        .post(format!("{}/api/sermons", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "title": "Filter test",
            "preacher": preacher,
            "date": "2026-01-04T10:00:00Z"
        }))
        .send()
        .await
        .unwrap();

    // Act: search with a lowercased fragment
    let list: Vec<serde_json::Value> = client
        .get(format!(
            "{}/api/sermons?preacher=preacher{}",
            address,
            unique.to_lowercase()
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["preacher"], serde_json::json!(preacher));
}

#[tokio::test]
async fn update_missing_sermon_returns_404() {
    let address = spawn_app().await;
    let pool = test_pool().await;
    let token = seed_and_login(&address, &pool, "admin").await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{}/api/sermons/999999999", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({ "title": "Ghost" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Sermon not found");
}

#[tokio::test]
async fn delete_missing_event_returns_404() {
    let address = spawn_app().await;
    let pool = test_pool().await;
    let token = seed_and_login(&address, &pool, "admin").await;
    let client = reqwest::Client::new();

    let response = client
        .delete(format!("{}/api/events/999999999", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn announcement_type_filter_is_exact() {
    // Arrange
    let address = spawn_app().await;
    let pool = test_pool().await;
    let token = seed_and_login(&address, &pool, "admin").await;
    let client = reqwest::Client::new();

    let marker = format!("A-{}", &uuid::Uuid::new_v4().to_string()[..8]);

    for kind in ["weekly", "notice"] {
        let resp = client
            .post(format!("{}/api/announcements", address))
            .header("Authorization", format!("Bearer {}", token))
            .json(&serde_json::json!({
                "type": kind,
                "title": format!("{} {}", marker, kind),
                "content": "Body text"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 201);
    }

    // Act
    let list: Vec<serde_json::Value> = client
        .get(format!("{}/api/announcements?type=weekly", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert: only exact 'weekly' documents come back
    assert!(list.iter().all(|a| a["type"] == "weekly"));
    assert!(
        list.iter()
            .any(|a| a["title"] == serde_json::json!(format!("{} weekly", marker)))
    );
    assert!(
        !list
            .iter()
            .any(|a| a["title"] == serde_json::json!(format!("{} notice", marker)))
    );
}

#[tokio::test]
async fn invalid_announcement_type_rejected() {
    let address = spawn_app().await;
    let pool = test_pool().await;
    let token = seed_and_login(&address, &pool, "admin").await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/announcements", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "type": "breaking",
            "title": "Bad type",
            "content": "Body"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 400);
}

#[tokio::test]
async fn mutating_content_routes_require_auth() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/sermons", address))
        .json(&serde_json::json!({
            "title": "No token",
            "preacher": "Nobody",
            "date": "2026-01-01T00:00:00Z"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 401);
}

#[tokio::test]
async fn public_forms_accept_anonymous_submissions() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Prayer request starts pending
    let prayer: serde_json::Value = client
        .post(format!("{}/api/prayer-requests", address))
        .json(&serde_json::json!({
            "request": "Please pray for my family",
            "isPublic": true
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(prayer["status"], "pending");
    assert_eq!(prayer["name"], serde_json::Value::Null);

    // Visitor registration
    let visitor_resp = client
        .post(format!("{}/api/visitors", address))
        .json(&serde_json::json!({
            "name": "First Timer",
            "contact": "first@example.com",
            "howFound": "A friend invited me",
            "wantsFollowUp": true
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(visitor_resp.status().as_u16(), 201);

    // Contact form
    let contact_resp = client
        .post(format!("{}/api/contact", address))
        .json(&serde_json::json!({
            "name": "Web Visitor",
            "email": "hello@example.com",
            "message": "What time is the Sunday service?"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(contact_resp.status().as_u16(), 201);

    // But reading visitors without a token is rejected
    let list_resp = client
        .get(format!("{}/api/visitors", address))
        .send()
        .await
        .unwrap();
    assert_eq!(list_resp.status().as_u16(), 401);
}

#[tokio::test]
async fn member_ministry_references_resolve_and_dangle_silently() {
    // Arrange
    let address = spawn_app().await;
    let pool = test_pool().await;
    let token = seed_and_login(&address, &pool, "admin").await;
    let client = reqwest::Client::new();

    let ministry_name = format!("Worship {}", &uuid::Uuid::new_v4().to_string()[..8]);

    // 1. Create a ministry
    let ministry: serde_json::Value = client
        .post(format!("{}/api/ministries", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "name": ministry_name,
            "leader": "Grace Park",
            "description": "Leads Sunday worship"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ministry_id = ministry["id"].as_i64().unwrap();

    // 2. Create a member referencing it
    let member: serde_json::Value = client
        .post(format!("{}/api/members", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "fullName": "Hannah Cho",
            "gender": "Female",
            "role": "Choir",
            "ministries": [ministry_id]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let member_id = member["id"].as_i64().unwrap();

    // 3. The reference resolves to the full ministry document
    assert_eq!(member["ministries"][0]["name"], serde_json::json!(ministry_name));

    // 4. Delete the ministry; no cascade touches the member
    let del = client
        .delete(format!("{}/api/ministries/{}", address, ministry_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(del.status().as_u16(), 204);

    // 5. The dangling reference is silently dropped on read
    let refetched: serde_json::Value = client
        .get(format!("{}/api/members/{}", address, member_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(refetched["fullName"], "Hannah Cho");
    assert_eq!(refetched["ministries"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn giving_record_purpose_filter_is_exact() {
    let address = spawn_app().await;
    let pool = test_pool().await;
    let token = seed_and_login(&address, &pool, "admin").await;
    let client = reqwest::Client::new();

    let giver = format!("Giver {}", &uuid::Uuid::new_v4().to_string()[..8]);

    for purpose in ["tithe", "offering"] {
        let resp = client
            .post(format!("{}/api/giving-records", address))
            .header("Authorization", format!("Bearer {}", token))
            .json(&serde_json::json!({
                "name": giver,
                "amount": 100.0,
                "purpose": purpose,
                "date": "2026-02-01T00:00:00Z"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 201);
    }

    let list: Vec<serde_json::Value> = client
        .get(format!("{}/api/giving-records?purpose=tithe", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(list.iter().all(|r| r["purpose"] == "tithe"));
    assert!(
        list.iter()
            .any(|r| r["name"] == serde_json::json!(giver) && r["purpose"] == "tithe")
    );
}

#[tokio::test]
async fn explicit_null_clears_optional_fields_and_absence_preserves_them() {
    // Arrange
    let address = spawn_app().await;
    let pool = test_pool().await;
    let token = seed_and_login(&address, &pool, "admin").await;
    let client = reqwest::Client::new();

    let created: serde_json::Value = client
        .post(format!("{}/api/sermons", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "title": "Clearable fields",
            "preacher": "Pastor Kim",
            "date": "2026-04-05T10:00:00Z",
            "videoUrl": "https://example.com/video",
            "notes": "Original notes"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["videoUrl"], "https://example.com/video");

    // Act: a payload that omits videoUrl must leave it untouched
    let untouched: serde_json::Value = client
        .put(format!("{}/api/sermons/{}", address, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({ "preacher": "Pastor Lee" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(untouched["videoUrl"], "https://example.com/video");
    assert_eq!(untouched["notes"], "Original notes");

    // Act: an explicit null clears that field and only that field
    let cleared: serde_json::Value = client
        .put(format!("{}/api/sermons/{}", address, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({ "videoUrl": null }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cleared["videoUrl"], serde_json::Value::Null);
    assert_eq!(cleared["notes"], "Original notes");
}

#[tokio::test]
async fn sermon_date_range_includes_midnight_upper_bound() {
    // Arrange
    let address = spawn_app().await;
    let pool = test_pool().await;
    let token = seed_and_login(&address, &pool, "admin").await;
    let client = reqwest::Client::new();

    let preacher = format!("Ranged{}", &uuid::Uuid::new_v4().to_string()[..8]);

    for date in [
        "2026-01-01T00:00:00Z", // before the range
        "2026-01-05T12:00:00Z", // inside
        "2026-01-10T00:00:00Z", // exactly midnight of dateTo, still inside
        "2026-01-10T08:00:00Z", // past midnight of dateTo, outside
    ] {
        let resp = client
            .post(format!("{}/api/sermons", address))
            .header("Authorization", format!("Bearer {}", token))
            .json(&serde_json::json!({
                "title": format!("At {}", date),
                "preacher": preacher,
                "date": date
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 201);
    }

    // Act
    let list: Vec<serde_json::Value> = client
        .get(format!(
            "{}/api/sermons?preacher={}&dateFrom=2026-01-05&dateTo=2026-01-10",
            address, preacher
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert: the range is inclusive, with dateTo cut at midnight UTC
    let dates: Vec<&str> = list.iter().map(|s| s["date"].as_str().unwrap()).collect();
    assert_eq!(list.len(), 2);
    assert!(dates.iter().any(|d| d.starts_with("2026-01-05T12:00:00")));
    assert!(dates.iter().any(|d| d.starts_with("2026-01-10T00:00:00")));
}

#[tokio::test]
async fn upcoming_filter_drops_past_events() {
    // Arrange
    let address = spawn_app().await;
    let pool = test_pool().await;
    let token = seed_and_login(&address, &pool, "admin").await;
    let client = reqwest::Client::new();

    let marker = &uuid::Uuid::new_v4().to_string()[..8];
    let past_title = format!("Past event {}", marker);
    let future_title = format!("Future event {}", marker);

    for (title, date) in [
        (&past_title, "2020-06-01T10:00:00Z"),
        (&future_title, "2030-06-01T10:00:00Z"),
    ] {
        let resp = client
            .post(format!("{}/api/events", address))
            .header("Authorization", format!("Bearer {}", token))
            .json(&serde_json::json!({
                "title": title,
                "description": "Calendar entry",
                "date": date
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 201);
    }

    // Act
    let upcoming: Vec<serde_json::Value> = client
        .get(format!("{}/api/events?upcoming=true", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert
    assert!(upcoming.iter().any(|e| e["title"] == serde_json::json!(future_title)));
    assert!(!upcoming.iter().any(|e| e["title"] == serde_json::json!(past_title)));

    // Without the flag both are listed
    let all: Vec<serde_json::Value> = client
        .get(format!("{}/api/events", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(all.iter().any(|e| e["title"] == serde_json::json!(past_title)));
}

#[tokio::test]
async fn giving_record_date_range_filters_gifts() {
    // Arrange
    let address = spawn_app().await;
    let pool = test_pool().await;
    let token = seed_and_login(&address, &pool, "admin").await;
    let client = reqwest::Client::new();

    let giver = format!("Ranged giver {}", &uuid::Uuid::new_v4().to_string()[..8]);

    for date in [
        "2026-02-01T00:00:00Z",
        "2026-02-15T09:30:00Z",
        "2026-03-20T00:00:00Z",
    ] {
        let resp = client
            .post(format!("{}/api/giving-records", address))
            .header("Authorization", format!("Bearer {}", token))
            .json(&serde_json::json!({
                "name": giver,
                "amount": 50.0,
                "purpose": "offering",
                "date": date
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 201);
    }

    // Act
    let list: Vec<serde_json::Value> = client
        .get(format!(
            "{}/api/giving-records?dateFrom=2026-02-10&dateTo=2026-03-01",
            address
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert: only the mid-February gift from this giver falls in the window
    let mine: Vec<&serde_json::Value> = list
        .iter()
        .filter(|r| r["name"] == serde_json::json!(giver))
        .collect();
    assert_eq!(mine.len(), 1);
    assert!(mine[0]["date"].as_str().unwrap().starts_with("2026-02-15"));
}
