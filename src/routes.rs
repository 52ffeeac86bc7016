// src/routes.rs

use axum::{
    Router, http::Method, middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{
        admin_users, announcements, auth, contact, events, giving_records, members, ministries,
        prayer_requests, sermons, small_groups, visitors,
    },
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware, superadmin_middleware},
};

/// Assembles the main application router.
///
/// * Public reads: content collections the website renders.
/// * Public writes: the three submission forms (prayer requests, visitor
///   registration, contact).
/// * Everything else sits behind JWT auth (admin role); admin-account
///   management additionally requires superadmin.
/// * Applies global middleware (Trace, CORS) and injects state.
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new().route("/login", post(auth::login));

    let sermon_routes = Router::new()
        .route("/", get(sermons::list_sermons))
        .route("/{id}", get(sermons::get_sermon))
        .merge(
            Router::new()
                .route("/", post(sermons::create_sermon))
                .route(
                    "/{id}",
                    put(sermons::update_sermon).delete(sermons::delete_sermon),
                )
                .layer(middleware::from_fn(admin_middleware))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let event_routes = Router::new()
        .route("/", get(events::list_events))
        .route("/{id}", get(events::get_event))
        .merge(
            Router::new()
                .route("/", post(events::create_event))
                .route(
                    "/{id}",
                    put(events::update_event).delete(events::delete_event),
                )
                .layer(middleware::from_fn(admin_middleware))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let announcement_routes = Router::new()
        .route("/", get(announcements::list_announcements))
        .route("/{id}", get(announcements::get_announcement))
        .merge(
            Router::new()
                .route("/", post(announcements::create_announcement))
                .route(
                    "/{id}",
                    put(announcements::update_announcement)
                        .delete(announcements::delete_announcement),
                )
                .layer(middleware::from_fn(admin_middleware))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let ministry_routes = Router::new()
        .route("/", get(ministries::list_ministries))
        .route("/{id}", get(ministries::get_ministry))
        .merge(
            Router::new()
                .route("/", post(ministries::create_ministry))
                .route(
                    "/{id}",
                    put(ministries::update_ministry).delete(ministries::delete_ministry),
                )
                .layer(middleware::from_fn(admin_middleware))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let small_group_routes = Router::new()
        .route("/", get(small_groups::list_small_groups))
        .route("/{id}", get(small_groups::get_small_group))
        .merge(
            Router::new()
                .route("/", post(small_groups::create_small_group))
                .route(
                    "/{id}",
                    put(small_groups::update_small_group).delete(small_groups::delete_small_group),
                )
                .layer(middleware::from_fn(admin_middleware))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let prayer_request_routes = Router::new()
        .route(
            "/",
            get(prayer_requests::list_prayer_requests).post(prayer_requests::create_prayer_request),
        )
        .route("/{id}", get(prayer_requests::get_prayer_request))
        .merge(
            Router::new()
                .route(
                    "/{id}",
                    put(prayer_requests::update_prayer_request)
                        .delete(prayer_requests::delete_prayer_request),
                )
                .layer(middleware::from_fn(admin_middleware))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    // Registration form is public; reading and managing visitors is not.
    let visitor_routes = Router::new()
        .route("/", post(visitors::create_visitor))
        .merge(
            Router::new()
                .route("/", get(visitors::list_visitors))
                .route(
                    "/{id}",
                    get(visitors::get_visitor)
                        .put(visitors::update_visitor)
                        .delete(visitors::delete_visitor),
                )
                .layer(middleware::from_fn(admin_middleware))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let member_routes = Router::new()
        .route("/", get(members::list_members).post(members::create_member))
        .route(
            "/{id}",
            get(members::get_member)
                .put(members::update_member)
                .delete(members::delete_member),
        )
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let giving_record_routes = Router::new()
        .route(
            "/",
            get(giving_records::list_giving_records).post(giving_records::create_giving_record),
        )
        .route(
            "/{id}",
            get(giving_records::get_giving_record)
                .put(giving_records::update_giving_record)
                .delete(giving_records::delete_giving_record),
        )
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let contact_routes = Router::new()
        .route("/", post(contact::create_contact_message))
        .merge(
            Router::new()
                .route("/", get(contact::list_contact_messages))
                .layer(middleware::from_fn(admin_middleware))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    // Double middleware protection: Auth first, then superadmin check.
    let admin_user_routes = Router::new()
        .route(
            "/users",
            get(admin_users::list_admin_users).post(admin_users::create_admin_user),
        )
        .route(
            "/users/{id}",
            put(admin_users::update_admin_user).delete(admin_users::delete_admin_user),
        )
        .layer(middleware::from_fn(superadmin_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/sermons", sermon_routes)
        .nest("/api/events", event_routes)
        .nest("/api/announcements", announcement_routes)
        .nest("/api/ministries", ministry_routes)
        .nest("/api/small-groups", small_group_routes)
        .nest("/api/prayer-requests", prayer_request_routes)
        .nest("/api/visitors", visitor_routes)
        .nest("/api/members", member_routes)
        .nest("/api/giving-records", giving_record_routes)
        .nest("/api/contact", contact_routes)
        .nest("/api/admin", admin_user_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
