use std::sync::Arc;

use axum::{extract::State, http::StatusCode, middleware as axum_middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;

use services::{
    contact::ContactIntake, content::ContentStore, mailer::Notifier, templates::Templates,
};

#[derive(Clone)]
pub struct AppState {
    pub store: ContentStore,
    pub contact: ContactIntake,
    pub templates: Templates,
    pub config: config::Config,
}

impl AppState {
    pub fn new(
        db: db::Database,
        config: config::Config,
        notifier: Arc<dyn Notifier>,
    ) -> anyhow::Result<Self> {
        let store = ContentStore::new(db.pool);
        let contact = ContactIntake::new(
            store.clone(),
            notifier,
            config.contact_email.clone(),
            config.notify_failure,
        );

        Ok(Self {
            store,
            contact,
            templates: Templates::new()?,
            config,
        })
    }
}

pub fn app(state: AppState) -> Router {
    // Admin routes require a bearer token
    let admin_routes = routes::admin::router().route_layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::auth::auth_middleware,
    ));

    let api_router = Router::new()
        .nest("/auth", routes::auth::router())
        .nest("/admin", admin_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let static_dir = ServeDir::new(&state.config.static_path);
    let media_dir = ServeDir::new(&state.config.media_path);

    Router::new()
        .merge(routes::pages::router())
        .merge(routes::contact::router())
        .route("/health", get(health_check))
        .nest("/api", api_router)
        .nest_service("/static", static_dir)
        .nest_service("/media", media_dir)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health_check(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    sqlx::query("SELECT 1")
        .execute(state.store.pool())
        .await
        .map_err(|e| {
            tracing::error!("Health check failed: {e}");
            StatusCode::SERVICE_UNAVAILABLE
        })?;
    Ok("OK")
}
