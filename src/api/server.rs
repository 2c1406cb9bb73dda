use axum::{
    Router,
    response::Html,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::{exercises, users};
use crate::config::Config;
use crate::db::Store;
use crate::tracker::{ExerciseLog, InputPolicy, UserDirectory};

const INDEX_HTML: &str = include_str!("../../views/index.html");

#[derive(Clone)]
pub struct AppState {
    pub directory: UserDirectory,
    pub log: ExerciseLog,
}

impl AppState {
    pub fn new(store: Store, policy: InputPolicy) -> Self {
        let directory = UserDirectory::new(store.clone(), policy);
        let log = ExerciseLog::new(store, directory.clone(), policy);
        Self { directory, log }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { Html(INDEX_HTML) }))
        .route("/api/users", post(users::create_user).get(users::list_users))
        .route("/api/users/{id}/exercises", post(exercises::add_exercise))
        .route("/api/users/{id}/logs", get(exercises::get_logs))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(&config.database_url, config.max_connections).await?;
    tracing::info!(database = %config.database_url, policy = ?config.input_policy, "store ready");

    let state = Arc::new(AppState::new(store.clone(), config.input_policy));
    let app = router(state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("App is listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{TestApp, text_body};
    use crate::tracker::InputPolicy;
    use axum::http::{StatusCode, header};

    #[tokio::test]
    async fn test_landing_page_served() {
        let app = TestApp::new(InputPolicy::Lenient).await;
        let response = app.get("/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        assert!(text_body(response).await.contains("Exercise Tracker"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = TestApp::new(InputPolicy::Lenient).await;
        assert_eq!(app.get("/api/nothing").await.status(), StatusCode::NOT_FOUND);
    }
}
