use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use configuration::settings::Settings;
use database::DbRepository;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod extractors;
pub mod handlers;

/// Request bodies are a handful of fields; anything larger is refused.
const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
}

/// Builds the router with every route and middleware layer attached.
pub fn app(db_repo: DbRepository) -> Router {
    let app_state = Arc::new(AppState { db_repo });
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/", get(handlers::index))
        .route("/heroes", get(handlers::get_heroes))
        .route("/heroes/:id", get(handlers::get_hero))
        .route("/powers", get(handlers::get_powers))
        .route(
            "/powers/:id",
            get(handlers::get_power).patch(handlers::update_power),
        )
        .route("/hero_powers", post(handlers::create_hero_power))
        .with_state(app_state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}

/// Serves the API on `addr` until Ctrl-C, then closes the pool.
pub async fn serve(addr: SocketAddr, db_repo: DbRepository) -> anyhow::Result<()> {
    let pool = db_repo.pool().clone();
    let app = app(db_repo);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Web server stopped.");
    Ok(())
}

/// The main function to configure and run the web server.
///
/// Connects to the configured database, brings the schema up to date, and serves.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;
    let db_pool = database::connect(&settings.database).await?;
    database::run_migrations(&db_pool).await?;
    serve(addr, DbRepository::new(db_pool)).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let pool = database::connect_in_memory().await.unwrap();
        database::run_migrations(&pool).await.unwrap();
        app(DbRepository::new(pool))
    }

    #[tokio::test]
    async fn index_serves_html() {
        let response = test_app()
            .await
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<h1>Code challenge</h1>");
    }

    #[tokio::test]
    async fn non_integer_id_is_json_404() {
        let response = test_app()
            .await
            .oneshot(Request::builder().uri("/heroes/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"error":"Not found"}"#);
    }

    #[tokio::test]
    async fn unsupported_method_is_405() {
        let response = test_app()
            .await
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/powers/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn cors_headers_are_attached() {
        let response = test_app()
            .await
            .oneshot(
                Request::builder()
                    .uri("/heroes")
                    .header("origin", "http://localhost:4000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}
