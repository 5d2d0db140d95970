use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{error, info, warn};

use crate::api::{ApiContentRequest, ApiEnvelope};
use engagement_log::scoring::EngagementScorer;
use engagement_log::store::ContentStore;
use engagement_log::{ContentRecord, Error};

#[derive(Clone)]
struct AppState {
    store: Arc<ContentStore>,
    scorer: EngagementScorer,
}

struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            other => {
                error!(error = %other, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(ApiEnvelope::error(self.0.to_string()))).into_response()
    }
}

pub async fn serve(
    args: crate::ServeArgs,
    store: ContentStore,
    scorer: EngagementScorer,
) -> Result<(), String> {
    info!(
        rate_basis = %scorer.rate_basis(),
        score_policy = %scorer.score_policy(),
        store = %store.path().display(),
        "starting content server"
    );

    let state = AppState {
        store: Arc::new(store),
        scorer,
    };

    let mut app = router(state);

    if let Some(web_root) = args.web_root {
        let index_path = format!("{}/index.html", web_root.trim_end_matches('/'));
        let static_service = ServeDir::new(web_root).not_found_service(ServeFile::new(index_path));
        app = app.fallback_service(static_service);
    }

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind server: {}", err))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| format!("server error: {}", err))?;

    info!("server stopped");
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/content",
            get(list_handler)
                .post(create_handler)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/content/:id",
            get(get_handler).fallback(method_not_allowed),
        )
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn method_not_allowed() -> (StatusCode, Json<ApiEnvelope<()>>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiEnvelope::error("Method not allowed")),
    )
}

async fn list_handler(State(state): State<AppState>) -> Json<ApiEnvelope<Vec<ContentRecord>>> {
    Json(ApiEnvelope::data(state.store.list().await))
}

async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiEnvelope<ContentRecord>>, ApiError> {
    let record = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| Error::NotFound(id))?;
    Ok(Json(ApiEnvelope::data(record)))
}

async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<ApiContentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiEnvelope<ContentRecord>>), ApiError> {
    let Json(request) = payload.map_err(|err| Error::Validation(err.body_text()))?;
    let submission = request.into_submission().map_err(Error::Validation)?;
    let record = state.store.create(submission, &state.scorer).await?;
    Ok((StatusCode::CREATED, Json(ApiEnvelope::data(record))))
}
