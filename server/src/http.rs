use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{self, HeaderName, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
};
use entity::{Employee, GetEmployeesRequest, OffsetRequest};
use platform_api::{ApiError, ApiResult, internal_error};
use platform_db::SeaOrmStore;
use products_hr::Application;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application<SeaOrmStore>>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: SeaOrmStore, config: Arc<AppConfig>) -> Self {
        Self {
            app: Arc::new(Application::new(store)),
            config,
        }
    }
}

pub async fn serve(host: &str, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(host)
        .await
        .with_context(|| format!("failed to bind {host}"))?;

    info!(addr = %listener.local_addr()?, "employee directory listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::GET])
        .allow_origin(allow_origin)
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/health", get(health_handler))
        .route("/employees/{name}", get(employees_handler))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(state.config.request_timeout))
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

/// `?limit=<int>&last-id=<int>`
#[derive(Debug, Deserialize)]
struct PageQuery {
    limit: u64,
    #[serde(rename = "last-id")]
    last_id: i32,
}

async fn employees_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Employee>>> {
    let Query(page) = query.map_err(|rejection| ApiError::invalid_input(rejection.body_text()))?;
    let max = state.config.max_page_size;
    if page.limit == 0 || page.limit > max {
        return Err(ApiError::invalid_input(format!(
            "limit must be within [1, {max}]"
        )));
    }

    let req = GetEmployeesRequest::new(name, OffsetRequest::new(page.limit, page.last_id));
    let employees = state
        .app
        .get_employees_by_name(&req)
        .await
        .map_err(internal_error)?;
    Ok(Json(employees))
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = state.app.store().ping().await.is_ok();
    Json(HealthResponse {
        ok: db_ok,
        db_ok,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    db_ok: bool,
    version: &'static str,
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
    info!("shutdown signal received");
}
