//! Route table and cross-cutting middleware.

mod common;
mod student;

pub use common::common_routes;
pub use student::student_routes;

use crate::error::AppError;
use crate::state::AppState;
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::any::Any;
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeFile;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

/// Full application: probes, `/api/v1` student routes and the admin page, wrapped in
/// access logging, panic recovery and a request body limit.
pub fn app(state: AppState, frontend_dir: &Path) -> Router {
    let max_body_bytes = state.options.max_body_bytes;
    let index = frontend_dir.join("index.html");

    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api/v1", student_routes(state))
        .route_service("/", ServeFile::new(&index))
        .route_service("/index.html", ServeFile::new(&index))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(LatencyUnit::Millis),
                        ),
                )
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "handler panicked");
    AppError::Internal("Internal server error".into()).into_response()
}
