//! Service probes: health, readiness, version.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthBody {
    status: &'static str,
    message: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    Ok,
    Degraded,
}

#[derive(Serialize)]
pub struct ReadyBody {
    status: Readiness,
    database: &'static str,
}

impl ReadyBody {
    fn from_ping(reachable: bool) -> Self {
        if reachable {
            ReadyBody {
                status: Readiness::Ok,
                database: "ok",
            }
        } else {
            ReadyBody {
                status: Readiness::Degraded,
                database: "unavailable",
            }
        }
    }
}

#[derive(Serialize)]
pub struct VersionBody {
    name: &'static str,
    version: &'static str,
}

pub async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        message: "API is running",
    })
}

/// 503 while the repository cannot be reached.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyBody>) {
    match state.repo.ping().await {
        Ok(()) => (StatusCode::OK, Json(ReadyBody::from_ping(true))),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(ReadyBody::from_ping(false)))
        }
    }
}

pub async fn version() -> Json<VersionBody> {
    Json(VersionBody {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
