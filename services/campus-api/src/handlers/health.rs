//! Health check handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use campus_db::{applied_schema_version, expected_schema_version, DbPool};
use serde::Serialize;
use std::time::Instant;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub checks: ReadyChecks,
}

#[derive(Debug, Serialize)]
pub struct ReadyChecks {
    pub database: DatabaseCheck,
    pub schema: SchemaCheck,
    pub pool: PoolStats,
}

#[derive(Debug, Serialize)]
pub struct DatabaseCheck {
    pub status: &'static str,
    pub latency_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct SchemaCheck {
    pub status: SchemaStatus,
    pub applied: Option<i64>,
    pub expected: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaStatus {
    Current,
    /// Database carries migrations newer than this build
    Ahead,
    Behind,
    Unknown,
}

impl SchemaStatus {
    fn compare(applied: Option<i64>, expected: Option<i64>) -> Self {
        match (applied, expected) {
            (Some(applied), Some(expected)) if applied == expected => Self::Current,
            (Some(applied), Some(expected)) if applied > expected => Self::Ahead,
            (_, Some(_)) => Self::Behind,
            (_, None) => Self::Unknown,
        }
    }

    fn is_serving(self) -> bool {
        !matches!(self, Self::Behind)
    }
}

#[derive(Debug, Serialize)]
pub struct PoolStats {
    pub size: u32,
    pub idle: usize,
    pub max: u32,
}

impl PoolStats {
    fn of(pool: &DbPool) -> Self {
        Self {
            size: pool.size(),
            idle: pool.num_idle(),
            max: pool.options().get_max_connections(),
        }
    }
}

/// GET /health - Liveness probe (no dependencies)
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "campus-api",
    })
}

/// GET /ready - Readiness probe
///
/// Reads the applied migration version, which doubles as the connectivity
/// check. A database behind the embedded migrations is reported as not ready.
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadyResponse>, (StatusCode, Json<ReadyResponse>)> {
    let start = Instant::now();
    let applied = applied_schema_version(&state.pool).await;
    let latency_ms = start.elapsed().as_millis() as u64;
    let expected = expected_schema_version();

    let (database, schema) = match applied {
        Ok(applied) => (
            DatabaseCheck {
                status: "ok",
                latency_ms,
            },
            SchemaCheck {
                status: SchemaStatus::compare(applied, expected),
                applied,
                expected,
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, latency_ms, "Readiness check failed");
            (
                DatabaseCheck {
                    status: "unavailable",
                    latency_ms,
                },
                SchemaCheck {
                    status: SchemaStatus::Unknown,
                    applied: None,
                    expected,
                },
            )
        }
    };

    let serving = database.status == "ok" && schema.status.is_serving();
    if database.status == "ok" && !serving {
        tracing::warn!(
            applied = ?schema.applied,
            expected = ?schema.expected,
            "Schema behind embedded migrations"
        );
    }

    let response = ReadyResponse {
        status: if serving { "ready" } else { "not_ready" },
        service: "campus-api",
        checks: ReadyChecks {
            database,
            schema,
            pool: PoolStats::of(&state.pool),
        },
    };

    if serving {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
