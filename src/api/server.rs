use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;
use super::{fail, ok, ApiResult};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub build_time: &'static str,
    pub post_count: i64,
}

/// GET /api/health - 健康检查
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<HealthStatus> {
    match state.index.count().await {
        Ok(post_count) => ok(HealthStatus {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            build_time: env!("BUILD_TIME"),
            post_count,
        }),
        Err(e) => fail(e),
    }
}
