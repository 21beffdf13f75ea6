pub mod posts;
pub mod search;
pub mod server;

use axum::{http::StatusCode, Json};
use postsearch::SearchError;
use serde::Serialize;

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: StatusCode, message: &str) -> Self {
        Self {
            code: code.as_u16() as i32,
            message: message.to_string(),
            data: None,
        }
    }
}

pub type ApiResult<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn ok<T>(data: T) -> ApiResult<T> {
    (StatusCode::OK, Json(ApiResponse::success(data)))
}

/// Map adapter errors onto HTTP: caller mistakes are 400, storage is 503
pub fn fail<T>(err: SearchError) -> ApiResult<T> {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!("Storage failure: {}", err);
    } else {
        tracing::debug!("Rejected request: {}", err);
    }
    (status, Json(ApiResponse::error(status, &err.to_string())))
}

fn status_for(err: &SearchError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
