use axum::{extract::State, Json};
use std::sync::Arc;

use postsearch::Post;
use crate::state::AppState;
use crate::api::{fail, ok, ApiResult};
use super::types::SearchRequest;

/// POST /api/search - 全文搜索，按相关度排序
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> ApiResult<Vec<Post>> {
    let lang = state.resolve_lang(req.lang.as_deref());

    match state.index.search(&req.query, &lang).await {
        Ok(posts) => ok(posts),
        Err(e) => fail(e),
    }
}

/// POST /api/search/prefix - 前缀搜索
pub async fn search_prefix(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> ApiResult<Vec<Post>> {
    let lang = state.resolve_lang(req.lang.as_deref());

    match state.index.search_prefix(&req.query, &lang).await {
        Ok(posts) => ok(posts),
        Err(e) => fail(e),
    }
}
