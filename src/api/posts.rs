use axum::{extract::State, Json};
use std::sync::Arc;

use postsearch::models::{CreatePostRequest, Post};
use crate::state::AppState;
use super::{fail, ok, ApiResult};

/// POST /api/posts - 添加帖子
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePostRequest>,
) -> ApiResult<Post> {
    let lang = state.resolve_lang(req.lang.as_deref());

    match state.index.add_post(&req.body, &lang).await {
        Ok(post) => {
            tracing::info!("Created post {} ({})", post.id, lang);
            ok(post)
        }
        Err(e) => fail(e),
    }
}
