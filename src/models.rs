use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Maximum post body length, in characters
pub const MAX_BODY_CHARS: usize = 140;
/// Maximum search configuration name length, in characters
pub const MAX_LANG_CHARS: usize = 30;

/// A stored post. The search vector column is never read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i32,
    pub body: String,
    pub timestamp: NaiveDateTime,
    pub lang: String,
}

/// A matched post together with the engine's relevance score
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct RankedPost {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub post: Post,
    pub rank: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub body: String,
    pub lang: Option<String>,
}
