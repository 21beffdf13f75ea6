//! Post search index backed by PostgreSQL full-text search / 基于PostgreSQL全文检索的帖子索引
//!
//! The engine does all the work:
//! - `to_tsvector` builds the stored vector at write time
//! - `plainto_tsquery` / `to_tsquery` parse the request at read time
//! - `@@` matches, `ts_rank` orders, a GIN index on `body_vector` accelerates
//!
//! Every call is one request/response against the pool. Nothing is retried.
//! A prefix query the engine rejects costs one extra round trip to tell a bad
//! configuration name from a bad query.

use sqlx::postgres::{PgConnection, PgPool, PgPoolOptions};
use std::time::Duration;

use super::query::{PlainQuery, PrefixMode, PrefixQuery};
use crate::config::DatabaseConfig;
use crate::error::{Result, SearchError, Stage};
use crate::models::{Post, RankedPost, MAX_BODY_CHARS, MAX_LANG_CHARS};

/// Opaque engine-side search vector, held in its canonical text form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchVector(String);

impl SearchVector {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const RANKED_PLAIN_SQL: &str = r#"
    SELECT p.id, p.body, p."timestamp", p.lang, ts_rank(p.body_vector, q) AS rank
    FROM post p, plainto_tsquery($1::regconfig, $2) AS q
    WHERE p.body_vector @@ q
    ORDER BY rank DESC, p.id ASC
"#;

const RANKED_PREFIX_SQL: &str = r#"
    SELECT p.id, p.body, p."timestamp", p.lang, ts_rank(p.body_vector, q) AS rank
    FROM post p, to_tsquery($1::regconfig, $2) AS q
    WHERE p.body_vector @@ q
    ORDER BY rank DESC, p.id ASC
"#;

/// Post search adapter
#[derive(Clone)]
pub struct PostIndex {
    db: PgPool,
    prefix_mode: PrefixMode,
}

impl PostIndex {
    /// Use an existing connection pool / 使用现有数据库连接池
    pub fn new(db: PgPool) -> Self {
        Self { db, prefix_mode: PrefixMode::default() }
    }

    /// Open a pool from configuration
    pub async fn connect(config: &DatabaseConfig, url: &str) -> Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(url)
            .await?;

        tracing::info!("Post search database connected (pool size {})", config.max_connections);

        Ok(Self::new(db))
    }

    pub fn with_prefix_mode(mut self, mode: PrefixMode) -> Self {
        self.prefix_mode = mode;
        self
    }

    pub fn pool(&self) -> &PgPool {
        &self.db
    }

    /// Close database connection pool / 关闭数据库连接池
    pub async fn close(&self) {
        self.db.close().await;
    }

    /// Convert `text` to a search vector using the `lang` configuration.
    /// Costs one round trip.
    pub async fn compute_search_vector(&self, text: &str, lang: &str) -> Result<SearchVector> {
        reject_nul("text", text)?;
        reject_nul("lang", lang)?;

        let mut conn = self.db.acquire().await?;
        Self::to_tsvector(&mut conn, text, lang).await
    }

    async fn to_tsvector(conn: &mut PgConnection, text: &str, lang: &str) -> Result<SearchVector> {
        let (vector,): (String,) = sqlx::query_as("SELECT to_tsvector($1::regconfig, $2)::text")
            .bind(lang)
            .bind(text)
            .fetch_one(conn)
            .await
            .map_err(|e| SearchError::at(Stage::ConfigName, e))?;
        Ok(SearchVector(vector))
    }

    /// Ask the engine whether `lang` names a search configuration
    async fn check_config(&self, lang: &str) -> Result<()> {
        sqlx::query("SELECT $1::regconfig::text")
            .bind(lang)
            .execute(&self.db)
            .await
            .map_err(|e| SearchError::at(Stage::ConfigName, e))?;
        Ok(())
    }

    /// Store a new post. Vector and row are written in one transaction.
    /// 添加帖子，向量与记录在同一事务中写入
    pub async fn add_post(&self, text: &str, lang: &str) -> Result<Post> {
        validate_post(text, lang)?;

        let mut tx = self.db.begin().await?;

        let vector = Self::to_tsvector(&mut tx, text, lang).await?;

        let post: Post = sqlx::query_as(
            r#"
            INSERT INTO post (body, "timestamp", lang, body_vector)
            VALUES ($1, (now() AT TIME ZONE 'utc'), $2, $3::tsvector)
            RETURNING id, body, "timestamp", lang
            "#,
        )
        .bind(text)
        .bind(lang)
        .bind(vector.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!("Post {} added (lang={})", post.id, post.lang);
        Ok(post)
    }

    /// Natural-language search, best match first
    pub async fn search(&self, expression: &str, lang: &str) -> Result<Vec<Post>> {
        Ok(strip_ranks(self.search_ranked(expression, lang).await?))
    }

    pub async fn search_ranked(&self, expression: &str, lang: &str) -> Result<Vec<RankedPost>> {
        validate_query(expression, lang)?;
        let query = PlainQuery::new(expression);

        let hits: Vec<RankedPost> = sqlx::query_as(RANKED_PLAIN_SQL)
            .bind(lang)
            .bind(query.as_str())
            .fetch_all(&self.db)
            .await
            .map_err(|e| SearchError::at(Stage::ConfigName, e))?;

        tracing::debug!("search {:?} ({}): {} hits", expression, lang, hits.len());
        Ok(hits)
    }

    /// Prefix (autocomplete) search, best match first
    pub async fn search_prefix(&self, expression: &str, lang: &str) -> Result<Vec<Post>> {
        Ok(strip_ranks(self.search_prefix_ranked(expression, lang).await?))
    }

    pub async fn search_prefix_ranked(&self, expression: &str, lang: &str) -> Result<Vec<RankedPost>> {
        validate_query(expression, lang)?;
        let rendered = PrefixQuery::new(expression).with_mode(self.prefix_mode).render();

        let result = sqlx::query_as::<_, RankedPost>(RANKED_PREFIX_SQL)
            .bind(lang)
            .bind(&rendered)
            .fetch_all(&self.db)
            .await
            .map_err(|e| SearchError::at(Stage::OperatorQuery, e));

        let hits = match result {
            Ok(hits) => hits,
            Err(SearchError::QuerySyntax(message)) => {
                // Over-qualified config names share this SQLSTATE / 配置名错误同码
                self.check_config(lang).await?;
                return Err(SearchError::QuerySyntax(message));
            }
            Err(e) => return Err(e),
        };

        tracing::debug!("prefix search {:?} ({}): {} hits", rendered, lang, hits.len());
        Ok(hits)
    }

    /// Number of stored posts
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM post")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }
}

fn strip_ranks(hits: Vec<RankedPost>) -> Vec<Post> {
    hits.into_iter().map(|h| h.post).collect()
}

/// Length and NUL checks done before touching storage / 写入前校验
pub fn validate_post(text: &str, lang: &str) -> Result<()> {
    reject_nul("body", text)?;
    reject_nul("lang", lang)?;

    let body_len = text.chars().count();
    if body_len > MAX_BODY_CHARS {
        return Err(SearchError::Validation(format!(
            "body is {} characters, limit is {}",
            body_len, MAX_BODY_CHARS
        )));
    }

    let lang_len = lang.chars().count();
    if lang_len > MAX_LANG_CHARS {
        return Err(SearchError::Validation(format!(
            "lang is {} characters, limit is {}",
            lang_len, MAX_LANG_CHARS
        )));
    }

    Ok(())
}

/// NUL checks for search input / 搜索参数校验
pub fn validate_query(expression: &str, lang: &str) -> Result<()> {
    reject_nul("expression", expression)?;
    reject_nul("lang", lang)
}

/// The server encoding cannot store U+0000
fn reject_nul(field: &str, value: &str) -> Result<()> {
    if value.contains('\0') {
        return Err(SearchError::Validation(format!("{} contains a NUL character", field)));
    }
    Ok(())
}
