use sqlx::PgPool;
use anyhow::Result;

/// Run database migrations / 运行数据库迁移
///
/// Creates the post table with its timestamp index and the GIN index over
/// the search vector. Safe to run on every start.
/// 创建帖子表、时间索引和搜索向量GIN索引，可重复执行
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS post (
            id SERIAL PRIMARY KEY,
            body VARCHAR(140) NOT NULL,
            "timestamp" TIMESTAMP NOT NULL DEFAULT (now() AT TIME ZONE 'utc'),
            lang VARCHAR(30) NOT NULL,
            body_vector TSVECTOR NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(r#"CREATE INDEX IF NOT EXISTS ix_post_timestamp ON post ("timestamp")"#)
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS ix_body_vector ON post USING gin (body_vector)")
        .execute(pool)
        .await?;

    tracing::info!("Database migrations completed");
    Ok(())
}
