use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod state;

use postsearch::{config, db, search::PrefixMode, PostIndex};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "postsearch=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("postsearch {} (built {})", env!("CARGO_PKG_VERSION"), env!("BUILD_TIME"));

    // Load configuration / 加载配置
    let app_config = config::load_config().map_err(anyhow::Error::msg)?;
    tracing::info!("Server will listen on {}:{}", app_config.server.host, app_config.server.port);

    let prefix_mode = if app_config.search.prefix_every_term {
        PrefixMode::EveryTerm
    } else {
        PrefixMode::LastTerm
    };

    // Open the pool once; everything downstream borrows it through the index / 打开连接池
    let index = PostIndex::connect(&app_config.database, &app_config.get_database_url())
        .await?
        .with_prefix_mode(prefix_mode);

    db::run_migrations(index.pool()).await?;

    let state = Arc::new(AppState {
        index: index.clone(),
        config: app_config.clone(),
    });

    let app = Router::new()
        .route("/api/health", get(api::server::health_check))
        .route("/api/posts", post(api::posts::create_post))
        .route("/api/search", post(api::search::search))
        .route("/api/search/prefix", post(api::search::search_prefix))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    index.close().await;
    tracing::info!("Database pool closed, bye");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
