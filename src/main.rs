use book_catalog::config::Config;
use book_catalog::database::{DefaultBookRepository, establish_pool};
use book_catalog::http::{AppState, HttpServer, HttpServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let pool = establish_pool(config.database_url(), config.db_max_connections()).await?;
    let book_repo = DefaultBookRepository::new(pool);

    let state = AppState::new(book_repo);
    let server_config = HttpServerConfig::new(config.server_port());
    let http_server = HttpServer::new(state, server_config).await?;
    http_server.run().await
}
