use anyhow::Result;
use dotenvy::dotenv;
use nc_details::{
    config::Config,
    definitions,
    models::{AppState, ContentItem, ItemRepository, MemoryRepository},
    routes,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,nc_details=debug")),
        )
        .init();

    let config = Config::from_env()?;
    let definitions = definitions::default_registry()?;
    let items = MemoryRepository::new();
    items.save(ContentItem::new("StartPage", "Home")).await?;

    let addr = config.addr;
    let state = AppState {
        items: Arc::new(items),
        definitions: Arc::new(definitions),
        config: Arc::new(config),
    };
    let app = routes::build_app(state);

    info!("listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
