use std::sync::Arc;

use tokio::net::TcpListener;

use plainwiki::logger::Logger;
use plainwiki::{router, AppState, Config, FileStore, Renderer, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if let Err(e) = Logger::init() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = Config::from_env()?;
    std::fs::create_dir_all(&*config.data_dir)?;

    let renderer = Renderer::load(&config.template_dir)?;
    let store = FileStore::new(config.data_dir.as_ref().clone());
    let state = AppState::new(Arc::new(store), renderer);

    let addr = config.socket_addr()?;
    log::info!("Wiki listening on http://{} (pages in {:?})", addr, config.data_dir);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await.map_err(WikiError::from)
}
