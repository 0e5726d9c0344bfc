//! plainwiki - a minimal file-backed wiki
//!
//! Pages are plain-text files keyed by an alphanumeric title. Viewing a
//! missing page sends the browser to its editor; saving writes the whole
//! body back to disk and returns to the view.

pub mod config;
pub mod dispatch;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod services;
pub mod types;
pub mod utils;

use axum::{routing::{any, get}, Router};

// Re-export commonly used items
pub use config::Config;
pub use dispatch::{Action, Outcome};
pub use errors::WikiError;
pub use types::{is_valid_title, AppState, Page, PageLookup, Title};
pub use services::{FileStore, PageStore, Renderer, TemplateKind, list_titles};

/// Build the application router over `state`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_index))
        .route("/top/", get(handlers::handle_index))
        .route(&Action::View.route(), any(handlers::view_page))
        .route(&Action::Edit.route(), any(handlers::edit_page))
        .route(&Action::Save.route(), any(handlers::save_page))
        .with_state(state)
}
