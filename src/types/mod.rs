use std::sync::Arc;

use crate::services::{PageStore, Renderer};

pub mod title;

pub use title::{is_valid_title, Title};

/// A wiki page: its title and raw body bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: Title,
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: Title, body: impl Into<Vec<u8>>) -> Self {
        Self { title, body: body.into() }
    }

    /// A page with no content yet
    pub fn empty(title: Title) -> Self {
        Self { title, body: Vec::new() }
    }

    /// Body as text, replacing invalid UTF-8 sequences
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Result of looking a title up in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLookup {
    Found(Page),
    Absent,
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PageStore>,
    pub renderer: Arc<Renderer>,
}

impl AppState {
    pub fn new(store: Arc<dyn PageStore>, renderer: Renderer) -> Self {
        Self { store, renderer: Arc::new(renderer) }
    }
}
