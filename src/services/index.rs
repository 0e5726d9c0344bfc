use log::{info, warn};
use crate::services::PageStore;

/// Titles of all stored pages, sorted for display.
///
/// An empty store and a failed listing both produce an empty list.
pub fn list_titles(store: &dyn PageStore) -> Vec<String> {
    let mut titles = match store.list() {
        Ok(titles) => titles,
        Err(e) => {
            warn!("Could not list pages: {}", e);
            return Vec::new();
        }
    };

    if titles.is_empty() {
        warn!("No pages stored yet");
        return titles;
    }

    titles.sort();
    info!("Listed {} pages", titles.len());
    titles
}
