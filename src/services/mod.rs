pub mod page_store;
pub mod renderer;
pub mod index;

pub use page_store::{FileStore, PageStore, storage_key_to_title, title_to_storage_key};
pub use renderer::{Renderer, TemplateKind};
pub use index::list_titles;
