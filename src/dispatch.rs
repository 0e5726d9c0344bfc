//! View / edit / save control flow, independent of the HTTP layer.

use log::{debug, info};
use crate::errors::WikiError;
use crate::services::{PageStore, TemplateKind};
use crate::types::{Page, PageLookup, Title};

/// The page operations, each served under its own path prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Edit,
    Save,
}

impl Action {
    /// Route pattern capturing everything after the prefix as the title
    pub fn route(self) -> String {
        format!("{}*title", self.prefix())
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Action::View => "/view/",
            Action::Edit => "/edit/",
            Action::Save => "/save/",
        }
    }

    /// Location of this action for `title`
    pub fn location(self, title: &Title) -> String {
        format!("{}{}", self.prefix(), title)
    }
}

/// What a dispatched operation asks the transport to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render { template: TemplateKind, page: Page },
    Redirect(String),
}

/// Show a page, or send the client to create it
pub fn view(store: &dyn PageStore, title: &str) -> Result<Outcome, WikiError> {
    let title = Title::parse(title)?;
    match store.lookup(&title)? {
        PageLookup::Found(page) => Ok(Outcome::Render { template: TemplateKind::View, page }),
        PageLookup::Absent => {
            debug!("Page {} absent, redirecting to editor", title);
            Ok(Outcome::Redirect(Action::Edit.location(&title)))
        }
    }
}

/// Open the editor, starting from an empty page when none is stored
pub fn edit(store: &dyn PageStore, title: &str) -> Result<Outcome, WikiError> {
    let title = Title::parse(title)?;
    let page = match store.lookup(&title)? {
        PageLookup::Found(page) => page,
        PageLookup::Absent => Page::empty(title),
    };
    Ok(Outcome::Render { template: TemplateKind::Edit, page })
}

/// Store the submitted body and send the client back to the page
pub fn save(store: &dyn PageStore, title: &str, body: impl Into<Vec<u8>>) -> Result<Outcome, WikiError> {
    let title = Title::parse(title)?;
    let page = Page::new(title, body);
    store.save(&page)?;
    info!("Page {} saved", page.title);
    Ok(Outcome::Redirect(Action::View.location(&page.title)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// In-memory store recording writes, optionally failing them
    #[derive(Default)]
    struct RecordingStore {
        pages: Mutex<Vec<Page>>,
        writes: Mutex<usize>,
        fail_writes: bool,
    }

    impl PageStore for RecordingStore {
        fn load(&self, title: &Title) -> Result<Page, WikiError> {
            self.pages
                .lock()
                .unwrap()
                .iter()
                .find(|p| &p.title == title)
                .cloned()
                .ok_or(WikiError::NotFound)
        }

        fn save(&self, page: &Page) -> Result<(), WikiError> {
            *self.writes.lock().unwrap() += 1;
            if self.fail_writes {
                return Err(WikiError::Storage(std::io::Error::other("disk full")));
            }
            let mut pages = self.pages.lock().unwrap();
            pages.retain(|p| p.title != page.title);
            pages.push(page.clone());
            Ok(())
        }

        fn list(&self) -> Result<Vec<String>, WikiError> {
            Ok(self.pages.lock().unwrap().iter().map(|p| p.title.to_string()).collect())
        }
    }

    #[test]
    fn routes_capture_title_after_prefix() {
        assert_eq!(Action::View.route(), "/view/*title");
        assert_eq!(Action::Save.location(&Title::parse("Foo").unwrap()), "/save/Foo");
    }

    #[test]
    fn viewing_missing_page_redirects_to_edit() {
        let store = RecordingStore::default();
        assert_eq!(view(&store, "Foo").unwrap(), Outcome::Redirect("/edit/Foo".into()));
    }

    #[test]
    fn viewing_existing_page_renders_it() {
        let store = RecordingStore::default();
        save(&store, "Foo", "hello").unwrap();
        match view(&store, "Foo").unwrap() {
            Outcome::Render { template, page } => {
                assert_eq!(template, TemplateKind::View);
                assert_eq!(page.body, b"hello");
            }
            other => panic!("expected render, got {:?}", other),
        }
    }

    #[test]
    fn editing_missing_page_starts_empty() {
        let store = RecordingStore::default();
        let expected = Outcome::Render {
            template: TemplateKind::Edit,
            page: Page::empty(Title::parse("Foo").unwrap()),
        };
        assert_eq!(edit(&store, "Foo").unwrap(), expected);
    }

    #[test]
    fn saving_redirects_to_view() {
        let store = RecordingStore::default();
        assert_eq!(save(&store, "Foo", "x").unwrap(), Outcome::Redirect("/view/Foo".into()));
        assert_eq!(*store.writes.lock().unwrap(), 1);
    }

    #[test]
    fn invalid_titles_never_touch_storage() {
        let store = RecordingStore::default();
        let ops: [fn(&dyn PageStore, &str) -> Result<Outcome, WikiError>; 2] = [view, edit];
        for op in ops {
            assert!(matches!(op(&store, "../secret"), Err(WikiError::InvalidTitle(_))));
        }
        assert!(matches!(save(&store, "My Page", "x"), Err(WikiError::InvalidTitle(_))));
        assert_eq!(*store.writes.lock().unwrap(), 0);
    }

    #[test]
    fn storage_failure_surfaces() {
        let store = RecordingStore { fail_writes: true, ..Default::default() };
        let err = save(&store, "Foo", "x").unwrap_err();
        assert!(matches!(err, WikiError::Storage(_)));
    }
}
