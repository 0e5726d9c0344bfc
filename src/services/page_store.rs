use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use log::{debug, info, warn, error};
use crate::errors::WikiError;
use crate::types::{Page, PageLookup, Title};

/// File extension linking a stored page file to its title
pub const PAGE_EXTENSION: &str = ".txt";

/// Map a title to the storage key (file name) holding its content
pub fn title_to_storage_key(title: &Title) -> String {
    format!("{}{}", title, PAGE_EXTENSION)
}

/// Recover a title from a storage key, if the key follows the page naming convention
pub fn storage_key_to_title(key: &str) -> Option<Title> {
    let stem = key.strip_suffix(PAGE_EXTENSION)?;
    Title::parse(stem).ok()
}

/// Persistence for pages, keyed by title
pub trait PageStore: Send + Sync {
    /// Read a page. `WikiError::NotFound` when nothing is stored under `title`.
    fn load(&self, title: &Title) -> Result<Page, WikiError>;

    /// Write a page, replacing whatever was stored under its title
    fn save(&self, page: &Page) -> Result<(), WikiError>;

    /// Titles of every stored page, in no particular order
    fn list(&self) -> Result<Vec<String>, WikiError>;

    /// Like `load`, but a missing page is an ordinary outcome
    fn lookup(&self, title: &Title) -> Result<PageLookup, WikiError> {
        match self.load(title) {
            Ok(page) => Ok(PageLookup::Found(page)),
            Err(WikiError::NotFound) => Ok(PageLookup::Absent),
            Err(e) => Err(e),
        }
    }
}

/// Page store backed by one file per page in a directory
#[derive(Clone, Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Create a new file store
    pub fn new(data_dir: PathBuf) -> Self {
        debug!("Creating FileStore with data directory: {:?}", data_dir);
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, title: &Title) -> PathBuf {
        self.data_dir.join(title_to_storage_key(title))
    }
}

impl PageStore for FileStore {
    fn load(&self, title: &Title) -> Result<Page, WikiError> {
        let path = self.path_for(title);
        debug!("Loading page {} from {:?}", title, path);

        match fs::read(&path) {
            Ok(body) => {
                debug!("Loaded page {}, {} bytes", title, body.len());
                Ok(Page::new(title.clone(), body))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Page {} does not exist", title);
                Err(WikiError::NotFound)
            }
            Err(e) => {
                error!("Failed to read page file {:?}: {}", path, e);
                Err(WikiError::Storage(e))
            }
        }
    }

    fn save(&self, page: &Page) -> Result<(), WikiError> {
        let path = self.path_for(&page.title);
        debug!("Saving page {} to {:?}", page.title, path);

        write_private(&path, &page.body).map_err(|e| {
            error!("Failed to write page file {:?}: {}", path, e);
            WikiError::Storage(e)
        })?;

        info!("Saved page {}, {} bytes", page.title, page.body.len());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, WikiError> {
        debug!("Listing pages in {:?}", self.data_dir);

        let entries = fs::read_dir(&self.data_dir).map_err(|e| {
            warn!("Failed to read data directory {:?}: {}", self.data_dir, e);
            WikiError::Storage(e)
        })?;

        let mut titles = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                        continue;
                    }
                    let name = entry.file_name();
                    match name.to_str().and_then(storage_key_to_title) {
                        Some(title) => titles.push(title.as_str().to_string()),
                        None => debug!("Skipping non-page entry {:?}", name),
                    }
                }
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                }
            }
        }

        debug!("Found {} pages", titles.len());
        Ok(titles)
    }
}

/// Truncate-and-write, readable only by the owning user on Unix
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.flush()
}
