//! Append-only CSV row store. The header is written once at creation; every
//! later write is a whole-row append. A read-write lock keeps snapshot reads
//! from observing a partially-written append.

use parking_lot::RwLock;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::Article;

/// Column order of the row store on disk.
pub const HEADERS: [&str; 12] = [
    "Title",
    "Subtitle",
    "Full Text",
    "Number of Images",
    "Image URLs",
    "Number of External Links",
    "Author Name",
    "Author Profile URL",
    "Number of Claps",
    "Reading Time",
    "Keywords",
    "URL",
];

#[derive(Debug, Error)]
pub enum StoreError {
    /// The row store file does not exist. Distinct from an empty store: an
    /// absent file means nothing was ever scraped (or the path is wrong).
    #[error("row store not found at {}", .0.display())]
    Missing(PathBuf),
    #[error("failed to access row store: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed row store: {0}")]
    Malformed(#[from] csv::Error),
}

/// Handle to the CSV row store.
pub struct ArticleStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl ArticleStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the store file with its header row if it does not exist yet.
    pub fn init(&self) -> Result<(), StoreError> {
        let _guard = self.lock.write();
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(HEADERS)?;
        writer.flush()?;
        Ok(())
    }

    /// Read the full store into memory. `Missing` if the file is absent.
    pub fn snapshot(&self) -> Result<Vec<Article>, StoreError> {
        let _guard = self.lock.read();
        if !self.path.exists() {
            return Err(StoreError::Missing(self.path.clone()));
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut rows = Vec::new();
        for record in reader.deserialize() {
            rows.push(record?);
        }
        Ok(rows)
    }

    /// Append whole rows, writing the header first if the file is new.
    /// Returns the ordinal id assigned to the first appended row.
    pub fn append(&self, articles: &[Article]) -> Result<usize, StoreError> {
        let _guard = self.lock.write();

        let needs_header = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };
        let first_id = if needs_header {
            0
        } else {
            self.count_rows()?
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        for article in articles {
            writer.serialize(article)?;
        }
        writer.flush()?;
        Ok(first_id)
    }

    fn count_rows(&self) -> Result<usize, StoreError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut count = 0;
        for record in reader.byte_records() {
            record?;
            count += 1;
        }
        Ok(count)
    }
}
