//! Destinations for finished page sequences.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::SinkError;
use crate::layout::Page;

/// Persists a complete, ordered page sequence and returns where it went.
///
/// Implementations must not leave a partially written artifact behind when
/// they fail.
pub trait DocumentSink {
    /// # Errors
    ///
    /// Returns [`SinkError`] if the pages could not be stored.
    fn write(&mut self, pages: &[Page]) -> Result<String, SinkError>;
}

#[derive(Serialize)]
struct DocumentFile<'a> {
    page_count: usize,
    pages: &'a [Page],
}

/// Writes pages as a JSON document to a file.
///
/// Output goes to a `.partial` sibling first and is renamed into place only
/// after a successful flush.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn partial_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".partial");
        self.path.with_file_name(name)
    }

    fn write_to(&self, partial: &Path, pages: &[Page]) -> Result<(), SinkError> {
        let file = File::create(partial)?;
        let mut writer = BufWriter::new(file);
        let document = DocumentFile {
            page_count: pages.len(),
            pages,
        };
        serde_json::to_writer_pretty(&mut writer, &document)?;
        writer.flush()?;
        fs::rename(partial, &self.path)?;
        Ok(())
    }
}

impl DocumentSink for JsonFileSink {
    fn write(&mut self, pages: &[Page]) -> Result<String, SinkError> {
        let partial = self.partial_path();
        if let Err(e) = self.write_to(&partial, pages) {
            if fs::remove_file(&partial).is_ok() {
                warn!(path = %partial.display(), "discarded partial document");
            }
            return Err(e);
        }
        let location = self.path.display().to_string();
        info!(path = %location, pages = pages.len(), "document written");
        Ok(location)
    }
}

/// Keeps every written document in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub documents: Vec<Vec<Page>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages of the most recent write.
    pub fn last(&self) -> Option<&[Page]> {
        self.documents.last().map(Vec::as_slice)
    }
}

impl DocumentSink for MemorySink {
    fn write(&mut self, pages: &[Page]) -> Result<String, SinkError> {
        self.documents.push(pages.to_vec());
        Ok(format!("memory://{}", self.documents.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> Vec<Page> {
        let mut first = Page::new(1, 595.0, 842.0);
        first.text(10.0, 20.0, "cover", crate::layout::style::TITLE);
        vec![first, Page::new(2, 595.0, 842.0)]
    }

    #[test]
    fn memory_sink_numbers_documents() {
        let mut sink = MemorySink::new();
        assert_eq!(sink.write(&pages()).ok().as_deref(), Some("memory://1"));
        assert_eq!(sink.write(&[]).ok().as_deref(), Some("memory://2"));
        assert_eq!(sink.documents[0].len(), 2);
        assert!(sink.last().is_some_and(<[Page]>::is_empty));
    }

    #[test]
    fn partial_path_is_a_sibling() {
        let sink = JsonFileSink::new("/tmp/out/report.json");
        assert_eq!(sink.partial_path(), PathBuf::from("/tmp/out/report.json.partial"));
    }
}
