use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Source and sink for a whole document or clipboard.
///
/// Reads and writes are whole-content and infallible from the editor's
/// point of view; providers deal with their own I/O failures.
pub trait Content {
    fn read_bytes(&mut self) -> Vec<u8>;
    fn write_bytes(&mut self, bytes: &[u8]);
}

/// Content held in memory. Default provider for documents and clipboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryContent {
    bytes: Vec<u8>,
}

impl MemoryContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            bytes: text.as_bytes().to_vec(),
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl Content for MemoryContent {
    fn read_bytes(&mut self) -> Vec<u8> {
        self.bytes.clone()
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes = bytes.to_vec();
    }
}

/// A document backed by a file on disk. A missing file reads as empty so
/// new files can be created by saving.
#[derive(Debug, Clone)]
pub struct FileContent {
    path: PathBuf,
}

impl FileContent {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl Content for FileContent {
    fn read_bytes(&mut self) -> Vec<u8> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                debug!(path = %self.path.display(), bytes = bytes.len(), "read file");
                bytes
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read file");
                Vec::new()
            }
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        if let Err(e) = fs::write(&self.path, bytes) {
            warn!(path = %self.path.display(), error = %e, "failed to write file");
        }
    }
}

/// The system clipboard.
#[cfg(feature = "clipboard")]
pub struct SystemClipboard {
    clipboard: arboard::Clipboard,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn new() -> Result<Self, arboard::Error> {
        Ok(Self {
            clipboard: arboard::Clipboard::new()?,
        })
    }
}

#[cfg(feature = "clipboard")]
impl Content for SystemClipboard {
    fn read_bytes(&mut self) -> Vec<u8> {
        match self.clipboard.get_text() {
            Ok(text) => text.into_bytes(),
            Err(e) => {
                warn!(error = %e, "failed to read clipboard");
                Vec::new()
            }
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes).into_owned();
        if let Err(e) = self.clipboard.set_text(text) {
            warn!(error = %e, "failed to write clipboard");
        }
    }
}
