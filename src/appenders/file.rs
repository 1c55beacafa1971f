//! File appender implementation

use crate::core::{Appender, LogEntry, LoggerError, Result};
use crate::factory::{Arguments, Buildable, Param};
use serde_json::json;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct FileAppender {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileAppender {
    /// Open `path` for appending, creating it if needed
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
        })
    }

    /// Like [`FileAppender::new`], creating missing parent directories first
    pub fn with_parent_dirs(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn append(&mut self, _entry: &LogEntry, formatted: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        writer.write_all(formatted.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}

impl Buildable for FileAppender {
    fn parameters() -> Vec<Param> {
        vec![
            Param::required("path"),
            Param::optional("create_dirs", json!(true)),
        ]
    }

    fn build(args: &Arguments) -> Result<Self> {
        let path = args.string("path")?;
        let opened = if args.boolean("create_dirs")? {
            Self::with_parent_dirs(&path)
        } else {
            Self::new(&path)
        };
        opened.map_err(|e| args.failure(format!("cannot open '{}': {}", path, e)))
    }
}
