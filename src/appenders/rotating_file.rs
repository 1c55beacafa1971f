//! Size-based rotating file appender
//!
//! When the active file reaches `max_bytes`, it is renamed to `<name>.1`
//! (older backups shift to `.2`, `.3`, ...) and a fresh file is opened.
//! Backups beyond `max_backup_files` are deleted; with compression enabled
//! each new backup is gzipped to `<name>.1.gz`.

use crate::core::{Appender, LogEntry, LoggerError, Result};
use crate::factory::{Arguments, Buildable, Param};
use serde_json::json;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Rotate once the active file reaches this size
    pub max_bytes: u64,
    /// Maximum number of rotated files to keep
    pub max_backup_files: usize,
    /// Whether to gzip rotated files
    pub compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024, // 10 MB
            max_backup_files: 5,
            compress: false,
        }
    }
}

impl RotationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, size: u64) -> Self {
        self.max_bytes = size;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backup_files = count;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }
}

pub struct RotatingFileAppender {
    base_path: PathBuf,
    policy: RotationPolicy,
    writer: Option<BufWriter<File>>,
    current_size: u64,
}

impl RotatingFileAppender {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_policy(path, RotationPolicy::default())
    }

    pub fn with_policy<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let (file, current_size) = Self::open(&base_path)?;

        Ok(Self {
            base_path,
            policy,
            writer: Some(BufWriter::new(file)),
            current_size,
        })
    }

    fn open(path: &Path) -> Result<(File, u64)> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "open log file",
                    format!("Failed to open '{}'", path.display()),
                    e,
                )
            })?;
        let size = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok((file, size))
    }

    fn should_rotate(&self) -> bool {
        self.current_size >= self.policy.max_bytes
    }

    fn rotate(&mut self) -> Result<()> {
        // Release the handle before renaming
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        let oldest = self.backup_path(self.policy.max_backup_files);
        for stale in [Self::gz_path(&oldest), oldest] {
            if stale.exists() {
                if let Err(e) = fs::remove_file(&stale) {
                    eprintln!(
                        "[WARN] Failed to remove oldest backup {}: {}",
                        stale.display(),
                        e
                    );
                }
            }
        }

        for i in (1..self.policy.max_backup_files).rev() {
            let old_path = self.backup_path(i);
            let new_path = self.backup_path(i + 1);
            let old_compressed = Self::gz_path(&old_path);

            if old_compressed.exists() {
                fs::rename(&old_compressed, Self::gz_path(&new_path))?;
            } else if old_path.exists() {
                fs::rename(&old_path, &new_path).map_err(|e| {
                    LoggerError::file_rotation(
                        old_path.display().to_string(),
                        format!("Failed to rotate backup files: {}", e),
                    )
                })?;
            }
        }

        if self.policy.max_backup_files == 0 {
            fs::remove_file(&self.base_path)?;
        } else if self.base_path.exists() {
            let backup_path = self.backup_path(1);
            fs::rename(&self.base_path, &backup_path).map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to rotate current log file: {}", e),
                )
            })?;

            if self.policy.compress {
                Self::compress_file(&backup_path)?;
            }
        }

        let (file, size) = Self::open(&self.base_path)?;
        self.writer = Some(BufWriter::new(file));
        self.current_size = size;
        Ok(())
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut path = self.base_path.clone();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.log");
        path.set_file_name(format!("{}.{}", filename, index));
        path
    }

    fn gz_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(".gz");
        PathBuf::from(name)
    }

    /// Gzip `path` next to itself, removing the original only on success
    fn compress_file(path: &Path) -> Result<()> {
        let gz_path = Self::gz_path(path);
        let temp_gz_path = path.with_extension("gz.tmp");

        let result = (|| -> std::io::Result<()> {
            let mut reader = std::io::BufReader::new(File::open(path)?);
            let output = BufWriter::new(File::create(&temp_gz_path)?);
            let mut encoder =
                flate2::write::GzEncoder::new(output, flate2::Compression::default());
            std::io::copy(&mut reader, &mut encoder)?;
            encoder.finish()?.flush()?;
            fs::rename(&temp_gz_path, &gz_path)
        })();

        if let Err(e) = result {
            let _ = fs::remove_file(&temp_gz_path);
            return Err(LoggerError::io_operation(
                "compress log file",
                format!("Failed to compress '{}'", path.display()),
                e,
            ));
        }

        if let Err(e) = fs::remove_file(path) {
            eprintln!(
                "[WARN] Compression succeeded but failed to remove original file {}: {}",
                path.display(),
                e
            );
        }
        Ok(())
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }
}

impl Appender for RotatingFileAppender {
    fn append(&mut self, _entry: &LogEntry, formatted: &str) -> Result<()> {
        if self.should_rotate() {
            if let Err(e) = self.rotate() {
                // Keep logging into whatever file we can open
                eprintln!("[WARN] Log rotation failed: {}. Continuing with current file.", e);
                if self.writer.is_none() {
                    let (file, size) = Self::open(&self.base_path)?;
                    self.writer = Some(BufWriter::new(file));
                    self.current_size = size;
                }
            }
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("Rotating file writer not initialized"))?;
        writer.write_all(formatted.as_bytes())?;
        writer.write_all(b"\n")?;
        self.current_size += formatted.len() as u64 + 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "rotating_file"
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl Buildable for RotatingFileAppender {
    fn parameters() -> Vec<Param> {
        let defaults = RotationPolicy::default();
        vec![
            Param::required("path"),
            Param::optional("max_bytes", json!(defaults.max_bytes)),
            Param::optional("max_files", json!(defaults.max_backup_files)),
            Param::optional("compress", json!(defaults.compress)),
        ]
    }

    fn build(args: &Arguments) -> Result<Self> {
        let path = args.string("path")?;
        let policy = RotationPolicy::new()
            .with_max_size(args.unsigned("max_bytes")?)
            .with_max_backups(usize::try_from(args.unsigned("max_files")?).unwrap_or(usize::MAX))
            .with_compression(args.boolean("compress")?);

        Self::with_policy(&path, policy)
            .map_err(|e| args.failure(format!("cannot open '{}': {}", path, e)))
    }
}
