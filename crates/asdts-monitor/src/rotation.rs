//! Size-based log file rotation.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Append-only file writer that rolls over once the file would exceed a
/// size limit.
///
/// On rollover `app.log` becomes `app.log.1`, `app.log.1` becomes
/// `app.log.2` and so on up to `backup_count`; the oldest backup is
/// dropped. Rotation is disabled when either the size limit or
/// `backup_count` is zero or negative, in which case the file grows
/// unbounded.
#[derive(Debug)]
pub struct RotatingFileWriter {
    path: PathBuf,
    max_bytes: u64,
    backup_count: u32,
    file: File,
    written: u64,
}

impl RotatingFileWriter {
    /// Open `path` for appending, rotating at `max_size_mb` megabytes.
    pub fn open(path: impl AsRef<Path>, max_size_mb: i64, backup_count: i64) -> io::Result<Self> {
        let max_bytes = u64::try_from(max_size_mb)
            .unwrap_or(0)
            .saturating_mul(BYTES_PER_MB);
        let backup_count = u32::try_from(backup_count.max(0)).unwrap_or(u32::MAX);
        Self::with_max_bytes(path, max_bytes, backup_count)
    }

    /// Open `path` for appending, rotating at `max_bytes` bytes.
    pub fn with_max_bytes(
        path: impl AsRef<Path>,
        max_bytes: u64,
        backup_count: u32,
    ) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = open_append(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            path,
            max_bytes,
            backup_count,
            file,
            written,
        })
    }

    fn rotation_enabled(&self) -> bool {
        self.max_bytes > 0 && self.backup_count > 0
    }

    fn backup_path(&self, index: u32) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let oldest = self.backup_path(self.backup_count);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.backup_count).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))?;

        self.file = open_append(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.rotation_enabled()
            && self.written > 0
            && self.written + buf.len() as u64 > self.max_bytes
        {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
