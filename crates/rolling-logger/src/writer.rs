//! Rolling File Writer
//!
//! Writes log records to `<prefix>.log`. When the file would grow past the
//! size limit it is shifted to `<prefix>.1.log`, older files move up by one
//! and anything past `max_files` is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use crate::ring::RecentLines;

pub(crate) struct RollingFile {
    dir: PathBuf,
    prefix: String,
    max_files: usize,
    max_file_size: u64,
    file: File,
    size: u64,
}

impl RollingFile {
    pub(crate) fn open(dir: &Path, prefix: &str, max_files: usize, max_file_size: u64) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = file_path(dir, prefix, 0);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let size = file.metadata()?.len();
        Ok(Self {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
            max_files: max_files.max(1),
            max_file_size,
            file,
            size,
        })
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let oldest = file_path(&self.dir, &self.prefix, self.max_files - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (0..self.max_files - 1).rev() {
            let from = file_path(&self.dir, &self.prefix, index);
            if from.exists() {
                fs::rename(&from, file_path(&self.dir, &self.prefix, index + 1))?;
            }
        }

        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(file_path(&self.dir, &self.prefix, 0))?;
        self.size = 0;
        Ok(())
    }

    pub(crate) fn write_record(&mut self, record: &[u8]) -> io::Result<()> {
        if self.size > 0 && self.size + record.len() as u64 > self.max_file_size {
            self.rotate()?;
        }
        self.file.write_all(record)?;
        self.size += record.len() as u64;
        Ok(())
    }
}

/// `<prefix>.log` for the live file, `<prefix>.<n>.log` for rotated ones
pub(crate) fn file_path(dir: &Path, prefix: &str, index: usize) -> PathBuf {
    if index == 0 {
        dir.join(format!("{}.log", prefix))
    } else {
        dir.join(format!("{}.{}.log", prefix, index))
    }
}

/// `MakeWriter` handing every record to the rolling file and the in-memory ring
#[derive(Clone)]
pub struct RollingWriter {
    file: Arc<Mutex<RollingFile>>,
    recent: RecentLines,
}

impl RollingWriter {
    pub(crate) fn new(file: RollingFile, recent: RecentLines) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
            recent,
        }
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.recent.push(&String::from_utf8_lossy(buf));
        let mut file = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        file.write_record(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        file.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_keeps_bounded_file_count() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "foyer", 3, 32).unwrap();

        for i in 0..10 {
            file.write_record(format!("record number {:02}\n", i).as_bytes()).unwrap();
        }

        assert!(file_path(dir.path(), "foyer", 0).exists());
        assert!(file_path(dir.path(), "foyer", 1).exists());
        assert!(file_path(dir.path(), "foyer", 2).exists());
        assert!(!file_path(dir.path(), "foyer", 3).exists());

        let live = fs::read_to_string(file_path(dir.path(), "foyer", 0)).unwrap();
        assert!(live.ends_with("record number 09\n"));
        let previous = fs::read_to_string(file_path(dir.path(), "foyer", 1)).unwrap();
        assert_eq!(previous, "record number 08\n");
        let oldest = fs::read_to_string(file_path(dir.path(), "foyer", 2)).unwrap();
        assert_eq!(oldest, "record number 07\n");
    }

    #[test]
    fn test_oversized_record_is_written_whole() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "foyer", 2, 4).unwrap();

        file.write_record(b"a record larger than the limit\n").unwrap();

        let live = fs::read_to_string(file_path(dir.path(), "foyer", 0)).unwrap();
        assert_eq!(live, "a record larger than the limit\n");
    }

    #[test]
    fn test_reopen_appends() {
        let dir = tempfile::tempdir().unwrap();
        RollingFile::open(dir.path(), "foyer", 2, 1024).unwrap().write_record(b"first\n").unwrap();
        RollingFile::open(dir.path(), "foyer", 2, 1024).unwrap().write_record(b"second\n").unwrap();

        let live = fs::read_to_string(file_path(dir.path(), "foyer", 0)).unwrap();
        assert_eq!(live, "first\nsecond\n");
    }
}
