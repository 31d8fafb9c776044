//! Incremental tail of the server log file.

use crate::WatchError;

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use log::{debug, info};

/// Lines appended since the previous poll.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LogBatch {
    pub lines: Vec<String>,
    /// The file shrank below the stored offset and was re-read from the start
    pub rotated: bool,
}

/// Reads complete lines appended to a file since the last poll.
///
/// The first successful open starts at end-of-file so history is not
/// replayed. If the file was missing when the watcher first looked, the
/// file that later appears is new and is read from its beginning.
#[derive(Debug)]
pub struct LogWatcher {
    path: PathBuf,
    offset: Option<u64>,
    /// Bytes after the last newline; decoded once the line is complete
    pending: Vec<u8>,
    seen_missing: bool,
}

impl LogWatcher {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            offset: None,
            pending: Vec::new(),
            seen_missing: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current read position, `None` before the first successful open.
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// Pull newly appended lines. A trailing line without its newline stays
    /// buffered until the rest of it arrives.
    #[track_caller]
    pub fn poll(&mut self) -> Result<LogBatch, WatchError> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) => {
                if self.offset.is_none() {
                    self.seen_missing = true;
                }
                return Err(WatchError::unavailable(&self.path, e.to_string()));
            }
        };

        let len = file
            .metadata()
            .map_err(|e| WatchError::unavailable(&self.path, e.to_string()))?
            .len();

        let mut batch = LogBatch::default();

        let start = match self.offset {
            None if self.seen_missing => 0,
            None => {
                info!(
                    "Log watcher: tailing {} from offset {}",
                    self.path.display(),
                    len
                );
                self.offset = Some(len);
                return Ok(batch);
            }
            Some(offset) if len < offset => {
                info!(
                    "Log watcher: {} shrank ({} < {}), reading from start",
                    self.path.display(),
                    len,
                    offset
                );
                self.pending.clear();
                batch.rotated = true;
                0
            }
            Some(offset) => offset,
        };

        if len == start {
            self.offset = Some(start);
            return Ok(batch);
        }

        file.seek(SeekFrom::Start(start))
            .map_err(|e| WatchError::unavailable(&self.path, e.to_string()))?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| WatchError::unavailable(&self.path, e.to_string()))?;

        self.offset = Some(start + bytes.len() as u64);
        self.pending.extend_from_slice(&bytes);

        // Everything before the last newline is complete
        if let Some(end) = self.pending.iter().rposition(|&b| b == b'\n') {
            let rest = self.pending.split_off(end + 1);
            let complete = std::mem::replace(&mut self.pending, rest);
            batch.lines = complete
                .split(|&b| b == b'\n')
                .map(|line| String::from_utf8_lossy(line).trim_end_matches('\r').to_string())
                .filter(|line| !line.is_empty())
                .collect();
        }

        debug!(
            "Log watcher: read {} line(s), offset {}",
            batch.lines.len(),
            start + bytes.len() as u64
        );

        Ok(batch)
    }
}
