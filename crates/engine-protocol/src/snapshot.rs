// crates/engine-protocol/src/snapshot.rs

//! Book snapshot files.
//!
//! A snapshot is the [`record_codec`](crate::record_codec) rendering of
//! the whole book, written to `OrderBook-YYYYMMDDTHHMM.txt` (local time,
//! minute granularity) inside a target directory. Saving twice in the
//! same minute overwrites the earlier file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use engine_core::OrderBook;
use thiserror::Error;

use crate::record_codec::format_book;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to write snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `OrderBook-YYYYMMDDTHHMM.txt` for the given local time.
pub fn snapshot_file_name(at: &DateTime<Local>) -> String {
    format!("OrderBook-{}.txt", at.format("%Y%m%dT%H%M"))
}

/// Write a snapshot of `book` into `dir`, named after the current time.
pub fn write_snapshot(book: &OrderBook, dir: &Path) -> Result<PathBuf, SnapshotError> {
    write_snapshot_at(book, dir, &Local::now())
}

/// Write a snapshot of `book` into `dir`, named after `at`.
///
/// Returns the path written.
pub fn write_snapshot_at(
    book: &OrderBook,
    dir: &Path,
    at: &DateTime<Local>,
) -> Result<PathBuf, SnapshotError> {
    let path = dir.join(snapshot_file_name(at));

    let io_err = |source| SnapshotError::Io {
        path: path.clone(),
        source,
    };

    let file = File::create(&path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(format_book(book).as_bytes()).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    Ok(path)
}
