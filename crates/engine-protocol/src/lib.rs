//! engine-protocol
//!
//! Text encodings of the order book.
//!
//! - [`record_codec`] : one pipe-delimited line per entry
//! - [`snapshot`]     : timestamped snapshot files built from those lines
//!
//! Snapshots are write-only; there is no import path.

pub mod record_codec;
pub mod snapshot;

pub use record_codec::{format_book, format_record};
pub use snapshot::{snapshot_file_name, write_snapshot, write_snapshot_at, SnapshotError};
