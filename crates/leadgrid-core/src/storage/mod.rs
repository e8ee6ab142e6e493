//! Storage: the CSV codec, key-value persistence, and the JSON snapshots
//! kept in it.

mod csv;
mod snapshot;
mod store;

pub use self::csv::{export_filename, parse_csv, selected_export_filename, write_csv};
pub use snapshot::{StorageKeys, load_workbook, read_json, read_json_or_discard, save_workbook};
pub use store::{FileStore, KeyValueStore, MemoryStore};
