//! Embedded document storage.
//!
//! Collections of JSON documents behind an explicit connection handle.
//! Data lives in memory and, for `file://` connections, is written to one
//! file per collection, optionally sealed with AES-256-GCM.

mod error;
mod persistence;
mod store;
mod types;

pub use error::StoreError;
pub use store::{Collection, DocumentClient};
pub use types::*;
