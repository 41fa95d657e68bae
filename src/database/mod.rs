//! Preference storage.
//!
//! Provides SQLite connection management, schema migrations, and the
//! key-value [`PreferenceStore`] the settings engine persists through.
//!
//! # Usage
//!
//! ```no_run
//! use tabdedup::database::Database;
//!
//! // Open a persistent database
//! let db = Database::open("tabdedup.db").expect("failed to open database");
//!
//! // Or use an in-memory database for testing
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//! ```

pub mod connection;
pub mod migrations;
pub mod preferences;

pub use connection::Database;
pub use preferences::{MemoryPreferenceStore, PreferenceStore, SqlitePreferenceStore};
