//! Czytelnia document store.
//!
//! Imported stories live in a single SQLite table indexed by sequence number.
//!
//! # Usage
//!
//! ```no_run
//! use czytelnia::database::Database;
//!
//! let db = Database::open("czytelnia.db").expect("failed to open database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
