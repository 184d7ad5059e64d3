//! jotter-server: HTTP server for the jotter note board
//!
//! Serves server-rendered HTML pages for adding, listing, filtering,
//! editing, and deleting note entries backed by a SQLite database file.

pub mod db;
pub mod error;
pub mod models;
pub mod render;
pub mod routes;
pub mod server;

pub use db::Database;
pub use error::{ServerError, ServerResult};
