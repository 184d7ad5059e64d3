//! Route handlers for the jotter HTTP surface
//!
//! Organized by concern:
//! - entries: list/add/delete/edit/update pages and form posts
//! - health: health check endpoint

pub mod entries;
pub mod health;

pub use entries::*;
pub use health::*;
