//! Music Library Server
//!
//! Library half of the server binary, exposed for end-to-end tests.

pub mod auth;
pub mod config;
pub mod error;
pub mod library;
pub mod logging;
pub mod server;
pub mod services;
pub mod sqlite_persistence;
pub mod user;
pub mod validation;

pub use library::{LibraryStore, MemoryLibraryStore, SqliteLibraryStore};
pub use server::{run_server, RequestsLoggingLevel};
pub use user::{MemoryUserStore, SqliteUserStore, UserStore};
