//! bookshelf: a small server-rendered catalogue for books and covers.
//!
//! The server lists a read-only cover catalogue and a user library of books
//! that can be created, edited and deleted through HTML forms. Data lives in
//! SQLite behind a small connection pool.
//!
//! # Features
//!
//! - Cover catalogue with optional notes
//! - Book library with create, edit and delete forms
//! - Sorting by title, author or rating
//! - Light/dark theme, search filter and star rating in the browser

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Configuration and CLI.
pub mod config;
/// Database operations.
pub mod db;
/// Error types.
pub mod error;
/// HTTP server.
pub mod server;
/// Sort-order policy.
pub mod sort;
/// HTML rendering.
pub mod views;


pub use config::{Cli, Command, Config};
pub use db::Database;
pub use error::{AppError, Result};
pub use server::AppState;
