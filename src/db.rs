mod pool;
mod schema;

pub use pool::{ConnectionPool, PooledConnection, SqliteConnectionManager};
pub use schema::Database;

use serde::Deserialize;

/// Cover record joined with its optional note.
#[derive(Debug, Clone, PartialEq)]
pub struct Cover {
    /// Cover ID.
    pub id: i64,
    /// Book title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Cover image URL.
    pub image_url: Option<String>,
    /// Rating, usually 1 to 5.
    pub rating: Option<f64>,
    /// Attached note, absent when no `note` row exists.
    pub note: Option<String>,
}

/// New cover, written by the seeding CLI only.
#[derive(Debug, Clone)]
pub struct NewCover {
    /// Book title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Cover image URL.
    pub image_url: Option<String>,
    /// Rating.
    pub rating: Option<f64>,
}

/// User library entry (`new_book` table).
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    /// Auto-assigned ID.
    pub id: i64,
    /// Book title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Rating.
    pub rating: i64,
    /// Free-text note.
    pub note: String,
    /// Cover image URL.
    pub image_url: Option<String>,
}

/// Fields submitted by the new and edit forms.
///
/// Values are kept as the browser sent them. `rating` is bound as text and
/// the column's integer check decides whether it is acceptable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookInput {
    /// Book title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Rating as submitted.
    pub rating: String,
    /// Free-text note.
    #[serde(default)]
    pub note: String,
    /// Cover image URL.
    #[serde(default, rename = "img_url", alias = "image_url")]
    pub image_url: Option<String>,
}

impl BookInput {
    /// Image URL with an empty submission treated as absent.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.is_empty())
    }
}
