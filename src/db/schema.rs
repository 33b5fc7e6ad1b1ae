use crate::db::*;
use crate::error::{AppError, Result};
use crate::sort::{BOOK_SORT, COVER_SORT, SortKey};
use rusqlite::{OptionalExtension, Row, params};
use std::path::Path;

/// Database handle backed by a connection pool.
#[derive(Clone)]
pub struct Database {
    pool: ConnectionPool,
}

impl Database {
    /// Open or create database at the given path.
    pub fn open(path: &Path, pool_size: usize) -> Result<Self> {
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Self {
            pool: pool::open(path, pool_size)?,
        };

        db.initialize_schema()?;
        Ok(db)
    }

    /// Open in-memory database (for testing).
    pub fn open_memory() -> Result<Self> {
        let db = Self {
            pool: pool::open_memory()?,
        };

        db.initialize_schema()?;
        Ok(db)
    }

    /// Number of pooled connections.
    pub fn pool_size(&self) -> usize {
        self.pool.max_size() as usize
    }

    /// Borrow a connection, waiting for the first one released if all are busy.
    pub(crate) fn connection(&self) -> Result<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))
    }

    /// Initialize database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection()?;

        conn.execute_batch(
            r#"
            -- Cover catalogue (read-only over HTTP)
            CREATE TABLE IF NOT EXISTS cover (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                image_url TEXT,
                rating REAL
            );

            -- One note per cover
            CREATE TABLE IF NOT EXISTS note (
                id INTEGER PRIMARY KEY,
                cover_id INTEGER NOT NULL UNIQUE,
                note TEXT NOT NULL,
                FOREIGN KEY (cover_id) REFERENCES cover(id) ON DELETE CASCADE
            );

            -- User library
            CREATE TABLE IF NOT EXISTS new_book (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                rating INTEGER NOT NULL CHECK (typeof(rating) = 'integer'),
                note TEXT NOT NULL,
                image_url TEXT
            );
            "#,
        )
        .map_err(|e| AppError::Database(format!("Failed to initialize schema: {}", e)))?;

        Ok(())
    }

    // ========== COVER OPERATIONS ==========

    /// List all covers with their notes.
    pub fn list_covers(&self, sort: Option<SortKey>) -> Result<Vec<Cover>> {
        let sql = format!(
            "SELECT c.id, c.title, c.author, c.image_url, c.rating, n.note
             FROM cover c
             LEFT JOIN note n ON c.id = n.cover_id
             {}",
            COVER_SORT.clause(sort)
        );

        let conn = self.connection()?;
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| AppError::Database(format!("Failed to prepare query: {}", e)))?;

        let covers = stmt
            .query_map([], |row| {
                Ok(Cover {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    author: row.get(2)?,
                    image_url: row.get(3)?,
                    rating: row.get(4)?,
                    note: row.get(5)?,
                })
            })
            .map_err(|e| AppError::Database(format!("Failed to list covers: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| AppError::Database(format!("Failed to collect covers: {}", e)))?;

        Ok(covers)
    }

    /// Add a cover.
    pub fn create_cover(&self, cover: &NewCover) -> Result<i64> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO cover (title, author, image_url, rating) VALUES (?1, ?2, ?3, ?4)",
            params![cover.title, cover.author, cover.image_url, cover.rating],
        )
        .map_err(|e| AppError::Database(format!("Failed to create cover: {}", e)))?;
        Ok(conn.last_insert_rowid())
    }

    /// Attach a note to a cover, replacing any existing one.
    pub fn set_cover_note(&self, cover_id: i64, note: &str) -> Result<()> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO note (cover_id, note) VALUES (?1, ?2)
             ON CONFLICT(cover_id) DO UPDATE SET note = excluded.note",
            params![cover_id, note],
        )
        .map_err(|e| {
            if e.to_string().contains("FOREIGN KEY constraint") {
                AppError::NotFound(format!("Cover {}", cover_id))
            } else {
                AppError::Database(format!("Failed to save note: {}", e))
            }
        })?;
        Ok(())
    }

    // ========== BOOK OPERATIONS ==========

    /// List all books.
    pub fn list_books(&self, sort: Option<SortKey>) -> Result<Vec<Book>> {
        let sql = format!(
            "SELECT id, title, author, rating, note, image_url FROM new_book {}",
            BOOK_SORT.clause(sort)
        );

        let conn = self.connection()?;
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| AppError::Database(format!("Failed to prepare query: {}", e)))?;

        let books = stmt
            .query_map([], row_to_book)
            .map_err(|e| AppError::Database(format!("Failed to list books: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| AppError::Database(format!("Failed to collect books: {}", e)))?;

        Ok(books)
    }

    /// Get book by ID.
    pub fn get_book(&self, id: i64) -> Result<Option<Book>> {
        let conn = self.connection()?;
        conn.query_row(
            "SELECT id, title, author, rating, note, image_url FROM new_book WHERE id = ?1",
            params![id],
            row_to_book,
        )
        .optional()
        .map_err(|e| AppError::Database(format!("Failed to get book: {}", e)))
    }

    /// Insert a book and return its ID.
    pub fn create_book(&self, input: &BookInput) -> Result<i64> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO new_book (title, author, rating, note, image_url)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                input.title,
                input.author,
                input.rating,
                input.note,
                input.image_url(),
            ],
        )
        .map_err(|e| AppError::Database(format!("Failed to create book: {}", e)))?;
        Ok(conn.last_insert_rowid())
    }

    /// Overwrite every editable field of a book. Returns false if no row matched.
    pub fn update_book(&self, id: i64, input: &BookInput) -> Result<bool> {
        let conn = self.connection()?;
        let rows = conn
            .execute(
                "UPDATE new_book SET title = ?1, author = ?2, rating = ?3, note = ?4, image_url = ?5
                 WHERE id = ?6",
                params![
                    input.title,
                    input.author,
                    input.rating,
                    input.note,
                    input.image_url(),
                    id,
                ],
            )
            .map_err(|e| AppError::Database(format!("Failed to update book: {}", e)))?;
        Ok(rows > 0)
    }

    /// Delete book. Returns false if no row matched.
    pub fn delete_book(&self, id: i64) -> Result<bool> {
        let conn = self.connection()?;
        let rows = conn
            .execute("DELETE FROM new_book WHERE id = ?1", params![id])
            .map_err(|e| AppError::Database(format!("Failed to delete book: {}", e)))?;
        Ok(rows > 0)
    }
}

fn row_to_book(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        rating: row.get(3)?,
        note: row.get(4)?,
        image_url: row.get(5)?,
    })
}
