//! HTTP request handlers.

use crate::db::BookInput;
use crate::error::{AppError, Result};
use crate::server::AppState;
use crate::sort::SortParams;
use crate::views;
use axum::{
    Form,
    body::Body,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};

/// Where every mutation sends the browser afterwards.
const LIBRARY_PATH: &str = "/book";

const APP_JS: &str = include_str!("../../assets/app.js");
const STYLE_CSS: &str = include_str!("../../assets/style.css");

/// Build a response, returning 500 on error (which shouldn't happen).
fn build_response(status: StatusCode, content_type: &str, body: impl Into<Body>) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(body.into())
        .unwrap_or_else(|_| {
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(Body::from("Internal error"))
                .unwrap_or_default()
        })
}

// ============================================================================
// LISTINGS
// ============================================================================

/// Cover catalogue with notes.
pub async fn covers(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Html<String>> {
    let sort = SortParams::from_pairs(pairs).key();
    let covers = state.with_db(move |db| db.list_covers(sort)).await?;

    Ok(Html(views::covers_page(state.site_title(), &covers, sort)))
}

/// User library.
pub async fn books(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Html<String>> {
    let sort = SortParams::from_pairs(pairs).key();
    let books = state.with_db(move |db| db.list_books(sort)).await?;

    Ok(Html(views::books_page(state.site_title(), &books, sort)))
}

// ============================================================================
// BOOK FORMS
// ============================================================================

/// Empty create form.
pub async fn new_book_form(State(state): State<AppState>) -> Html<String> {
    Html(views::new_book_page(state.site_title()))
}

/// Create a book from the submitted form.
pub async fn create_book(
    State(state): State<AppState>,
    Form(input): Form<BookInput>,
) -> Result<Redirect> {
    let title = input.title.clone();
    let id = state.with_db(move |db| db.create_book(&input)).await?;
    tracing::info!(id, title = %title, "Book created");

    Ok(Redirect::to(LIBRARY_PATH))
}

/// Edit form for an existing book.
pub async fn edit_book_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>> {
    let book = state
        .with_db(move |db| db.get_book(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {}", id)))?;

    Ok(Html(views::edit_book_page(state.site_title(), &book)))
}

/// Overwrite a book with the submitted form.
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(input): Form<BookInput>,
) -> Result<Redirect> {
    if state.with_db(move |db| db.update_book(id, &input)).await? {
        tracing::info!(id, "Book updated");
    } else {
        tracing::debug!(id, "Update matched no book");
    }

    Ok(Redirect::to(LIBRARY_PATH))
}

/// Delete a book.
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    if state.with_db(move |db| db.delete_book(id)).await? {
        tracing::info!(id, "Book deleted");
    } else {
        tracing::debug!(id, "Delete matched no book");
    }

    Ok(Redirect::to(LIBRARY_PATH))
}

// ============================================================================
// STATIC ASSETS
// ============================================================================

/// Client script.
pub async fn script() -> impl IntoResponse {
    build_response(StatusCode::OK, "text/javascript; charset=utf-8", APP_JS)
}

/// Stylesheet.
pub async fn stylesheet() -> impl IntoResponse {
    build_response(StatusCode::OK, "text/css; charset=utf-8", STYLE_CSS)
}
