//! HTML pages.
//!
//! Pages are plain strings built with `format!`. Every value that comes from
//! the database or the request goes through [`esc`] first.

use crate::db::{Book, Cover};
use crate::sort::SortKey;
use quick_xml::escape::escape;
use std::borrow::Cow;

/// Page identifier used to highlight the navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Cover catalogue (`/`).
    Home,
    /// User library (`/book`).
    Library,
    /// New book form (`/new`).
    New,
    /// Edit form (`/edit/{id}`).
    Edit,
}

const NAV: [(Page, &str, &str); 3] = [
    (Page::Home, "/", "Home"),
    (Page::Library, "/book", "My Library"),
    (Page::New, "/new", "Add Book"),
];

fn esc(s: &str) -> Cow<'_, str> {
    escape(s)
}

fn layout(site: &str, heading: &str, page: Page, body: &str) -> String {
    let nav: String = NAV
        .iter()
        .map(|(p, href, label)| {
            let class = if *p == page { "nav-link active" } else { "nav-link" };
            format!(r#"<a class="{class}" href="{href}">{label}</a>"#)
        })
        .collect();
    let fab_links: String = NAV
        .iter()
        .map(|(_, href, label)| {
            format!("\n            <a class=\"fab-item\" href=\"{href}\">{label}</a>")
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en" data-theme="light">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{heading} - {site}</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <header class="site-header">
        <a class="brand" href="/">{site}</a>
        <nav>{nav}</nav>
        <button id="themeToggle" class="theme-toggle" type="button" aria-label="Toggle theme">&#9680;</button>
    </header>
    <main>
        <h1>{heading}</h1>
{body}
    </main>
    <div class="fab-container">
        <div id="fabMenu" class="fab-menu">{fab_links}
            <button id="fabThemeToggle" class="fab-item" type="button">Toggle theme</button>
        </div>
        <button id="fabButton" class="fab" type="button" aria-label="Menu" aria-expanded="false">+</button>
    </div>
    <script src="/static/app.js"></script>
</body>
</html>"#,
        site = esc(site),
        heading = esc(heading),
    )
}

/// Star string for a rating, clamped to five.
fn stars(rating: f64) -> String {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "\u{2605}".repeat(filled), "\u{2606}".repeat(5 - filled))
}

fn sort_chips(base: &str, active: Option<SortKey>) -> String {
    let default_class = if active.is_none() {
        "chip-btn active"
    } else {
        "chip-btn"
    };
    let mut chips = format!(r#"<a class="{default_class}" href="{base}">Default</a>"#);

    for key in SortKey::ALL {
        let class = if active == Some(key) {
            "chip-btn active"
        } else {
            "chip-btn"
        };
        chips.push_str(&format!(
            r#"<a class="{class}" href="{base}?sort={value}">{label}</a>"#,
            value = key.as_str(),
            label = key.label(),
        ));
    }

    format!(
        r#"        <div class="toolbar">
            <input id="searchInput" type="search" placeholder="Search by title or author">
            <div class="sort-chips">{chips}</div>
        </div>
"#
    )
}

fn cover_image(url: Option<&str>, title: &str) -> String {
    match url {
        Some(url) => format!(
            r#"<img class="cover-img" src="{}" alt="{}" loading="lazy">"#,
            esc(url),
            esc(title)
        ),
        None => r#"<div class="cover-img placeholder"></div>"#.to_string(),
    }
}

fn note_block(note: &str) -> String {
    if note.is_empty() {
        return String::new();
    }
    format!(
        r#"<div class="note"><p class="note-content">{}</p><button class="read-more-btn" type="button">Read more</button></div>"#,
        esc(note)
    )
}

/// Cover catalogue page.
pub fn covers_page(site: &str, covers: &[Cover], sort: Option<SortKey>) -> String {
    let mut body = sort_chips("/", sort);
    body.push_str(r#"        <div class="card-grid">"#);

    for cover in covers {
        body.push_str(&format!(
            r#"
            <div class="card-container">
                <div class="card-front">
                    {image}
                    <h3 class="title">{title}</h3>
                    <p class="author">{author}</p>
                    <div class="stars">{stars}</div>
                    {note}
                </div>
            </div>"#,
            image = cover_image(cover.image_url.as_deref(), &cover.title),
            title = esc(&cover.title),
            author = esc(&cover.author),
            stars = cover.rating.map(stars).unwrap_or_default(),
            note = cover.note.as_deref().map(note_block).unwrap_or_default(),
        ));
    }

    body.push_str("\n        </div>");
    layout(site, "Book Covers", Page::Home, &body)
}

/// User library page.
pub fn books_page(site: &str, books: &[Book], sort: Option<SortKey>) -> String {
    let mut body = sort_chips("/book", sort);

    if books.is_empty() {
        body.push_str(
            r#"        <p class="empty-state">Your library is empty. <a href="/new">Add your first book</a>.</p>"#,
        );
        return layout(site, "My Library", Page::Library, &body);
    }

    body.push_str(r#"        <div class="card-grid">"#);
    for book in books {
        body.push_str(&format!(
            r#"
            <div class="card-container">
                <div class="card-front">
                    {image}
                    <h3 class="title">{title}</h3>
                    <p class="author">{author}</p>
                    <div class="stars">{stars}</div>
                    {note}
                    <div class="card-actions">
                        <a class="btn-secondary" href="/edit/{id}">Edit</a>
                        <form method="post" action="/delete/{id}">
                            <button class="btn-primary" type="submit">Delete</button>
                        </form>
                    </div>
                </div>
            </div>"#,
            id = book.id,
            image = cover_image(book.image_url.as_deref(), &book.title),
            title = esc(&book.title),
            author = esc(&book.author),
            stars = stars(book.rating as f64),
            note = note_block(&book.note),
        ));
    }
    body.push_str("\n        </div>");

    layout(site, "My Library", Page::Library, &body)
}

fn book_form(action: &str, submit: &str, book: Option<&Book>) -> String {
    let title = book.map(|b| esc(&b.title)).unwrap_or_default();
    let author = book.map(|b| esc(&b.author)).unwrap_or_default();
    let note = book.map(|b| esc(&b.note)).unwrap_or_default();
    let image_url = book
        .and_then(|b| b.image_url.as_deref())
        .map(esc)
        .unwrap_or_default();
    let rating = book.map(|b| b.rating.to_string()).unwrap_or_default();

    let star_spans: String = (1..=5)
        .map(|v| format!(r#"<span class="star-rating-star" data-value="{v}">&#9733;</span>"#))
        .collect();

    format!(
        r#"        <form class="book-form" method="post" action="{action}">
            <label>Title <input type="text" name="title" value="{title}" required></label>
            <label>Author <input type="text" name="author" value="{author}" required></label>
            <div class="star-rating-container">
                {star_spans}
                <input type="hidden" name="rating" value="{rating}">
            </div>
            <label>Note <textarea name="note" rows="5">{note}</textarea></label>
            <label>Image URL <input type="url" name="img_url" value="{image_url}"></label>
            <button class="btn-primary" type="submit">{submit}</button>
            <a class="btn-secondary" href="/book">Cancel</a>
        </form>"#
    )
}

/// Create form.
pub fn new_book_page(site: &str) -> String {
    layout(site, "Add a Book", Page::New, &book_form("/new", "Save", None))
}

/// Edit form pre-filled with the book's current values.
pub fn edit_book_page(site: &str, book: &Book) -> String {
    let action = format!("/edit/{}", book.id);
    layout(
        site,
        "Edit Book",
        Page::Edit,
        &book_form(&action, "Update", Some(book)),
    )
}
