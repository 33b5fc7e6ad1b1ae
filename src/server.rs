//! HTTP server and routes.

mod handlers;
mod state;

pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let static_routes = Router::new()
        .route("/app.js", get(handlers::script))
        .route("/style.css", get(handlers::stylesheet));

    Router::new()
        .route("/", get(handlers::covers))
        .route("/book", get(handlers::books))
        .route("/new", get(handlers::new_book_form).post(handlers::create_book))
        .route(
            "/edit/{id}",
            get(handlers::edit_book_form).post(handlers::update_book),
        )
        .route("/delete/{id}", post(handlers::delete_book))
        .nest("/static", static_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
