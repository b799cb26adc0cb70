mod error;
mod handlers;
mod middleware;
mod validation;
pub mod views;

pub use error::ApiError;

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::session::SessionStore;

/// Shared state handed to the session middleware.
#[derive(Clone)]
pub struct AppState {
    pub store: SessionStore,
    pub config: Arc<ServerConfig>,
}

pub fn create_router(store: SessionStore, config: ServerConfig) -> Router {
    let public_dir = config.public_dir.clone();
    let state = AppState {
        store,
        config: Arc::new(config),
    };

    let pages = Router::new()
        .route("/", get(handlers::index))
        // Todo lists
        .route("/lists", get(handlers::list_todo_lists))
        .route("/lists", post(handlers::create_todo_list))
        .route("/lists/new", get(handlers::new_todo_list))
        .route("/lists/{id}", get(handlers::get_todo_list))
        .route("/lists/{id}/edit", get(handlers::edit_todo_list))
        .route("/lists/{id}/edit", post(handlers::update_todo_list))
        .route("/lists/{id}/destroy", post(handlers::delete_todo_list))
        .route("/lists/{id}/complete_all", post(handlers::complete_all_todos))
        // Todos
        .route("/lists/{id}/todos", post(handlers::create_todo))
        .route("/lists/{id}/todos/{todo_id}/toggle", post(handlers::toggle_todo))
        .route("/lists/{id}/todos/{todo_id}/destroy", post(handlers::delete_todo))
        .layer(from_fn_with_state(state, middleware::session_middleware));

    Router::new()
        .merge(pages)
        .route("/health", get(handlers::health))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
}
