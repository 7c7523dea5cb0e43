use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Import triggers
        .route("/import/genres", get(handlers::import_genres))
        .route("/import/movies", get(handlers::import_movies))
        .route("/import/popular", get(handlers::import_popular))
        .route("/import/latest", get(handlers::import_latest))
        .route("/import/actors", get(handlers::import_actors))
        .route("/import/all", get(handlers::import_all))
        // Discovery
        .route("/movie/latest", get(handlers::latest_movies))
        .route("/movie/by-genre", get(handlers::movies_by_genre))
        .route("/movie/search", get(handlers::search_movies))
        // Favorites
        .route("/movie/favorite", post(handlers::add_favorite))
        .route("/movie/unfavorite", post(handlers::remove_favorite))
        .route("/movie/check-favorite/:movie_id", get(handlers::check_favorite))
        .route("/movie/favorites", get(handlers::favorites))
        // Catalog passthrough
        .route("/catalog/popular", get(handlers::catalog_popular))
        .route("/catalog/search", get(handlers::catalog_search))
        .route("/catalog/actor/:actor_id", get(handlers::catalog_actor))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
