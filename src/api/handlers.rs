use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    models::{
        parse_movie_id, ActorDetail, MovieProjection, MovieSummary, SearchMoviesResponse,
    },
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct GenreQuery {
    pub genre: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CatalogSearchQuery {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub username: String,
}

/// Body of the favorite/unfavorite mutations. The movie id arrives as a
/// string and is normalized to its numeric form before the graph match.
#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub username: String,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IsFavoriteResponse {
    pub is_favorite: bool,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

// Import triggers

pub async fn import_genres(State(state): State<AppState>) -> AppResult<Json<MessageResponse>> {
    state.import.import_genres().await?;
    Ok(MessageResponse::new("Genres import completed"))
}

pub async fn import_movies(State(state): State<AppState>) -> AppResult<Json<MessageResponse>> {
    state.import.import_movies(true).await?;
    Ok(MessageResponse::new("Movies import completed"))
}

pub async fn import_popular(State(state): State<AppState>) -> AppResult<Json<MessageResponse>> {
    state.import.import_movies(false).await?;
    Ok(MessageResponse::new("Popular movies import completed"))
}

pub async fn import_latest(State(state): State<AppState>) -> AppResult<Json<MessageResponse>> {
    state.import.import_latest_movies().await?;
    Ok(MessageResponse::new("Latest movies import completed"))
}

pub async fn import_actors(State(state): State<AppState>) -> AppResult<Json<MessageResponse>> {
    state.import.import_actors().await?;
    Ok(MessageResponse::new("Actors import completed"))
}

/// Genres first, then the full movie catalog
pub async fn import_all(State(state): State<AppState>) -> AppResult<Json<MessageResponse>> {
    state.import.import_genres().await?;
    state.import.import_movies(true).await?;
    Ok(MessageResponse::new("Full import completed"))
}

// Discovery queries

pub async fn latest_movies(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MovieProjection>>> {
    let movies = state.discovery.latest_movies().await?;
    Ok(Json(movies))
}

pub async fn movies_by_genre(
    State(state): State<AppState>,
    Query(params): Query<GenreQuery>,
) -> AppResult<Json<Vec<MovieProjection>>> {
    let movies = state.discovery.movies_by_genre(&params.genre).await?;
    Ok(Json(movies))
}

pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<SearchMoviesResponse>> {
    let response = state.discovery.search_movies(&params.name).await?;
    Ok(Json(response))
}

// Favorites

pub async fn add_favorite(
    State(state): State<AppState>,
    Json(request): Json<FavoriteRequest>,
) -> AppResult<Json<MessageResponse>> {
    let movie_id = parse_movie_id(&request.id)?;
    state
        .discovery
        .add_favorite(&request.username, movie_id)
        .await?;
    Ok(MessageResponse::new("Movie added to favorites"))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    Json(request): Json<FavoriteRequest>,
) -> AppResult<Json<MessageResponse>> {
    let movie_id = parse_movie_id(&request.id)?;
    state
        .discovery
        .remove_favorite(&request.username, movie_id)
        .await?;
    Ok(MessageResponse::new("Movie removed from favorites"))
}

pub async fn check_favorite(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
    Query(params): Query<UserQuery>,
) -> AppResult<Json<IsFavoriteResponse>> {
    let movie_id = parse_movie_id(&movie_id)?;
    let is_favorite = state
        .discovery
        .is_favorite(&params.username, movie_id)
        .await?;
    Ok(Json(IsFavoriteResponse { is_favorite }))
}

pub async fn favorites(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> AppResult<Json<Vec<MovieProjection>>> {
    let movies = state.discovery.favorites(&params.username).await?;
    Ok(Json(movies))
}

// Catalog passthrough

pub async fn catalog_search(
    State(state): State<AppState>,
    Query(params): Query<CatalogSearchQuery>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let movies = state.source.search_movies(&params.query).await?;
    Ok(Json(movies))
}

pub async fn catalog_popular(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let page = state.source.popular_movies(1).await?;
    Ok(Json(page.results))
}

pub async fn catalog_actor(
    State(state): State<AppState>,
    Path(actor_id): Path<i64>,
) -> AppResult<Json<ActorDetail>> {
    let detail = state.source.actor_detail(actor_id).await?;
    Ok(Json(detail))
}
