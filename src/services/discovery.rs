//! Discovery engine: latest listings, genre filtering, title search with
//! actor-based suggestions, and favorite management.
//!
//! Read-path listings can enrich each hit with a live detail fetch
//! (fresh, one upstream call per result) or serve the stored snapshot,
//! depending on the configured [`EnrichmentMode`].

use std::sync::Arc;

use crate::{
    config::EnrichmentMode,
    db::GraphStore,
    error::{AppError, AppResult},
    models::{MovieProjection, SearchMoviesResponse, StoredMovie},
    services::providers::MetadataSource,
};

/// Listing and search results are capped at this many rows
const RESULT_LIMIT: i64 = 30;

/// How many credited actors per matched movie seed the suggestion hop
const ACTORS_PER_MATCH: i64 = 2;

pub struct DiscoveryService {
    source: Arc<dyn MetadataSource>,
    store: Arc<dyn GraphStore>,
    enrichment: EnrichmentMode,
}

impl DiscoveryService {
    pub fn new(
        source: Arc<dyn MetadataSource>,
        store: Arc<dyn GraphStore>,
        enrichment: EnrichmentMode,
    ) -> Self {
        Self {
            source,
            store,
            enrichment,
        }
    }

    /// The now-playing window, enriched per item from the live catalog.
    /// Items whose detail fetch fails are dropped, not fatal.
    pub async fn latest_movies(&self) -> AppResult<Vec<MovieProjection>> {
        let summaries = self.source.now_playing_movies().await?;

        let mut movies = Vec::with_capacity(summaries.len());
        for summary in summaries {
            match self.source.movie_detail(summary.id).await {
                Ok(detail) => movies.push(MovieProjection::from_detail(&detail)),
                Err(e) => {
                    tracing::warn!(
                        movie_id = summary.id,
                        error = %e,
                        "Detail fetch failed, dropping from latest listing"
                    );
                }
            }
        }

        Ok(movies)
    }

    /// Movies linked to the named genre. An unknown genre yields an empty
    /// list, never an error.
    pub async fn movies_by_genre(&self, genre: &str) -> AppResult<Vec<MovieProjection>> {
        let stored = self.store.movies_by_genre(genre, RESULT_LIMIT).await?;

        Ok(self.enrich(stored).await)
    }

    /// Case-insensitive title search over the stored catalog, plus the
    /// two-hop suggestion set: the two alphabetically-first credited
    /// actors of every match, then other movies those actors appear in.
    pub async fn search_movies(&self, name: &str) -> AppResult<SearchMoviesResponse> {
        let matches = self.store.movies_by_title(name, RESULT_LIMIT).await?;

        if matches.is_empty() {
            return Ok(SearchMoviesResponse {
                movies: vec![],
                actor_movies: vec![],
            });
        }

        let matched_ids: Vec<i64> = matches.iter().map(|m| m.id).collect();

        let actors = self
            .store
            .top_billed_actors(&matched_ids, ACTORS_PER_MATCH)
            .await?;

        let suggestions = if actors.is_empty() {
            vec![]
        } else {
            self.store
                .movies_by_actors(&actors, &matched_ids, RESULT_LIMIT)
                .await?
        };

        tracing::debug!(
            matches = matches.len(),
            seed_actors = actors.len(),
            suggestions = suggestions.len(),
            "Title search completed"
        );

        Ok(SearchMoviesResponse {
            movies: matches.iter().map(MovieProjection::from_snapshot).collect(),
            actor_movies: suggestions
                .iter()
                .map(MovieProjection::from_snapshot)
                .collect(),
        })
    }

    /// Adds the FAVORITES edge. Re-adding is a no-op; an unknown user or
    /// movie is a not-found error.
    pub async fn add_favorite(&self, username: &str, movie_id: i64) -> AppResult<()> {
        if self.store.add_favorite(username, movie_id).await? {
            Ok(())
        } else {
            Err(not_found(username, movie_id))
        }
    }

    /// Removes the FAVORITES edge. Removing a non-favorite is a no-op; an
    /// unknown user or movie is a not-found error.
    pub async fn remove_favorite(&self, username: &str, movie_id: i64) -> AppResult<()> {
        if self.store.remove_favorite(username, movie_id).await? {
            Ok(())
        } else {
            Err(not_found(username, movie_id))
        }
    }

    /// Whether the movie is among the user's favorites. "Not a favorite"
    /// is a plain false.
    pub async fn is_favorite(&self, username: &str, movie_id: i64) -> AppResult<bool> {
        self.store.is_favorite(username, movie_id).await
    }

    /// The user's favorites, enriched the same way as the genre listing
    pub async fn favorites(&self, username: &str) -> AppResult<Vec<MovieProjection>> {
        let stored = self.store.favorites(username).await?;

        Ok(self.enrich(stored).await)
    }

    /// Projects stored snapshots, re-fetching live detail per item in
    /// `Live` mode. A failed live fetch falls back to the snapshot rather
    /// than dropping the item.
    async fn enrich(&self, stored: Vec<StoredMovie>) -> Vec<MovieProjection> {
        let mut movies = Vec::with_capacity(stored.len());

        for movie in &stored {
            let projection = match self.enrichment {
                EnrichmentMode::Snapshot => MovieProjection::from_snapshot(movie),
                EnrichmentMode::Live => match self.source.movie_detail(movie.id).await {
                    Ok(detail) => MovieProjection::from_detail(&detail),
                    Err(e) => {
                        tracing::warn!(
                            movie_id = movie.id,
                            error = %e,
                            "Live enrichment failed, serving stored snapshot"
                        );
                        MovieProjection::from_snapshot(movie)
                    }
                },
            };
            movies.push(projection);
        }

        movies
    }
}

fn not_found(username: &str, movie_id: i64) -> AppError {
    AppError::NotFound(format!("user {username} or movie {movie_id} not found"))
}
