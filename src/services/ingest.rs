//! Catalog ingestion pipeline.
//!
//! Four independent, re-entrant run modes: genres only, popular batch,
//! full catalog, and the now-playing window, plus the actor sweep. Runs
//! are strictly sequential: one item's graph write completes (or is
//! skipped) before the next item's fetch begins.
//!
//! Failure policy: a failed item (one movie's detail fetch, one actor's
//! upsert) is logged and skipped, never aborting the surrounding loop. A
//! failed top-level listing fetch (genre list, a popular page) aborts the
//! run and propagates to the caller.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::{
    db::GraphStore,
    error::AppResult,
    models::{GenreRecord, MovieRecord, MovieSummary},
    services::providers::MetadataSource,
};

/// TMDB stops serving the popular listing past page 500
const MAX_CATALOG_PAGES: u32 = 500;

pub struct ImportService {
    source: Arc<dyn MetadataSource>,
    store: Arc<dyn GraphStore>,
}

impl ImportService {
    pub fn new(source: Arc<dyn MetadataSource>, store: Arc<dyn GraphStore>) -> Self {
        Self { source, store }
    }

    /// Imports the genre list. Single-genre upsert failures are skipped.
    pub async fn import_genres(&self) -> AppResult<()> {
        let genres = self.source.list_genres().await?;
        tracing::info!(count = genres.len(), "Importing genres");

        for genre in &genres {
            if let Err(e) = self.store.upsert_genre(genre).await {
                tracing::warn!(
                    genre_id = genre.id,
                    genre = %genre.name,
                    error = %e,
                    "Genre upsert failed, skipping"
                );
            }
        }

        Ok(())
    }

    /// Imports popular movies: one page, or the whole catalog when
    /// `fetch_all` is set. The full sweep consumes the listing page by
    /// page so the catalog is never held in memory at once.
    pub async fn import_movies(&self, fetch_all: bool) -> AppResult<()> {
        let genre_lookup = self.genre_lookup().await?;

        let mut imported = 0usize;
        let mut page = 1u32;
        loop {
            let listing = self.source.popular_movies(page).await?;
            imported += self
                .import_movie_batch(&listing.results, &genre_lookup)
                .await;

            if !fetch_all || page >= listing.total_pages || page >= MAX_CATALOG_PAGES {
                break;
            }
            page += 1;
        }

        tracing::info!(imported, pages = page, "Movie import run complete");

        Ok(())
    }

    /// Imports the now-playing window. An empty (or malformed, which
    /// decodes as empty) listing is a logged no-op, not an error.
    pub async fn import_latest_movies(&self) -> AppResult<()> {
        let movies = self.source.now_playing_movies().await?;

        if movies.is_empty() {
            tracing::warn!("Now-playing listing empty, nothing to import");
            return Ok(());
        }

        let genre_lookup = self.genre_lookup().await?;
        let imported = self.import_movie_batch(&movies, &genre_lookup).await;

        tracing::info!(imported, window = movies.len(), "Latest-movie import run complete");

        Ok(())
    }

    /// Sweeps the full catalog for cast members and imports each distinct
    /// actor once, linking APPEARS_IN edges to every credited movie
    /// already in the graph.
    pub async fn import_actors(&self) -> AppResult<()> {
        // Lives exactly as long as this run; one detail fetch per actor
        // no matter how many movies share them.
        let mut seen = HashSet::new();

        let mut page = 1u32;
        loop {
            let listing = self.source.popular_movies(page).await?;

            for movie in &listing.results {
                if let Err(e) = self.import_movie_cast(movie, &mut seen).await {
                    tracing::warn!(
                        movie_id = movie.id,
                        title = %movie.title,
                        error = %e,
                        "Cast sweep failed for movie, skipping"
                    );
                }
            }

            if page >= listing.total_pages || page >= MAX_CATALOG_PAGES {
                break;
            }
            page += 1;
        }

        tracing::info!(actors = seen.len(), "Actor import run complete");

        Ok(())
    }

    async fn genre_lookup(&self) -> AppResult<HashMap<i64, String>> {
        let genres = self.source.list_genres().await?;

        Ok(genres.into_iter().map(|g| (g.id, g.name)).collect())
    }

    /// Imports each movie in the batch, skipping failed items. Returns
    /// the number of successful upserts.
    async fn import_movie_batch(
        &self,
        movies: &[MovieSummary],
        genre_lookup: &HashMap<i64, String>,
    ) -> usize {
        let mut imported = 0;

        for movie in movies {
            match self.import_one_movie(movie, genre_lookup).await {
                Ok(()) => imported += 1,
                Err(e) => {
                    tracing::warn!(
                        movie_id = movie.id,
                        title = %movie.title,
                        error = %e,
                        "Movie import failed, skipping"
                    );
                }
            }
        }

        imported
    }

    async fn import_one_movie(
        &self,
        summary: &MovieSummary,
        genre_lookup: &HashMap<i64, String>,
    ) -> AppResult<()> {
        let detail = self.source.movie_detail(summary.id).await?;

        // A genre id the lookup has never heard of still links; it only
        // loses its display name.
        let genres = summary
            .genre_ids
            .iter()
            .map(|id| GenreRecord {
                id: *id,
                name: genre_lookup
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
            })
            .collect();

        let record = MovieRecord::from_catalog(summary, &detail, genres);

        self.store.upsert_movie(&record).await
    }

    async fn import_movie_cast(
        &self,
        summary: &MovieSummary,
        seen: &mut HashSet<i64>,
    ) -> AppResult<()> {
        let detail = self.source.movie_detail(summary.id).await?;

        for credit in &detail.cast {
            if !seen.insert(credit.id) {
                continue;
            }

            if let Err(e) = self.import_one_actor(credit.id).await {
                tracing::warn!(
                    actor_id = credit.id,
                    actor = %credit.name,
                    error = %e,
                    "Actor import failed, skipping"
                );
            }
        }

        Ok(())
    }

    async fn import_one_actor(&self, actor_id: i64) -> AppResult<()> {
        let detail = self.source.actor_detail(actor_id).await?;

        self.store
            .upsert_actor(&detail.record(), &detail.credited_movie_ids())
            .await
    }
}
