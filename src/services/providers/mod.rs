/// Catalog metadata provider abstraction
///
/// The ingestion pipeline and the discovery engine both consume movie,
/// genre and actor metadata through this trait, so the upstream catalog
/// (TMDB today) stays swappable and mockable.
use crate::{
    error::AppResult,
    models::{ActorDetail, GenreRecord, MovieDetail, MoviePage, MovieSummary},
};

pub mod tmdb;

/// Read access to the external movie catalog.
///
/// Every operation may fail transiently (network, rate limit); callers
/// decide whether a failure skips one item or aborts the whole run.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
    /// The full genre list. Fetched once per import run to build the
    /// id-to-name lookup.
    async fn list_genres(&self) -> AppResult<Vec<GenreRecord>>;

    /// One page of the popular-movie listing, with the provider's total
    /// page count for pagination.
    async fn popular_movies(&self, page: u32) -> AppResult<MoviePage>;

    /// The now-playing window. An empty list is a valid response.
    async fn now_playing_movies(&self) -> AppResult<Vec<MovieSummary>>;

    /// Title search against the live catalog
    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>>;

    /// Full detail for one movie: credits, trailer, certification, spoken
    /// languages and keywords.
    async fn movie_detail(&self, id: i64) -> AppResult<MovieDetail>;

    /// Full detail for one actor, including movie and TV credit summaries
    async fn actor_detail(&self, id: i64) -> AppResult<ActorDetail>;
}
