/// Property-graph persistence contract
///
/// The pipeline and the discovery engine talk to the graph through this
/// trait. Each operation is one scoped unit of work: the implementation
/// acquires whatever connection it needs, runs the statements (multi-
/// statement upserts inside a single transaction), and releases the
/// connection on every exit path.
use crate::{
    error::AppResult,
    models::{ActorRecord, GenreRecord, MovieRecord, StoredMovie},
};

pub mod neo4j;

pub use neo4j::Neo4jStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GraphStore: Send + Sync {
    /// Create-if-absent by catalog id; the name is set on create only
    async fn upsert_genre(&self, genre: &GenreRecord) -> AppResult<()>;

    /// Atomically upserts the movie node, overwrites all of its
    /// attributes, and merges the BELONGS_TO and APPEARS_IN links for the
    /// supplied genres and top-billed cast. A partial write is never
    /// visible: either the node and all its edges land, or nothing does.
    async fn upsert_movie(&self, movie: &MovieRecord) -> AppResult<()>;

    /// Atomically upserts the actor node and merges APPEARS_IN edges to
    /// every credited movie that already exists in the graph. Movies are
    /// matched, never created, so this path cannot fabricate stub movie
    /// nodes.
    async fn upsert_actor(&self, actor: &ActorRecord, credited_movie_ids: &[i64])
        -> AppResult<()>;

    /// Movies linked to the named genre, up to `limit`
    async fn movies_by_genre(&self, genre: &str, limit: i64) -> AppResult<Vec<StoredMovie>>;

    /// Case-insensitive substring match on the stored title, up to `limit`
    async fn movies_by_title(&self, name: &str, limit: i64) -> AppResult<Vec<StoredMovie>>;

    /// For each given movie, its `per_movie` alphabetically-first credited
    /// actor names, unioned and deduplicated across all the movies.
    async fn top_billed_actors(
        &self,
        movie_ids: &[i64],
        per_movie: i64,
    ) -> AppResult<Vec<String>>;

    /// Movies credited to any of the named actors, excluding the given
    /// ids, up to `limit`.
    async fn movies_by_actors(
        &self,
        actor_names: &[String],
        exclude_ids: &[i64],
        limit: i64,
    ) -> AppResult<Vec<StoredMovie>>;

    /// Merges the FAVORITES edge. Returns false when the user or the
    /// movie does not exist; re-adding an existing favorite is a no-op
    /// returning true.
    async fn add_favorite(&self, username: &str, movie_id: i64) -> AppResult<bool>;

    /// Deletes the FAVORITES edge if present. Returns false when the user
    /// or the movie does not exist; removing a non-favorite is a no-op
    /// returning true.
    async fn remove_favorite(&self, username: &str, movie_id: i64) -> AppResult<bool>;

    /// Whether the FAVORITES edge exists. Absence is a plain false, never
    /// an error.
    async fn is_favorite(&self, username: &str, movie_id: i64) -> AppResult<bool>;

    /// The user's favorited movies, as stored snapshots
    async fn favorites(&self, username: &str) -> AppResult<Vec<StoredMovie>>;
}
