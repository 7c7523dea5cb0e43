//! Neo4j-backed [`GraphStore`].
//!
//! Node labels: Movie, Genre, Actor, User, Country. Edge types:
//! BELONGS_TO, APPEARS_IN, FAVORITES, LIKES, LIVES_IN. Movie/Genre/Actor
//! nodes are keyed by their numeric catalog id, User by username. User and
//! Country nodes are written by the auth service; this store only reads
//! them.

use neo4rs::{query, Graph, Node, Query};

use crate::{
    db::GraphStore,
    error::AppResult,
    models::{ActorRecord, GenreRecord, MovieRecord, StoredMovie},
};

pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    /// Connects to Neo4j and verifies the connection with a round trip
    pub async fn connect(uri: &str, username: &str, password: &str) -> AppResult<Self> {
        let graph = Graph::new(uri, username, password).await?;
        graph.run(query("RETURN 1")).await?;

        tracing::info!(uri = %uri, "Connected to Neo4j");

        Ok(Self { graph })
    }

    async fn collect_movies(&self, q: Query) -> AppResult<Vec<StoredMovie>> {
        let mut stream = self.graph.execute(q).await?;

        let mut movies = Vec::new();
        while let Some(row) = stream.next().await? {
            if let Ok(node) = row.get::<Node>("m") {
                movies.push(stored_movie_from_node(&node));
            }
        }

        Ok(movies)
    }
}

fn stored_movie_from_node(node: &Node) -> StoredMovie {
    StoredMovie {
        id: node.get::<i64>("id").unwrap_or_default(),
        title: node.get::<String>("title").unwrap_or_default(),
        overview: node.get::<String>("overview").unwrap_or_default(),
        release_date: node.get::<String>("release_date").unwrap_or_default(),
        score: node.get::<f64>("score").unwrap_or_default(),
        cover_url: node.get::<String>("cover_image").unwrap_or_default(),
        trailer_url: node.get::<String>("trailer_url").unwrap_or_default(),
        cast: node.get::<Vec<String>>("cast").unwrap_or_default(),
        age_rating: node.get::<String>("age_rating").unwrap_or_default(),
        subtitles: node.get::<Vec<String>>("subtitles").unwrap_or_default(),
        tags: node.get::<Vec<String>>("tags").unwrap_or_default(),
    }
}

#[async_trait::async_trait]
impl GraphStore for Neo4jStore {
    async fn upsert_genre(&self, genre: &GenreRecord) -> AppResult<()> {
        let q = query(
            "MERGE (g:Genre {id: $id})
             ON CREATE SET g.name = $name",
        )
        .param("id", genre.id)
        .param("name", genre.name.as_str());

        self.graph.run(q).await?;

        Ok(())
    }

    async fn upsert_movie(&self, movie: &MovieRecord) -> AppResult<()> {
        // Node first, then its edges; all statements in one transaction so
        // a crash mid-write never leaves a movie without its links.
        let mut queries = vec![query(
            "MERGE (m:Movie {id: $id})
             SET m.title = $title,
                 m.overview = $overview,
                 m.release_date = $release_date,
                 m.duration = $duration,
                 m.director = $director,
                 m.cast = $cast,
                 m.original_language = $original_language,
                 m.subtitles = $subtitles,
                 m.age_rating = $age_rating,
                 m.score = $score,
                 m.cover_image = $cover_image,
                 m.trailer_url = $trailer_url,
                 m.tags = $tags",
        )
        .param("id", movie.id)
        .param("title", movie.title.as_str())
        .param("overview", movie.overview.as_str())
        .param("release_date", movie.release_date.as_str())
        .param("duration", movie.runtime)
        .param("director", movie.director.as_str())
        .param(
            "cast",
            movie.cast.iter().map(|c| c.name.clone()).collect::<Vec<_>>(),
        )
        .param("original_language", movie.original_language.as_str())
        .param("subtitles", movie.subtitles.clone())
        .param("age_rating", movie.age_rating.as_str())
        .param("score", movie.score)
        .param("cover_image", movie.cover_url.as_str())
        .param("trailer_url", movie.trailer_url.as_str())
        .param("tags", movie.tags.clone())];

        for genre in &movie.genres {
            queries.push(
                query(
                    "MATCH (m:Movie {id: $movie_id})
                     MERGE (g:Genre {id: $genre_id})
                     ON CREATE SET g.name = $name
                     MERGE (m)-[:BELONGS_TO]->(g)",
                )
                .param("movie_id", movie.id)
                .param("genre_id", genre.id)
                .param("name", genre.name.as_str()),
            );
        }

        for credit in &movie.cast {
            queries.push(
                query(
                    "MATCH (m:Movie {id: $movie_id})
                     MERGE (a:Actor {id: $actor_id})
                     ON CREATE SET a.name = $name
                     MERGE (a)-[:APPEARS_IN]->(m)",
                )
                .param("movie_id", movie.id)
                .param("actor_id", credit.id)
                .param("name", credit.name.as_str()),
            );
        }

        let mut txn = self.graph.start_txn().await?;
        txn.run_queries(queries).await?;
        txn.commit().await?;

        Ok(())
    }

    async fn upsert_actor(
        &self,
        actor: &ActorRecord,
        credited_movie_ids: &[i64],
    ) -> AppResult<()> {
        let upsert = query(
            "MERGE (a:Actor {id: $id})
             SET a.name = $name,
                 a.profile_image = $profile_image,
                 a.biography = $biography,
                 a.birth_date = $birth_date,
                 a.birth_place = $birth_place,
                 a.popularity = $popularity",
        )
        .param("id", actor.id)
        .param("name", actor.name.as_str())
        .param("profile_image", actor.profile_url.as_str())
        .param("biography", actor.biography.as_str())
        .param("birth_date", actor.birth_date.as_str())
        .param("birth_place", actor.birth_place.as_str())
        .param("popularity", actor.popularity);

        // MATCH on the movie side: credits for movies that were never
        // imported must not fabricate stub Movie nodes.
        let link = query(
            "MATCH (a:Actor {id: $id})
             MATCH (m:Movie)
             WHERE m.id IN $movie_ids
             MERGE (a)-[:APPEARS_IN]->(m)",
        )
        .param("id", actor.id)
        .param("movie_ids", credited_movie_ids.to_vec());

        let mut txn = self.graph.start_txn().await?;
        txn.run_queries(vec![upsert, link]).await?;
        txn.commit().await?;

        Ok(())
    }

    async fn movies_by_genre(&self, genre: &str, limit: i64) -> AppResult<Vec<StoredMovie>> {
        let q = query(
            "MATCH (m:Movie)-[:BELONGS_TO]->(g:Genre {name: $genre})
             RETURN m
             LIMIT $limit",
        )
        .param("genre", genre)
        .param("limit", limit);

        self.collect_movies(q).await
    }

    async fn movies_by_title(&self, name: &str, limit: i64) -> AppResult<Vec<StoredMovie>> {
        let q = query(
            "MATCH (m:Movie)
             WHERE toLower(m.title) CONTAINS toLower($name)
             RETURN m
             LIMIT $limit",
        )
        .param("name", name)
        .param("limit", limit);

        self.collect_movies(q).await
    }

    async fn top_billed_actors(
        &self,
        movie_ids: &[i64],
        per_movie: i64,
    ) -> AppResult<Vec<String>> {
        let q = query(
            "MATCH (a:Actor)-[:APPEARS_IN]->(m:Movie)
             WHERE m.id IN $movie_ids
             WITH m.id AS movie_id, a.name AS name
             ORDER BY movie_id, name
             WITH movie_id, collect(name)[..$per_movie] AS top
             UNWIND top AS actor
             RETURN DISTINCT actor",
        )
        .param("movie_ids", movie_ids.to_vec())
        .param("per_movie", per_movie);

        let mut stream = self.graph.execute(q).await?;

        let mut actors = Vec::new();
        while let Some(row) = stream.next().await? {
            if let Ok(name) = row.get::<String>("actor") {
                actors.push(name);
            }
        }

        Ok(actors)
    }

    async fn movies_by_actors(
        &self,
        actor_names: &[String],
        exclude_ids: &[i64],
        limit: i64,
    ) -> AppResult<Vec<StoredMovie>> {
        let q = query(
            "MATCH (a:Actor)-[:APPEARS_IN]->(m:Movie)
             WHERE a.name IN $names AND NOT m.id IN $exclude
             RETURN DISTINCT m
             LIMIT $limit",
        )
        .param("names", actor_names.to_vec())
        .param("exclude", exclude_ids.to_vec())
        .param("limit", limit);

        self.collect_movies(q).await
    }

    async fn add_favorite(&self, username: &str, movie_id: i64) -> AppResult<bool> {
        let q = query(
            "MATCH (u:User {username: $username}), (m:Movie {id: $movie_id})
             MERGE (u)-[:FAVORITES]->(m)
             RETURN m.id AS id",
        )
        .param("username", username)
        .param("movie_id", movie_id);

        let mut stream = self.graph.execute(q).await?;

        Ok(stream.next().await?.is_some())
    }

    async fn remove_favorite(&self, username: &str, movie_id: i64) -> AppResult<bool> {
        // OPTIONAL MATCH keeps the delete idempotent while still
        // distinguishing a missing user/movie (zero rows) from a missing
        // edge (one row, nothing to delete).
        let q = query(
            "MATCH (u:User {username: $username}), (m:Movie {id: $movie_id})
             OPTIONAL MATCH (u)-[r:FAVORITES]->(m)
             DELETE r
             RETURN m.id AS id",
        )
        .param("username", username)
        .param("movie_id", movie_id);

        let mut stream = self.graph.execute(q).await?;

        Ok(stream.next().await?.is_some())
    }

    async fn is_favorite(&self, username: &str, movie_id: i64) -> AppResult<bool> {
        let q = query(
            "MATCH (u:User {username: $username})-[:FAVORITES]->(m:Movie {id: $movie_id})
             RETURN m.id AS id
             LIMIT 1",
        )
        .param("username", username)
        .param("movie_id", movie_id);

        let mut stream = self.graph.execute(q).await?;

        Ok(stream.next().await?.is_some())
    }

    async fn favorites(&self, username: &str) -> AppResult<Vec<StoredMovie>> {
        let q = query(
            "MATCH (u:User {username: $username})-[:FAVORITES]->(m:Movie)
             RETURN m",
        )
        .param("username", username);

        self.collect_movies(q).await
    }
}
