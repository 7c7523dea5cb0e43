use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub mod tmdb;

/// Poster/profile image base used when building full image URLs
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Trailer link base for YouTube video keys
pub const TRAILER_BASE_URL: &str = "https://www.youtube.com/watch?v=";

/// A genre as listed by the catalog provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreRecord {
    pub id: i64,
    pub name: String,
}

/// One top-billed cast credit: the actor's catalog id plus display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastCredit {
    pub id: i64,
    pub name: String,
}

/// A movie as it appears in a paginated catalog listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub genre_ids: Vec<i64>,
}

/// One page of a catalog listing, with the provider's page count
#[derive(Debug, Clone)]
pub struct MoviePage {
    pub results: Vec<MovieSummary>,
    pub total_pages: u32,
}

/// Full per-movie detail fetched from the catalog provider.
///
/// Image and trailer paths are already resolved to full URLs; an empty
/// string means the provider had nothing for that field.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub runtime: i64,
    pub original_language: String,
    pub score: f64,
    pub cover_url: String,
    pub trailer_url: String,
    pub director: String,
    pub cast: Vec<CastCredit>,
    pub genres: Vec<String>,
    pub certification: String,
    pub spoken_languages: Vec<String>,
    pub keywords: Vec<String>,
}

/// Everything one movie upsert writes: the node attributes plus the genre
/// and cast links created in the same transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub runtime: i64,
    pub director: String,
    pub cast: Vec<CastCredit>,
    pub original_language: String,
    pub subtitles: Vec<String>,
    pub age_rating: String,
    pub score: f64,
    pub cover_url: String,
    pub trailer_url: String,
    pub tags: Vec<String>,
    pub genres: Vec<GenreRecord>,
}

impl MovieRecord {
    /// Assembles the upsert payload from a listing entry, its fetched
    /// detail, and the genres resolved through the per-run lookup.
    ///
    /// Listing fields win for title/overview/release date (they are present
    /// even when the detail payload is sparse); everything else comes from
    /// the detail. Blank listing fields degrade to placeholder values so a
    /// node never carries empty identifying attributes.
    pub fn from_catalog(
        summary: &MovieSummary,
        detail: &MovieDetail,
        genres: Vec<GenreRecord>,
    ) -> Self {
        Self {
            id: summary.id,
            title: non_empty_or(&summary.title, "Unknown Title"),
            overview: non_empty_or(&summary.overview, "No overview available"),
            release_date: non_empty_or(&summary.release_date, "Unknown"),
            runtime: detail.runtime,
            director: detail.director.clone(),
            cast: detail.cast.clone(),
            original_language: non_empty_or(&detail.original_language, "Unknown"),
            subtitles: detail.spoken_languages.clone(),
            age_rating: detail.certification.clone(),
            score: detail.score,
            cover_url: detail.cover_url.clone(),
            trailer_url: detail.trailer_url.clone(),
            tags: detail.keywords.clone(),
            genres,
        }
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Actor attributes written by the actor-import path
#[derive(Debug, Clone, PartialEq)]
pub struct ActorRecord {
    pub id: i64,
    pub name: String,
    pub profile_url: String,
    pub biography: String,
    pub birth_date: String,
    pub birth_place: String,
    pub popularity: f64,
}

/// One movie credit from an actor's filmography
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieCredit {
    pub movie_id: i64,
    pub title: String,
    pub character: String,
    pub release_date: String,
    pub poster_url: String,
}

/// One TV credit from an actor's filmography
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TvCredit {
    pub title: String,
    pub character: String,
    pub first_air_date: String,
    pub poster_url: String,
}

/// Full actor detail from the catalog provider: node attributes plus the
/// credit summaries the import path links APPEARS_IN edges from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorDetail {
    #[serde(flatten)]
    pub profile: ActorProfile,
    pub movie_credits: Vec<MovieCredit>,
    pub tv_credits: Vec<TvCredit>,
}

/// Serializable view of the actor node attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorProfile {
    pub id: i64,
    pub name: String,
    pub profile_url: String,
    pub biography: String,
    pub birth_date: String,
    pub birth_place: String,
    pub popularity: f64,
}

impl ActorDetail {
    /// The attributes the graph upsert writes onto the Actor node
    pub fn record(&self) -> ActorRecord {
        ActorRecord {
            id: self.profile.id,
            name: self.profile.name.clone(),
            profile_url: self.profile.profile_url.clone(),
            biography: self.profile.biography.clone(),
            birth_date: self.profile.birth_date.clone(),
            birth_place: self.profile.birth_place.clone(),
            popularity: self.profile.popularity,
        }
    }

    /// Catalog ids of every movie this actor is credited in
    pub fn credited_movie_ids(&self) -> Vec<i64> {
        self.movie_credits.iter().map(|c| c.movie_id).collect()
    }
}

/// Movie snapshot as stored on (and read back from) the graph node
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoredMovie {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub score: f64,
    pub cover_url: String,
    pub trailer_url: String,
    pub cast: Vec<String>,
    pub age_rating: String,
    pub subtitles: Vec<String>,
    pub tags: Vec<String>,
}

/// Flat movie projection served by every discovery endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieProjection {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub release_date: String,
    pub rating: f64,
    pub cover: String,
    pub genre: String,
    pub trailer_url: String,
    pub actors: Vec<String>,
    pub classification: String,
    pub subtitles: String,
}

impl MovieProjection {
    /// Projects a live detail fetch into the flat response shape
    pub fn from_detail(detail: &MovieDetail) -> Self {
        Self {
            id: detail.id,
            title: detail.title.clone(),
            description: detail.overview.clone(),
            release_date: detail.release_date.clone(),
            rating: detail.score,
            cover: detail.cover_url.clone(),
            genre: detail.genres.join(", "),
            trailer_url: detail.trailer_url.clone(),
            actors: detail.cast.iter().map(|c| c.name.clone()).collect(),
            classification: detail.certification.clone(),
            subtitles: detail.spoken_languages.join(", "),
        }
    }

    /// Projects the stored snapshot into the same shape, without touching
    /// the provider. Tag keywords stand in for genre names, as stored.
    pub fn from_snapshot(movie: &StoredMovie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            description: movie.overview.clone(),
            release_date: movie.release_date.clone(),
            rating: movie.score,
            cover: movie.cover_url.clone(),
            genre: movie.tags.join(", "),
            trailer_url: movie.trailer_url.clone(),
            actors: movie.cast.clone(),
            classification: movie.age_rating.clone(),
            subtitles: movie.subtitles.join(", "),
        }
    }
}

/// Title-search response: direct matches plus actor-derived suggestions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMoviesResponse {
    pub movies: Vec<MovieProjection>,
    pub actor_movies: Vec<MovieProjection>,
}

/// Parses a movie id arriving as a string at the API boundary.
///
/// Ids are matched numerically in the graph, so "27205" and 27205 must
/// resolve to the same node.
pub fn parse_movie_id(raw: &str) -> AppResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::InvalidInput(format!("invalid movie id: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_detail() -> MovieDetail {
        MovieDetail {
            id: 27205,
            title: "Inception".to_string(),
            overview: "A thief who steals corporate secrets".to_string(),
            release_date: "2010-07-16".to_string(),
            runtime: 148,
            original_language: "en".to_string(),
            score: 8.4,
            cover_url: format!("{IMAGE_BASE_URL}/inception.jpg"),
            trailer_url: format!("{TRAILER_BASE_URL}YoHD9XEInc0"),
            director: "Christopher Nolan".to_string(),
            cast: vec![
                CastCredit { id: 6193, name: "Leonardo DiCaprio".to_string() },
                CastCredit { id: 24045, name: "Joseph Gordon-Levitt".to_string() },
            ],
            genres: vec!["Action".to_string(), "Science Fiction".to_string()],
            certification: "PG-13".to_string(),
            spoken_languages: vec!["English".to_string(), "Japanese".to_string()],
            keywords: vec!["dream".to_string(), "heist".to_string()],
        }
    }

    #[test]
    fn test_movie_record_prefers_listing_fields() {
        let summary = MovieSummary {
            id: 27205,
            title: "Inception".to_string(),
            overview: "Listing overview".to_string(),
            release_date: "2010-07-15".to_string(),
            genre_ids: vec![28],
        };
        let genres = vec![GenreRecord { id: 28, name: "Action".to_string() }];

        let record = MovieRecord::from_catalog(&summary, &sample_detail(), genres);

        assert_eq!(record.title, "Inception");
        assert_eq!(record.overview, "Listing overview");
        assert_eq!(record.release_date, "2010-07-15");
        assert_eq!(record.runtime, 148);
        assert_eq!(record.director, "Christopher Nolan");
        assert_eq!(record.age_rating, "PG-13");
        assert_eq!(record.tags, vec!["dream", "heist"]);
    }

    #[test]
    fn test_movie_record_blank_listing_fields_get_placeholders() {
        let summary = MovieSummary {
            id: 99,
            title: "  ".to_string(),
            overview: String::new(),
            release_date: String::new(),
            genre_ids: vec![],
        };

        let record = MovieRecord::from_catalog(&summary, &sample_detail(), vec![]);

        assert_eq!(record.title, "Unknown Title");
        assert_eq!(record.overview, "No overview available");
        assert_eq!(record.release_date, "Unknown");
        assert!(record.genres.is_empty());
    }

    #[test]
    fn test_projection_from_detail_joins_lists() {
        let projection = MovieProjection::from_detail(&sample_detail());

        assert_eq!(projection.genre, "Action, Science Fiction");
        assert_eq!(projection.subtitles, "English, Japanese");
        assert_eq!(
            projection.actors,
            vec!["Leonardo DiCaprio", "Joseph Gordon-Levitt"]
        );
    }

    #[test]
    fn test_projection_from_snapshot_uses_stored_attributes() {
        let movie = StoredMovie {
            id: 155,
            title: "The Dark Knight".to_string(),
            overview: "The Joker wreaks havoc".to_string(),
            release_date: "2008-07-18".to_string(),
            score: 9.0,
            cover_url: "cover".to_string(),
            trailer_url: "trailer".to_string(),
            cast: vec!["Christian Bale".to_string()],
            age_rating: "PG-13".to_string(),
            subtitles: vec!["English".to_string()],
            tags: vec!["crime".to_string(), "vigilante".to_string()],
        };

        let projection = MovieProjection::from_snapshot(&movie);

        assert_eq!(projection.id, 155);
        assert_eq!(projection.genre, "crime, vigilante");
        assert_eq!(projection.subtitles, "English");
        assert_eq!(projection.classification, "PG-13");
    }

    #[test]
    fn test_projection_serializes_camel_case() {
        let json =
            serde_json::to_value(MovieProjection::from_detail(&sample_detail())).unwrap();
        assert!(json.get("releaseDate").is_some());
        assert!(json.get("trailerUrl").is_some());
        assert!(json.get("release_date").is_none());
    }

    #[test]
    fn test_parse_movie_id_accepts_numeric_strings() {
        assert_eq!(parse_movie_id("27205").unwrap(), 27205);
        assert_eq!(parse_movie_id(" 27205 ").unwrap(), 27205);
    }

    #[test]
    fn test_parse_movie_id_rejects_garbage() {
        assert!(matches!(
            parse_movie_id("not-a-number"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_credited_movie_ids() {
        let detail = ActorDetail {
            profile: ActorProfile {
                id: 6193,
                name: "Leonardo DiCaprio".to_string(),
                profile_url: String::new(),
                biography: String::new(),
                birth_date: "1974-11-11".to_string(),
                birth_place: "Los Angeles".to_string(),
                popularity: 88.5,
            },
            movie_credits: vec![
                MovieCredit {
                    movie_id: 27205,
                    title: "Inception".to_string(),
                    character: "Cobb".to_string(),
                    release_date: "2010-07-16".to_string(),
                    poster_url: String::new(),
                },
                MovieCredit {
                    movie_id: 603,
                    title: "Titanic".to_string(),
                    character: "Jack".to_string(),
                    release_date: "1997-12-19".to_string(),
                    poster_url: String::new(),
                },
            ],
            tv_credits: vec![],
        };

        assert_eq!(detail.credited_movie_ids(), vec![27205, 603]);
    }
}
