//! Raw TMDB payload types and their conversions into domain records.
//!
//! Deserialization is tolerant: every field the provider is known to omit
//! carries `#[serde(default)]` or is an `Option`, so a sparse payload
//! degrades to empty values instead of a parse failure.

use serde::Deserialize;

use super::{
    ActorDetail, ActorProfile, CastCredit, GenreRecord, MovieCredit, MovieDetail, MovieSummary,
    TvCredit, IMAGE_BASE_URL, TRAILER_BASE_URL,
};

/// Cast entries below this billing order are carried into the graph
const TOP_BILLING_CUTOFF: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct TmdbGenreList {
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbGenre {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

impl From<TmdbGenre> for GenreRecord {
    fn from(genre: TmdbGenre) -> Self {
        GenreRecord {
            id: genre.id,
            name: genre.name,
        }
    }
}

/// One page of `/movie/popular`, `/movie/now_playing` or `/search/movie`
#[derive(Debug, Deserialize)]
pub struct TmdbPagedResults {
    #[serde(default)]
    pub results: Vec<TmdbMovieSummary>,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub struct TmdbMovieSummary {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

impl From<TmdbMovieSummary> for MovieSummary {
    fn from(movie: TmdbMovieSummary) -> Self {
        MovieSummary {
            id: movie.id,
            title: movie.title,
            overview: movie.overview,
            release_date: movie.release_date,
            genre_ids: movie.genre_ids,
        }
    }
}

/// `/movie/{id}?append_to_response=credits,videos,release_dates,keywords`
#[derive(Debug, Deserialize)]
pub struct TmdbMovieDetail {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub spoken_languages: Vec<TmdbSpokenLanguage>,
    #[serde(default)]
    pub credits: TmdbCredits,
    #[serde(default)]
    pub videos: TmdbVideos,
    #[serde(default)]
    pub release_dates: TmdbReleaseDates,
    #[serde(default)]
    pub keywords: TmdbKeywords,
}

#[derive(Debug, Deserialize)]
pub struct TmdbSpokenLanguage {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCastMember {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCrewMember {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub job: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TmdbVideos {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbVideo {
    #[serde(default)]
    pub key: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TmdbReleaseDates {
    #[serde(default)]
    pub results: Vec<TmdbCountryReleases>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCountryReleases {
    #[serde(default)]
    pub iso_3166_1: String,
    #[serde(default)]
    pub release_dates: Vec<TmdbReleaseDate>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbReleaseDate {
    #[serde(default)]
    pub certification: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TmdbKeywords {
    #[serde(default)]
    pub keywords: Vec<TmdbKeyword>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbKeyword {
    #[serde(default)]
    pub name: String,
}

impl TmdbMovieDetail {
    fn director(&self) -> String {
        self.credits
            .crew
            .iter()
            .find(|member| member.job == "Director")
            .map(|member| member.name.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    fn trailer_url(&self) -> String {
        self.videos
            .results
            .iter()
            .find(|video| video.video_type == "Trailer")
            .map(|video| format!("{TRAILER_BASE_URL}{}", video.key))
            .unwrap_or_default()
    }

    /// US certification, "NR" when the provider has none
    fn certification(&self) -> String {
        self.release_dates
            .results
            .iter()
            .find(|country| country.iso_3166_1 == "US")
            .and_then(|country| country.release_dates.first())
            .map(|release| release.certification.clone())
            .filter(|certification| !certification.is_empty())
            .unwrap_or_else(|| "NR".to_string())
    }

    fn top_billed_cast(&self) -> Vec<CastCredit> {
        self.credits
            .cast
            .iter()
            .filter(|member| member.order < TOP_BILLING_CUTOFF)
            .map(|member| CastCredit {
                id: member.id,
                name: member.name.clone(),
            })
            .collect()
    }
}

impl From<TmdbMovieDetail> for MovieDetail {
    fn from(detail: TmdbMovieDetail) -> Self {
        let director = detail.director();
        let trailer_url = detail.trailer_url();
        let certification = detail.certification();
        let cast = detail.top_billed_cast();

        let title = if detail.title.is_empty() {
            detail.original_title.clone()
        } else {
            detail.title.clone()
        };

        MovieDetail {
            id: detail.id,
            title,
            overview: detail.overview,
            release_date: detail.release_date,
            runtime: detail.runtime.unwrap_or(0),
            original_language: detail.original_language,
            score: detail.vote_average,
            cover_url: image_url(detail.poster_path.as_deref()),
            trailer_url,
            director,
            cast,
            genres: detail.genres.into_iter().map(|genre| genre.name).collect(),
            certification,
            spoken_languages: detail
                .spoken_languages
                .into_iter()
                .map(|language| language.name)
                .collect(),
            keywords: detail
                .keywords
                .keywords
                .into_iter()
                .map(|keyword| keyword.name)
                .collect(),
        }
    }
}

/// `/person/{id}?append_to_response=movie_credits,tv_credits`
#[derive(Debug, Deserialize)]
pub struct TmdbPerson {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub biography: String,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub movie_credits: TmdbPersonMovieCredits,
    #[serde(default)]
    pub tv_credits: TmdbPersonTvCredits,
}

#[derive(Debug, Default, Deserialize)]
pub struct TmdbPersonMovieCredits {
    #[serde(default)]
    pub cast: Vec<TmdbPersonMovieCredit>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbPersonMovieCredit {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TmdbPersonTvCredits {
    #[serde(default)]
    pub cast: Vec<TmdbPersonTvCredit>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbPersonTvCredit {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub first_air_date: String,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl From<TmdbPerson> for ActorDetail {
    fn from(person: TmdbPerson) -> Self {
        ActorDetail {
            profile: ActorProfile {
                id: person.id,
                name: person.name,
                profile_url: image_url(person.profile_path.as_deref()),
                biography: person.biography,
                birth_date: person.birthday.unwrap_or_default(),
                birth_place: person.place_of_birth.unwrap_or_default(),
                popularity: person.popularity,
            },
            movie_credits: person
                .movie_credits
                .cast
                .into_iter()
                .map(|credit| MovieCredit {
                    movie_id: credit.id,
                    title: credit.title,
                    character: credit.character,
                    release_date: credit.release_date,
                    poster_url: image_url(credit.poster_path.as_deref()),
                })
                .collect(),
            tv_credits: person
                .tv_credits
                .cast
                .into_iter()
                .map(|credit| TvCredit {
                    title: credit.name,
                    character: credit.character,
                    first_air_date: credit.first_air_date,
                    poster_url: image_url(credit.poster_path.as_deref()),
                })
                .collect(),
        }
    }
}

fn image_url(path: Option<&str>) -> String {
    match path {
        Some(path) if !path.is_empty() => format!("{IMAGE_BASE_URL}{path}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_detail_conversion() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "overview": "A thief who steals corporate secrets",
            "release_date": "2010-07-16",
            "runtime": 148,
            "original_language": "en",
            "vote_average": 8.4,
            "poster_path": "/inception.jpg",
            "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
            "spoken_languages": [{"name": "English"}, {"name": "Japanese"}],
            "credits": {
                "cast": [
                    {"id": 6193, "name": "Leonardo DiCaprio", "order": 0},
                    {"id": 24045, "name": "Joseph Gordon-Levitt", "order": 1},
                    {"id": 99999, "name": "Deep Cut Extra", "order": 57}
                ],
                "crew": [
                    {"name": "Hans Zimmer", "job": "Original Music Composer"},
                    {"name": "Christopher Nolan", "job": "Director"}
                ]
            },
            "videos": {
                "results": [
                    {"key": "behind1", "type": "Behind the Scenes"},
                    {"key": "YoHD9XEInc0", "type": "Trailer"}
                ]
            },
            "release_dates": {
                "results": [
                    {"iso_3166_1": "DE", "release_dates": [{"certification": "12"}]},
                    {"iso_3166_1": "US", "release_dates": [{"certification": "PG-13"}]}
                ]
            },
            "keywords": {
                "keywords": [{"name": "dream"}, {"name": "heist"}]
            }
        }"#;

        let raw: TmdbMovieDetail = serde_json::from_str(json).unwrap();
        let detail = MovieDetail::from(raw);

        assert_eq!(detail.director, "Christopher Nolan");
        assert_eq!(
            detail.trailer_url,
            "https://www.youtube.com/watch?v=YoHD9XEInc0"
        );
        assert_eq!(detail.certification, "PG-13");
        assert_eq!(
            detail.cover_url,
            "https://image.tmdb.org/t/p/w500/inception.jpg"
        );
        assert_eq!(detail.cast.len(), 2, "billing order cutoff applies");
        assert_eq!(detail.cast[0].name, "Leonardo DiCaprio");
        assert_eq!(detail.genres, vec!["Action", "Science Fiction"]);
        assert_eq!(detail.keywords, vec!["dream", "heist"]);
    }

    #[test]
    fn test_sparse_movie_detail_degrades_to_defaults() {
        let raw: TmdbMovieDetail =
            serde_json::from_str(r#"{"id": 42, "original_title": "Obscure"}"#).unwrap();
        let detail = MovieDetail::from(raw);

        assert_eq!(detail.title, "Obscure");
        assert_eq!(detail.runtime, 0);
        assert_eq!(detail.director, "Unknown");
        assert_eq!(detail.certification, "NR");
        assert_eq!(detail.trailer_url, "");
        assert_eq!(detail.cover_url, "");
        assert!(detail.cast.is_empty());
        assert!(detail.keywords.is_empty());
    }

    #[test]
    fn test_empty_us_certification_falls_back_to_nr() {
        let json = r#"{
            "id": 7,
            "title": "Festival Cut",
            "release_dates": {
                "results": [{"iso_3166_1": "US", "release_dates": [{"certification": ""}]}]
            }
        }"#;

        let detail = MovieDetail::from(serde_json::from_str::<TmdbMovieDetail>(json).unwrap());
        assert_eq!(detail.certification, "NR");
    }

    #[test]
    fn test_paged_results_tolerate_missing_fields() {
        let page: TmdbPagedResults = serde_json::from_str(r#"{"page": 1}"#).unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_person_conversion() {
        let json = r#"{
            "id": 6193,
            "name": "Leonardo DiCaprio",
            "profile_path": "/leo.jpg",
            "biography": "An American actor.",
            "birthday": "1974-11-11",
            "place_of_birth": "Los Angeles, California, USA",
            "popularity": 88.5,
            "movie_credits": {
                "cast": [
                    {"id": 27205, "title": "Inception", "character": "Cobb", "release_date": "2010-07-16", "poster_path": "/inception.jpg"},
                    {"id": 597, "title": "Titanic", "character": "Jack Dawson", "release_date": "1997-12-19"}
                ]
            },
            "tv_credits": {
                "cast": [
                    {"name": "Parenthood", "character": "Garry Buckman", "first_air_date": "1990-08-20"}
                ]
            }
        }"#;

        let detail = ActorDetail::from(serde_json::from_str::<TmdbPerson>(json).unwrap());

        assert_eq!(detail.profile.name, "Leonardo DiCaprio");
        assert_eq!(
            detail.profile.profile_url,
            "https://image.tmdb.org/t/p/w500/leo.jpg"
        );
        assert_eq!(detail.credited_movie_ids(), vec![27205, 597]);
        assert_eq!(detail.tv_credits.len(), 1);
        assert_eq!(detail.tv_credits[0].title, "Parenthood");
    }

    #[test]
    fn test_person_missing_profile_yields_empty_url() {
        let detail =
            ActorDetail::from(serde_json::from_str::<TmdbPerson>(r#"{"id": 1}"#).unwrap());
        assert_eq!(detail.profile.profile_url, "");
        assert_eq!(detail.profile.birth_date, "");
    }
}
