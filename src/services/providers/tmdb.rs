/// TMDB catalog provider
///
/// Thin reqwest client over the TMDB v3 REST API. Detail fetches append
/// the secondary payloads (credits, videos, release dates, keywords for
/// movies; movie/TV credits for people) in a single request.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        tmdb::{TmdbGenreList, TmdbMovieDetail, TmdbPagedResults, TmdbPerson},
        ActorDetail, GenreRecord, MovieDetail, MoviePage, MovieSummary,
    },
    services::providers::MetadataSource,
};

const MOVIE_APPENDS: &str = "credits,videos,release_dates,keywords";
const PERSON_APPENDS: &str = "movie_credits,tv_credits";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(config: &Config) -> Self {
        // A hung upstream call would otherwise stall an import run forever
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http_client,
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        extra_query: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(extra_query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {} for {}: {}",
                status, path, body
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait::async_trait]
impl MetadataSource for TmdbProvider {
    async fn list_genres(&self) -> AppResult<Vec<GenreRecord>> {
        let list: TmdbGenreList = self.get_json("/genre/movie/list", &[]).await?;

        Ok(list.genres.into_iter().map(GenreRecord::from).collect())
    }

    async fn popular_movies(&self, page: u32) -> AppResult<MoviePage> {
        let page_param = page.to_string();
        let listing: TmdbPagedResults = self
            .get_json("/movie/popular", &[("page", page_param.as_str())])
            .await?;

        tracing::debug!(
            page = page,
            results = listing.results.len(),
            total_pages = listing.total_pages,
            "Fetched popular movie page"
        );

        Ok(MoviePage {
            results: listing.results.into_iter().map(MovieSummary::from).collect(),
            total_pages: listing.total_pages,
        })
    }

    async fn now_playing_movies(&self) -> AppResult<Vec<MovieSummary>> {
        let listing: TmdbPagedResults = self.get_json("/movie/now_playing", &[]).await?;

        Ok(listing.results.into_iter().map(MovieSummary::from).collect())
    }

    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let listing: TmdbPagedResults =
            self.get_json("/search/movie", &[("query", query)]).await?;

        tracing::info!(
            query = %query,
            results = listing.results.len(),
            "Catalog title search completed"
        );

        Ok(listing.results.into_iter().map(MovieSummary::from).collect())
    }

    async fn movie_detail(&self, id: i64) -> AppResult<MovieDetail> {
        let detail: TmdbMovieDetail = self
            .get_json(
                &format!("/movie/{id}"),
                &[("append_to_response", MOVIE_APPENDS)],
            )
            .await?;

        Ok(MovieDetail::from(detail))
    }

    async fn actor_detail(&self, id: i64) -> AppResult<ActorDetail> {
        let person: TmdbPerson = self
            .get_json(
                &format!("/person/{id}"),
                &[("append_to_response", PERSON_APPENDS)],
            )
            .await?;

        Ok(ActorDetail::from(person))
    }
}
