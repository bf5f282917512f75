pub mod auth;
pub mod cities;
pub mod continents;
pub mod countries;
pub mod error;

use crate::api::error::ApiError;
use crate::models::response::{HealthResponse, IndexResponse};
use crate::AppState;
use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::get,
    Json, Router,
};
use std::cmp::Ordering;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// Countries and continents never change while the process runs.
pub const STATIC_CACHE_CONTROL: &str = "public, max-age=1800, s-maxage=3600";
pub const CITIES_CACHE_CONTROL: &str = "public, max-age=600, s-maxage=1200";

/// Query parameters understood by the list endpoints. Values are kept as
/// raw strings so that malformed numbers fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, serde::Deserialize)]
pub struct ListQueryParams {
    pub page: Option<String>,
    pub count: Option<String>,
    pub order: Option<String>,
    pub exact: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` selects descending order, anything else is ascending.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn sort_by_key<T>(self, items: &mut [T], key: impl Fn(&T) -> &str) {
        items.sort_by(|a, b| {
            let ordering: Ordering = key(a).cmp(key(b));
            match self {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }
}

pub fn router(app_state: AppState) -> Router {
    let countries = Router::new()
        .route("/v1/countries", get(countries::get_countries))
        .route("/v1/countries/{code}", get(countries::get_country))
        .route(
            "/v1/countries/name/{query_name}",
            get(countries::search_countries_by_name),
        )
        .layer(cache_control(STATIC_CACHE_CONTROL));

    let continents = Router::new()
        .route("/v1/continents", get(continents::get_continents))
        .route("/v1/continents/{code}", get(continents::get_continent))
        .route(
            "/v1/continents/{code}/countries",
            get(continents::get_continent_countries),
        )
        .layer(cache_control(STATIC_CACHE_CONTROL));

    let cities = Router::new()
        .route("/v1/cities/name/{name}", get(cities::search_cities_by_name))
        .route(
            "/v1/cities/country/{country_code}/name/{name}",
            get(cities::search_cities_by_country_and_name),
        )
        .layer(cache_control(CITIES_CACHE_CONTROL));

    let v1 = Router::new()
        .route("/v1", get(index))
        .merge(countries)
        .merge(continents)
        .merge(cities)
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth::require_token,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(v1)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}

fn cache_control(value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(header::CACHE_CONTROL, HeaderValue::from_static(value))
}

pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        name: "Geologis".to_string(),
        description: "API for geographical information (countries, continents, cities, etc)"
            .to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Invalid route".to_string())
}
