use crate::api::error::ApiError;
use crate::api::{ListQueryParams, SortOrder};
use crate::models::continent::Continent;
use crate::models::country::CountryInfo;
use crate::models::response::PageResponse;
use crate::utils::pagination::page_response;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};

const DEFAULT_CONTINENTS_COUNT: usize = 7;
const DEFAULT_COUNTRIES_COUNT: usize = 5;

pub async fn get_continents(
    State(app_state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> Result<Json<PageResponse<Continent>>, ApiError> {
    let mut continents = app_state.dataset.list_continents().to_vec();
    SortOrder::from_param(params.order.as_deref())
        .sort_by_key(&mut continents, |c| c.code.as_str());

    let response = page_response(
        &continents,
        DEFAULT_CONTINENTS_COUNT,
        params.count.as_deref(),
        params.page.as_deref(),
    )?;

    Ok(Json(response))
}

pub async fn get_continent(
    State(app_state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Continent>, ApiError> {
    app_state
        .dataset
        .find_continent(&code)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No continent found for given code".to_string()))
}

pub async fn get_continent_countries(
    State(app_state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<ListQueryParams>,
) -> Result<Json<PageResponse<CountryInfo>>, ApiError> {
    let continent = app_state
        .dataset
        .find_continent(&code)
        .ok_or_else(|| ApiError::InvalidParameters("Invalid continent code".to_string()))?;

    let mut countries = app_state.dataset.countries_by_continent(&continent.code);
    if countries.is_empty() {
        return Ok(Json(PageResponse::empty(DEFAULT_COUNTRIES_COUNT)));
    }
    SortOrder::from_param(params.order.as_deref())
        .sort_by_key(&mut countries, |c| c.code.as_str());

    let response = page_response(
        &countries,
        DEFAULT_COUNTRIES_COUNT,
        params.count.as_deref(),
        params.page.as_deref(),
    )?;

    Ok(Json(response))
}
