use crate::api::error::ApiError;
use crate::api::{ListQueryParams, SortOrder};
use crate::models::country::Country;
use crate::models::response::PageResponse;
use crate::utils::pagination::page_response;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

const DEFAULT_COUNT: usize = 5;

fn country_code_pattern() -> &'static Regex {
    static RE_CODE: OnceLock<Regex> = OnceLock::new();
    RE_CODE.get_or_init(|| Regex::new(r"^[a-zA-Z()]+$").unwrap())
}

pub async fn get_countries(
    State(app_state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> Result<Json<PageResponse<Country>>, ApiError> {
    let mut countries = app_state.dataset.list_countries()?.to_vec();
    SortOrder::from_param(params.order.as_deref())
        .sort_by_key(&mut countries, |c| c.code.as_str());

    let response = page_response(
        &countries,
        DEFAULT_COUNT,
        params.count.as_deref(),
        params.page.as_deref(),
    )?;

    Ok(Json(response))
}

pub async fn get_country(
    State(app_state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Country>, ApiError> {
    if !country_code_pattern().is_match(&code) {
        return Err(ApiError::InvalidArguments("Bad request".to_string()));
    }

    app_state
        .dataset
        .find_country(&code)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No valid country found for given ISO code".to_string()))
}

/// Countries whose name (or, unless `exact=true`, one of its words) starts
/// with the given text.
pub async fn search_countries_by_name(
    State(app_state): State<AppState>,
    Path(query_name): Path<String>,
    Query(params): Query<ListQueryParams>,
) -> Result<Json<PageResponse<Country>>, ApiError> {
    let exact = params
        .exact
        .as_deref()
        .is_some_and(|e| e.eq_ignore_ascii_case("true"));

    let countries = app_state
        .dataset
        .filter_countries_by_name(&query_name, exact);
    debug!(query = %query_name, exact, matches = countries.len(), "Country name search");

    if countries.is_empty() {
        return Err(ApiError::NotFound("No country for given name".to_string()));
    }

    let response = page_response(
        &countries,
        DEFAULT_COUNT,
        params.count.as_deref(),
        params.page.as_deref(),
    )?;

    Ok(Json(response))
}
