use crate::api::error::ApiError;
use crate::models::city::City;
use crate::models::response::PageResponse;
use crate::services::cities::{CityLookupError, CityQuery};
use crate::utils::pagination::{page_response, parse_number};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::error;

const DEFAULT_COUNT: usize = 5;

#[derive(Debug, Default, serde::Deserialize)]
pub struct CityQueryParams {
    pub page: Option<String>,
    pub count: Option<String>,
    /// Number of records requested from the upstream provider.
    pub queryamount: Option<String>,
}

pub async fn search_cities_by_name(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<CityQueryParams>,
) -> Result<Json<PageResponse<City>>, ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::InvalidArguments(
            "name parameter is required".to_string(),
        ));
    }

    search_cities(&app_state, &name, None, &params).await
}

pub async fn search_cities_by_country_and_name(
    State(app_state): State<AppState>,
    Path((country_code, name)): Path<(String, String)>,
    Query(params): Query<CityQueryParams>,
) -> Result<Json<PageResponse<City>>, ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::InvalidArguments(
            "name and countryCode parameters are required".to_string(),
        ));
    }

    let country = app_state.dataset.find_country(&country_code).ok_or_else(|| {
        ApiError::InvalidArguments(
            "A valid ISO alpha-2 or ISO alpha-3 country code must be provided".to_string(),
        )
    })?;

    search_cities(&app_state, &name, Some(&country.code), &params).await
}

async fn search_cities(
    app_state: &AppState,
    name: &str,
    country_code: Option<&str>,
    params: &CityQueryParams,
) -> Result<Json<PageResponse<City>>, ApiError> {
    let amount = resolve_amount(
        params.queryamount.as_deref(),
        app_state.config.cities_default_amount,
        app_state.config.cities_max_amount,
    )?;

    let query = CityQuery {
        name,
        country_code,
        amount,
    };

    let cities = app_state
        .city_service
        .search(&query)
        .await
        .map_err(|e| lookup_error(e, &app_state.config.support_contact))?;

    if cities.is_empty() {
        return Err(ApiError::NotFound(
            "No cities found for given name".to_string(),
        ));
    }

    let response = page_response(
        &cities,
        DEFAULT_COUNT,
        params.count.as_deref(),
        params.page.as_deref(),
    )?;

    Ok(Json(response))
}

/// Upstream page size: the configured default when missing or not a
/// positive number, rejected above `max`.
fn resolve_amount(raw: Option<&str>, default: u32, max: u32) -> Result<u32, ApiError> {
    let amount = parse_number(raw)
        .map(f64::floor)
        .filter(|n| *n >= 1.0)
        .unwrap_or(f64::from(default));

    if amount > f64::from(max) {
        return Err(ApiError::InvalidArguments(format!(
            "queryamount parameter must be less than {}",
            max
        )));
    }

    Ok(amount as u32)
}

fn lookup_error(e: CityLookupError, support: &str) -> ApiError {
    match e {
        CityLookupError::Rejected { status, message } => ApiError::Upstream {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            message,
        },
        CityLookupError::EmptyStream => {
            error!(error = %e, "City lookup returned nothing usable");
            ApiError::Internal("something went wrong".to_string())
        }
        CityLookupError::UnsupportedContentType(_) => {
            error!(error = %e, "City lookup returned an unexpected body");
            ApiError::Internal("Something went wrong retrieving cities".to_string())
        }
        CityLookupError::ReqwestError(_)
        | CityLookupError::NormalizeError(_)
        | CityLookupError::MappingFailed => {
            error!(error = %e, "City lookup failed");
            ApiError::Unexpected {
                support: support.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_amount() {
        assert_eq!(resolve_amount(None, 20, 100).unwrap(), 20);
        assert_eq!(resolve_amount(Some("abc"), 20, 100).unwrap(), 20);
        assert_eq!(resolve_amount(Some("0"), 20, 100).unwrap(), 20);
        assert_eq!(resolve_amount(Some("35"), 20, 100).unwrap(), 35);
        assert_eq!(resolve_amount(Some("100"), 20, 100).unwrap(), 100);

        let err = resolve_amount(Some("101"), 20, 100).unwrap_err();
        assert_eq!(err.status(), "invalid-arguments");
        assert_eq!(err.to_string(), "queryamount parameter must be less than 100");
    }

    #[test]
    fn test_lookup_error_relays_upstream_status() {
        let err = lookup_error(
            CityLookupError::Rejected {
                status: 400,
                message: "pageSize must be positive".to_string(),
            },
            "support",
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.status(), "not-found");
        assert_eq!(err.to_string(), "pageSize must be positive");
    }

    #[test]
    fn test_lookup_error_attaches_support_on_unexpected_failures() {
        let err = lookup_error(CityLookupError::MappingFailed, "mail us");
        let body = err.body();
        assert_eq!(body.error.status, "internal");
        assert_eq!(body.error.support.as_deref(), Some("mail us"));

        let err = lookup_error(CityLookupError::EmptyStream, "mail us");
        assert_eq!(err.body().error.support, None);
    }
}
