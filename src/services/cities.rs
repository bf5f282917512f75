use crate::models::city::City;
use crate::services::dataset::DatasetService;
use crate::services::normalizer::{
    parse_records, split_concatenated_records, to_city_model, NormalizeError,
};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

pub const STREAM_JSON: &str = "application/stream+json";
pub const STANDARD_JSON: &str = "application/json";

const FALLBACK_REJECTION_MESSAGE: &str = "Invalid arguments";

#[derive(Error, Debug)]
pub enum CityLookupError {
    #[error("Reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("Upstream rejected the lookup with {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("Upstream stream contained no records")]
    EmptyStream,
    #[error("Unsupported upstream content type: {0:?}")]
    UnsupportedContentType(String),
    #[error("Normalize error: {0}")]
    NormalizeError(#[from] NormalizeError),
    #[error("Upstream records could not be mapped to cities")]
    MappingFailed,
}

#[derive(Debug, Clone)]
pub struct CityQuery<'a> {
    pub name: &'a str,
    /// ISO-2 code restricting the lookup to one country.
    pub country_code: Option<&'a str>,
    /// Page size requested from the provider.
    pub amount: u32,
}

/// Client for the third-party city-lookup provider.
pub struct CityLookupService {
    client: reqwest::Client,
    base_url: String,
    dataset: Arc<DatasetService>,
}

impl CityLookupService {
    pub fn new(base_url: &str, dataset: Arc<DatasetService>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
            dataset,
        }
    }

    pub async fn search(&self, query: &CityQuery<'_>) -> Result<Vec<City>, CityLookupError> {
        let mut params = vec![
            ("cityName", query.name.to_string()),
            ("type", "city".to_string()),
            ("pageSize", query.amount.to_string()),
            ("sort", "cityName".to_string()),
        ];
        if let Some(country_code) = query.country_code {
            params.push(("countryCode", country_code.to_string()));
        }

        debug!(
            name = query.name,
            country = query.country_code,
            amount = query.amount,
            "City lookup"
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !status.is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FALLBACK_REJECTION_MESSAGE.to_string());

            warn!(status = status.as_u16(), message = %message, "City lookup rejected");

            return Err(CityLookupError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        if content_type.contains(STREAM_JSON) {
            let body = response.text().await?;
            let fragments = split_concatenated_records(&body);
            let records = parse_records(&fragments).ok_or(CityLookupError::EmptyStream)?;
            self.to_cities(Value::Array(records))
        } else if content_type.contains(STANDARD_JSON) {
            let body: Value = response.json().await?;
            self.to_cities(body)
        } else {
            Err(CityLookupError::UnsupportedContentType(content_type))
        }
    }

    fn to_cities(&self, records: Value) -> Result<Vec<City>, CityLookupError> {
        to_city_model(&records, &self.dataset)?.ok_or(CityLookupError::MappingFailed)
    }
}
