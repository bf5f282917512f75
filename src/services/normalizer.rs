//! Turns the city provider's `application/stream+json` bodies into cities.
//!
//! The provider streams bare JSON objects back to back (`{..}{..}{..}`) with
//! no separator or enclosing array. Records are cut at every `}`, which holds
//! only while records stay flat: a nested object inside a record splits it
//! into fragments that no longer parse and are dropped.

use crate::models::city::{CarrierData, City, Region};
use crate::models::country::CountryInfo;
use crate::services::dataset::DatasetService;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("invalid data: expected an array of location records")]
    InvalidData,
}

/// Splits a concatenated-JSON body into per-record strings.
///
/// Text between records that does not belong to one (anything before a
/// fragment's first `{`) is discarded, as are fragments with no `{` at all.
pub fn split_concatenated_records(text: &str) -> Vec<String> {
    text.split('}')
        .filter_map(|fragment| {
            let start = fragment.find('{')?;
            Some(format!("{}}}", &fragment[start..]))
        })
        .collect()
}

/// Parses each fragment on its own, silently dropping those that are not
/// valid JSON. Returns `None` when there was nothing to parse.
pub fn parse_records(fragments: &[String]) -> Option<Vec<Value>> {
    if fragments.is_empty() {
        return None;
    }

    let records: Vec<Value> = fragments
        .iter()
        .filter_map(|fragment| serde_json::from_str(fragment).ok())
        .collect();

    if records.len() < fragments.len() {
        debug!(
            "Dropped {} malformed record(s) out of {}",
            fragments.len() - records.len(),
            fragments.len()
        );
    }

    Some(records)
}

/// Maps raw provider records to cities.
///
/// `records` must be a JSON array. The mapping is all or nothing: if any
/// element cannot be mapped the whole batch yields `Ok(None)`.
pub fn to_city_model(
    records: &Value,
    dataset: &DatasetService,
) -> Result<Option<Vec<City>>, NormalizeError> {
    let records = records.as_array().ok_or(NormalizeError::InvalidData)?;

    let cities: Option<Vec<City>> = records
        .iter()
        .map(|record| record.as_object().map(|record| to_city(record, dataset)))
        .collect();

    if cities.is_none() {
        warn!("Discarding batch of {} location records", records.len());
    }

    Ok(cities)
}

fn to_city(record: &Map<String, Value>, dataset: &DatasetService) -> City {
    let field = |key: &str| truthy(record.get(key));

    let carrier_data = CarrierData {
        geolocation_id: field("maerskGeoLocationId").cloned(),
        country_geo_id: field("countryGeoId").cloned(),
        brands: field("brands").cloned(),
        brand_names: field("brandNames").cloned(),
        st_code: field("maerskRkstCode").cloned(),
        ts_code: field("maerskRktsCode").cloned(),
    };

    let country_code = field("countryCode").map(value_to_string);
    let (country, continent) = match country_code
        .as_deref()
        .and_then(|code| dataset.find_country(code))
    {
        Some(country) => country.without_continent(),
        None => (
            CountryInfo::stub(
                country_code.unwrap_or_default(),
                field("countryName").map(value_to_string),
            ),
            None,
        ),
    };

    let region = field("regionCode").map(|code| Region {
        code: value_to_string(code),
        name: field("regionName").map(value_to_string),
    });

    City {
        id: carrier_data.st_code.as_ref().map(value_to_string),
        name: field("cityName").map(value_to_string),
        country: Some(country),
        continent: continent.filter(|c| !c.is_empty()),
        region,
        timezone_id: field("timezoneId").map(value_to_string),
        carrier_data: (!carrier_data.is_empty()).then_some(carrier_data),
    }
}

/// `None` for null, `false`, zero and the empty string; arrays and objects
/// count as present even when empty.
fn truthy(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
