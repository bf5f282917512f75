use crate::models::country::CountryInfo;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A city as returned to callers, built fresh from one upstream location
/// record. Every field that ends up empty is left out of the JSON output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<CountryInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_id: Option<String>,
    #[serde(rename = "maerskData", skip_serializing_if = "Option::is_none")]
    pub carrier_data: Option<CarrierData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Carrier-specific identifiers copied verbatim from the upstream record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geolocation_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_geo_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brands: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_names: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub st_code: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts_code: Option<Value>,
}

impl CarrierData {
    pub fn is_empty(&self) -> bool {
        self.geolocation_id.is_none()
            && self.country_geo_id.is_none()
            && self.brands.is_none()
            && self.brand_names.is_none()
            && self.st_code.is_none()
            && self.ts_code.is_none()
    }
}
