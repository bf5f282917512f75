use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub code_iso3: String,
    pub name: String,
    pub phone_code: Option<String>,
    pub continent: Option<String>,
    /// Derived from the ISO-2 code on lookup, never read from the table.
    #[serde(
        rename = "flagURL",
        skip_deserializing,
        skip_serializing_if = "Option::is_none"
    )]
    pub flag_url: Option<String>,
}

impl Country {
    /// Splits the continent code off, leaving the record as it is embedded
    /// in continent listings and city results.
    pub fn without_continent(self) -> (CountryInfo, Option<String>) {
        let Country {
            code,
            code_iso3,
            name,
            phone_code,
            continent,
            flag_url,
        } = self;

        (
            CountryInfo {
                code,
                code_iso3: Some(code_iso3),
                name: Some(name),
                phone_code,
                flag_url,
            },
            continent,
        )
    }
}

/// A country record with the continent attribute stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_iso3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_code: Option<String>,
    #[serde(rename = "flagURL", skip_serializing_if = "Option::is_none")]
    pub flag_url: Option<String>,
}

impl CountryInfo {
    /// Stub for countries the upstream knows about but the local table does not.
    pub fn stub(code: String, name: Option<String>) -> Self {
        Self {
            code,
            code_iso3: None,
            name,
            phone_code: None,
            flag_url: None,
        }
    }
}
