use crate::models::continent::Continent;
use crate::models::country::{Country, CountryInfo};
use crate::utils::file::{read_json_file, FileError};
use std::path::Path;
use thiserror::Error;
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

const COUNTRIES_JSON: &str = include_str!("../../assets/countries.json");
const CONTINENTS_JSON: &str = include_str!("../../assets/continents.json");

pub const COUNTRIES_FILE: &str = "countries.json";
pub const CONTINENTS_FILE: &str = "continents.json";

const FLAG_URL_BASE: &str = "https://static.vesselfinder.net/images/flags/4x3";

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("File error: {0}")]
    FileError(#[from] FileError),
    #[error("Country table is unavailable")]
    CountriesUnavailable,
}

/// Read-only country and continent tables. Built once at startup and shared
/// behind an `Arc`; there is no way to mutate the tables afterwards.
#[derive(Debug)]
pub struct DatasetService {
    countries: Vec<Country>,
    continents: Vec<Continent>,
}

impl DatasetService {
    pub fn new(countries: Vec<Country>, continents: Vec<Continent>) -> Self {
        Self {
            countries,
            continents,
        }
    }

    /// Tables compiled into the binary.
    pub fn embedded() -> Result<Self, DatasetError> {
        Ok(Self::new(
            serde_json::from_str(COUNTRIES_JSON)?,
            serde_json::from_str(CONTINENTS_JSON)?,
        ))
    }

    /// Tables read from `countries.json` / `continents.json` under `dir`.
    /// A missing file falls back to the embedded copy of that table.
    pub fn from_dir(dir: &Path) -> Result<Self, DatasetError> {
        let countries_path = dir.join(COUNTRIES_FILE);
        let countries = if countries_path.exists() {
            read_json_file(&countries_path)?
        } else {
            warn!(
                "{} not found, using embedded countries",
                countries_path.display()
            );
            serde_json::from_str(COUNTRIES_JSON)?
        };

        let continents_path = dir.join(CONTINENTS_FILE);
        let continents = if continents_path.exists() {
            read_json_file(&continents_path)?
        } else {
            warn!(
                "{} not found, using embedded continents",
                continents_path.display()
            );
            serde_json::from_str(CONTINENTS_JSON)?
        };

        Ok(Self::new(countries, continents))
    }

    /// Looks a country up by ISO-2 or ISO-3 code, case-insensitively, and
    /// attaches its flag URL.
    pub fn find_country(&self, code: &str) -> Option<Country> {
        let code = code.trim().to_lowercase();
        if code.is_empty() {
            return None;
        }

        self.countries
            .iter()
            .find(|c| c.code.to_lowercase() == code || c.code_iso3.to_lowercase() == code)
            .map(|c| Country {
                flag_url: Some(flag_url(&c.code)),
                ..c.clone()
            })
    }

    pub fn find_continent(&self, code: &str) -> Option<Continent> {
        let code = code.trim().to_lowercase();
        if code.is_empty() {
            return None;
        }

        self.continents
            .iter()
            .find(|c| c.code.to_lowercase() == code)
            .cloned()
    }

    /// The full country table in storage order.
    pub fn list_countries(&self) -> Result<&[Country], DatasetError> {
        if self.countries.is_empty() {
            return Err(DatasetError::CountriesUnavailable);
        }
        Ok(&self.countries)
    }

    pub fn list_continents(&self) -> &[Continent] {
        &self.continents
    }

    /// Countries whose name starts with `query`. Unless `exact` is set, a
    /// name also matches when any of its words starts with `query`.
    pub fn filter_countries_by_name(&self, query: &str, exact: bool) -> Vec<Country> {
        let query = normalize_name(query);

        self.countries
            .iter()
            .filter(|c| {
                let name = normalize_name(&c.name);
                name.starts_with(&query)
                    || (!exact && name.split_whitespace().any(|word| word.starts_with(&query)))
            })
            .cloned()
            .collect()
    }

    /// Countries on the given continent, without their continent attribute.
    pub fn countries_by_continent(&self, continent_code: &str) -> Vec<CountryInfo> {
        let continent_code = continent_code.to_lowercase();

        self.countries
            .iter()
            .filter(|c| {
                c.continent
                    .as_deref()
                    .is_some_and(|code| code.to_lowercase() == continent_code)
            })
            .map(|c| c.clone().without_continent().0)
            .collect()
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    pub fn continent_count(&self) -> usize {
        self.continents.len()
    }
}

pub fn flag_url(iso2: &str) -> String {
    format!("{}/{}.svg", FLAG_URL_BASE, iso2.to_lowercase())
}

fn normalize_name(name: &str) -> String {
    name.nfc().collect::<String>().trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> DatasetService {
        DatasetService::embedded().unwrap()
    }

    fn names(countries: &[Country]) -> Vec<&str> {
        countries.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_find_country_by_iso2_and_iso3() {
        let ds = dataset();
        let by_iso2 = ds.find_country("VE").unwrap();
        let by_iso3 = ds.find_country("ven").unwrap();

        assert_eq!(by_iso2, by_iso3);
        assert_eq!(by_iso2.name, "Venezuela");
        assert!(by_iso2.flag_url.as_deref().unwrap().ends_with("ve.svg"));
    }

    #[test]
    fn test_find_country_trims_input() {
        let ds = dataset();
        assert_eq!(ds.find_country("  gb ").unwrap().code, "GB");
    }

    #[test]
    fn test_find_country_not_found() {
        let ds = dataset();
        assert!(ds.find_country("").is_none());
        assert!(ds.find_country("   ").is_none());
        assert!(ds.find_country("zzz").is_none());
    }

    #[test]
    fn test_list_countries_has_no_flag_url() {
        let ds = dataset();
        let countries = ds.list_countries().unwrap();
        assert!(!countries.is_empty());
        assert!(countries.iter().all(|c| c.flag_url.is_none()));
    }

    #[test]
    fn test_list_countries_unavailable() {
        let ds = DatasetService::new(Vec::new(), Vec::new());
        assert!(matches!(
            ds.list_countries(),
            Err(DatasetError::CountriesUnavailable)
        ));
    }

    #[test]
    fn test_find_continent() {
        let ds = dataset();
        let continent = ds.find_continent("sa").unwrap();
        assert_eq!(continent.name, "South America");
        assert_eq!(
            continent
                .alt_lang_name
                .as_ref()
                .and_then(|m| m.get("es"))
                .map(String::as_str),
            Some("América del Sur")
        );
        assert!(ds.find_continent("xx").is_none());
        assert!(ds.find_continent("").is_none());
    }

    #[test]
    fn test_find_continent_trims_input() {
        let ds = dataset();
        assert_eq!(ds.find_continent(" sa ").unwrap().code, "SA");
        assert_eq!(ds.find_continent("\tEu\n").unwrap().name, "Europe");
    }

    #[test]
    fn test_filter_by_name_matches_words() {
        let ds = dataset();
        let matches = ds.filter_countries_by_name("United", false);
        let found = names(&matches);
        assert!(found.contains(&"United States"));
        assert!(found.contains(&"United Kingdom"));

        let kingdom = ds.filter_countries_by_name("Kingdom", false);
        assert_eq!(names(&kingdom), vec!["United Kingdom"]);
    }

    #[test]
    fn test_filter_by_name_exact_requires_prefix_of_whole_name() {
        let ds = dataset();
        let matches = ds.filter_countries_by_name("Kingdom", true);
        assert!(matches.is_empty());

        let matches = ds.filter_countries_by_name("united k", true);
        assert_eq!(names(&matches), vec!["United Kingdom"]);
    }

    #[test]
    fn test_filter_by_name_is_prefix_not_contains() {
        let ds = dataset();
        assert!(ds.filter_countries_by_name("ezuela", false).is_empty());
    }

    #[test]
    fn test_filter_by_name_normalizes_unicode() {
        let ds = dataset();
        // "Å" written as A + combining ring above
        let matches = ds.filter_countries_by_name("A\u{030A}land", true);
        assert_eq!(names(&matches), vec!["Åland Islands"]);
    }

    #[test]
    fn test_countries_by_continent_strips_continent() {
        let ds = dataset();
        let countries = ds.countries_by_continent("sa");
        assert!(countries.iter().any(|c| c.code == "VE"));
        assert!(countries.iter().all(|c| c.flag_url.is_none()));

        let json = serde_json::to_value(&countries[0]).unwrap();
        assert!(json.get("continent").is_none());
    }

    #[test]
    fn test_countries_by_unknown_continent() {
        let ds = dataset();
        assert!(ds.countries_by_continent("XX").is_empty());
    }

    #[test]
    fn test_from_dir_overrides_tables() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(COUNTRIES_FILE),
            r#"[{"code":"XA","code_iso3":"XAA","name":"Atlantis","phone_code":null,"continent":"EU"}]"#,
        )
        .unwrap();

        let ds = DatasetService::from_dir(dir.path()).unwrap();
        assert_eq!(ds.country_count(), 1);
        assert_eq!(ds.find_country("xaa").unwrap().name, "Atlantis");
        // continents.json is absent, the embedded table is used
        assert_eq!(ds.continent_count(), 7);
    }
}
