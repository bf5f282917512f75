//! Geologis - geographic data API
//!
//! Serves the static country and continent tables and proxies a third-party
//! city lookup, with shared pagination and response shaping for all three
//! resources.

pub mod api;
pub mod cli;
pub mod config;
pub mod initialization;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::services::{cities::CityLookupService, dataset::DatasetService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dataset: Arc<DatasetService>,
    pub city_service: Arc<CityLookupService>,
}

impl AppState {
    pub fn new(config: Config, dataset: DatasetService) -> Self {
        let dataset = Arc::new(dataset);
        let city_service = Arc::new(CityLookupService::new(
            &config.cities_upstream_url,
            dataset.clone(),
        ));

        Self {
            config: Arc::new(config),
            dataset,
            city_service,
        }
    }
}
