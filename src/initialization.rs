use crate::config::Config;
use crate::services::dataset::{DatasetError, DatasetService};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geologis=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Loads the country and continent tables once for the lifetime of the
/// process. An empty country table is refused.
pub fn load_dataset(config: &Config) -> Result<DatasetService, DatasetError> {
    let dataset = match &config.data_dir {
        Some(dir) => {
            info!("Loading dataset from {}", dir.display());
            DatasetService::from_dir(dir)?
        }
        None => DatasetService::embedded()?,
    };

    dataset.list_countries()?;

    info!(
        countries = dataset.country_count(),
        continents = dataset.continent_count(),
        "Dataset loaded"
    );

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_embedded_dataset() {
        let dataset = load_dataset(&Config::default()).unwrap();
        assert!(dataset.country_count() > 200);
        assert_eq!(dataset.continent_count(), 7);
    }

    #[test]
    fn test_load_rejects_empty_country_table() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("countries.json"), "[]").unwrap();

        let config = Config {
            data_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        assert!(matches!(
            load_dataset(&config),
            Err(DatasetError::CountriesUnavailable)
        ));
    }

    #[test]
    fn test_load_reports_malformed_table() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("continents.json"), "{").unwrap();

        let config = Config {
            data_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        assert!(matches!(
            load_dataset(&config),
            Err(DatasetError::FileError(_))
        ));
    }
}
