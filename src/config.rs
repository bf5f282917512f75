use crate::cli::Args;
use dotenvy::dotenv;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

const VARS: [&str; 8] = [
    "SERVER_PORT",
    "DATA_DIR",
    "CITIES_UPSTREAM_URL",
    "CITIES_DEFAULT_AMOUNT",
    "CITIES_MAX_AMOUNT",
    "API_BEARER_TOKEN",
    "API_PUBLIC_KEY",
    "SUPPORT_CONTACT",
];

pub struct Config {
    pub server_port: u16,
    /// Directory with `countries.json` / `continents.json` replacing the
    /// embedded tables.
    pub data_dir: Option<PathBuf>,
    pub cities_upstream_url: String,
    pub cities_default_amount: u32,
    pub cities_max_amount: u32,
    /// Bearer token required on `/v1` routes; auth is off when unset.
    pub bearer_token: Option<String>,
    /// `publickey` query value accepted in place of the bearer token.
    pub public_key: Option<String>,
    pub support_contact: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv().ok();

        let mut vars = HashMap::new();
        for key in VARS {
            match env::var(key) {
                Ok(value) => {
                    vars.insert(key.to_string(), value);
                }
                Err(env::VarError::NotPresent) => {}
                Err(e) => return Err(e),
            }
        }

        Ok(Self::from_vars(&vars))
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            server_port: get("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            data_dir: get("DATA_DIR").map(PathBuf::from),
            cities_upstream_url: get("CITIES_UPSTREAM_URL")
                .unwrap_or_else(|| "https://api.maersk.com/locations/".to_string()),
            cities_default_amount: get("CITIES_DEFAULT_AMOUNT")
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(20),
            cities_max_amount: get("CITIES_MAX_AMOUNT")
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(100),
            bearer_token: get("API_BEARER_TOKEN"),
            public_key: get("API_PUBLIC_KEY"),
            support_contact: get("SUPPORT_CONTACT").unwrap_or_else(|| {
                "You can send us an email to support@gbalogistic.com".to_string()
            }),
        }
    }

    /// Command line flags take precedence over the environment.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(port) = args.port {
            self.server_port = port;
        }
        if let Some(dir) = &args.data_dir {
            self.data_dir = Some(dir.clone());
        }
    }

    pub fn auth_enabled(&self) -> bool {
        self.bearer_token.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(&HashMap::new())
    }
}
