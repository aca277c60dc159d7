use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct ProductConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    /// Directory served for paths no route matches.
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub url: Secret<String>,
    /// Overrides the database named in the connection string.
    pub database: Option<String>,
}

impl ProductConfig {
    pub fn load() -> Result<Self, AppError> {
        // Loads .env and PORT
        let common_config = core_config::Config::load()?;

        Ok(ProductConfig {
            common: common_config,
            mongodb: MongoConfig {
                url: Secret::new(get_env("MONGODB_URL", None)?),
                database: env::var("MONGODB_DATABASE").ok().filter(|s| !s.is_empty()),
            },
            static_dir: get_env("STATIC_DIR", Some("public"))?,
        })
    }
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}
