//! CLI command implementations.

pub mod options;
pub mod order;
pub mod variants;

use std::path::Path;

use freshcounter_admin::config::{ConfigError, ShopifyAdminConfig};
use freshcounter_admin::shopify::AdminClient;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Errors shared by all commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Read and parse a JSON input file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CommandError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CommandError::Json {
        path: display,
        source,
    })
}

/// Print a value as pretty JSON on stdout.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Build an Admin API client from the environment.
pub fn admin_client() -> Result<(AdminClient, ShopifyAdminConfig), CommandError> {
    dotenvy::dotenv().ok();
    let config = ShopifyAdminConfig::from_env()?;
    Ok((AdminClient::new(&config), config))
}
