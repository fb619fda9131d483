//! Configuration management for the equipment server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DynamoDbConfig {
    /// Table holding the equipment records
    pub table: String,
    /// Region override; falls back to the ambient AWS configuration
    pub region: Option<String>,
    /// Endpoint override, used to point at a local DynamoDB
    pub endpoint_url: Option<String>,
    /// Per-operation timeout applied to every store call
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub dynamodb: DynamoDbConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix EQUIPMENT_)
            .add_source(
                Environment::with_prefix("EQUIPMENT")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override server port from PORT env var if present
            .set_override_option("server.port", env::var("PORT").ok())?
            // Override table name from DYNAMODB_TABLE env var if present
            .set_override_option("dynamodb.table", env::var("DYNAMODB_TABLE").ok())?
            // Override store endpoint from DYNAMODB_ENDPOINT_URL env var if present
            .set_override_option(
                "dynamodb.endpoint_url",
                env::var("DYNAMODB_ENDPOINT_URL").ok(),
            )?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DynamoDbConfig {
    fn default() -> Self {
        Self {
            table: "equipments".to_string(),
            region: None,
            endpoint_url: None,
            timeout_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
