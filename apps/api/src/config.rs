use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub ollama_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Object-storage settings. `None` disables the upload path entirely;
    /// scoring is unaffected.
    pub storage: Option<StorageConfig>,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ollama_url: std::env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            storage: StorageConfig::from_env(),
        })
    }
}

impl StorageConfig {
    /// Builds the storage block only when endpoint and credentials are all
    /// present; a partially configured block disables the upload path
    /// instead of failing startup.
    fn from_env() -> Option<Self> {
        let endpoint = std::env::var("S3_ENDPOINT").ok()?;
        let access_key_id = std::env::var("AWS_ACCESS_KEY_ID").ok()?;
        let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY").ok()?;
        let bucket = std::env::var("S3_BUCKET").unwrap_or_else(|_| "resumes".to_string());

        Some(StorageConfig {
            endpoint,
            access_key_id,
            secret_access_key,
            bucket,
        })
    }
}
