//! Configuration module
//!
//! Environment-driven configuration for the API and services: server binding,
//! CORS, the artifact upload directory, generation backend settings, and the
//! optional keep-alive ping.

use std::env;

// Common constants
const DEFAULT_PORT: u16 = 2004;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,https://tiny-me.netlify.app";
const DEFAULT_UPLOAD_PATH: &str = "./uploads";
const DEFAULT_MAX_UPLOAD_MB: usize = 25;
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 120;
// Free-tier hosts spin idle services down; a 14-minute self-ping stays under
// the usual 15-minute idle window.
const DEFAULT_KEEP_ALIVE_INTERVAL_SECS: u64 = 14 * 60;
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-image-preview";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub upload_path: String,
    pub max_upload_bytes: usize,
    // Generation backend configuration
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub gemini_model: String,
    pub backend_timeout_secs: u64,
    // Keep-alive ping (disabled when unset)
    pub keep_alive_url: Option<String>,
    pub keep_alive_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // Load .env if present; ignore when absent (production sets real env vars)
        let _ = dotenvy::dotenv();

        let environment =
            env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let cors_origins = split_origins(
            &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
        );

        let max_upload_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_UPLOAD_MB);

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            upload_path: env::var("UPLOAD_PATH")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_PATH.to_string()),
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty()),
            gemini_api_base: env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            backend_timeout_secs: env::var("BACKEND_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_BACKEND_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_BACKEND_TIMEOUT_SECS),
            keep_alive_url: env::var("KEEP_ALIVE_URL").ok().filter(|s| !s.is_empty()),
            keep_alive_interval_secs: env::var("KEEP_ALIVE_INTERVAL_SECS")
                .unwrap_or_else(|_| DEFAULT_KEEP_ALIVE_INTERVAL_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_KEEP_ALIVE_INTERVAL_SECS),
        })
    }

    /// Fail-fast startup validation.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.gemini_api_key.is_none() {
            return Err(anyhow::anyhow!(
                "GEMINI_API_KEY must be set for the generation backend"
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn upload_path(&self) -> &str {
        &self.upload_path
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub fn keep_alive_url(&self) -> Option<&str> {
        self.keep_alive_url.as_deref()
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
