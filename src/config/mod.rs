use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the upstream QC REST API, e.g. `http://localhost:5000/api`.
    pub upstream_base_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            upstream_base_url: env::var("QC_API_URL")?,
            host: env::var("QCDASH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("QCDASH_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        })
    }
}
