use axum_helpers::{JwtConfig, normalize_api_prefix};
use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_parse_or, server::ServerConfig,
};
use database::mongodb::MongoConfig;
use domain_products::DEFAULT_MAX_UPLOAD_BYTES;
use std::path::PathBuf;

pub use core_config::Environment;

/// Where uploaded images land and how their URLs are built.
///
/// - `UPLOAD_DIR` (default: `public/uploads`)
/// - `PUBLIC_URL` (default: `http://localhost:<PORT>`)
/// - `MAX_UPLOAD_BYTES` (default: 5 MiB)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub public_url: String,
    pub max_bytes: usize,
}

impl UploadConfig {
    fn from_env(server: &ServerConfig) -> Result<Self, ConfigError> {
        let public_url = env_or_default("PUBLIC_URL", &format!("http://localhost:{}", server.port));
        let max_bytes = env_parse_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;
        if max_bytes == 0 {
            return Err(ConfigError::Invalid {
                key: "MAX_UPLOAD_BYTES".to_string(),
                details: "must be positive".to_string(),
            });
        }

        Ok(Self {
            dir: PathBuf::from(env_or_default("UPLOAD_DIR", "public/uploads")),
            public_url: public_url.trim_end_matches('/').to_string(),
            max_bytes,
        })
    }
}

/// Application configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    pub jwt: JwtConfig,
    /// Mount point of the REST API, `API_URL` (default: `/api/v1`)
    pub api_url: String,
    pub uploads: UploadConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let mongodb = MongoConfig::from_env()?.with_app_name(env!("CARGO_PKG_NAME"));
        let jwt = JwtConfig::from_env()?;
        let api_url = normalize_api_prefix(&env_or_default("API_URL", "/api/v1"))?;
        let uploads = UploadConfig::from_env(&server)?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            mongodb,
            jwt,
            api_url,
            uploads,
        })
    }
}
