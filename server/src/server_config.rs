use config::{Config, ConfigError};
use lazy_static::lazy_static;
use serde::Deserialize;
use std::{env, path::Path, time::Duration};
use url::Url;

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    /// Upper bound on remote calls in flight for a single batch request.
    pub max_concurrency: usize,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    api: ApiConfig,
    model: ModelConfig,
    batch: BatchConfig,
}

#[derive(Debug)]
pub struct ServerConfig {
    pub api: ApiConfig,
    pub api_key: Option<String>,
    pub model: ModelConfig,
    pub batch: BatchConfig,
}

impl ServerConfig {
    /// Full generate-content URL for the configured model, without the key.
    pub fn endpoint(&self) -> Result<Url, url::ParseError> {
        generate_content_url(&self.api.base_url, &self.model.id)
    }
}

/// Appends the model path to `base_url`, keeping any path prefix it carries.
pub fn generate_content_url(base_url: &str, model_id: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base_url)?;
    let method = format!("{model_id}:generateContent");
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(["v1beta", "models", method.as_str()]);
    Ok(url)
}

impl std::fmt::Display for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Server Config:\n\nAPI: {:?}\nAPI key: {}\n\nModel Config: {:?}\n\nBatch Config: {:?}",
            self.api,
            if self.api_key.is_some() { "<set>" } else { "<missing>" },
            self.model,
            self.batch,
        )
    }
}

fn config_dir() -> String {
    env::var("APP_DIR").unwrap_or_else(|_| {
        let dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
        let dir = Path::new(&dir)
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or(dir);
        format!("{}/config", dir)
    })
}

pub fn load() -> Result<ServerConfig, ConfigError> {
    let path = format!("{}/config.toml", config_dir());
    let cfg_file: ConfigFile = Config::builder()
        .set_default("api.base_url", "https://generativelanguage.googleapis.com")?
        .set_default("api.timeout_secs", 30)?
        .set_default("model.id", "gemini-2.0-flash")?
        .set_default("batch.max_concurrency", 16)?
        .add_source(config::File::with_name(&path).required(false))
        .add_source(
            config::Environment::with_prefix("TAGGER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    let ConfigFile { api, model, batch } = cfg_file;
    let api_key = env::var(API_KEY_VAR).ok().filter(|k| !k.trim().is_empty());

    Ok(ServerConfig {
        api,
        api_key,
        model,
        batch,
    })
}

lazy_static! {
    pub static ref cfg: ServerConfig = load().expect("config.toml is invalid");
}
