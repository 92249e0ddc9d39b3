use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub search: SearchConfig,
    pub harvest: HarvestConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub default_city: String,
    pub default_business: String,
    pub default_radius_meters: u32,
    pub photo_max_width: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HarvestConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig {
                default_city: "Barcelona".to_string(),
                default_business: "Restaurante".to_string(),
                default_radius_meters: 500,
                photo_max_width: 400,
            },
            harvest: HarvestConfig {
                timeout_seconds: 5,
                user_agent: "Mozilla/5.0 (compatible; BusinessExtractor/1.0)".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            output: OutputConfig {
                directory: "out".to_string(),
            },
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}

const SECRETS_FILE: &str = "secrets.yml";
const API_KEY_VAR: &str = "GOOGLE_API_KEY";

#[derive(Debug, Deserialize)]
struct Secrets {
    google_api_key: Option<String>,
}

fn read_secrets_file(path: &str) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let secrets: Secrets = serde_yaml::from_str(&content).ok()?;
    secrets.google_api_key.filter(|key| !key.is_empty())
}

/// Resolves the Google API key: the secrets file wins, the environment
/// variable is the fallback. Missing both halts the application before any
/// menu or server starts.
pub fn get_api_key() -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(key) = read_secrets_file(SECRETS_FILE) {
        return Ok(key);
    }

    if let Ok(key) = std::env::var(API_KEY_VAR) {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    Err("No se encontró la clave de API de Google. Por favor, configura la variable de entorno GOOGLE_API_KEY.".into())
}
