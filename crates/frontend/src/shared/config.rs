use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Origin of the analysis service. Empty means same origin as the page.
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""

[logging]
level = "debug"
"#;

/// Load configuration
///
/// Order:
/// 1. Embedded default config
/// 2. `ANALYSIS_API_URL` captured at build time overrides `api.base_url`
pub fn load_config() -> Result<Config, toml::de::Error> {
    let mut config: Config = toml::from_str(DEFAULT_CONFIG)?;
    if let Some(url) = option_env!("ANALYSIS_API_URL") {
        config.api.base_url = url.to_string();
    }
    config.api.base_url = normalize_base_url(&config.api.base_url);
    Ok(config)
}

/// Strip trailing slashes and a trailing `/api` segment.
///
/// Request paths already start with `/api/`, so a base like
/// `https://host/api/` would otherwise produce `.../api/api/...` (404).
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let without_api = trimmed.strip_suffix("/api").unwrap_or(trimmed);
    without_api.trim_end_matches('/').to_string()
}

impl LoggingConfig {
    /// Parsed level, `Debug` when the value is not recognised
    pub fn level(&self) -> log::Level {
        self.level.parse().unwrap_or(log::Level::Debug)
    }
}
