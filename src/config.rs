use serde::Deserialize;
use std::path::Path;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub debug: bool,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: ConfigDefaults,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigDefaults {
    base_url: Option<String>,
    timeout_ms: Option<u64>,
}

impl AppConfig {
    pub fn load(base_url: Option<String>, timeout_ms: Option<u64>, debug: bool) -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("minne-cli");

        let file_config = load_config_file(&config_dir);

        // Priority: CLI flags → env vars → config file → defaults
        let base_url_env = std::env::var("MINNE_BASE_URL").ok();
        let timeout_env = std::env::var("MINNE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok());

        let base_url = base_url
            .or(base_url_env)
            .or(file_config.defaults.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_ms = timeout_ms
            .or(timeout_env)
            .or(file_config.defaults.timeout_ms)
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        AppConfig {
            base_url,
            timeout_ms,
            debug,
        }
    }
}

fn load_config_file(config_dir: &Path) -> ConfigFile {
    let config_path = config_dir.join("config.toml");
    if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => ConfigFile::default(),
        }
    } else {
        ConfigFile::default()
    }
}
