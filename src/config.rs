use std::path::Path;
use std::{env, fs};

use serde::Deserialize;
use tracing::{info, warn};

/// Published demo key; real deployments set `TMDB_API_KEY` or `config.json`.
pub const DEFAULT_API_KEY: &str = "b5f2064412eb9f6aead2cb4f127f5b16";
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w342";

pub const API_KEY_ENV: &str = "TMDB_API_KEY";
const CONFIG_FILE: &str = "config.json";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_base: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    api_key: Option<String>,
    base_url: Option<String>,
    image_base: Option<String>,
}

/// Load `config.json` from the working directory, then let the
/// `TMDB_API_KEY` environment variable override the key from the file.
pub fn load_config() -> AppConfig {
    let mut cfg = load_config_file(Path::new(CONFIG_FILE));

    match env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => {
            cfg.api_key = key.trim().to_string();
            info!("Using API key from {API_KEY_ENV}");
        }
        _ => {}
    }

    cfg
}

fn load_config_file(path: &Path) -> AppConfig {
    let mut cfg = AppConfig::default();

    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str::<RawConfig>(&raw) {
            Ok(parsed) => {
                if let Some(key) = parsed.api_key {
                    if key.trim().is_empty() {
                        warn!("Empty `api_key` in {}; keeping default.", path.display());
                    } else {
                        cfg.api_key = key.trim().to_string();
                    }
                }
                if let Some(url) = parsed.base_url {
                    cfg.base_url = url.trim_end_matches('/').to_string();
                }
                if let Some(url) = parsed.image_base {
                    cfg.image_base = url.trim_end_matches('/').to_string();
                }
                info!("Loaded config from {}", path.display());
            }
            Err(err) => {
                warn!("Failed to parse {} ({}). Using defaults.", path.display(), err);
            }
        },
        Err(_) => {
            info!("No {} found; using defaults", path.display());
        }
    }

    cfg
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{load_config_file, AppConfig, DEFAULT_API_KEY, DEFAULT_BASE_URL};

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_file(&dir.path().join("config.json"));
        assert_eq!(cfg.api_key, DEFAULT_API_KEY);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn file_overrides_key_and_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            r#"{{"api_key": "abc123", "base_url": "https://proxy.example/3/"}}"#
        )
        .unwrap();

        let cfg = load_config_file(&path);
        assert_eq!(cfg.api_key, "abc123");
        // trailing slash is stripped so endpoint paths join cleanly
        assert_eq!(cfg.base_url, "https://proxy.example/3");
        assert_eq!(cfg.image_base, AppConfig::default().image_base);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        let cfg = load_config_file(&path);
        assert_eq!(cfg.api_key, DEFAULT_API_KEY);
    }
}
