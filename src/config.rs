use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

fn default_bind() -> String {
    "[::]:4000".into()
}

fn default_workers() -> usize {
    4
}

fn default_connection_rate() -> usize {
    256
}

fn default_enable_compression() -> bool {
    false
}

fn default_store_uri() -> String {
    "mongodb://127.0.0.1:27017/bookstore".into()
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    #[serde(default = "default_bind")]
    pub(crate) bind: String,
    #[serde(default = "default_workers")]
    pub(crate) workers: usize,
    #[serde(default = "default_connection_rate")]
    pub(crate) max_connection_rate: usize,

    #[serde(default = "default_enable_compression")]
    pub(crate) enable_compression: bool,

    #[serde(default = "default_store_uri")]
    pub(crate) store_uri: String,
}

impl Config {
    fn from_file(settings_file: &Path) -> Result<Config> {
        let contents = read_to_string(settings_file).map_err(|e| ConfigError::ReadFile {
            path: settings_file.display().to_string(),
            source: e,
        })?;
        Config::parse(&contents)
    }

    fn parse(contents: &str) -> Result<Config> {
        Ok(toml::from_str(contents).map_err(ConfigError::from)?)
    }
}

pub(crate) fn load() -> Result<Config> {
    load_with(
        std::env::var("CONFIG_FILE").ok(),
        std::env::var("MONGO_URI").ok(),
    )
}

fn load_with(settings_file: Option<String>, store_uri_override: Option<String>) -> Result<Config> {
    let mut settings = match settings_file {
        None => {
            if Path::new("settings.toml").exists() {
                Config::from_file(Path::new("settings.toml"))?
            } else {
                Config::parse("")?
            }
        }
        Some(settings_file) => Config::from_file(Path::new(&settings_file))?,
    };

    if settings.workers == 0 {
        return Err(ConfigError::Invalid {
            reason: "workers must be greater than 0".to_string(),
        }
        .into());
    }

    if let Some(store_uri) = store_uri_override {
        settings.store_uri = store_uri;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_settings_are_empty() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.bind, "[::]:4000");
        assert_eq!(config.workers, 4);
        assert_eq!(config.max_connection_rate, 256);
        assert!(!config.enable_compression);
        assert_eq!(config.store_uri, "mongodb://127.0.0.1:27017/bookstore");
    }

    #[test]
    fn settings_override_defaults() {
        let config = Config::parse(
            r#"
bind = "127.0.0.1:8080"
workers = 2
enable_compression = true
store_uri = "mongodb://db.example:27017/library"
"#,
        )
        .unwrap();
        assert_eq!(config.bind, "127.0.0.1:8080");
        assert_eq!(config.workers, 2);
        assert!(config.enable_compression);
        assert_eq!(config.store_uri, "mongodb://db.example:27017/library");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("daemon_socket = \"/run/store.sock\"").is_err());
    }

    #[test]
    fn mongo_uri_override_beats_the_settings_file() {
        use std::io::Write;

        let mut settings = tempfile::NamedTempFile::new().unwrap();
        write!(settings, "store_uri = \"mongodb://file.example:27017/fromfile\"").unwrap();
        settings.flush().unwrap();
        let path = settings.path().to_str().unwrap().to_string();

        let config = load_with(
            Some(path.clone()),
            Some("mongodb://env.example:27017/fromenv".into()),
        )
        .unwrap();
        assert_eq!(config.store_uri, "mongodb://env.example:27017/fromenv");

        // Without the override the file's value stands.
        let config = load_with(Some(path), None).unwrap();
        assert_eq!(config.store_uri, "mongodb://file.example:27017/fromfile");
    }

    #[test]
    fn zero_workers_is_rejected() {
        use std::io::Write;

        let mut settings = tempfile::NamedTempFile::new().unwrap();
        write!(settings, "workers = 0").unwrap();
        settings.flush().unwrap();

        let result = load_with(Some(settings.path().to_str().unwrap().to_string()), None);
        assert!(result.is_err());
    }
}
