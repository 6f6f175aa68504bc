use once_cell::sync::OnceCell;
use std::env::var;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use thiserror::Error;
use tracing::info;

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Error, Debug)]
pub enum Error {
    #[error("config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config file not found")]
    Io(#[from] std::io::Error),

    #[error("config not found")]
    NoConfig,
}

/// Global configuration.
pub struct Config {
    path: Option<PathBuf>,
    pub templates: PathBuf,
    pub extension: String,
    pub root_path: String,
    pub tty: bool,
}

impl Default for Config {
    fn default() -> Self {
        let templates = match var("STENCIL_TEMPLATES") {
            Ok(templates) => templates,
            Err(_) => "templates".into(),
        };

        let root_path = match var("STENCIL_ROOT_PATH") {
            Ok(root_path) => root_path,
            Err(_) => "/".into(),
        };

        Self {
            path: None,
            templates: PathBuf::from(templates),
            extension: "mustache".into(),
            root_path,
            tty: std::io::stderr().is_terminal(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Config, Error> {
        let mut config = Config::default();
        let mut config_file = None;

        for name in ["stencil.toml", "Stencil.toml"] {
            let path = PathBuf::from(name);
            if path.exists() {
                config_file = Some(ConfigFile::load(name)?);
                config.path = Some(path);
                break;
            }
        }

        let config_file = match config_file {
            Some(config_file) => config_file,
            None => return Err(Error::NoConfig),
        };

        config.templates = PathBuf::from(config_file.general.templates);
        config.extension = config_file.general.extension;
        config.root_path = config_file.general.root_path;

        Ok(config)
    }

    pub fn get() -> &'static Config {
        get_config()
    }

    /// Path prefix for static assets, derived from the root path.
    pub fn static_path(&self) -> String {
        format!("{}static/", self.root_path)
    }

    pub fn log_info(&self) {
        if let Some(ref path) = self.path {
            info!("config loaded from {}", path.display());
        }
        info!("templates directory: {}", self.templates.display());
    }
}

pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| Config::load().unwrap_or_default())
}

#[derive(Serialize, Deserialize)]
struct ConfigFile {
    general: General,
}

impl ConfigFile {
    pub fn load(path: impl AsRef<Path>) -> Result<ConfigFile, Error> {
        let file = read_to_string(path)?;
        let config: Self = toml::from_str(&file)?;

        Ok(config)
    }
}

#[derive(Serialize, Deserialize)]
struct General {
    #[serde(default = "General::default_templates")]
    templates: String,
    #[serde(default = "General::default_extension")]
    extension: String,
    #[serde(default = "General::default_root_path")]
    root_path: String,
}

impl General {
    fn default_templates() -> String {
        "templates".into()
    }

    fn default_extension() -> String {
        "mustache".into()
    }

    fn default_root_path() -> String {
        "/".into()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.extension, "mustache");
        assert_eq!(config.static_path(), "/static/");
    }

    #[test]
    fn test_config_file_defaults() {
        let config: ConfigFile = toml::from_str("[general]\nroot_path = \"/app/\"\n").unwrap();
        assert_eq!(config.general.root_path, "/app/");
        assert_eq!(config.general.templates, "templates");
        assert_eq!(config.general.extension, "mustache");
    }
}
