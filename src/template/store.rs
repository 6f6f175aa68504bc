//! Loads raw template text from persistent storage.
//!
//! Identifiers map to disk paths by a fixed convention:
//! `<templates-root>/<identifier>.<extension>`. The store performs no
//! parsing and no caching; every load is a fresh read.
use super::Error;
use crate::config::get_config;

use std::path::{Path, PathBuf};
use tokio::fs::read_to_string;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct Store {
    root: PathBuf,
    extension: String,
}

impl Store {
    /// Store reading from the given directory with the default extension.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_owned(),
            extension: "mustache".into(),
        }
    }

    /// Store configured by `stencil.toml` (or defaults).
    pub fn from_config() -> Self {
        let config = get_config();

        Self {
            root: config.templates.clone(),
            extension: config.extension.clone(),
        }
    }

    pub fn extension(mut self, extension: &str) -> Self {
        self.extension = extension.to_string();
        self
    }

    fn path(&self, identifier: &str) -> PathBuf {
        self.root.join(format!("{}.{}", identifier, self.extension))
    }

    /// Read the raw text of a template.
    pub async fn load(&self, identifier: &str) -> Result<String, Error> {
        let path = self.path(identifier);

        debug!("loading template \"{}\" from {}", identifier, path.display());

        match read_to_string(&path).await {
            Ok(text) => Ok(text),

            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::TemplateDoesNotExist(identifier.to_string()))
            }

            Err(err) => Err(Error::Io {
                identifier: identifier.to_string(),
                source: err,
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempdir::TempDir;

    #[tokio::test]
    async fn test_load() -> Result<(), Error> {
        let dir = TempDir::new("stencil").unwrap();
        std::fs::write(dir.path().join("home.mustache"), "<h1>{{title}}</h1>").unwrap();

        let store = Store::new(dir.path());
        let text = store.load("home").await?;
        assert_eq!(text, "<h1>{{title}}</h1>");

        Ok(())
    }

    #[tokio::test]
    async fn test_not_found_names_identifier() {
        let dir = TempDir::new("stencil").unwrap();
        let store = Store::new(dir.path());

        let err = store.load("missing").await.unwrap_err();
        match err {
            Error::TemplateDoesNotExist(identifier) => assert_eq!(identifier, "missing"),
            err => panic!("expected NotFound, got {:?}", err),
        }
    }

    #[tokio::test]
    async fn test_custom_extension() -> Result<(), Error> {
        let dir = TempDir::new("stencil").unwrap();
        std::fs::write(dir.path().join("feed.xml"), "<feed/>").unwrap();

        let store = Store::new(dir.path()).extension("xml");
        assert_eq!(store.load("feed").await?, "<feed/>");

        Ok(())
    }
}
