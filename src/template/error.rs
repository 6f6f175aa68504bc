use super::syntax::SyntaxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("template \"{0}\" does not exist")]
    TemplateDoesNotExist(String),

    #[error("template \"{identifier}\" could not be read")]
    Io {
        identifier: String,
        #[source]
        source: std::io::Error,
    },

    #[error("template \"{identifier}\": {source}")]
    Syntax {
        identifier: String,
        #[source]
        source: SyntaxError,
    },

    #[error("helper \"{0}\" is not defined")]
    UnknownHelper(String),

    #[error("serialization error")]
    SerializationError,

    #[error("failed to format a timestamp correctly, error: \"{0}\"")]
    TimeFormatError(#[from] time::error::Format),
}

impl Error {
    /// The identifier of the template the error occurred in, if the error
    /// is tied to one.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Error::TemplateDoesNotExist(identifier) => Some(identifier),
            Error::Io { identifier, .. } => Some(identifier),
            Error::Syntax { identifier, .. } => Some(identifier),
            _ => None,
        }
    }
}
