use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreteError {
    #[error("Invalid value for {field}: {message}")]
    InvalidArgument { field: String, message: String },

    #[error("{message}")]
    Fetch { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl FreteError {
    pub fn invalid_argument(field: &str, message: impl Into<String>) -> Self {
        FreteError::InvalidArgument {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Raised when the carrier reply cannot be read as XML.
    pub fn fetch() -> Self {
        FreteError::Fetch {
            message: "there was an error fetching data; verify that all inputs are correct"
                .to_string(),
        }
    }

    /// Errors the caller can fix by changing the request or the config.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            FreteError::InvalidArgument { .. }
                | FreteError::ConfigValidation { .. }
                | FreteError::InvalidConfigValue { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FreteError>;
