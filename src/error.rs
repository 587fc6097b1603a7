use std::fmt;

/// Central error types for the shop admin app
#[derive(Debug)]
pub enum AppError {
    /// Settings file could not be parsed
    Settings(toml::de::Error),
    /// Settings parsed but hold an unusable value
    Validation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Settings(e) => write!(f, "Settings error: {}", e),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        AppError::Settings(e)
    }
}
