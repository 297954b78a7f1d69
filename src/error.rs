/// Error types for reelfind
///
/// Everything that can go wrong while loading the catalog or wiring the CLI.
/// Query resolution itself never fails: no-match and unparseable model output
/// are handled as normal control flow, not as errors.

use thiserror::Error;

/// Main error type for reelfind operations
#[derive(Error, Debug)]
pub enum ReelfindError {
    /// I/O errors (reading the catalog file, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog source missing or unparsable
    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    /// A single catalog entry failed validation
    #[error("Invalid catalog entry #{index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    /// Genre name outside the canonical tag set
    #[error("Unknown genre: {0}")]
    UnknownGenre(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// External text generator failed or timed out
    #[error("Generator error: {0}")]
    Generator(String),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for reelfind operations
pub type Result<T> = std::result::Result<T, ReelfindError>;

/// Convert ReelfindError to a user-friendly error message
impl ReelfindError {
    pub fn user_message(&self) -> String {
        match self {
            ReelfindError::Io(e) => {
                format!("File system error. Check the catalog path. Details: {}", e)
            }
            ReelfindError::CatalogLoad(msg) => {
                format!("Could not load the movie catalog: {}", msg)
            }
            ReelfindError::InvalidEntry { index, reason } => {
                format!("Catalog entry #{} is invalid: {}", index, reason)
            }
            ReelfindError::UnknownGenre(genre) => {
                format!("'{}' is not a known genre", genre)
            }
            ReelfindError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            ReelfindError::Generator(msg) => {
                format!("Recommendation service failed: {}", msg)
            }
            ReelfindError::Generic(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = ReelfindError::UnknownGenre("polka".to_string());
        assert!(err.user_message().contains("polka"));

        let err = ReelfindError::CatalogLoad("missing file".to_string());
        assert!(err.user_message().contains("catalog"));
    }

    #[test]
    fn test_error_display() {
        let err = ReelfindError::InvalidEntry {
            index: 3,
            reason: "empty title".to_string(),
        };
        let display = format!("{}", err);
        assert!(display.contains("#3"));
        assert!(display.contains("empty title"));
    }
}
