//! Error types for the selection engine.
//!
//! Geometry never fails: unusable boxes and unmeasured layouts degrade to
//! "no rect". Errors cover the workflow steps around it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The recognizer found nothing; the photo has to be retaken.
    #[error("no text recognized in photo")]
    EmptyRecognition,

    #[error("nothing selected to save")]
    NothingToSave,

    #[error("invalid config: {0}")]
    Config(String),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(ScanError::EmptyRecognition.to_string(), "no text recognized in photo");
        assert_eq!(
            ScanError::Config("sample_step must be positive".to_string()).to_string(),
            "invalid config: sample_step must be positive"
        );
    }

    #[test]
    fn test_io_error_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "config missing");
        let err: ScanError = io_err.into();
        assert!(matches!(err, ScanError::Io(_)));
        assert!(err.to_string().contains("config missing"));
    }
}
