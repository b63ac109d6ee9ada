//! Error types for DocMeta.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Keyword extraction error: {0}")]
    Keyword(String),

    #[error("Entity recognizer error: {0}")]
    Recognizer(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn read_missing() -> Result<String> {
        Ok(std::fs::read_to_string("/nonexistent/docmeta/file.txt")?)
    }

    #[test]
    fn test_io_errors_convert() {
        let err = read_missing().unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().starts_with("IO error: "));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::UnsupportedFileType("doc".into()).to_string(),
            "Unsupported file type: doc"
        );
        assert_eq!(Error::Config("bad".into()).to_string(), "Configuration error: bad");
    }
}
