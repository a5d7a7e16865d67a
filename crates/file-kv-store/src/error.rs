//! Error types for the file key-value store

use std::fmt;

#[derive(Debug)]
pub enum FileStoreError {
    Io(Box<std::io::Error>),
    /// Stored bytes for a key are not valid UTF-8
    InvalidUtf8 { key: String },
}

impl fmt::Display for FileStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStoreError::Io(err) => write!(f, "IO error: {}", err),
            FileStoreError::InvalidUtf8 { key } => {
                write!(f, "Stored value for key {:?} is not valid UTF-8", key)
            }
        }
    }
}

impl std::error::Error for FileStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileStoreError::Io(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FileStoreError {
    fn from(err: std::io::Error) -> Self {
        FileStoreError::Io(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, FileStoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_utf8_display() {
        let err = FileStoreError::InvalidUtf8 {
            key: "UNITTEST.foo".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Stored value for key \"UNITTEST.foo\" is not valid UTF-8"
        );
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;

        let err: FileStoreError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into();
        assert!(format!("{}", err).contains("read-only"));
        assert!(err.source().is_some());
    }
}
