//! Error type shared by the dataset, file format and evaluation modules.

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The set file has an unknown extension, a wrong version marker or a malformed record.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// A tour is not a permutation of `0..n`.
    #[error("Invalid tour at batch position {position}: {reason}")]
    InvalidTour { position: usize, reason: String },

    #[error("index {index} out of range for dataset of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("batch holds {instances} instances but {tours} tours were given")]
    BatchMismatch { instances: usize, tours: usize },

    #[error("instance {position} has {found} points, expected {expected}")]
    InconsistentSize {
        expected: usize,
        found: usize,
        position: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat(message.into())
    }

    pub fn invalid_tour(position: usize, reason: impl Into<String>) -> Self {
        Self::InvalidTour {
            position,
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => Error::Io(io),
                other => Error::InvalidFormat(format!("{:?}", other)),
            }
        } else {
            Error::InvalidFormat(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::InvalidFormat(err.to_string())
        }
    }
}
