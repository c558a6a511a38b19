use chanmap_core::{
    error::{ErrorClass, LoadError},
    query::LookupError,
};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable class taxonomy.
/// The message is the display form of the originating core error.
///

#[derive(Debug, ThisError)]
#[error("{class}: {message}")]
pub struct Error {
    pub class: ErrorClass,
    pub message: String,
}

impl Error {
    pub fn new(class: ErrorClass, message: impl Into<String>) -> Self {
        Self {
            class,
            message: message.into(),
        }
    }
}

impl From<LoadError> for Error {
    fn from(err: LoadError) -> Self {
        Self::new(err.class(), err.to_string())
    }
}

impl From<LookupError> for Error {
    fn from(err: LookupError) -> Self {
        Self::new(err.class(), err.to_string())
    }
}
