use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnimalError {
    /// Caller handed in a record with no fields. Surfaced rather than
    /// swallowed: this is a programmer error, not an environment fault.
    #[error("nothing to save, record is empty")]
    EmptyRecord,

    #[error("no active MongoDB connection, check configuration and connectivity")]
    NotConnected,

    #[error("database error: {0}")]
    Database(String),
}

pub type AnimalResult<T> = Result<T, AnimalError>;

impl From<mongodb::error::Error> for AnimalError {
    fn from(err: mongodb::error::Error) -> Self {
        AnimalError::Database(err.to_string())
    }
}
