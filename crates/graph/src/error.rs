use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Duplicate location: {0}")]
    DuplicateLocation(String),

    #[error("Invalid average speed: {0} km/h")]
    InvalidSpeed(u32),

    #[error("Seed error: {0}")]
    SeedError(String),
}
