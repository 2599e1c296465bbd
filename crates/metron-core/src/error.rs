use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid cron pattern: {0}")]
    InvalidCronPattern(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
