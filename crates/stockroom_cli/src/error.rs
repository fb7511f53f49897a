//! CLI error type.
//!
//! Only failures that end the session live here; user input errors are
//! handled inside the prompt loops.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use stockroom_core::{DbError, ServiceError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub enum CliError {
    /// Terminal read/write failure.
    Io(io::Error),
    /// Standard input closed; treated as a request to quit.
    EndOfInput,
    /// Store could not be opened or initialized.
    Store(DbError),
    /// Non-recoverable service failure.
    Service(ServiceError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "terminal error: {err}"),
            Self::EndOfInput => write!(f, "end of input"),
            Self::Store(err) => write!(f, "could not open inventory store: {err}"),
            Self::Service(err) => write!(f, "inventory store failure: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::EndOfInput => None,
            Self::Store(err) => Some(err),
            Self::Service(err) => Some(err),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Store(value)
    }
}

impl From<ServiceError> for CliError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}
