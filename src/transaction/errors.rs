//! Error type for the transaction layer.

use std::error::Error as StdError;

use thiserror::Error;

use crate::{
    connection::TransportError,
    context::{ErrorObject, Severity, result_code},
    request::RequestError,
};

/// Errors raised while generating or submitting a transaction.
///
/// SDK errors are carried as their own variants. Anything else is wrapped
/// once in [`TransactionError::Generation`] with the original as its source.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// A field could not be encoded.
    #[error(transparent)]
    Request(#[from] RequestError),
    /// The connection layer failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// An unexpected failure from outside the SDK, raised while
    /// generating or sending a request.
    #[error("transaction failed: {source}")]
    Generation {
        /// The original failure.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl TransactionError {
    /// Wrap an arbitrary error, passing SDK errors through unchanged.
    #[must_use]
    pub fn wrap<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let boxed: Box<dyn StdError + Send + Sync> = Box::new(err);
        let not_own = match boxed.downcast::<Self>() {
            Ok(own) => return *own,
            Err(rest) => rest,
        };
        let not_request = match not_own.downcast::<RequestError>() {
            Ok(request) => return Self::Request(*request),
            Err(rest) => rest,
        };
        match not_request.downcast::<TransportError>() {
            Ok(transport) => Self::Transport(*transport),
            Err(source) => Self::Generation { source },
        }
    }

    /// Convert into the fatal context entry recorded by submission.
    #[must_use]
    pub fn to_error_object(&self) -> ErrorObject {
        match self {
            Self::Request(err) => {
                ErrorObject::new(Severity::Fatal, result_code::VALIDATION, err.to_string())
            }
            Self::Transport(err) => err.to_error_object(),
            Self::Generation { .. } => {
                ErrorObject::new(Severity::Fatal, result_code::INTERNAL, self.to_string())
            }
        }
    }
}

impl From<std::fmt::Error> for TransactionError {
    fn from(err: std::fmt::Error) -> Self { Self::wrap(err) }
}
