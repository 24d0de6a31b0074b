//! Error accumulation for one transaction attempt.
//!
//! Every component of a transaction reports problems into a [`Context`]
//! rather than failing outright. The submit path inspects the highest
//! severity collected so far and skips the network call when it is
//! [`Severity::Fatal`].

use std::collections::HashSet;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::{field_id::FieldId, request::append_to_request};

/// Result codes produced locally by the SDK. The gateway uses non-negative
/// codes; local failures are negative so callers can tell them apart.
pub mod result_code {
    /// Could not connect to the gateway.
    pub const CONNECT_FAILED: i32 = -1;
    /// The gateway did not answer within the configured timeout.
    pub const TIMEOUT: i32 = -12;
    /// The configured proxy could not be used.
    pub const PROXY_FAILED: i32 = -20;
    /// Unexpected internal failure while building the request.
    pub const INTERNAL: i32 = -99;
    /// Local validation rejected the transaction.
    pub const VALIDATION: i32 = -100;
    /// The gateway reply could not be read or decoded.
    pub const BAD_RESPONSE: i32 = -103;
    /// The gateway answered with a non-success HTTP status.
    pub const HTTP_STATUS: i32 = -104;
}

/// How serious an [`ErrorObject`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Informational note.
    Info,
    /// Suspicious input the gateway may still accept.
    Warn,
    /// Invalid input; submission still proceeds.
    Error,
    /// Submission must not reach the network.
    Fatal,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        })
    }
}

/// One problem recorded against a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorObject {
    severity: Severity,
    result: i32,
    message: String,
}

impl ErrorObject {
    /// Create an error with an explicit result code.
    #[must_use]
    pub fn new(severity: Severity, result: i32, message: impl Into<String>) -> Self {
        Self {
            severity,
            result,
            message: message.into(),
        }
    }

    /// Create a fatal validation error.
    #[must_use]
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, result_code::VALIDATION, message)
    }

    /// Create a non-fatal validation error.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, result_code::VALIDATION, message)
    }

    /// Create a validation warning.
    #[must_use]
    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(Severity::Warn, result_code::VALIDATION, message)
    }

    /// Severity of the error.
    #[must_use]
    pub const fn severity(&self) -> Severity { self.severity }

    /// Result code reported for the error.
    #[must_use]
    pub const fn result(&self) -> i32 { self.result }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str { &self.message }

    /// Emit the error as a tracing event at a level matching its severity.
    pub fn log(&self) {
        match self.severity {
            Severity::Info => info!(result = self.result, "{}", self.message),
            Severity::Warn => warn!(result = self.result, "{}", self.message),
            Severity::Error | Severity::Fatal => error!(
                result = self.result,
                severity = %self.severity,
                "{}",
                self.message
            ),
        }
    }
}

/// Renders the error in the gateway's reply format, so a locally
/// synthesised reply decodes like a real one.
impl std::fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let result = append_to_request(FieldId::Result.as_str(), &self.result);
        let message = append_to_request(FieldId::RespMsg.as_str(), &self.message);
        let text = format!("{result}{message}");
        f.write_str(text.strip_suffix(crate::request::DELIMITER).unwrap_or(&text))
    }
}

/// Ordered list of errors collected during one transaction attempt.
///
/// A context is not shared across transactions; concurrent submissions each
/// own their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Context {
    errors: Vec<ErrorObject>,
    load_logger_errors: bool,
}

impl Context {
    /// Create an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            load_logger_errors: false,
        }
    }

    /// Append one error. Duplicates are kept.
    pub fn add_error(&mut self, err: ErrorObject) {
        if self.load_logger_errors {
            err.log();
        }
        self.errors.push(err);
    }

    /// Append several errors in order.
    pub fn add_errors<I>(&mut self, errs: I)
    where
        I: IntoIterator<Item = ErrorObject>,
    {
        for err in errs {
            self.add_error(err);
        }
    }

    /// All errors in the order they were added.
    #[must_use]
    pub fn errors(&self) -> &[ErrorObject] { &self.errors }

    /// Errors of exactly `severity`, in order.
    pub fn errors_with_severity(&self, severity: Severity) -> impl Iterator<Item = &ErrorObject> {
        self.errors.iter().filter(move |err| err.severity == severity)
    }

    /// First error of exactly `severity`.
    #[must_use]
    pub fn first_error(&self, severity: Severity) -> Option<&ErrorObject> {
        self.errors_with_severity(severity).next()
    }

    /// Return `true` when any error has been recorded.
    #[must_use]
    pub fn is_error_contained(&self) -> bool { !self.errors.is_empty() }

    /// Number of recorded errors.
    #[must_use]
    pub fn error_count(&self) -> usize { self.errors.len() }

    /// Highest severity currently recorded, or `None` when empty.
    #[must_use]
    pub fn highest_error_level(&self) -> Option<Severity> {
        self.errors.iter().map(ErrorObject::severity).max()
    }

    /// Return `true` when a fatal error has been recorded.
    #[must_use]
    pub fn has_fatal(&self) -> bool { self.highest_error_level() == Some(Severity::Fatal) }

    /// Remove every recorded error.
    pub fn clear_errors(&mut self) { self.errors.clear(); }

    /// Drop exact repeats, keeping the first occurrence of each error in
    /// its original position.
    pub fn dedup(&mut self) {
        let mut seen = HashSet::new();
        self.errors.retain(|err| seen.insert(err.clone()));
    }

    /// Whether errors are logged as they are added.
    #[must_use]
    pub const fn load_logger_errors(&self) -> bool { self.load_logger_errors }

    /// Log errors as they are added.
    pub const fn set_load_logger_errors(&mut self, enabled: bool) {
        self.load_logger_errors = enabled;
    }

    /// Emit every recorded error as a tracing event.
    pub fn log_errors(&self) {
        for err in &self.errors {
            err.log();
        }
    }
}
