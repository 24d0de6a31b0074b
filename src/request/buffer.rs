//! Append-only buffer that collects the fragments of one request.

use super::{
    RequestError,
    append::{DELIMITER, FieldValue, validate_field_name, write_field},
};
use crate::field_id::{FieldId, IndexedFieldId};

/// Ordered request fragments for a single transaction attempt.
///
/// Every component of a transaction writes into the same buffer, so the
/// finished request is a single linear sequence of pairs in the order the
/// components were visited.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RequestBuffer {
    buf: String,
}

impl RequestBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub const fn new() -> Self { Self { buf: String::new() } }

    /// Append a known field. Absent values are skipped.
    ///
    /// # Errors
    /// Propagates formatter failures.
    pub fn append<V: FieldValue + ?Sized>(&mut self, field: FieldId, value: &V) -> std::fmt::Result {
        write_field(&mut self.buf, field.as_str(), value)
    }

    /// Append entry `index` of a numbered field family such as `L_NAME`.
    ///
    /// # Errors
    /// Propagates formatter failures.
    pub fn append_indexed<V: FieldValue + ?Sized>(
        &mut self,
        field: IndexedFieldId,
        index: usize,
        value: &V,
    ) -> std::fmt::Result {
        write_field(&mut self.buf, &field.with_index(index), value)
    }

    /// Append a caller-named field after checking the name is transmittable.
    ///
    /// # Errors
    /// Returns [`RequestError::ReservedCharInName`] or
    /// [`RequestError::EmptyName`] for names the gateway cannot parse.
    pub fn append_named<V: FieldValue + ?Sized>(
        &mut self,
        name: &str,
        value: &V,
    ) -> Result<(), RequestError> {
        validate_field_name(name)?;
        // Formatting into a `String` is infallible.
        write_field(&mut self.buf, name, value).unwrap_or_default();
        Ok(())
    }

    /// Return `true` when nothing has been appended.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.buf.is_empty() }

    /// Borrow the raw contents, including any trailing delimiter.
    #[must_use]
    pub fn as_str(&self) -> &str { &self.buf }

    /// Discard all fragments so the buffer can be reused.
    pub fn clear(&mut self) { self.buf.clear(); }

    /// Consume the buffer and return the request with its single trailing
    /// delimiter removed.
    #[must_use]
    pub fn finish(mut self) -> String {
        if self.buf.ends_with(DELIMITER) {
            self.buf.pop();
        }
        self.buf
    }
}
