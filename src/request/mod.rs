//! Encoding of transactions into the gateway's name/value-pair format.
//!
//! A request is a sequence of `NAME[len]=value` pairs joined by `&`. This
//! module owns the field-append utility, the shared [`RequestBuffer`], the
//! masking used for logs, and a length-aware decoder shared with response
//! parsing.

pub mod append;
pub mod buffer;
pub mod errors;
pub mod mask;
pub mod parse;

pub use append::{DELIMITER, FieldValue, append_to_request, validate_field_name};
pub use buffer::RequestBuffer;
pub use errors::RequestError;
pub use mask::{MASK, mask_sensitive_fields};
pub use parse::{NvpIter, decode_pairs};
