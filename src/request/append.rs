//! The field-append utility.
//!
//! Every pair on the wire is `NAME[len]=value&`, where `len` counts the UTF-8
//! bytes of `value`. The length clause lets the gateway read values that
//! contain the delimiter. Absent values produce no pair at all.

use std::{borrow::Cow, fmt::Write};

/// Separates pairs in a request string.
pub const DELIMITER: char = '&';

/// Characters that may never appear in a field name.
pub const RESERVED: [char; 4] = [DELIMITER, '=', '[', ']'];

/// A value that can be written as a request field.
///
/// Returning `None` means the field is semantically absent and must be
/// omitted from the request.
pub trait FieldValue {
    /// Text to transmit, or `None` to omit the field.
    fn wire_value(&self) -> Option<Cow<'_, str>>;
}

impl FieldValue for str {
    fn wire_value(&self) -> Option<Cow<'_, str>> {
        (!self.is_empty()).then_some(Cow::Borrowed(self))
    }
}

impl FieldValue for String {
    fn wire_value(&self) -> Option<Cow<'_, str>> { self.as_str().wire_value() }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn wire_value(&self) -> Option<Cow<'_, str>> { (**self).wire_value() }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn wire_value(&self) -> Option<Cow<'_, str>> { self.as_ref().and_then(FieldValue::wire_value) }
}

impl FieldValue for bool {
    fn wire_value(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(if *self { "Y" } else { "N" }))
    }
}

macro_rules! integer_field_value {
    ($($ty:ty),+) => {
        $(
            impl FieldValue for $ty {
                fn wire_value(&self) -> Option<Cow<'_, str>> { Some(Cow::Owned(self.to_string())) }
            }
        )+
    };
}

integer_field_value!(u8, u16, u32, u64, usize, i32, i64);

/// Write one `name[len]=value&` pair into `out`.
///
/// Nothing is written when `value` is absent.
///
/// # Errors
/// Propagates formatter failures from `out`.
pub fn write_field<W, V>(out: &mut W, name: &str, value: &V) -> std::fmt::Result
where
    W: Write + ?Sized,
    V: FieldValue + ?Sized,
{
    match value.wire_value() {
        Some(text) => write!(out, "{name}[{}]={text}{DELIMITER}", text.len()),
        None => Ok(()),
    }
}

/// Return the request fragment for one field, or an empty string when the
/// value is absent.
///
/// `name` must be free of [`RESERVED`] characters; names from
/// [`crate::field_id::FieldId`] always are.
#[must_use]
pub fn append_to_request<V: FieldValue + ?Sized>(name: &str, value: &V) -> String {
    let mut fragment = String::new();
    // Writing into a `String` cannot fail.
    if write_field(&mut fragment, name, value).is_err() {
        fragment.clear();
    }
    fragment
}

/// Check that `name` can be transmitted as a field name.
///
/// # Errors
/// Returns [`super::RequestError::ReservedCharInName`] when the name contains
/// a reserved character, or [`super::RequestError::EmptyName`] when it is
/// empty.
pub fn validate_field_name(name: &str) -> Result<(), super::RequestError> {
    if name.is_empty() {
        return Err(super::RequestError::EmptyName(0));
    }
    if name.contains(RESERVED) {
        return Err(super::RequestError::ReservedCharInName(name.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("ACCT", "4111111111111111", "ACCT[16]=4111111111111111&")]
    #[case("COMMENT1", "fish & chips", "COMMENT1[12]=fish & chips&")]
    #[case("NAME", "Zoë", "NAME[4]=Zoë&")]
    #[case("DESC", "日本", "DESC[6]=日本&")]
    fn fragments_carry_byte_length(#[case] name: &str, #[case] value: &str, #[case] expected: &str) {
        assert_eq!(append_to_request(name, value), expected);
    }

    #[rstest]
    fn absent_values_are_omitted() {
        assert_eq!(append_to_request("AMT", ""), "");
        assert_eq!(append_to_request("AMT", &None::<String>), "");
        assert_eq!(append_to_request("AMT", &Some(String::new())), "");
    }

    #[rstest]
    fn flags_and_integers() {
        assert_eq!(append_to_request("CAPTURECOMPLETE", &true), "CAPTURECOMPLETE[1]=Y&");
        assert_eq!(append_to_request("TERM", &12u32), "TERM[2]=12&");
        assert_eq!(append_to_request("TERM", &None::<u32>), "");
    }

    #[rstest]
    #[case("EXT&1")]
    #[case("A=B")]
    #[case("L[0]")]
    fn reserved_names_rejected(#[case] name: &str) {
        assert!(matches!(
            validate_field_name(name),
            Err(super::super::RequestError::ReservedCharInName(_))
        ));
    }
}
