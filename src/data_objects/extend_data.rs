//! Caller-named fields for gateway features the SDK does not model.

use super::RequestFragment;
use crate::{
    context::{Context, ErrorObject},
    request::{RequestBuffer, validate_field_name},
    transaction::TransactionError,
};

/// A single extra name/value pair appended verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendData {
    /// Field name; must not contain `&`, `=`, `[` or `]`.
    pub name: String,
    /// Field value.
    pub value: String,
}

impl ExtendData {
    /// Create a pair.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl RequestFragment for ExtendData {
    fn append_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        buf.append_named(&self.name, &self.value)?;
        Ok(())
    }

    fn validate(&self, ctx: &mut Context) {
        if let Err(err) = validate_field_name(&self.name) {
            ctx.add_error(ErrorObject::fatal(err.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::request::RequestError;

    #[rstest]
    fn appends_named_pair() {
        let mut buf = RequestBuffer::new();
        ExtendData::new("MERCHDESCR", "Shop")
            .append_fields(&mut buf)
            .expect("append");
        assert_eq!(buf.as_str(), "MERCHDESCR[4]=Shop&");
    }

    #[rstest]
    #[case("BAD=NAME")]
    #[case("")]
    fn unusable_names_are_rejected(#[case] name: &str) {
        let data = ExtendData::new(name, "x");
        let mut buf = RequestBuffer::new();
        let err = data.append_fields(&mut buf).expect_err("name must be rejected");
        assert!(matches!(err, TransactionError::Request(_)));
        assert!(buf.is_empty());

        let mut ctx = Context::new();
        data.validate(&mut ctx);
        assert!(ctx.has_fatal());
    }

    #[rstest]
    fn reserved_name_error_names_the_field() {
        let err = validate_field_name("A&B").expect_err("reserved");
        assert_eq!(err, RequestError::ReservedCharInName("A&B".to_owned()));
    }
}
