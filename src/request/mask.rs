//! Redaction of sensitive values in request strings.
//!
//! Masked strings are for logs and error echoes only; the wire payload is
//! never masked.

use tracing::warn;

use super::{append::write_field, parse::NvpIter};
use crate::field_id::FieldId;

/// Replacement written in place of every sensitive value.
pub const MASK: &str = "XXXXXXXXXXXXXXXX";

/// Fields whose values never appear in masked output.
pub const SENSITIVE_FIELDS: [FieldId; 5] = [
    FieldId::Acct,
    FieldId::Pwd,
    FieldId::Cvv2,
    FieldId::Swipe,
    FieldId::Micr,
];

fn is_sensitive(name: &str) -> bool {
    FieldId::from_wire(name).is_some_and(|field| SENSITIVE_FIELDS.contains(&field))
}

/// Return a copy of `request` with sensitive values replaced by [`MASK`].
///
/// Pairs are re-encoded with length clauses that match the masked values.
/// A string that cannot be decoded is withheld entirely, since its
/// sensitive values cannot be located reliably.
#[must_use]
pub fn mask_sensitive_fields(request: &str) -> String {
    let mut masked = String::with_capacity(request.len());
    let mut iter = NvpIter::new(request);
    for (name, value) in iter.by_ref() {
        let shown = if is_sensitive(name) && !value.is_empty() { MASK } else { value };
        // Formatting into a `String` is infallible.
        write_field(&mut masked, name, shown).unwrap_or_default();
    }
    if let Err(err) = iter.finish() {
        warn!(%err, "request could not be decoded for masking");
        return MASK.to_owned();
    }
    if masked.ends_with(super::DELIMITER) {
        masked.pop();
    }
    masked
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn masks_card_and_password() {
        let request = "TRXTYPE[1]=S&ACCT[16]=4111111111111111&PWD[6]=s3cr3t&CVV2[3]=123&AMT[5]=25.12";
        assert_eq!(
            mask_sensitive_fields(request),
            "TRXTYPE[1]=S&ACCT[16]=XXXXXXXXXXXXXXXX&PWD[16]=XXXXXXXXXXXXXXXX&\
             CVV2[16]=XXXXXXXXXXXXXXXX&AMT[5]=25.12"
        );
    }

    #[rstest]
    fn leaves_other_fields_alone() {
        let request = "TRXTYPE[1]=C&ORIGID[12]=V64A0A07BD24";
        assert_eq!(mask_sensitive_fields(request), request);
    }

    #[rstest]
    fn undecodable_input_is_withheld() {
        assert_eq!(mask_sensitive_fields("ACCT[99]=4111"), MASK);
    }
}
