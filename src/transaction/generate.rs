//! Request generation.

use super::{Transaction, TransactionError, Verbosity};
use crate::{data_objects::RequestFragment, field_id::FieldId, request::RequestBuffer};

impl Transaction {
    /// Build the request string in its documented order: `TRXTYPE`,
    /// `VERBOSITY` and the leaf objects (invoice, tender, credentials, user
    /// items, buyer-auth status, extend data), then the fields of the
    /// reference or recurring layer, then the fields of the concrete kind.
    ///
    /// The result has no trailing delimiter.
    ///
    /// # Errors
    /// Returns [`TransactionError`] if a field cannot be encoded, such as an
    /// extend-data name containing a reserved character.
    pub fn generate_request(&self) -> Result<String, TransactionError> {
        let mut buf = RequestBuffer::new();
        self.append_base_fields(&mut buf)?;
        self.kind.append_layer_fields(&mut buf)?;
        self.kind.append_concrete_fields(&mut buf)?;
        Ok(buf.finish())
    }

    fn append_base_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        buf.append(FieldId::TrxType, self.transaction_type().code())?;
        buf.append(FieldId::Verbosity, &self.verbosity.map(Verbosity::code))?;
        self.invoice.append_fields(buf)?;
        self.tender.append_fields(buf)?;
        self.user_info.append_fields(buf)?;
        self.user_item.append_fields(buf)?;
        self.buyer_auth_status.append_fields(buf)?;
        self.extend_data.append_fields(buf)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;
    use rust_decimal::Decimal;

    use crate::{
        currency::Currency,
        data_objects::{CreditCard, ExtendData, Invoice, Tender, UserInfo},
        transaction::{Transaction, TransactionError, Verbosity},
    };

    #[rstest]
    fn base_fields_lead() {
        let trx = Transaction::sale(
            UserInfo::new("u", "v", "p", "pw"),
            Tender::card(CreditCard::new("4111111111111111", "1230")),
            Invoice::with_amount(Currency::new(Decimal::from_str("25.12").expect("decimal"))),
        )
        .with_verbosity(Verbosity::High);
        let request = trx.generate_request().expect("generate");
        assert!(request.starts_with("TRXTYPE[1]=S&VERBOSITY[4]=HIGH&AMT[5]=25.12&"));
        assert!(!request.ends_with('&'));
    }

    #[rstest]
    fn bad_extend_data_name_fails_generation() {
        let mut trx = Transaction::inquiry(UserInfo::new("u", "v", "p", "pw"), "V1");
        trx.add_extend_data(ExtendData::new("A=B", "x"));
        assert!(matches!(
            trx.generate_request(),
            Err(TransactionError::Request(_))
        ));
    }
}
