//! Leaf value objects that make up a transaction.
//!
//! Each object owns one cluster of request fields and knows how to append
//! them to a [`RequestBuffer`] and how to report its own problems into a
//! [`Context`]. None of them is ever submitted on its own.

pub mod buyer_auth_status;
pub mod client_info;
pub mod extend_data;
pub mod invoice;
pub mod recurring_info;
pub mod tender;
pub mod user_info;
pub mod user_item;

pub use buyer_auth_status::{AuthenticationStatus, BuyerAuthStatus};
pub use client_info::ClientInfo;
pub use extend_data::ExtendData;
pub use invoice::{Address, AddressKind, BrowserInfo, CustomerInfo, Invoice, LineItem};
pub use recurring_info::{OptionalTrx, PayPeriod, RecurringInfo};
pub use tender::{
    AchTender,
    BankAccount,
    BankAccountType,
    CardDevice,
    CheckTender,
    CreditCard,
    ExpressCheckout,
    PayPalTender,
    SwipeCard,
    Tender,
};
pub use user_info::UserInfo;
pub use user_item::UserItem;

use crate::{context::Context, request::RequestBuffer, transaction::TransactionError};

/// A component that contributes fields to a request.
pub trait RequestFragment {
    /// Append this component's fields, in their documented order.
    ///
    /// # Errors
    /// Returns an error if a field cannot be encoded.
    fn append_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError>;

    /// Record problems with this component's values.
    fn validate(&self, _ctx: &mut Context) {}
}

impl<T: RequestFragment> RequestFragment for Option<T> {
    fn append_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        match self {
            Some(inner) => inner.append_fields(buf),
            None => Ok(()),
        }
    }

    fn validate(&self, ctx: &mut Context) {
        if let Some(inner) = self {
            inner.validate(ctx);
        }
    }
}

impl<T: RequestFragment> RequestFragment for Vec<T> {
    fn append_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        self.iter().try_for_each(|item| item.append_fields(buf))
    }

    fn validate(&self, ctx: &mut Context) {
        for item in self {
            item.validate(ctx);
        }
    }
}

/// Placeholder printed by `Debug` impls in place of secrets.
pub(crate) const fn redacted(value: &str) -> &'static str {
    if value.is_empty() { "" } else { "<redacted>" }
}

/// Return `true` when `value` is non-empty and made only of ASCII digits.
pub(crate) fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
