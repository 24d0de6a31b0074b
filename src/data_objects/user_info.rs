//! Merchant credentials.

use super::{RequestFragment, redacted};
use crate::{
    context::{Context, ErrorObject},
    field_id::FieldId,
    request::RequestBuffer,
    transaction::TransactionError,
};

/// Credentials identifying the merchant account.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UserInfo {
    /// Login user; equals `vendor` unless extra users are configured.
    pub user: String,
    /// Merchant login id.
    pub vendor: String,
    /// Reseller that registered the account.
    pub partner: String,
    /// Account password.
    pub password: String,
}

impl UserInfo {
    /// Create credentials from their four parts.
    #[must_use]
    pub fn new(
        user: impl Into<String>,
        vendor: impl Into<String>,
        partner: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            vendor: vendor.into(),
            partner: partner.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for UserInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInfo")
            .field("user", &self.user)
            .field("vendor", &self.vendor)
            .field("partner", &self.partner)
            .field("password", &redacted(&self.password))
            .finish()
    }
}

impl RequestFragment for UserInfo {
    fn append_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        buf.append(FieldId::User, &self.user)?;
        buf.append(FieldId::Vendor, &self.vendor)?;
        buf.append(FieldId::Partner, &self.partner)?;
        buf.append(FieldId::Pwd, &self.password)?;
        Ok(())
    }

    fn validate(&self, ctx: &mut Context) {
        let parts = [
            (FieldId::User, &self.user),
            (FieldId::Vendor, &self.vendor),
            (FieldId::Partner, &self.partner),
            (FieldId::Pwd, &self.password),
        ];
        for (field, value) in parts {
            if value.is_empty() {
                ctx.add_error(ErrorObject::warn(format!("credential {field} is empty")));
            }
        }
    }
}
