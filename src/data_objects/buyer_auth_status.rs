//! Outcome of a completed 3-D Secure authentication, forwarded with the
//! payment it covers.

use super::RequestFragment;
use crate::{
    context::{Context, ErrorObject},
    field_id::FieldId,
    request::RequestBuffer,
    transaction::TransactionError,
};

/// Result reported by the card issuer's access control server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticationStatus {
    /// Buyer authenticated.
    Authenticated,
    /// Authentication failed.
    Failed,
    /// Authentication attempted but not completed.
    Attempted,
    /// Issuer could not authenticate.
    Unavailable,
    /// Authentication errored.
    Error,
}

impl AuthenticationStatus {
    /// Code sent as `AUTHENTICATION_STATUS`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Authenticated => "Y",
            Self::Failed => "N",
            Self::Attempted => "A",
            Self::Unavailable => "U",
            Self::Error => "E",
        }
    }
}

/// 3-D Secure values attached to an authorisation or sale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuyerAuthStatus {
    /// Id returned by the enrollment check.
    pub authentication_id: Option<String>,
    /// Authentication outcome.
    pub authentication_status: Option<AuthenticationStatus>,
    /// Cardholder authentication verification value.
    pub cavv: Option<String>,
    /// Electronic commerce indicator.
    pub eci: Option<String>,
    /// Transaction id assigned by the directory server.
    pub xid: Option<String>,
}

impl RequestFragment for BuyerAuthStatus {
    fn append_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        buf.append(FieldId::AuthenticationId, &self.authentication_id)?;
        buf.append(
            FieldId::AuthenticationStatus,
            &self.authentication_status.map(AuthenticationStatus::code),
        )?;
        buf.append(FieldId::Cavv, &self.cavv)?;
        buf.append(FieldId::Eci, &self.eci)?;
        buf.append(FieldId::Xid, &self.xid)?;
        Ok(())
    }

    fn validate(&self, ctx: &mut Context) {
        let needs_cavv = matches!(
            self.authentication_status,
            Some(AuthenticationStatus::Authenticated | AuthenticationStatus::Attempted)
        );
        if needs_cavv && self.cavv.as_deref().is_none_or(str::is_empty) {
            ctx.add_error(ErrorObject::error(
                "a successful authentication must carry its CAVV",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn status_fields() {
        let status = BuyerAuthStatus {
            authentication_status: Some(AuthenticationStatus::Authenticated),
            cavv: Some("OTIzNDU2".to_owned()),
            eci: Some("05".to_owned()),
            ..BuyerAuthStatus::default()
        };
        let mut buf = RequestBuffer::new();
        status.append_fields(&mut buf).expect("append");
        assert_eq!(
            buf.as_str(),
            "AUTHENTICATION_STATUS[1]=Y&CAVV[8]=OTIzNDU2&ECI[2]=05&"
        );
        let mut ctx = Context::new();
        status.validate(&mut ctx);
        assert!(!ctx.is_error_contained());
    }

    #[rstest]
    fn authenticated_without_cavv_is_an_error() {
        let status = BuyerAuthStatus {
            authentication_status: Some(AuthenticationStatus::Authenticated),
            ..BuyerAuthStatus::default()
        };
        let mut ctx = Context::new();
        status.validate(&mut ctx);
        assert_eq!(ctx.error_count(), 1);
    }
}
