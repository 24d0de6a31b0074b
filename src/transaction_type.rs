//! Transaction type codes sent as the `TRXTYPE` field.

use std::str::FromStr;

/// Operation requested from the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Authorise and capture in one step.
    Sale,
    /// Authorise only; funds are captured later.
    Authorization,
    /// Return funds to the payer.
    Credit,
    /// Cancel an unsettled transaction.
    Void,
    /// Capture a prior authorisation.
    DelayedCapture,
    /// Look up a prior transaction.
    Inquiry,
    /// Record an authorisation obtained by phone.
    VoiceAuthorization,
    /// Accept or reject a transaction held by fraud filters.
    FraudReview,
    /// Express checkout order.
    Order,
    /// Store card data without charging it.
    DataUpload,
    /// Recurring profile action.
    Recurring,
    /// 3-D Secure enrollment check.
    BuyerAuthVerifyEnrollment,
    /// 3-D Secure authentication validation.
    BuyerAuthValidateAuthentication,
}

impl TransactionType {
    /// Return the single-character code sent on the wire.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Sale => "S",
            Self::Authorization => "A",
            Self::Credit => "C",
            Self::Void => "V",
            Self::DelayedCapture => "D",
            Self::Inquiry => "I",
            Self::VoiceAuthorization => "F",
            Self::FraudReview => "U",
            Self::Order => "O",
            Self::DataUpload => "L",
            Self::Recurring => "R",
            Self::BuyerAuthVerifyEnrollment => "E",
            Self::BuyerAuthValidateAuthentication => "Z",
        }
    }
}

/// Returned when a code does not name a known transaction type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction type code {0:?}")]
pub struct UnknownTransactionType(pub String);

impl FromStr for TransactionType {
    type Err = UnknownTransactionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "S" => Self::Sale,
            "A" => Self::Authorization,
            "C" => Self::Credit,
            "V" => Self::Void,
            "D" => Self::DelayedCapture,
            "I" => Self::Inquiry,
            "F" => Self::VoiceAuthorization,
            "U" => Self::FraudReview,
            "O" => Self::Order,
            "L" => Self::DataUpload,
            "R" => Self::Recurring,
            "E" => Self::BuyerAuthVerifyEnrollment,
            "Z" => Self::BuyerAuthValidateAuthentication,
            other => return Err(UnknownTransactionType(other.to_owned())),
        })
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sale => f.write_str("Sale"),
            Self::Authorization => f.write_str("Authorization"),
            Self::Credit => f.write_str("Credit"),
            Self::Void => f.write_str("Void"),
            Self::DelayedCapture => f.write_str("DelayedCapture"),
            Self::Inquiry => f.write_str("Inquiry"),
            Self::VoiceAuthorization => f.write_str("VoiceAuthorization"),
            Self::FraudReview => f.write_str("FraudReview"),
            Self::Order => f.write_str("Order"),
            Self::DataUpload => f.write_str("DataUpload"),
            Self::Recurring => f.write_str("Recurring"),
            Self::BuyerAuthVerifyEnrollment => f.write_str("BuyerAuthVerifyEnrollment"),
            Self::BuyerAuthValidateAuthentication => {
                f.write_str("BuyerAuthValidateAuthentication")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(TransactionType::Sale, "S")]
    #[case(TransactionType::Order, "O")]
    #[case(TransactionType::BuyerAuthValidateAuthentication, "Z")]
    fn code_round_trips(#[case] ty: TransactionType, #[case] code: &str) {
        assert_eq!(ty.code(), code);
        assert_eq!(code.parse::<TransactionType>(), Ok(ty));
    }

    #[rstest]
    fn zero_is_not_an_order_code() {
        assert_eq!(
            "0".parse::<TransactionType>(),
            Err(UnknownTransactionType("0".to_owned()))
        );
    }
}
