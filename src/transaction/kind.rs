//! What a transaction does, and the fields each kind contributes.
//!
//! Kinds form three layers. The base fields every transaction shares are
//! written by [`super::Transaction`]; a kind then writes its layer fields
//! (the reference or recurring layer) and finally its own concrete fields.
//! Keeping the two passes separate preserves the base, layer, concrete
//! order no matter how a kind is nested.

use crate::{
    context::{Context, ErrorObject},
    currency::Currency,
    data_objects::{CreditCard, RecurringInfo, RequestFragment},
    field_id::FieldId,
    request::RequestBuffer,
    transaction_type::TransactionType,
};

use super::TransactionError;

/// Amount of detail requested in the gateway's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Normalised result fields only.
    Low,
    /// Adds processor-level details.
    Medium,
    /// Everything the gateway can return.
    High,
}

impl Verbosity {
    /// Code sent as `VERBOSITY`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

/// Decision taken on a transaction held by fraud filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FraudAction {
    /// Release the transaction for settlement.
    Approve,
    /// Decline the transaction.
    Reject,
    /// Mark it reviewed without a decision.
    MarkReviewed,
}

impl FraudAction {
    /// Code sent as `UPDATEACTION`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Approve => "RMS_APPROVE",
            Self::Reject => "RMS_REJECT",
            Self::MarkReviewed => "RMS_MARKASREVIEWED",
        }
    }
}

/// Operation performed on an earlier transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Refund a settled transaction.
    Credit,
    /// Cancel an unsettled transaction.
    Void,
    /// Capture an authorisation.
    Capture {
        /// `false` leaves the authorisation open for further captures.
        capture_complete: Option<bool>,
    },
    /// Look up the transaction's status.
    Inquiry,
    /// Resolve a fraud-filter hold.
    FraudReview {
        /// Decision to apply.
        action: FraudAction,
    },
}

/// A transaction that refers to an earlier one by its gateway reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTransaction {
    /// `PNREF` of the original transaction.
    pub orig_id: String,
    /// PayPal reference of the original, for PayPal tenders.
    pub orig_ppref: Option<String>,
    /// Operation to perform.
    pub kind: ReferenceKind,
}

impl ReferenceTransaction {
    /// Refer to `orig_id`.
    #[must_use]
    pub fn new(orig_id: impl Into<String>, kind: ReferenceKind) -> Self {
        Self {
            orig_id: orig_id.into(),
            orig_ppref: None,
            kind,
        }
    }
}

/// Action applied to a recurring profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurringAction {
    /// Create a profile.
    Add,
    /// Change a profile.
    Modify,
    /// Cancel a profile.
    Cancel,
    /// Read a profile.
    Inquiry {
        /// Include the payment history in the reply.
        payment_history: Option<bool>,
    },
    /// Reactivate a cancelled or suspended profile.
    Reactivate,
    /// Retry a failed payment.
    Payment {
        /// Number of the payment to retry.
        payment_num: Option<u32>,
    },
}

impl RecurringAction {
    /// Code sent as `ACTION`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Add => "A",
            Self::Modify => "M",
            Self::Cancel => "C",
            Self::Inquiry { .. } => "I",
            Self::Reactivate => "R",
            Self::Payment { .. } => "P",
        }
    }
}

/// A recurring profile action with its profile settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringTransaction {
    /// What to do.
    pub action: RecurringAction,
    /// Profile settings sent after the action.
    pub info: RecurringInfo,
}

/// A 3-D Secure step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuyerAuthStep {
    /// Ask whether the card is enrolled.
    VerifyEnrollment {
        /// Card to check.
        card: CreditCard,
        /// Amount of the purchase being authenticated.
        amount: Option<Currency>,
    },
    /// Validate the issuer's authentication response.
    ValidateAuthentication {
        /// Payer authentication response returned by the issuer.
        pa_res: String,
    },
}

/// The operation a transaction performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    /// Authorise and capture.
    Sale,
    /// Authorise only.
    Authorization,
    /// Authorisation obtained by phone.
    VoiceAuthorization {
        /// Approval code read out by the issuer.
        auth_code: String,
    },
    /// Express checkout order.
    Order,
    /// Store card data for later reference transactions.
    DataUpload,
    /// Operation on an earlier transaction.
    Reference(ReferenceTransaction),
    /// Recurring profile action.
    Recurring(RecurringTransaction),
    /// 3-D Secure step.
    BuyerAuth(BuyerAuthStep),
}

impl TransactionKind {
    /// The `TRXTYPE` this kind is sent as.
    #[must_use]
    pub const fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Sale => TransactionType::Sale,
            Self::Authorization => TransactionType::Authorization,
            Self::VoiceAuthorization { .. } => TransactionType::VoiceAuthorization,
            Self::Order => TransactionType::Order,
            Self::DataUpload => TransactionType::DataUpload,
            Self::Reference(reference) => match reference.kind {
                ReferenceKind::Credit => TransactionType::Credit,
                ReferenceKind::Void => TransactionType::Void,
                ReferenceKind::Capture { .. } => TransactionType::DelayedCapture,
                ReferenceKind::Inquiry => TransactionType::Inquiry,
                ReferenceKind::FraudReview { .. } => TransactionType::FraudReview,
            },
            Self::Recurring(_) => TransactionType::Recurring,
            Self::BuyerAuth(BuyerAuthStep::VerifyEnrollment { .. }) => {
                TransactionType::BuyerAuthVerifyEnrollment
            }
            Self::BuyerAuth(BuyerAuthStep::ValidateAuthentication { .. }) => {
                TransactionType::BuyerAuthValidateAuthentication
            }
        }
    }

    /// Append the fields of the intermediate layer, if any.
    pub(crate) fn append_layer_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        match self {
            Self::Reference(reference) => {
                buf.append(FieldId::OrigId, &reference.orig_id)?;
                buf.append(FieldId::OrigPpRef, &reference.orig_ppref)?;
            }
            Self::Recurring(recurring) => {
                buf.append(FieldId::Action, recurring.action.code())?;
                recurring.info.append_fields(buf)?;
            }
            Self::Sale
            | Self::Authorization
            | Self::VoiceAuthorization { .. }
            | Self::Order
            | Self::DataUpload
            | Self::BuyerAuth(_) => {}
        }
        Ok(())
    }

    /// Append the fields specific to this kind.
    pub(crate) fn append_concrete_fields(
        &self,
        buf: &mut RequestBuffer,
    ) -> Result<(), TransactionError> {
        match self {
            Self::VoiceAuthorization { auth_code } => buf.append(FieldId::AuthCode, auth_code)?,
            Self::Reference(reference) => match &reference.kind {
                ReferenceKind::Capture { capture_complete } => {
                    buf.append(FieldId::CaptureComplete, capture_complete)?;
                }
                ReferenceKind::FraudReview { action } => {
                    buf.append(FieldId::UpdateAction, action.code())?;
                }
                ReferenceKind::Credit | ReferenceKind::Void | ReferenceKind::Inquiry => {}
            },
            Self::Recurring(recurring) => match &recurring.action {
                RecurringAction::Inquiry { payment_history } => {
                    buf.append(FieldId::PaymentHistory, payment_history)?;
                }
                RecurringAction::Payment { payment_num } => {
                    buf.append(FieldId::PaymentNum, payment_num)?;
                }
                RecurringAction::Add
                | RecurringAction::Modify
                | RecurringAction::Cancel
                | RecurringAction::Reactivate => {}
            },
            Self::BuyerAuth(BuyerAuthStep::VerifyEnrollment { card, amount }) => {
                card.append_fields(buf)?;
                buf.append(FieldId::Amt, amount)?;
                buf.append(FieldId::Currency, &amount.as_ref().map(Currency::code))?;
            }
            Self::BuyerAuth(BuyerAuthStep::ValidateAuthentication { pa_res }) => {
                buf.append(FieldId::PaRes, pa_res)?;
            }
            Self::Sale | Self::Authorization | Self::Order | Self::DataUpload => {}
        }
        Ok(())
    }

    /// Record problems with the kind's own fields.
    pub(crate) fn validate(&self, ctx: &mut Context) {
        match self {
            Self::VoiceAuthorization { auth_code } if auth_code.trim().is_empty() => {
                ctx.add_error(ErrorObject::fatal("voice authorization requires an approval code"));
            }
            Self::Reference(reference) if reference.orig_id.trim().is_empty() => {
                ctx.add_error(ErrorObject::fatal(format!(
                    "{} requires the original transaction id",
                    self.transaction_type()
                )));
            }
            Self::Recurring(recurring) => validate_recurring(recurring, ctx),
            Self::BuyerAuth(BuyerAuthStep::VerifyEnrollment { card, amount }) => {
                card.validate(ctx);
                if let Some(value) = amount {
                    value.validate(FieldId::Amt.as_str(), ctx);
                }
            }
            Self::BuyerAuth(BuyerAuthStep::ValidateAuthentication { pa_res })
                if pa_res.is_empty() =>
            {
                ctx.add_error(ErrorObject::fatal(
                    "authentication validation requires the issuer's PARes",
                ));
            }
            _ => {}
        }
    }
}

fn validate_recurring(recurring: &RecurringTransaction, ctx: &mut Context) {
    let info = &recurring.info;
    info.validate(ctx);
    match recurring.action {
        RecurringAction::Add => {
            if info.profile_name.as_deref().is_none_or(str::is_empty) {
                ctx.add_error(ErrorObject::fatal("a new profile requires a profile name"));
            }
            if info.start.is_none() {
                ctx.add_error(ErrorObject::fatal("a new profile requires a start date"));
            }
            if info.pay_period.is_none() {
                ctx.add_error(ErrorObject::fatal("a new profile requires a pay period"));
            }
            if info.orig_profile_id.is_some() {
                ctx.add_error(ErrorObject::warn(
                    "ORIGPROFILEID is only used when copying payment data from another profile",
                ));
            }
        }
        _ if info.orig_profile_id.as_deref().is_none_or(str::is_empty) => {
            ctx.add_error(ErrorObject::fatal(format!(
                "recurring action {} requires ORIGPROFILEID",
                recurring.action.code()
            )));
        }
        _ => {}
    }
}
