//! Pre-flight validation and context alignment.

use tracing::debug;

use super::{
    Transaction,
    TransactionKind,
    kind::{BuyerAuthStep, RecurringAction},
};
use crate::{
    context::{Context, ErrorObject},
    data_objects::{RecurringInfo, RequestFragment, Tender},
};

impl Transaction {
    /// Check the transaction and its leaf objects, then reset the context to
    /// exactly the errors that currently apply.
    ///
    /// The new context holds the errors the caller added since the last
    /// submission, followed by this check's findings, with exact repeats
    /// removed. Findings from an earlier check are recomputed rather than
    /// kept, so a corrected value no longer reports.
    pub fn validate(&mut self) {
        let added = self
            .context
            .errors()
            .get(self.caller_mark..)
            .unwrap_or_else(|| self.context.errors());
        self.caller_errors.extend_from_slice(added);

        let mut found = Context::new();
        found.add_errors(self.caller_errors.iter().cloned());
        found.set_load_logger_errors(self.context.load_logger_errors());
        self.collect_errors(&mut found);
        found.dedup();
        self.context = found;
        self.caller_mark = self.context.error_count();
        debug!(
            trx_type = self.transaction_type().code(),
            errors = self.context.error_count(),
            highest = ?self.context.highest_error_level(),
            "validated transaction"
        );
    }

    /// Close the current attempt: everything now in the context belongs to
    /// it, and the next attempt starts from a clean slate.
    pub(super) fn end_attempt(&mut self) {
        self.caller_errors.clear();
        self.caller_mark = self.context.error_count();
    }

    fn collect_errors(&self, ctx: &mut Context) {
        self.user_info.validate(ctx);
        self.invoice.validate(ctx);
        self.tender.validate(ctx);
        self.buyer_auth_status.validate(ctx);
        self.extend_data.validate(ctx);
        if let Some(info) = &self.client_info {
            info.validate(ctx);
        }
        self.kind.validate(ctx);
        self.check_required_leaves(ctx);
    }

    fn check_required_leaves(&self, ctx: &mut Context) {
        let trx_type = self.transaction_type();
        let has_amount = self.invoice.as_ref().is_some_and(|inv| inv.amt.is_some());
        match &self.kind {
            TransactionKind::Sale
            | TransactionKind::Authorization
            | TransactionKind::VoiceAuthorization { .. } => {
                if self.tender.is_none() {
                    ctx.add_error(ErrorObject::fatal(format!("{trx_type} requires a tender")));
                }
                if !has_amount {
                    ctx.add_error(ErrorObject::fatal(format!("{trx_type} requires an amount")));
                }
            }
            TransactionKind::Order if !has_amount => {
                ctx.add_error(ErrorObject::fatal("Order requires an amount"));
            }
            TransactionKind::DataUpload => match &self.tender {
                None => ctx.add_error(ErrorObject::fatal("DataUpload requires a tender")),
                Some(Tender::Card(_)) => {}
                Some(_) => ctx.add_error(ErrorObject::error("DataUpload only stores card tenders")),
            },
            TransactionKind::BuyerAuth(BuyerAuthStep::VerifyEnrollment { .. })
                if self.tender.is_some() =>
            {
                ctx.add_error(ErrorObject::warn(
                    "enrollment checks take the card directly; the tender is also sent",
                ));
            }
            TransactionKind::Recurring(recurring) => {
                if let Some(Tender::PayPal(paypal)) = &self.tender
                    && paypal.express_checkout.is_some()
                {
                    ctx.add_error(ErrorObject::fatal(
                        "recurring transactions cannot carry an express checkout step; both send ACTION",
                    ));
                }
                let changes = RecurringInfo {
                    orig_profile_id: None,
                    ..recurring.info.clone()
                };
                if recurring.action == RecurringAction::Modify
                    && changes.is_empty()
                    && self.tender.is_none()
                    && self.invoice.is_none()
                {
                    ctx.add_error(ErrorObject::error("profile modification changes nothing"));
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{
        context::{ErrorObject, Severity},
        data_objects::{
            CheckTender,
            CreditCard,
            ExpressCheckout,
            PayPalTender,
            RecurringInfo,
            Tender,
            UserInfo,
        },
        transaction::{RecurringAction, Transaction},
    };

    fn creds() -> UserInfo { UserInfo::new("u", "v", "p", "pw") }

    #[rstest]
    fn sale_without_tender_or_amount() {
        let mut trx = Transaction::new(crate::transaction::TransactionKind::Sale);
        trx.user_info = Some(creds());
        trx.validate();
        assert_eq!(trx.context().errors_with_severity(Severity::Fatal).count(), 2);
    }

    #[rstest]
    fn validating_twice_does_not_duplicate() {
        let mut trx = Transaction::data_upload(creds(), Tender::Check(CheckTender::default()));
        trx.validate();
        let first = trx.context().error_count();
        trx.validate();
        assert_eq!(trx.context().error_count(), first);
        assert!(first >= 2);
    }

    #[rstest]
    fn caller_errors_survive_alignment() {
        let mut trx = Transaction::inquiry(creds(), "V1");
        trx.context_mut().add_error(ErrorObject::warn("caller note"));
        trx.validate();
        assert_eq!(trx.context().errors(), [ErrorObject::warn("caller note")]);
    }

    #[rstest]
    fn corrected_values_stop_reporting() {
        let mut trx = Transaction::data_upload(creds(), Tender::Check(CheckTender::default()));
        trx.validate();
        assert!(trx.context().is_error_contained());

        trx.tender = Some(Tender::card(CreditCard::new("4111111111111111", "1230")));
        trx.validate();
        assert!(!trx.context().is_error_contained(), "{:?}", trx.context());
    }

    #[rstest]
    fn logger_flag_survives_reset() {
        let mut trx = Transaction::inquiry(creds(), "V1");
        trx.context_mut().set_load_logger_errors(true);
        trx.validate();
        assert!(trx.context().load_logger_errors());
    }

    fn profile_id() -> RecurringInfo {
        RecurringInfo {
            orig_profile_id: Some("RT0000000001".to_owned()),
            ..RecurringInfo::default()
        }
    }

    #[rstest]
    fn express_checkout_on_recurring_is_fatal() {
        let mut trx = Transaction::recurring(creds(), RecurringAction::Inquiry { payment_history: None }, profile_id());
        trx.tender = Some(Tender::PayPal(PayPalTender {
            express_checkout: Some(ExpressCheckout::Get {
                token: "EC-1".to_owned(),
            }),
        }));
        trx.validate();
        assert!(trx.context().has_fatal());
    }

    #[rstest]
    #[case::nothing(profile_id(), true)]
    #[case::new_term(RecurringInfo { term: Some(12), ..profile_id() }, false)]
    fn empty_modification(#[case] info: RecurringInfo, #[case] reported: bool) {
        let mut trx = Transaction::recurring(creds(), RecurringAction::Modify, info);
        trx.validate();
        let found = trx
            .context()
            .errors()
            .iter()
            .any(|err| err.message() == "profile modification changes nothing");
        assert_eq!(found, reported);
    }
}
