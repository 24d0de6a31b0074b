//! Recurring billing profile settings.

use chrono::{NaiveDate, Utc};

use super::RequestFragment;
use crate::{
    context::{Context, ErrorObject},
    currency::Currency,
    field_id::FieldId,
    request::RequestBuffer,
    transaction::TransactionError,
};

/// `START` wire format.
const START_FORMAT: &str = "%m%d%Y";

/// Billing interval of a recurring profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayPeriod {
    /// Every week.
    Weekly,
    /// Every two weeks.
    BiWeekly,
    /// Twice a month.
    SemiMonthly,
    /// Every four weeks.
    FourWeekly,
    /// Every month.
    Monthly,
    /// Every quarter.
    Quarterly,
    /// Twice a year.
    SemiYearly,
    /// Every year.
    Yearly,
    /// Every `FREQUENCY` days.
    Days,
}

impl PayPeriod {
    /// Code sent as `PAYPERIOD`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Weekly => "WEEK",
            Self::BiWeekly => "BIWK",
            Self::SemiMonthly => "SMMO",
            Self::FourWeekly => "FRWK",
            Self::Monthly => "MONT",
            Self::Quarterly => "QTER",
            Self::SemiYearly => "SMYR",
            Self::Yearly => "YEAR",
            Self::Days => "DAYS",
        }
    }
}

/// One-off transaction run when a profile is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionalTrx {
    /// Charge immediately.
    Sale,
    /// Authorise only, to verify the account.
    Authorization,
}

impl OptionalTrx {
    /// Code sent as `OPTIONALTRX`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Sale => "S",
            Self::Authorization => "A",
        }
    }
}

/// Settings of a recurring billing profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurringInfo {
    /// Merchant-chosen profile name.
    pub profile_name: Option<String>,
    /// First billing date; must be in the future.
    pub start: Option<NaiveDate>,
    /// Number of payments; zero bills until cancelled.
    pub term: Option<u32>,
    /// Billing interval.
    pub pay_period: Option<PayPeriod>,
    /// Days between payments when the period is [`PayPeriod::Days`].
    pub frequency: Option<u32>,
    /// Failed payments tolerated before the profile is suspended.
    pub max_fail_payments: Option<u32>,
    /// Days between retries of a failed payment.
    pub retry_num_days: Option<u32>,
    /// Buyer email for notices.
    pub email: Option<String>,
    /// Buyer company.
    pub company_name: Option<String>,
    /// Transaction run when the profile is created.
    pub optional_trx: Option<OptionalTrx>,
    /// Amount of the optional transaction.
    pub optional_trx_amt: Option<Currency>,
    /// Profile whose payment data seeds a new one.
    pub orig_profile_id: Option<String>,
}

impl RecurringInfo {
    /// Return `true` when no setting has been given.
    #[must_use]
    pub fn is_empty(&self) -> bool { *self == Self::default() }
}

impl RequestFragment for RecurringInfo {
    fn append_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        buf.append(FieldId::ProfileName, &self.profile_name)?;
        buf.append(
            FieldId::Start,
            &self.start.map(|date| date.format(START_FORMAT).to_string()),
        )?;
        buf.append(FieldId::Term, &self.term)?;
        buf.append(FieldId::PayPeriod, &self.pay_period.map(PayPeriod::code))?;
        buf.append(FieldId::Frequency, &self.frequency)?;
        buf.append(FieldId::MaxFailPayments, &self.max_fail_payments)?;
        buf.append(FieldId::RetryNumDays, &self.retry_num_days)?;
        buf.append(FieldId::Email, &self.email)?;
        buf.append(FieldId::CompanyName, &self.company_name)?;
        buf.append(FieldId::OptionalTrx, &self.optional_trx.map(OptionalTrx::code))?;
        buf.append(FieldId::OptionalTrxAmt, &self.optional_trx_amt)?;
        buf.append(FieldId::OrigProfileId, &self.orig_profile_id)?;
        Ok(())
    }

    fn validate(&self, ctx: &mut Context) {
        if let Some(start) = self.start
            && start <= Utc::now().date_naive()
        {
            ctx.add_error(ErrorObject::error(format!(
                "profile start date {start} is not in the future"
            )));
        }
        if self.pay_period == Some(PayPeriod::Days) && self.frequency.is_none() {
            ctx.add_error(ErrorObject::error("a DAYS pay period needs a frequency"));
        }
        if self.frequency.is_some() && self.pay_period != Some(PayPeriod::Days) {
            ctx.add_error(ErrorObject::warn("frequency is ignored unless the pay period is DAYS"));
        }
        match (&self.optional_trx, &self.optional_trx_amt) {
            (Some(OptionalTrx::Sale), None) => {
                ctx.add_error(ErrorObject::error("an optional sale needs an amount"));
            }
            (_, Some(amount)) => amount.validate(FieldId::OptionalTrxAmt.as_str(), ctx),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::context::Severity;

    fn far_future() -> NaiveDate { NaiveDate::from_ymd_opt(2999, 1, 15).expect("valid date") }

    #[rstest]
    fn profile_fields_in_order() {
        let info = RecurringInfo {
            profile_name: Some("Gym".to_owned()),
            start: Some(far_future()),
            term: Some(12),
            pay_period: Some(PayPeriod::Monthly),
            ..RecurringInfo::default()
        };
        let mut buf = RequestBuffer::new();
        info.append_fields(&mut buf).expect("append");
        assert_eq!(
            buf.as_str(),
            "PROFILENAME[3]=Gym&START[8]=01152999&TERM[2]=12&PAYPERIOD[4]=MONT&"
        );
    }

    #[rstest]
    #[case(Some(PayPeriod::Days), None, Some(Severity::Error))]
    #[case(Some(PayPeriod::Days), Some(10), None)]
    #[case(Some(PayPeriod::Weekly), Some(10), Some(Severity::Warn))]
    fn frequency_rules(
        #[case] pay_period: Option<PayPeriod>,
        #[case] frequency: Option<u32>,
        #[case] level: Option<Severity>,
    ) {
        let info = RecurringInfo {
            pay_period,
            frequency,
            ..RecurringInfo::default()
        };
        let mut ctx = Context::new();
        info.validate(&mut ctx);
        assert_eq!(ctx.highest_error_level(), level);
    }

    #[rstest]
    fn past_start_is_an_error() {
        let info = RecurringInfo {
            start: NaiveDate::from_ymd_opt(2001, 1, 1),
            ..RecurringInfo::default()
        };
        let mut ctx = Context::new();
        info.validate(&mut ctx);
        assert_eq!(ctx.highest_error_level(), Some(Severity::Error));
    }
}
