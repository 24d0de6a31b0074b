//! Payment instruments and the tender types that carry them.
//!
//! A [`Tender`] names the payment method (`TENDER` field) and owns the
//! device used to pay: a card, a bank account, a paper check or a PayPal
//! account. Device fields are appended before tender-specific extras.

use super::{RequestFragment, all_digits, redacted};
use crate::{
    context::{Context, ErrorObject},
    field_id::FieldId,
    request::RequestBuffer,
    transaction::TransactionError,
};

/// A keyed card.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CreditCard {
    /// Card number.
    pub acct: String,
    /// Expiry as `MMYY`.
    pub exp_date: String,
    /// Card security code.
    pub cvv2: Option<String>,
    /// Cardholder name.
    pub name: Option<String>,
    /// Start date as `MMYY`, for cards that print one.
    pub card_start: Option<String>,
    /// Issue number, for cards that print one.
    pub card_issue: Option<String>,
}

impl CreditCard {
    /// Create a card from its number and `MMYY` expiry.
    #[must_use]
    pub fn new(acct: impl Into<String>, exp_date: impl Into<String>) -> Self {
        Self {
            acct: acct.into(),
            exp_date: exp_date.into(),
            ..Self::default()
        }
    }

    /// Attach a security code.
    #[must_use]
    pub fn with_cvv2(mut self, cvv2: impl Into<String>) -> Self {
        self.cvv2 = Some(cvv2.into());
        self
    }
}

impl std::fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditCard")
            .field("acct", &redacted(&self.acct))
            .field("exp_date", &self.exp_date)
            .field("cvv2", &self.cvv2.as_deref().map(redacted))
            .field("name", &self.name)
            .field("card_start", &self.card_start)
            .field("card_issue", &self.card_issue)
            .finish()
    }
}

impl RequestFragment for CreditCard {
    fn append_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        buf.append(FieldId::Acct, &self.acct)?;
        buf.append(FieldId::ExpDate, &self.exp_date)?;
        buf.append(FieldId::Cvv2, &self.cvv2)?;
        buf.append(FieldId::Name, &self.name)?;
        buf.append(FieldId::CardStart, &self.card_start)?;
        buf.append(FieldId::CardIssue, &self.card_issue)?;
        Ok(())
    }

    fn validate(&self, ctx: &mut Context) {
        if self.acct.is_empty() {
            ctx.add_error(ErrorObject::fatal("card number is required"));
        } else if !all_digits(&self.acct) {
            ctx.add_error(ErrorObject::error("card number must contain only digits"));
        }
        if !is_mmyy(&self.exp_date) {
            ctx.add_error(ErrorObject::error(format!(
                "card expiry {:?} is not in MMYY form",
                self.exp_date
            )));
        }
        if let Some(cvv2) = &self.cvv2
            && !(all_digits(cvv2) && (3..=4).contains(&cvv2.len()))
        {
            ctx.add_error(ErrorObject::error("card security code must be 3 or 4 digits"));
        }
    }
}

fn is_mmyy(value: &str) -> bool {
    all_digits(value)
        && value.len() == 4
        && value
            .get(..2)
            .and_then(|month| month.parse::<u8>().ok())
            .is_some_and(|month| (1..=12).contains(&month))
}

/// Track data read from a card reader.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SwipeCard {
    /// Raw track data.
    pub swipe: String,
}

impl SwipeCard {
    /// Wrap raw track data.
    #[must_use]
    pub fn new(swipe: impl Into<String>) -> Self { Self { swipe: swipe.into() } }
}

impl std::fmt::Debug for SwipeCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeCard")
            .field("swipe", &redacted(&self.swipe))
            .finish()
    }
}

impl RequestFragment for SwipeCard {
    fn append_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        buf.append(FieldId::Swipe, &self.swipe)?;
        Ok(())
    }

    fn validate(&self, ctx: &mut Context) {
        if self.swipe.is_empty() {
            ctx.add_error(ErrorObject::fatal("swipe data is required"));
        }
    }
}

/// The card behind a card tender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardDevice {
    /// Card number keyed in.
    Keyed(CreditCard),
    /// Card read by a swipe device.
    Swiped(SwipeCard),
}

impl RequestFragment for CardDevice {
    fn append_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        match self {
            Self::Keyed(card) => card.append_fields(buf),
            Self::Swiped(card) => card.append_fields(buf),
        }
    }

    fn validate(&self, ctx: &mut Context) {
        match self {
            Self::Keyed(card) => card.validate(ctx),
            Self::Swiped(card) => card.validate(ctx),
        }
    }
}

/// Kind of bank account debited by an ACH tender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BankAccountType {
    /// Checking account.
    #[default]
    Checking,
    /// Savings account.
    Savings,
}

impl BankAccountType {
    /// Code sent as `ACCTTYPE`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Checking => "C",
            Self::Savings => "S",
        }
    }
}

/// A bank account identified by account and routing numbers.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BankAccount {
    /// Account number.
    pub acct: String,
    /// Nine-digit ABA routing number.
    pub aba: String,
    /// Checking or savings.
    pub acct_type: BankAccountType,
    /// Account holder name.
    pub name: Option<String>,
}

impl BankAccount {
    /// Create an account from its number and routing number.
    #[must_use]
    pub fn new(acct: impl Into<String>, aba: impl Into<String>, acct_type: BankAccountType) -> Self {
        Self {
            acct: acct.into(),
            aba: aba.into(),
            acct_type,
            name: None,
        }
    }
}

impl std::fmt::Debug for BankAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BankAccount")
            .field("acct", &redacted(&self.acct))
            .field("aba", &self.aba)
            .field("acct_type", &self.acct_type)
            .field("name", &self.name)
            .finish()
    }
}

impl RequestFragment for BankAccount {
    fn append_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        buf.append(FieldId::Acct, &self.acct)?;
        buf.append(FieldId::Aba, &self.aba)?;
        buf.append(FieldId::AcctType, self.acct_type.code())?;
        buf.append(FieldId::Name, &self.name)?;
        Ok(())
    }

    fn validate(&self, ctx: &mut Context) {
        if self.acct.is_empty() {
            ctx.add_error(ErrorObject::fatal("bank account number is required"));
        }
        if self.aba.is_empty() {
            ctx.add_error(ErrorObject::fatal("routing number is required"));
        } else if !(all_digits(&self.aba) && self.aba.len() == 9) {
            ctx.add_error(ErrorObject::error("routing number must be nine digits"));
        }
    }
}

/// Electronic debit of a bank account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AchTender {
    /// Account to debit or credit.
    pub account: BankAccount,
    /// Authorisation class such as `WEB`, `PPD` or `CCD`.
    pub auth_type: Option<String>,
    /// Send a zero-amount prenotification.
    pub prenote: Option<bool>,
    /// Check serial number, for converted checks.
    pub chk_num: Option<String>,
}

/// The MICR line of a paper check.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CheckPayment {
    /// Raw MICR line.
    pub micr: String,
}

impl std::fmt::Debug for CheckPayment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckPayment")
            .field("micr", &redacted(&self.micr))
            .finish()
    }
}

/// Paper check presented by the buyer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckTender {
    /// The check itself.
    pub check: CheckPayment,
    /// Check serial number.
    pub chk_num: Option<String>,
    /// `P` for personal or `C` for company checks.
    pub chk_type: Option<String>,
    /// Driver's licence number of the writer.
    pub dl: Option<String>,
    /// Social security number of the writer.
    pub ss: Option<String>,
}

/// Express checkout step performed with a PayPal tender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressCheckout {
    /// Start checkout and obtain a token.
    Set {
        /// Where the buyer returns after approving.
        return_url: String,
        /// Where the buyer returns after cancelling.
        cancel_url: String,
    },
    /// Fetch buyer details for a token.
    Get {
        /// Token from the set step.
        token: String,
    },
    /// Complete payment for an approved token.
    Do {
        /// Token from the set step.
        token: String,
        /// Buyer id from the get step.
        payer_id: String,
    },
}

impl ExpressCheckout {
    /// Code sent as `ACTION`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Set { .. } => "S",
            Self::Get { .. } => "G",
            Self::Do { .. } => "D",
        }
    }
}

/// Payment through a PayPal account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayPalTender {
    /// Express checkout step, when one applies.
    pub express_checkout: Option<ExpressCheckout>,
}

/// Payment method of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tender {
    /// Card payment.
    Card(CardDevice),
    /// ACH bank debit.
    Ach(AchTender),
    /// Paper check.
    Check(CheckTender),
    /// PayPal account.
    PayPal(PayPalTender),
}

impl Tender {
    /// Card tender for a keyed card.
    #[must_use]
    pub const fn card(card: CreditCard) -> Self { Self::Card(CardDevice::Keyed(card)) }

    /// Card tender for swiped track data.
    #[must_use]
    pub const fn swipe(card: SwipeCard) -> Self { Self::Card(CardDevice::Swiped(card)) }

    /// Code sent as `TENDER`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Card(_) => "C",
            Self::Ach(_) => "A",
            Self::Check(_) => "K",
            Self::PayPal(_) => "P",
        }
    }
}

impl RequestFragment for Tender {
    fn append_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        buf.append(FieldId::Tender, self.code())?;
        match self {
            Self::Card(device) => device.append_fields(buf)?,
            Self::Ach(ach) => {
                ach.account.append_fields(buf)?;
                buf.append(FieldId::AuthType, &ach.auth_type)?;
                buf.append(FieldId::Prenote, &ach.prenote)?;
                buf.append(FieldId::ChkNum, &ach.chk_num)?;
            }
            Self::Check(check) => {
                buf.append(FieldId::Micr, &check.check.micr)?;
                buf.append(FieldId::ChkNum, &check.chk_num)?;
                buf.append(FieldId::ChkType, &check.chk_type)?;
                buf.append(FieldId::Dl, &check.dl)?;
                buf.append(FieldId::Ss, &check.ss)?;
            }
            Self::PayPal(paypal) => {
                if let Some(step) = &paypal.express_checkout {
                    buf.append(FieldId::Action, step.code())?;
                    match step {
                        ExpressCheckout::Set {
                            return_url,
                            cancel_url,
                        } => {
                            buf.append(FieldId::ReturnUrl, return_url)?;
                            buf.append(FieldId::CancelUrl, cancel_url)?;
                        }
                        ExpressCheckout::Get { token } => buf.append(FieldId::Token, token)?,
                        ExpressCheckout::Do { token, payer_id } => {
                            buf.append(FieldId::Token, token)?;
                            buf.append(FieldId::PayerId, payer_id)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn validate(&self, ctx: &mut Context) {
        match self {
            Self::Card(device) => device.validate(ctx),
            Self::Ach(ach) => ach.account.validate(ctx),
            Self::Check(check) => {
                if check.check.micr.is_empty() {
                    ctx.add_error(ErrorObject::fatal("check MICR line is required"));
                }
            }
            Self::PayPal(paypal) => match &paypal.express_checkout {
                Some(ExpressCheckout::Set {
                    return_url,
                    cancel_url,
                }) if return_url.is_empty() || cancel_url.is_empty() => {
                    ctx.add_error(ErrorObject::fatal(
                        "express checkout needs both return and cancel URLs",
                    ));
                }
                Some(ExpressCheckout::Get { token }) if token.is_empty() => {
                    ctx.add_error(ErrorObject::fatal("express checkout token is required"));
                }
                Some(ExpressCheckout::Do { token, payer_id })
                    if token.is_empty() || payer_id.is_empty() =>
                {
                    ctx.add_error(ErrorObject::fatal(
                        "express checkout needs a token and a payer id",
                    ));
                }
                _ => {}
            },
        }
    }
}
