//! Monetary amounts as sent to the gateway.

use std::borrow::Cow;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{
    context::{Context, ErrorObject},
    request::FieldValue,
};

/// Currency used when none is given.
pub const DEFAULT_CURRENCY_CODE: &str = "USD";

/// How an amount with more than two decimal places is brought to cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rounding {
    /// Extra precision is a validation error.
    #[default]
    Exact,
    /// Round half away from zero.
    Round,
    /// Drop the extra digits.
    Truncate,
}

/// An amount in a specific currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    value: Decimal,
    code: String,
    rounding: Rounding,
}

impl Currency {
    /// An amount in [`DEFAULT_CURRENCY_CODE`].
    #[must_use]
    pub fn new(value: Decimal) -> Self { Self::with_code(value, DEFAULT_CURRENCY_CODE) }

    /// An amount in the given ISO 4217 currency.
    #[must_use]
    pub fn with_code(value: Decimal, code: impl Into<String>) -> Self {
        Self {
            value,
            code: code.into(),
            rounding: Rounding::Exact,
        }
    }

    /// Choose how extra precision is handled.
    #[must_use]
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// The unformatted amount.
    #[must_use]
    pub const fn value(&self) -> Decimal { self.value }

    /// The ISO 4217 code.
    #[must_use]
    pub fn code(&self) -> &str { &self.code }

    /// The rounding policy.
    #[must_use]
    pub const fn rounding(&self) -> Rounding { self.rounding }

    /// Format with exactly two decimal places and a `.` separator.
    #[must_use]
    pub fn formatted(&self) -> String {
        let strategy = match self.rounding {
            Rounding::Exact | Rounding::Round => RoundingStrategy::MidpointAwayFromZero,
            Rounding::Truncate => RoundingStrategy::ToZero,
        };
        let mut cents = self.value.round_dp_with_strategy(2, strategy);
        cents.rescale(2);
        cents.to_string()
    }

    /// Record problems with this amount, naming it `label` in messages.
    pub fn validate(&self, label: &str, ctx: &mut Context) {
        if self.value.is_sign_negative() && !self.value.is_zero() {
            ctx.add_error(ErrorObject::fatal(format!("{label} must not be negative")));
        }
        if self.rounding == Rounding::Exact && self.value.round_dp(2) != self.value {
            ctx.add_error(ErrorObject::fatal(format!(
                "{label} has more than two decimal places and no rounding policy"
            )));
        }
        let valid_code = self.code.len() == 3 && self.code.bytes().all(|b| b.is_ascii_uppercase());
        if !valid_code {
            ctx.add_error(ErrorObject::error(format!(
                "{label} currency code {:?} is not an ISO 4217 code",
                self.code
            )));
        }
    }
}

impl FieldValue for Currency {
    fn wire_value(&self) -> Option<Cow<'_, str>> { Some(Cow::Owned(self.formatted())) }
}

impl From<Decimal> for Currency {
    fn from(value: Decimal) -> Self { Self::new(value) }
}
