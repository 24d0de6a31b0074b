//! Typed groups of reply fields.
//!
//! Each segment claims the fields it owns through `accept`; a field is
//! owned by exactly one segment.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::field_id::{FieldId, IndexedFieldId};

/// Core outcome of a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransactionResponse {
    /// Result code; `0` is approval, negative values are local failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<i32>,
    /// Gateway reference of this transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pnref: Option<String>,
    /// Result message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resp_msg: Option<String>,
    /// Issuer approval code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_code: Option<String>,
    /// Street address verification result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avs_addr: Option<String>,
    /// Postal code verification result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avs_zip: Option<String>,
    /// International address verification result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iavs: Option<String>,
    /// Security code check result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvv2_match: Option<String>,
    /// Processor response code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_code: Option<String>,
    /// Processor address verification code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proc_avs: Option<String>,
    /// Processor security code result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proc_cvv2: Option<String>,
    /// Set when the request id had already been used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<String>,
    /// Result of the original transaction, for inquiries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orig_result: Option<String>,
    /// Settlement state, for inquiries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_state: Option<String>,
    /// PayPal reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ppref: Option<String>,
    /// PayPal correlation id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    /// Amount approved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amt: Option<String>,
    /// Remaining balance on a prepaid card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bal_amt: Option<String>,
    /// Card brand code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    /// Last digits of the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acct: Option<String>,
}

impl TransactionResponse {
    /// Take `value` if `field` belongs here. `RESULT` is handled by the
    /// caller since it needs parsing.
    pub(crate) fn accept(&mut self, field: FieldId, value: &str) -> bool {
        let slot = match field {
            FieldId::PnRef => &mut self.pnref,
            FieldId::RespMsg => &mut self.resp_msg,
            FieldId::AuthCode => &mut self.auth_code,
            FieldId::AvsAddr => &mut self.avs_addr,
            FieldId::AvsZip => &mut self.avs_zip,
            FieldId::Iavs => &mut self.iavs,
            FieldId::Cvv2Match => &mut self.cvv2_match,
            FieldId::HostCode => &mut self.host_code,
            FieldId::ProcAvs => &mut self.proc_avs,
            FieldId::ProcCvv2 => &mut self.proc_cvv2,
            FieldId::Duplicate => &mut self.duplicate,
            FieldId::OrigResult => &mut self.orig_result,
            FieldId::TransState => &mut self.trans_state,
            FieldId::PpRef => &mut self.ppref,
            FieldId::CorrelationId => &mut self.correlation_id,
            FieldId::Amt => &mut self.amt,
            FieldId::BalAmt => &mut self.bal_amt,
            FieldId::CardType => &mut self.card_type,
            FieldId::Acct => &mut self.acct,
            _ => return false,
        };
        *slot = Some(value.to_owned());
        true
    }
}

/// Fraud filter messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FraudResponse {
    /// Filters triggered before authorisation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_fps_msg: Option<String>,
    /// Filters triggered after authorisation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_fps_msg: Option<String>,
}

impl FraudResponse {
    pub(crate) const fn owns(field: FieldId) -> bool {
        matches!(field, FieldId::PreFpsMsg | FieldId::PostFpsMsg)
    }

    pub(crate) fn accept(&mut self, field: FieldId, value: &str) {
        match field {
            FieldId::PreFpsMsg => self.pre_fps_msg = Some(value.to_owned()),
            FieldId::PostFpsMsg => self.post_fps_msg = Some(value.to_owned()),
            _ => {}
        }
    }
}

/// One past payment of a recurring profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentHistoryItem {
    /// Gateway reference of the payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pnref: Option<String>,
    /// Result code of the payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Settlement state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_state: Option<String>,
    /// Tender used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tender: Option<String>,
    /// When the payment ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_time: Option<String>,
    /// Amount charged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amt: Option<String>,
}

/// Recurring profile details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecurringResponse {
    /// Reference of the profile action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rp_ref: Option<String>,
    /// Profile id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    /// Profile name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_name: Option<String>,
    /// Profile status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// First billing date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Number of payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    /// Next billing date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_payment: Option<String>,
    /// Past payments keyed by payment number.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub payment_history: BTreeMap<usize, PaymentHistoryItem>,
}

impl RecurringResponse {
    pub(crate) const fn owns(field: FieldId) -> bool {
        matches!(
            field,
            FieldId::RpRef
                | FieldId::ProfileId
                | FieldId::ProfileName
                | FieldId::Status
                | FieldId::Start
                | FieldId::Term
                | FieldId::NextPayment
        )
    }

    pub(crate) fn accept(&mut self, field: FieldId, value: &str) {
        let slot = match field {
            FieldId::RpRef => &mut self.rp_ref,
            FieldId::ProfileId => &mut self.profile_id,
            FieldId::ProfileName => &mut self.profile_name,
            FieldId::Status => &mut self.status,
            FieldId::Start => &mut self.start,
            FieldId::Term => &mut self.term,
            FieldId::NextPayment => &mut self.next_payment,
            _ => return,
        };
        *slot = Some(value.to_owned());
    }

    pub(crate) const fn owns_history(field: IndexedFieldId) -> bool {
        matches!(
            field,
            IndexedFieldId::HistoryPnRef
                | IndexedFieldId::HistoryResult
                | IndexedFieldId::HistoryTransState
                | IndexedFieldId::HistoryTender
                | IndexedFieldId::HistoryTransTime
                | IndexedFieldId::HistoryAmt
        )
    }

    /// Take `value` for history entry `index`.
    pub(crate) fn accept_history(&mut self, field: IndexedFieldId, index: usize, value: &str) {
        let slot: fn(&mut PaymentHistoryItem) -> &mut Option<String> = match field {
            IndexedFieldId::HistoryPnRef => |item| &mut item.pnref,
            IndexedFieldId::HistoryResult => |item| &mut item.result,
            IndexedFieldId::HistoryTransState => |item| &mut item.trans_state,
            IndexedFieldId::HistoryTender => |item| &mut item.tender,
            IndexedFieldId::HistoryTransTime => |item| &mut item.trans_time,
            IndexedFieldId::HistoryAmt => |item| &mut item.amt,
            _ => return,
        };
        *slot(self.payment_history.entry(index).or_default()) = Some(value.to_owned());
    }
}

/// 3-D Secure details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuyerAuthResponse {
    /// Id to pass to later authentication steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_id: Option<String>,
    /// Enrollment or authentication status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_status: Option<String>,
    /// Issuer page the buyer is sent to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acs_url: Option<String>,
    /// Payer authentication request to post to the issuer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pa_req: Option<String>,
    /// Electronic commerce indicator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eci: Option<String>,
    /// Cardholder authentication verification value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cavv: Option<String>,
    /// Directory server transaction id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xid: Option<String>,
}

impl BuyerAuthResponse {
    pub(crate) const fn owns(field: FieldId) -> bool {
        matches!(
            field,
            FieldId::AuthenticationId
                | FieldId::AuthenticationStatus
                | FieldId::AcsUrl
                | FieldId::PaReq
                | FieldId::Eci
                | FieldId::Cavv
                | FieldId::Xid
        )
    }

    pub(crate) fn accept(&mut self, field: FieldId, value: &str) {
        let slot = match field {
            FieldId::AuthenticationId => &mut self.authentication_id,
            FieldId::AuthenticationStatus => &mut self.authentication_status,
            FieldId::AcsUrl => &mut self.acs_url,
            FieldId::PaReq => &mut self.pa_req,
            FieldId::Eci => &mut self.eci,
            FieldId::Cavv => &mut self.cavv,
            FieldId::Xid => &mut self.xid,
            _ => return,
        };
        *slot = Some(value.to_owned());
    }
}
