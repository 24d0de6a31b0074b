//! The result of one submission.
//!
//! The reply is decoded with the same length-aware parser used for
//! requests, then each pair is routed by name to the segment that owns it.
//! Names the SDK does not know are kept in [`Response::extra`].

pub mod segments;

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

pub use segments::{
    BuyerAuthResponse,
    FraudResponse,
    PaymentHistoryItem,
    RecurringResponse,
    TransactionResponse,
};

use crate::{
    context::{Context, ErrorObject, Severity, result_code},
    field_id::{FieldId, IndexedFieldId},
    request::{NvpIter, mask_sensitive_fields},
};

/// Everything known about one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    #[serde(serialize_with = "serialize_masked")]
    request: String,
    #[serde(skip)]
    raw: String,
    transaction: TransactionResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    fraud: Option<FraudResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurring: Option<RecurringResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    buyer_auth: Option<BuyerAuthResponse>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    extra: BTreeMap<String, String>,
    context: Context,
}

fn serialize_masked<S: Serializer>(request: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&mask_sensitive_fields(request))
}

impl Response {
    /// Decode `raw` and attach the request and accumulated errors.
    ///
    /// A reply that cannot be fully decoded keeps the pairs read before the
    /// fault and records an error in the context.
    #[must_use]
    pub fn new(request: String, raw: String, mut context: Context) -> Self {
        let mut response = Self {
            request,
            raw: String::new(),
            transaction: TransactionResponse::default(),
            fraud: None,
            recurring: None,
            buyer_auth: None,
            extra: BTreeMap::new(),
            context: Context::new(),
        };
        let mut pairs = NvpIter::new(&raw);
        for (name, value) in pairs.by_ref() {
            response.route(name, value, &mut context);
        }
        if let Err(err) = pairs.finish() {
            context.add_error(ErrorObject::new(
                Severity::Error,
                result_code::BAD_RESPONSE,
                format!("gateway reply could not be fully decoded: {err}"),
            ));
        }
        response.raw = raw;
        response.context = context;
        response
    }

    fn route(&mut self, name: &str, value: &str, ctx: &mut Context) {
        if let Some(field) = FieldId::from_wire(name) {
            if field == FieldId::Result {
                match value.trim().parse() {
                    Ok(code) => self.transaction.result = Some(code),
                    Err(_) => ctx.add_error(ErrorObject::new(
                        Severity::Error,
                        result_code::BAD_RESPONSE,
                        format!("RESULT {value:?} is not a number"),
                    )),
                }
                return;
            }
            if self.transaction.accept(field, value) {
                return;
            }
            if FraudResponse::owns(field) {
                self.fraud.get_or_insert_with(FraudResponse::default).accept(field, value);
                return;
            }
            if RecurringResponse::owns(field) {
                self.recurring
                    .get_or_insert_with(RecurringResponse::default)
                    .accept(field, value);
                return;
            }
            if BuyerAuthResponse::owns(field) {
                self.buyer_auth
                    .get_or_insert_with(BuyerAuthResponse::default)
                    .accept(field, value);
                return;
            }
        }
        if let Some((field, index)) = IndexedFieldId::parse_indexed(name)
            && RecurringResponse::owns_history(field)
        {
            self.recurring
                .get_or_insert_with(RecurringResponse::default)
                .accept_history(field, index, value);
            return;
        }
        self.extra.insert(name.to_owned(), value.to_owned());
    }

    /// Request string of the submission; masked when it never reached the
    /// connection.
    #[must_use]
    pub fn request(&self) -> &str { &self.request }

    /// Reply exactly as received, or the first fatal error in reply format
    /// when nothing was received.
    #[must_use]
    pub fn raw(&self) -> &str { &self.raw }

    /// Result code, if the reply carried one.
    #[must_use]
    pub const fn result(&self) -> Option<i32> { self.transaction.result }

    /// Result message, if the reply carried one.
    #[must_use]
    pub fn resp_msg(&self) -> Option<&str> { self.transaction.resp_msg.as_deref() }

    /// Return `true` when the gateway approved the transaction.
    #[must_use]
    pub fn is_approved(&self) -> bool { self.result() == Some(0) }

    /// Core outcome fields.
    #[must_use]
    pub const fn transaction_response(&self) -> &TransactionResponse { &self.transaction }

    /// Fraud filter messages, if any were returned.
    #[must_use]
    pub const fn fraud_response(&self) -> Option<&FraudResponse> { self.fraud.as_ref() }

    /// Recurring profile details, if any were returned.
    #[must_use]
    pub const fn recurring_response(&self) -> Option<&RecurringResponse> { self.recurring.as_ref() }

    /// 3-D Secure details, if any were returned.
    #[must_use]
    pub const fn buyer_auth_response(&self) -> Option<&BuyerAuthResponse> {
        self.buyer_auth.as_ref()
    }

    /// Reply fields the SDK does not model.
    #[must_use]
    pub const fn extra(&self) -> &BTreeMap<String, String> { &self.extra }

    /// Errors accumulated during the submission.
    #[must_use]
    pub const fn context(&self) -> &Context { &self.context }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn parse(raw: &str) -> Response { Response::new(String::new(), raw.to_owned(), Context::new()) }

    #[rstest]
    fn approval_fields() {
        let response = parse(
            "RESULT=0&PNREF=VXYZ01234567&RESPMSG=Approved&AUTHCODE=123PNI&AVSADDR=Y&AVSZIP=N\
             &CVV2MATCH=Y&PREFPSMSG=No Rules Triggered",
        );
        assert!(response.is_approved());
        assert_eq!(response.resp_msg(), Some("Approved"));
        let trx = response.transaction_response();
        assert_eq!(trx.pnref.as_deref(), Some("VXYZ01234567"));
        assert_eq!(trx.avs_zip.as_deref(), Some("N"));
        assert_eq!(
            response.fraud_response().and_then(|f| f.pre_fps_msg.as_deref()),
            Some("No Rules Triggered")
        );
        assert!(response.recurring_response().is_none());
        assert!(!response.context().is_error_contained());
    }

    #[rstest]
    fn enrollment_fields_fill_buyer_auth_segment() {
        let response = parse(
            "RESULT=0&AUTHENTICATION_ID=MPI123&AUTHENTICATION_STATUS=E\
             &ACSURL[29]=https://acs.example/pay?a=1&b&PAREQ=eJxVUl1v",
        );
        let auth = response.buyer_auth_response().expect("buyer auth segment");
        assert_eq!(auth.authentication_id.as_deref(), Some("MPI123"));
        assert_eq!(auth.authentication_status.as_deref(), Some("E"));
        assert_eq!(auth.acs_url.as_deref(), Some("https://acs.example/pay?a=1&b"));
        assert_eq!(auth.pa_req.as_deref(), Some("eJxVUl1v"));
        assert!(response.fraud_response().is_none());
    }

    #[rstest]
    fn length_clause_allows_delimiter_in_value() {
        let response = parse("RESULT=12&RESPMSG[15]=Declined & hold&HOSTCODE=05");
        assert_eq!(response.result(), Some(12));
        assert_eq!(response.resp_msg(), Some("Declined & hold"));
        assert_eq!(response.transaction_response().host_code.as_deref(), Some("05"));
    }

    #[rstest]
    fn payment_history_is_indexed() {
        let response = parse("RESULT=0&RPREF=R1&P_PNREF1=V1&P_RESULT1=0&P_PNREF2=V2&P_AMT2=9.99");
        let recurring = response.recurring_response().expect("recurring segment");
        assert_eq!(recurring.rp_ref.as_deref(), Some("R1"));
        assert_eq!(recurring.payment_history.len(), 2);
        assert_eq!(
            recurring.payment_history.get(&2).and_then(|p| p.amt.as_deref()),
            Some("9.99")
        );
    }

    #[rstest]
    fn unknown_names_are_kept() {
        let response = parse("RESULT=0&FOO=bar&L_NAME0=x");
        assert_eq!(response.extra().get("FOO").map(String::as_str), Some("bar"));
        assert_eq!(response.extra().get("L_NAME0").map(String::as_str), Some("x"));
        assert!(response.recurring_response().is_none());
    }

    #[rstest]
    fn malformed_reply_is_recorded() {
        let response = parse("RESULT=0&PNREF");
        assert_eq!(response.result(), Some(0));
        let err = response.context().first_error(Severity::Error).expect("decode error");
        assert_eq!(err.result(), result_code::BAD_RESPONSE);
    }

    #[rstest]
    fn local_error_reply_round_trips() {
        let fatal = ErrorObject::fatal("card number is required");
        let response = parse(&fatal.to_string());
        assert_eq!(response.result(), Some(result_code::VALIDATION));
        assert_eq!(response.resp_msg(), Some("card number is required"));
    }

    #[rstest]
    fn serialized_request_is_masked() {
        let response = Response::new(
            "TRXTYPE[1]=S&ACCT[16]=4111111111111111".to_owned(),
            "RESULT=0".to_owned(),
            Context::new(),
        );
        let json = serde_json::to_string(&response).expect("json");
        assert!(!json.contains("4111111111111111"));
        assert!(json.contains("\"result\":0"));
    }
}
