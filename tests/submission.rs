//! Submission against scripted connections: pre-flight short-circuit,
//! error capture and response attachment.

use std::{io, str::FromStr, time::Duration};

use async_trait::async_trait;
use payflow::{
    Severity,
    connection::{Connection, GatewayRequest, TransportError},
    context::{ErrorObject, result_code},
    currency::Currency,
    data_objects::{ClientInfo, CreditCard, ExtendData, Invoice, Tender, UserInfo},
    request::MASK,
    transaction::Transaction,
};
use rstest::{fixture, rstest};
use rust_decimal::Decimal;

/// Replies with a fixed body and records every request it sees.
struct ScriptedConnection {
    reply: Result<String, TransportError>,
    sent: Vec<GatewayRequest>,
}

impl ScriptedConnection {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_owned()),
            sent: Vec::new(),
        }
    }

    fn failing(err: TransportError) -> Self {
        Self {
            reply: Err(err),
            sent: Vec::new(),
        }
    }
}

#[async_trait]
impl Connection for ScriptedConnection {
    type Error = TransportError;

    async fn send(&mut self, request: &GatewayRequest) -> Result<String, TransportError> {
        self.sent.push(request.clone());
        self.reply.clone()
    }

    fn last_request(&self) -> Option<&str> { self.sent.last().map(|req| req.body.as_str()) }
}

/// Fails with an error type the SDK knows nothing about.
struct BrokenConnection {
    calls: usize,
}

#[async_trait]
impl Connection for BrokenConnection {
    type Error = io::Error;

    async fn send(&mut self, _request: &GatewayRequest) -> Result<String, io::Error> {
        self.calls += 1;
        Err(io::Error::other("socket exploded"))
    }

    fn last_request(&self) -> Option<&str> { None }
}

const ACCT: &str = "4111111111111111";

#[fixture]
fn sale() -> Transaction {
    Transaction::sale(
        UserInfo::new("merchant", "merchant", "PayPal", "s3cret"),
        Tender::card(CreditCard::new(ACCT, "1230").with_cvv2("123")),
        Invoice::with_amount(Currency::new(Decimal::from_str("25.12").expect("decimal"))),
    )
    .with_request_id("req-1")
}

#[rstest]
#[tokio::test]
async fn approved_sale_attaches_response(#[from(sale)] mut trx: Transaction) {
    trx.add_trans_header("X-SHOP-ID", "42");
    let expected_body = trx.generate_request().expect("generate");
    let mut conn = ScriptedConnection::replying("RESULT=0&PNREF=V19A2E7C25F1&RESPMSG=Approved&AUTHCODE=010010");

    let response = trx.submit(&mut conn).await;
    assert!(response.is_approved());
    assert_eq!(response.resp_msg(), Some("Approved"));
    assert_eq!(response.transaction_response().pnref.as_deref(), Some("V19A2E7C25F1"));
    assert_eq!(response.request(), expected_body);

    let [sent] = conn.sent.as_slice() else { panic!("expected one send, got {}", conn.sent.len()) };
    assert_eq!(sent.body, expected_body);
    assert_eq!(sent.request_id, "req-1");
    assert_eq!(sent.headers.get("X-SHOP-ID").map(String::as_str), Some("42"));
    assert_eq!(
        sent.headers.get("X-VPS-VIT-CLIENT-TYPE").map(String::as_str),
        Some("Rust")
    );
    assert!(!trx.context().is_error_contained());
    assert_eq!(trx.request(), Some(expected_body.as_str()));
}

#[rstest]
#[tokio::test]
async fn integration_identity_is_sent(#[from(sale)] sale_trx: Transaction) {
    let mut trx = sale_trx.with_client_info(ClientInfo::with_integration("shopfront", "3.2"));
    let mut conn = ScriptedConnection::replying("RESULT=0");
    assert!(trx.submit(&mut conn).await.is_approved());

    let headers = &conn.sent.first().expect("one send").headers;
    assert_eq!(
        headers.get("X-VPS-VIT-INTEGRATION-PRODUCT").map(String::as_str),
        Some("shopfront")
    );
    assert_eq!(
        headers.get("X-VPS-VIT-INTEGRATION-VERSION").map(String::as_str),
        Some("3.2")
    );
    assert_eq!(
        trx.client_info().and_then(|info| info.integration_product.as_deref()),
        Some("shopfront")
    );
}

#[rstest]
#[tokio::test]
async fn caller_fatal_skips_network(#[from(sale)] mut trx: Transaction) {
    let fatal = ErrorObject::fatal("merchant rejected this order");
    trx.context_mut().add_error(fatal.clone());
    let mut conn = ScriptedConnection::replying("RESULT=0");

    let response = trx.submit(&mut conn).await;
    assert!(conn.sent.is_empty());
    assert_eq!(response.raw(), fatal.to_string());
    assert_eq!(response.result(), Some(result_code::VALIDATION));
    assert_eq!(response.resp_msg(), Some("merchant rejected this order"));
    assert!(!response.request().contains(ACCT));
    assert!(response.request().contains(&format!("ACCT[{}]={MASK}", MASK.len())));
}

#[rstest]
#[tokio::test]
async fn validation_fatal_skips_network() {
    let mut trx = Transaction::sale(
        UserInfo::new("merchant", "merchant", "PayPal", "s3cret"),
        Tender::card(CreditCard::new("", "1230")),
        Invoice::with_amount(Currency::new(Decimal::from_str("1.00").expect("decimal"))),
    );
    let mut conn = ScriptedConnection::replying("RESULT=0");

    let result = trx.submit(&mut conn).await.result();
    assert!(conn.sent.is_empty());
    assert_eq!(result, Some(result_code::VALIDATION));
    assert_eq!(trx.context().highest_error_level(), Some(Severity::Fatal));
}

#[rstest]
#[tokio::test]
async fn foreign_error_becomes_one_internal_fatal(#[from(sale)] mut trx: Transaction) {
    let mut conn = BrokenConnection { calls: 0 };

    let response = trx.submit(&mut conn).await;
    assert_eq!(conn.calls, 1);
    assert_eq!(response.result(), Some(result_code::INTERNAL));

    let fatals: Vec<_> = trx.context().errors_with_severity(Severity::Fatal).collect();
    let [fatal] = fatals.as_slice() else { panic!("expected one fatal, got {fatals:?}") };
    assert_eq!(fatal.result(), result_code::INTERNAL);
    assert!(fatal.message().contains("socket exploded"));
}

#[rstest]
#[case::timeout(TransportError::Timeout(Duration::from_secs(45)), result_code::TIMEOUT)]
#[case::status(TransportError::HttpStatus(503), result_code::HTTP_STATUS)]
#[case::connect(
    TransportError::Connect { host: "gw".to_owned(), message: "refused".to_owned() },
    result_code::CONNECT_FAILED
)]
#[tokio::test]
async fn transport_errors_keep_their_codes(
    #[from(sale)] mut trx: Transaction,
    #[case] err: TransportError,
    #[case] code: i32,
) {
    let mut conn = ScriptedConnection::failing(err.clone());

    let response = trx.submit(&mut conn).await;
    assert_eq!(response.result(), Some(code));
    assert_eq!(conn.sent.len(), 1);
    assert_eq!(trx.context().errors(), [err.to_error_object()]);
}

#[rstest]
#[tokio::test]
async fn malformed_extend_data_never_escapes(#[from(sale)] mut trx: Transaction) {
    trx.add_extend_data(ExtendData::new("BAD&NAME", "x"));
    let mut conn = ScriptedConnection::replying("RESULT=0");

    let response = trx.submit(&mut conn).await;
    assert!(conn.sent.is_empty());
    assert!(!response.is_approved());
    assert!(trx.context().has_fatal());
}

#[rstest]
#[tokio::test]
async fn garbled_reply_is_recorded_not_raised(#[from(sale)] mut trx: Transaction) {
    let mut conn = ScriptedConnection::replying("RESULT[9]=0");

    let response = trx.submit(&mut conn).await;
    assert_eq!(response.raw(), "RESULT[9]=0");
    let reply_ctx = response.context().clone();
    assert!(reply_ctx.errors().iter().any(|err| err.result() == result_code::BAD_RESPONSE));
    assert_eq!(trx.context(), &reply_ctx);
}

#[rstest]
#[tokio::test]
async fn resubmission_replaces_response(#[from(sale)] mut trx: Transaction) {
    let mut declined = ScriptedConnection::replying("RESULT=12&RESPMSG=Declined");
    assert_eq!(trx.submit(&mut declined).await.result(), Some(12));

    let mut approved = ScriptedConnection::replying("RESULT=0&RESPMSG=Approved");
    assert!(trx.submit(&mut approved).await.is_approved());
    assert_eq!(trx.response().and_then(payflow::Response::result), Some(0));
    assert_eq!(approved.sent.first().map(|req| req.request_id.as_str()), Some("req-1"));
}

#[rstest]
#[tokio::test]
async fn retry_after_timeout_reaches_gateway(#[from(sale)] mut trx: Transaction) {
    let mut slow = ScriptedConnection::failing(TransportError::Timeout(Duration::from_secs(1)));
    assert_eq!(trx.submit(&mut slow).await.result(), Some(result_code::TIMEOUT));

    let mut healthy = ScriptedConnection::replying("RESULT=0&PNREF=V2&RESPMSG=Approved");
    assert!(trx.submit(&mut healthy).await.is_approved());
    assert_eq!(healthy.sent.len(), 1);
    assert!(!trx.context().is_error_contained(), "{:?}", trx.context());
}

#[rstest]
#[tokio::test]
async fn corrected_amount_reaches_gateway(#[from(sale)] mut trx: Transaction) {
    trx.invoice = Some(Invoice::with_amount(Currency::new(Decimal::from_str("-1.00").expect("decimal"))));
    let mut conn = ScriptedConnection::replying("RESULT=0&RESPMSG=Approved");
    assert_eq!(trx.submit(&mut conn).await.result(), Some(result_code::VALIDATION));
    assert!(conn.sent.is_empty());

    trx.invoice = Some(Invoice::with_amount(Currency::new(Decimal::from_str("1.00").expect("decimal"))));
    assert!(trx.submit(&mut conn).await.is_approved());
    assert_eq!(conn.sent.len(), 1);
}

#[rstest]
#[tokio::test]
async fn caller_errors_apply_to_the_next_attempt_only(#[from(sale)] mut trx: Transaction) {
    let mut conn = ScriptedConnection::replying("RESULT=0");
    assert!(trx.submit(&mut conn).await.is_approved());

    trx.context_mut().add_error(ErrorObject::fatal("order cancelled by merchant"));
    let response = trx.submit(&mut conn).await;
    assert_eq!(response.resp_msg(), Some("order cancelled by merchant"));
    assert_eq!(conn.sent.len(), 1);

    assert!(trx.submit(&mut conn).await.is_approved());
    assert_eq!(conn.sent.len(), 2);
}
