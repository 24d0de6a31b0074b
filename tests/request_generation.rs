//! Request generation through the public API: field order, omission of
//! absent values and delimiter handling.

use std::str::FromStr;

use chrono::NaiveDate;
use payflow::{
    currency::Currency,
    data_objects::{
        CreditCard,
        ExtendData,
        Invoice,
        PayPeriod,
        RecurringInfo,
        Tender,
        UserInfo,
        UserItem,
    },
    transaction::{RecurringAction, Transaction, TransactionKind},
};
use rstest::{fixture, rstest};
use rust_decimal::Decimal;

#[fixture]
fn creds() -> UserInfo { UserInfo::new("merchant", "merchant", "PayPal", "s3cret") }

fn usd(value: &str) -> Currency { Currency::new(Decimal::from_str(value).expect("decimal")) }

fn card() -> Tender { Tender::card(CreditCard::new("4111111111111111", "1230")) }

fn position(request: &str, needle: &str) -> usize {
    request
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} missing from {request:?}"))
}

#[rstest]
fn sale_serialises_base_then_children(creds: UserInfo) {
    let trx = Transaction::sale(creds, card(), Invoice::with_amount(usd("25.12")));
    let request = trx.generate_request().expect("generate");
    assert_eq!(
        request,
        "TRXTYPE[1]=S&AMT[5]=25.12&CURRENCY[3]=USD&TENDER[1]=C&ACCT[16]=4111111111111111\
         &EXPDATE[4]=1230&USER[8]=merchant&VENDOR[8]=merchant&PARTNER[6]=PayPal&PWD[6]=s3cret"
    );
}

#[rstest]
fn credit_references_original_without_amount(creds: UserInfo) {
    let request = Transaction::credit(creds, "V64A0A07BD24")
        .generate_request()
        .expect("generate");
    assert!(request.starts_with("TRXTYPE[1]=C&"));
    assert!(position(&request, "ORIGID[12]=V64A0A07BD24") > position(&request, "TRXTYPE[1]=C"));
    assert!(!request.contains("AMT"));
}

#[rstest]
fn missing_credentials_are_omitted() {
    let request = Transaction::new(TransactionKind::Sale)
        .generate_request()
        .expect("generate");
    assert_eq!(request, "TRXTYPE[1]=S");
    for name in ["USER[", "VENDOR[", "PARTNER[", "PWD["] {
        assert!(!request.contains(name), "{name} present in {request}");
    }
}

#[rstest]
fn recurring_action_follows_base_and_precedes_profile(creds: UserInfo) {
    let info = RecurringInfo {
        profile_name: Some("Monthly box".to_owned()),
        start: NaiveDate::from_ymd_opt(2999, 6, 1),
        term: Some(0),
        pay_period: Some(PayPeriod::Monthly),
        ..RecurringInfo::default()
    };
    let mut trx = Transaction::recurring(creds, RecurringAction::Add, info);
    trx.tender = Some(card());
    trx.invoice = Some(Invoice::with_amount(usd("9.99")));
    let request = trx.generate_request().expect("generate");

    let action = position(&request, "ACTION[1]=A");
    for base in ["TRXTYPE[1]=R", "AMT[4]=9.99", "ACCT[16]=", "PWD[6]=s3cret"] {
        assert!(position(&request, base) < action, "{base} after ACTION");
    }
    for profile in ["PROFILENAME[11]=Monthly box", "START[8]=06012999", "TERM[1]=0", "PAYPERIOD[4]=MONT"] {
        assert!(position(&request, profile) > action, "{profile} before ACTION");
    }
}

#[rstest]
fn empty_values_never_appear(creds: UserInfo) {
    let mut invoice = Invoice::with_amount(usd("1.00"));
    invoice.comment1 = Some(String::new());
    invoice.inv_num = None;
    let mut trx = Transaction::sale(creds, card(), invoice);
    trx.user_item = Some(UserItem::new());
    trx.add_extend_data(ExtendData::new("MERCHDESCR", ""));
    let request = trx.generate_request().expect("generate");
    for name in ["COMMENT1", "INVNUM", "USER1", "MERCHDESCR", "VERBOSITY"] {
        assert!(!request.contains(name), "{name} present in {request}");
    }
}

#[rstest]
#[case::sale(Transaction::sale(creds(), card(), Invoice::with_amount(usd("5.00"))))]
#[case::void(Transaction::void(creds(), "V1"))]
#[case::inquiry(Transaction::inquiry(creds(), "V1"))]
#[case::capture(Transaction::capture(creds(), "V1", Some(Invoice::with_amount(usd("1.00")))))]
#[case::validate_auth(Transaction::validate_authentication(creds(), "eJxVUl1vgjAU"))]
fn trailing_delimiter_is_stripped(#[case] trx: Transaction) {
    let request = trx.generate_request().expect("generate");
    assert!(!request.is_empty());
    assert!(!request.ends_with('&'));
    assert!(!request.contains("&&"));
}

#[rstest]
fn capture_orders_base_layer_concrete(creds: UserInfo) {
    let trx = Transaction::capture(creds, "V19R3EF62FBE", Some(Invoice::with_amount(usd("3.50"))));
    let request = trx.generate_request().expect("generate");
    let base = position(&request, "AMT[4]=3.50");
    let layer = position(&request, "ORIGID[12]=V19R3EF62FBE");
    assert!(position(&request, "TRXTYPE[1]=D") < base);
    assert!(base < layer);
}

#[rstest]
fn enrollment_card_follows_credentials(creds: UserInfo) {
    let trx = Transaction::verify_enrollment(
        creds,
        CreditCard::new("5105105105105100", "0128"),
        Some(usd("10.00")),
    );
    let request = trx.generate_request().expect("generate");
    assert!(request.starts_with("TRXTYPE[1]=E&"));
    assert!(position(&request, "PWD[6]=s3cret") < position(&request, "ACCT[16]=5105105105105100"));
    assert!(request.ends_with("AMT[5]=10.00&CURRENCY[3]=USD"));
}

#[rstest]
fn delimiter_inside_value_is_length_protected(creds: UserInfo) {
    let mut invoice = Invoice::with_amount(usd("2.00"));
    invoice.comment1 = Some("fish & chips=good".to_owned());
    let request = Transaction::sale(creds, card(), invoice)
        .generate_request()
        .expect("generate");
    assert!(request.contains("COMMENT1[17]=fish & chips=good&"));
    let pairs = payflow::request::decode_pairs(&request).expect("decode");
    assert!(pairs.contains(&("COMMENT1", "fish & chips=good")));
}

#[rstest]
fn voice_authorization_code_is_concrete(creds: UserInfo) {
    let trx = Transaction::voice_authorization(creds, "123PNI", card(), Invoice::with_amount(usd("7.00")));
    let request = trx.generate_request().expect("generate");
    assert!(request.starts_with("TRXTYPE[1]=F&AMT[4]=7.00&"));
    assert!(position(&request, "PWD[6]=s3cret") < position(&request, "AUTHCODE[6]=123PNI"));
    assert!(request.ends_with("AUTHCODE[6]=123PNI"));
}
