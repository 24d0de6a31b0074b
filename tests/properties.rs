//! Property tests for field encoding and masking.

use payflow::{
    field_id::FieldId,
    request::{MASK, append_to_request, decode_pairs, mask_sensitive_fields},
};
use proptest::{prelude::*, sample::select};

proptest! {
    #[test]
    fn length_clause_counts_bytes(field in select(FieldId::ALL), value in "\\PC{1,40}") {
        let name = field.as_str();
        let fragment = append_to_request(name, value.as_str());
        prop_assert_eq!(&fragment, &format!("{name}[{}]={value}&", value.len()));

        let pairs = decode_pairs(fragment.strip_suffix('&').unwrap_or(&fragment)).expect("decode");
        prop_assert_eq!(pairs, vec![(name, value.as_str())]);
    }

    #[test]
    fn empty_values_produce_nothing(field in select(FieldId::ALL)) {
        prop_assert_eq!(append_to_request(field.as_str(), ""), "");
    }

    #[test]
    fn masking_hides_account_numbers(
        acct in "[0-9]{12,19}",
        pwd in "[a-zA-Z0-9&=]{4,16}",
        comment in "\\PC{0,30}",
    ) {
        let request = [
            append_to_request("TRXTYPE", "S"),
            append_to_request("ACCT", acct.as_str()),
            append_to_request("PWD", pwd.as_str()),
            append_to_request("COMMENT1", comment.as_str()),
        ]
        .concat();
        let body = request.strip_suffix('&').unwrap_or(&request);

        let masked = mask_sensitive_fields(body);
        prop_assert!(!masked.contains(acct.as_str()) || comment.contains(acct.as_str()));
        let pairs = decode_pairs(&masked).expect("masked output decodes");
        prop_assert!(pairs.contains(&("ACCT", MASK)));
        prop_assert!(pairs.contains(&("PWD", MASK)));
        if !comment.is_empty() {
            prop_assert!(pairs.contains(&("COMMENT1", comment.as_str())));
        }
    }
}
