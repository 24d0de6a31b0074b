//! Merchant-defined pass-through values `USER1` to `USER10`.

use super::RequestFragment;
use crate::{field_id::FieldId, request::RequestBuffer, transaction::TransactionError};

const SLOTS: [FieldId; 10] = [
    FieldId::User1,
    FieldId::User2,
    FieldId::User3,
    FieldId::User4,
    FieldId::User5,
    FieldId::User6,
    FieldId::User7,
    FieldId::User8,
    FieldId::User9,
    FieldId::User10,
];

/// Up to ten free-form values echoed back in reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserItem {
    values: [Option<String>; 10],
}

impl UserItem {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Set slot `slot` (1 to 10). Returns `false` for an out-of-range slot.
    pub fn set(&mut self, slot: usize, value: impl Into<String>) -> bool {
        match slot.checked_sub(1).and_then(|i| self.values.get_mut(i)) {
            Some(entry) => {
                *entry = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// Read slot `slot` (1 to 10).
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&str> {
        slot.checked_sub(1)
            .and_then(|i| self.values.get(i))
            .and_then(Option::as_deref)
    }
}

impl RequestFragment for UserItem {
    fn append_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        for (field, value) in SLOTS.iter().zip(&self.values) {
            buf.append(*field, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn only_filled_slots_are_sent() {
        let mut items = UserItem::new();
        assert!(items.set(1, "alpha"));
        assert!(items.set(10, "omega"));
        assert!(!items.set(0, "nope"));
        assert!(!items.set(11, "nope"));
        let mut buf = RequestBuffer::new();
        items.append_fields(&mut buf).expect("append");
        assert_eq!(buf.as_str(), "USER1[5]=alpha&USER10[5]=omega&");
        assert_eq!(items.get(10), Some("omega"));
    }
}
