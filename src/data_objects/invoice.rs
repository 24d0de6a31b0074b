//! Order amounts, descriptive references and buyer details.

use chrono::NaiveDate;

use super::RequestFragment;
use crate::{
    context::{Context, ErrorObject},
    currency::Currency,
    field_id::{FieldId, IndexedFieldId},
    request::RequestBuffer,
    transaction::TransactionError,
};

/// `ORDERDATE` and `DOB` wire format.
const DATE_FORMAT: &str = "%m%d%Y";

/// Which address block a set of fields belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// Billing address (`BILLTO*`).
    BillTo,
    /// Shipping address (`SHIPTO*`).
    ShipTo,
}

impl AddressKind {
    const fn fields(self) -> [FieldId; 12] {
        match self {
            Self::BillTo => [
                FieldId::BillToFirstName,
                FieldId::BillToMiddleName,
                FieldId::BillToLastName,
                FieldId::BillToCompanyName,
                FieldId::BillToStreet,
                FieldId::BillToStreet2,
                FieldId::BillToCity,
                FieldId::BillToState,
                FieldId::BillToZip,
                FieldId::BillToCountry,
                FieldId::BillToEmail,
                FieldId::BillToPhoneNum,
            ],
            Self::ShipTo => [
                FieldId::ShipToFirstName,
                FieldId::ShipToMiddleName,
                FieldId::ShipToLastName,
                FieldId::ShipToCompanyName,
                FieldId::ShipToStreet,
                FieldId::ShipToStreet2,
                FieldId::ShipToCity,
                FieldId::ShipToState,
                FieldId::ShipToZip,
                FieldId::ShipToCountry,
                FieldId::ShipToEmail,
                FieldId::ShipToPhoneNum,
            ],
        }
    }
}

/// A postal address with contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Billing or shipping.
    pub kind: AddressKind,
    /// Given name.
    pub first_name: Option<String>,
    /// Middle name.
    pub middle_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Company.
    pub company_name: Option<String>,
    /// Street line.
    pub street: Option<String>,
    /// Second street line.
    pub street2: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Postal code.
    pub zip: Option<String>,
    /// Country code.
    pub country: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone_num: Option<String>,
}

impl Address {
    /// Create an empty address of the given kind.
    #[must_use]
    pub const fn new(kind: AddressKind) -> Self {
        Self {
            kind,
            first_name: None,
            middle_name: None,
            last_name: None,
            company_name: None,
            street: None,
            street2: None,
            city: None,
            state: None,
            zip: None,
            country: None,
            email: None,
            phone_num: None,
        }
    }

    const fn values(&self) -> [&Option<String>; 12] {
        [
            &self.first_name,
            &self.middle_name,
            &self.last_name,
            &self.company_name,
            &self.street,
            &self.street2,
            &self.city,
            &self.state,
            &self.zip,
            &self.country,
            &self.email,
            &self.phone_num,
        ]
    }
}

impl RequestFragment for Address {
    fn append_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        for (field, value) in self.kind.fields().into_iter().zip(self.values()) {
            buf.append(field, value)?;
        }
        Ok(())
    }

    fn validate(&self, ctx: &mut Context) {
        if let Some(email) = &self.email
            && !email.contains('@')
        {
            ctx.add_error(ErrorObject::warn(format!("email address {email:?} looks malformed")));
        }
    }
}

/// Details of the buyer's browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserInfo {
    /// Local time on the buyer's machine.
    pub browser_time: Option<String>,
    /// Browser locale country.
    pub browser_country_code: Option<String>,
    /// User agent string.
    pub browser_user_agent: Option<String>,
}

impl RequestFragment for BrowserInfo {
    fn append_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        buf.append(FieldId::BrowserTime, &self.browser_time)?;
        buf.append(FieldId::BrowserCountryCode, &self.browser_country_code)?;
        buf.append(FieldId::BrowserUserAgent, &self.browser_user_agent)?;
        Ok(())
    }
}

/// Identifying details of the buyer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerInfo {
    /// Buyer IP address.
    pub cust_ip: Option<String>,
    /// Merchant's id for the buyer.
    pub cust_id: Option<String>,
    /// Buyer host name.
    pub cust_host_name: Option<String>,
    /// Date of birth.
    pub dob: Option<NaiveDate>,
}

impl RequestFragment for CustomerInfo {
    fn append_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        buf.append(FieldId::CustIp, &self.cust_ip)?;
        buf.append(FieldId::CustId, &self.cust_id)?;
        buf.append(FieldId::CustHostName, &self.cust_host_name)?;
        buf.append(
            FieldId::Dob,
            &self.dob.map(|dob| dob.format(DATE_FORMAT).to_string()),
        )?;
        Ok(())
    }
}

/// One line of an itemised order, sent as `L_*n` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItem {
    /// Item name.
    pub name: Option<String>,
    /// Item description.
    pub desc: Option<String>,
    /// Unit cost.
    pub cost: Option<Currency>,
    /// Quantity.
    pub qty: Option<u32>,
    /// Stock keeping unit.
    pub sku: Option<String>,
    /// Tax for the line.
    pub tax_amt: Option<Currency>,
    /// Line total.
    pub amt: Option<Currency>,
}

impl LineItem {
    fn append_at(&self, index: usize, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        buf.append_indexed(IndexedFieldId::LineName, index, &self.name)?;
        buf.append_indexed(IndexedFieldId::LineDesc, index, &self.desc)?;
        buf.append_indexed(IndexedFieldId::LineCost, index, &self.cost)?;
        buf.append_indexed(IndexedFieldId::LineQty, index, &self.qty)?;
        buf.append_indexed(IndexedFieldId::LineSku, index, &self.sku)?;
        buf.append_indexed(IndexedFieldId::LineTaxAmt, index, &self.tax_amt)?;
        buf.append_indexed(IndexedFieldId::LineAmt, index, &self.amt)?;
        Ok(())
    }

    fn validate_at(&self, index: usize, ctx: &mut Context) {
        let amounts = [
            (IndexedFieldId::LineCost, &self.cost),
            (IndexedFieldId::LineTaxAmt, &self.tax_amt),
            (IndexedFieldId::LineAmt, &self.amt),
        ];
        for (field, slot) in amounts {
            if let Some(amount) = slot {
                amount.validate(&field.with_index(index), ctx);
            }
        }
    }
}

/// Amounts and order details of a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invoice {
    /// Total amount; its currency code is sent as `CURRENCY`.
    pub amt: Option<Currency>,
    /// Tax portion.
    pub tax_amt: Option<Currency>,
    /// Freight portion.
    pub freight_amt: Option<Currency>,
    /// Handling portion.
    pub handling_amt: Option<Currency>,
    /// Duty portion.
    pub duty_amt: Option<Currency>,
    /// Discount applied.
    pub discount: Option<Currency>,
    /// Sum of the line items.
    pub item_amt: Option<Currency>,
    /// Merchant invoice number.
    pub inv_num: Option<String>,
    /// Purchase order number.
    pub po_num: Option<String>,
    /// Order description.
    pub desc: Option<String>,
    /// Free-form merchant comment.
    pub comment1: Option<String>,
    /// Second free-form merchant comment.
    pub comment2: Option<String>,
    /// Buyer reference.
    pub cust_ref: Option<String>,
    /// Buyer code for purchase cards.
    pub cust_code: Option<String>,
    /// Order date.
    pub order_date: Option<NaiveDate>,
    /// Marks a payment as part of a merchant-managed recurring series.
    pub recurring: Option<bool>,
    /// Billing address.
    pub bill_to: Option<Address>,
    /// Shipping address.
    pub ship_to: Option<Address>,
    /// Buyer's browser details.
    pub browser_info: Option<BrowserInfo>,
    /// Buyer identification.
    pub customer_info: Option<CustomerInfo>,
    /// Itemised lines, numbered from 0 on the wire.
    pub line_items: Vec<LineItem>,
}

impl Invoice {
    /// Invoice carrying only a total.
    #[must_use]
    pub fn with_amount(amt: Currency) -> Self {
        Self {
            amt: Some(amt),
            ..Self::default()
        }
    }

    fn amounts(&self) -> [(FieldId, &Option<Currency>); 7] {
        [
            (FieldId::Amt, &self.amt),
            (FieldId::TaxAmt, &self.tax_amt),
            (FieldId::FreightAmt, &self.freight_amt),
            (FieldId::HandlingAmt, &self.handling_amt),
            (FieldId::DutyAmt, &self.duty_amt),
            (FieldId::Discount, &self.discount),
            (FieldId::ItemAmt, &self.item_amt),
        ]
    }
}

impl RequestFragment for Invoice {
    fn append_fields(&self, buf: &mut RequestBuffer) -> Result<(), TransactionError> {
        buf.append(FieldId::Amt, &self.amt)?;
        buf.append(FieldId::Currency, &self.amt.as_ref().map(Currency::code))?;
        for (field, amount) in self.amounts().into_iter().skip(1) {
            buf.append(field, amount)?;
        }
        buf.append(FieldId::InvNum, &self.inv_num)?;
        buf.append(FieldId::PoNum, &self.po_num)?;
        buf.append(FieldId::Desc, &self.desc)?;
        buf.append(FieldId::Comment1, &self.comment1)?;
        buf.append(FieldId::Comment2, &self.comment2)?;
        buf.append(FieldId::CustRef, &self.cust_ref)?;
        buf.append(FieldId::CustCode, &self.cust_code)?;
        buf.append(
            FieldId::OrderDate,
            &self.order_date.map(|date| date.format(DATE_FORMAT).to_string()),
        )?;
        buf.append(FieldId::Recurring, &self.recurring)?;
        self.bill_to.append_fields(buf)?;
        self.ship_to.append_fields(buf)?;
        self.browser_info.append_fields(buf)?;
        self.customer_info.append_fields(buf)?;
        for (index, item) in self.line_items.iter().enumerate() {
            item.append_at(index, buf)?;
        }
        Ok(())
    }

    fn validate(&self, ctx: &mut Context) {
        let total_code = self.amt.as_ref().map(Currency::code);
        for (field, slot) in self.amounts() {
            let Some(amount) = slot else { continue };
            amount.validate(field.as_str(), ctx);
            if let Some(code) = total_code
                && amount.code() != code
            {
                ctx.add_error(ErrorObject::error(format!(
                    "{field} is in {} but AMT is in {code}",
                    amount.code()
                )));
            }
        }
        for (kind, slot) in [
            (AddressKind::BillTo, &self.bill_to),
            (AddressKind::ShipTo, &self.ship_to),
        ] {
            if let Some(address) = slot {
                if address.kind != kind {
                    ctx.add_error(ErrorObject::error(format!(
                        "{kind:?} slot holds a {:?} address",
                        address.kind
                    )));
                }
                address.validate(ctx);
            }
        }
        for (index, item) in self.line_items.iter().enumerate() {
            item.validate_at(index, ctx);
        }
    }
}
