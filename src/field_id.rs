//! Wire names of every name/value pair the SDK writes or reads.
//!
//! Field names are closed enums rather than loose strings so a typo in a
//! request builder is a compile error. [`FieldId`] covers fixed names;
//! [`IndexedFieldId`] covers the numbered families such as `L_NAME0` or
//! `P_RESULT3`.

macro_rules! field_ids {
    (
        $(#[$enum_meta:meta])*
        pub enum $name:ident {
            $($(#[$doc:meta])* $variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($(#[$doc])* $variant,)+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Return the name transmitted on the wire.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            /// Look up a variant by its wire name.
            #[must_use]
            pub fn from_wire(name: &str) -> Option<Self> {
                match name {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

field_ids! {
    /// Fixed gateway field names.
    pub enum FieldId {
        /// Transaction type code.
        TrxType => "TRXTYPE",
        /// Tender type code.
        Tender => "TENDER",
        /// Response verbosity.
        Verbosity => "VERBOSITY",
        /// Merchant login user.
        User => "USER",
        /// Merchant vendor id.
        Vendor => "VENDOR",
        /// Reseller partner id.
        Partner => "PARTNER",
        /// Merchant password.
        Pwd => "PWD",

        /// Total amount.
        Amt => "AMT",
        /// ISO 4217 currency code.
        Currency => "CURRENCY",
        /// Tax amount.
        TaxAmt => "TAXAMT",
        /// Freight amount.
        FreightAmt => "FREIGHTAMT",
        /// Handling amount.
        HandlingAmt => "HANDLINGAMT",
        /// Duty amount.
        DutyAmt => "DUTYAMT",
        /// Discount amount.
        Discount => "DISCOUNT",
        /// Sum of line item amounts.
        ItemAmt => "ITEMAMT",
        /// Merchant invoice number.
        InvNum => "INVNUM",
        /// Purchase order number.
        PoNum => "PONUM",
        /// Free-form merchant comment.
        Comment1 => "COMMENT1",
        /// Second free-form merchant comment.
        Comment2 => "COMMENT2",
        /// Order description.
        Desc => "DESC",
        /// Customer reference.
        CustRef => "CUSTREF",
        /// Customer code.
        CustCode => "CUSTCODE",
        /// Order date (`MMDDYY`).
        OrderDate => "ORDERDATE",
        /// Flags a sale as part of a merchant-run recurring series.
        Recurring => "RECURRING",

        /// Bill-to first name.
        BillToFirstName => "BILLTOFIRSTNAME",
        /// Bill-to middle name.
        BillToMiddleName => "BILLTOMIDDLENAME",
        /// Bill-to last name.
        BillToLastName => "BILLTOLASTNAME",
        /// Bill-to company.
        BillToCompanyName => "BILLTOCOMPANYNAME",
        /// Bill-to street.
        BillToStreet => "BILLTOSTREET",
        /// Bill-to second street line.
        BillToStreet2 => "BILLTOSTREET2",
        /// Bill-to city.
        BillToCity => "BILLTOCITY",
        /// Bill-to state or province.
        BillToState => "BILLTOSTATE",
        /// Bill-to postal code.
        BillToZip => "BILLTOZIP",
        /// Bill-to country.
        BillToCountry => "BILLTOCOUNTRY",
        /// Bill-to email.
        BillToEmail => "BILLTOEMAIL",
        /// Bill-to phone number.
        BillToPhoneNum => "BILLTOPHONENUM",

        /// Ship-to first name.
        ShipToFirstName => "SHIPTOFIRSTNAME",
        /// Ship-to middle name.
        ShipToMiddleName => "SHIPTOMIDDLENAME",
        /// Ship-to last name.
        ShipToLastName => "SHIPTOLASTNAME",
        /// Ship-to company.
        ShipToCompanyName => "SHIPTOCOMPANYNAME",
        /// Ship-to street.
        ShipToStreet => "SHIPTOSTREET",
        /// Ship-to second street line.
        ShipToStreet2 => "SHIPTOSTREET2",
        /// Ship-to city.
        ShipToCity => "SHIPTOCITY",
        /// Ship-to state or province.
        ShipToState => "SHIPTOSTATE",
        /// Ship-to postal code.
        ShipToZip => "SHIPTOZIP",
        /// Ship-to country.
        ShipToCountry => "SHIPTOCOUNTRY",
        /// Ship-to email.
        ShipToEmail => "SHIPTOEMAIL",
        /// Ship-to phone number.
        ShipToPhoneNum => "SHIPTOPHONENUM",

        /// Browser local time.
        BrowserTime => "BROWSERTIME",
        /// Browser country code.
        BrowserCountryCode => "BROWSERCOUNTRYCODE",
        /// Browser user agent.
        BrowserUserAgent => "BROWSERUSERAGENT",

        /// Customer IP address.
        CustIp => "CUSTIP",
        /// Merchant customer id.
        CustId => "CUSTID",
        /// Customer host name.
        CustHostName => "CUSTHOSTNAME",
        /// Customer date of birth (`MMDDYYYY`).
        Dob => "DOB",

        /// Card or bank account number.
        Acct => "ACCT",
        /// Card expiry (`MMYY`).
        ExpDate => "EXPDATE",
        /// Card verification value.
        Cvv2 => "CVV2",
        /// Name on the account.
        Name => "NAME",
        /// Raw magnetic stripe data.
        Swipe => "SWIPE",
        /// Card start date for issuer-numbered cards.
        CardStart => "CARDSTART",
        /// Card issue number.
        CardIssue => "CARDISSUE",
        /// Bank routing number.
        Aba => "ABA",
        /// Bank account type.
        AcctType => "ACCTTYPE",
        /// ACH authorisation type.
        AuthType => "AUTHTYPE",
        /// ACH pre-notification flag.
        Prenote => "PRENOTE",
        /// Check MICR line.
        Micr => "MICR",
        /// Check number.
        ChkNum => "CHKNUM",
        /// Check type.
        ChkType => "CHKTYPE",
        /// Driver licence number.
        Dl => "DL",
        /// Social security number.
        Ss => "SS",
        /// Express checkout token.
        Token => "TOKEN",
        /// Express checkout payer id.
        PayerId => "PAYERID",
        /// Express checkout return URL.
        ReturnUrl => "RETURNURL",
        /// Express checkout cancel URL.
        CancelUrl => "CANCELURL",

        /// Action code for recurring and express checkout requests.
        Action => "ACTION",
        /// Id of the transaction being referenced.
        OrigId => "ORIGID",
        /// Original PayPal reference.
        OrigPpRef => "ORIGPPREF",
        /// Whether a capture closes the authorisation.
        CaptureComplete => "CAPTURECOMPLETE",
        /// Voice authorisation code (also a response field).
        AuthCode => "AUTHCODE",
        /// Fraud review decision.
        UpdateAction => "UPDATEACTION",

        /// Recurring profile name.
        ProfileName => "PROFILENAME",
        /// Recurring start date (`MMDDYYYY`).
        Start => "START",
        /// Number of payments in the profile.
        Term => "TERM",
        /// Payment period code.
        PayPeriod => "PAYPERIOD",
        /// Custom frequency in days.
        Frequency => "FREQUENCY",
        /// Failed payments tolerated before suspension.
        MaxFailPayments => "MAXFAILPAYMENTS",
        /// Days between retries of a failed payment.
        RetryNumDays => "RETRYNUMDAYS",
        /// Profile contact email.
        Email => "EMAIL",
        /// Profile company name.
        CompanyName => "COMPANYNAME",
        /// Optional transaction run when a profile is added.
        OptionalTrx => "OPTIONALTRX",
        /// Amount of the optional transaction.
        OptionalTrxAmt => "OPTIONALTRXAMT",
        /// Profile being acted upon.
        OrigProfileId => "ORIGPROFILEID",
        /// Requests the payment history of a profile.
        PaymentHistory => "PAYMENTHISTORY",
        /// Retried payment number.
        PaymentNum => "PAYMENTNUM",

        /// 3-D Secure authentication id.
        AuthenticationId => "AUTHENTICATION_ID",
        /// 3-D Secure authentication status.
        AuthenticationStatus => "AUTHENTICATION_STATUS",
        /// Cardholder authentication verification value.
        Cavv => "CAVV",
        /// Electronic commerce indicator.
        Eci => "ECI",
        /// 3-D Secure transaction id.
        Xid => "XID",
        /// Payer authentication response from the issuer.
        PaRes => "PARES",
        /// Payer authentication request for the issuer.
        PaReq => "PAREQ",
        /// Issuer access control server URL.
        AcsUrl => "ACSURL",

        /// Merchant-defined value 1.
        User1 => "USER1",
        /// Merchant-defined value 2.
        User2 => "USER2",
        /// Merchant-defined value 3.
        User3 => "USER3",
        /// Merchant-defined value 4.
        User4 => "USER4",
        /// Merchant-defined value 5.
        User5 => "USER5",
        /// Merchant-defined value 6.
        User6 => "USER6",
        /// Merchant-defined value 7.
        User7 => "USER7",
        /// Merchant-defined value 8.
        User8 => "USER8",
        /// Merchant-defined value 9.
        User9 => "USER9",
        /// Merchant-defined value 10.
        User10 => "USER10",

        /// Gateway result code.
        Result => "RESULT",
        /// Gateway reference id.
        PnRef => "PNREF",
        /// Gateway response message.
        RespMsg => "RESPMSG",
        /// Address verification result.
        AvsAddr => "AVSADDR",
        /// Postal code verification result.
        AvsZip => "AVSZIP",
        /// International address verification result.
        Iavs => "IAVS",
        /// Card verification result.
        Cvv2Match => "CVV2MATCH",
        /// Processor host code.
        HostCode => "HOSTCODE",
        /// Processor address verification code.
        ProcAvs => "PROCAVS",
        /// Processor card verification code.
        ProcCvv2 => "PROCCVV2",
        /// Duplicate submission indicator.
        Duplicate => "DUPLICATE",
        /// Result of the original transaction on inquiry.
        OrigResult => "ORIGRESULT",
        /// Settlement state.
        TransState => "TRANSSTATE",
        /// PayPal reference.
        PpRef => "PPREF",
        /// PayPal correlation id.
        CorrelationId => "CORRELATIONID",
        /// Remaining balance on a stored-value card.
        BalAmt => "BALAMT",
        /// Card brand code.
        CardType => "CARDTYPE",
        /// Fraud filter messages before authorisation.
        PreFpsMsg => "PREFPSMSG",
        /// Fraud filter messages after authorisation.
        PostFpsMsg => "POSTFPSMSG",
        /// Recurring profile reference.
        RpRef => "RPREF",
        /// Recurring profile id.
        ProfileId => "PROFILEID",
        /// Recurring profile status.
        Status => "STATUS",
        /// Date of the next recurring payment.
        NextPayment => "NEXTPAYMENT",
    }
}

field_ids! {
    /// Numbered field families; the index is appended to the name.
    pub enum IndexedFieldId {
        /// Line item name.
        LineName => "L_NAME",
        /// Line item description.
        LineDesc => "L_DESC",
        /// Line item unit cost.
        LineCost => "L_COST",
        /// Line item quantity.
        LineQty => "L_QTY",
        /// Line item SKU.
        LineSku => "L_SKU",
        /// Line item tax amount.
        LineTaxAmt => "L_TAXAMT",
        /// Line item total.
        LineAmt => "L_AMT",
        /// Payment history reference.
        HistoryPnRef => "P_PNREF",
        /// Payment history result code.
        HistoryResult => "P_RESULT",
        /// Payment history settlement state.
        HistoryTransState => "P_TRANSTATE",
        /// Payment history tender.
        HistoryTender => "P_TENDER",
        /// Payment history timestamp.
        HistoryTransTime => "P_TRANSTIME",
        /// Payment history amount.
        HistoryAmt => "P_AMT",
    }
}

impl IndexedFieldId {
    /// Build the wire name for entry `index`, e.g. `L_NAME0`.
    #[must_use]
    pub fn with_index(self, index: usize) -> String { format!("{}{index}", self.as_str()) }

    /// Split a wire name such as `P_RESULT2` into its family and index.
    #[must_use]
    pub fn parse_indexed(name: &str) -> Option<(Self, usize)> {
        let digits_at = name.find(|c: char| c.is_ascii_digit())?;
        let (prefix, digits) = name.split_at(digits_at);
        let index = digits.parse().ok()?;
        Self::from_wire(prefix).map(|field| (field, index))
    }
}
