//! Transactions: what is sent, how it is validated and how it is submitted.
//!
//! A [`Transaction`] owns its leaf objects, its [`Context`] and, after
//! submission, the request it sent and the [`Response`] it received. The
//! operation itself is described by a [`TransactionKind`].

pub mod errors;
mod generate;
pub mod kind;
mod submit;
mod validation;

use uuid::Uuid;

pub use errors::TransactionError;
pub use kind::{
    BuyerAuthStep,
    FraudAction,
    RecurringAction,
    RecurringTransaction,
    ReferenceKind,
    ReferenceTransaction,
    TransactionKind,
    Verbosity,
};

use crate::{
    context::{Context, ErrorObject},
    currency::Currency,
    data_objects::{
        BuyerAuthStatus,
        ClientInfo,
        CreditCard,
        ExtendData,
        Invoice,
        RecurringInfo,
        Tender,
        UserInfo,
        UserItem,
    },
    response::Response,
    transaction_type::TransactionType,
};

/// One operation against the gateway and everything it carries.
///
/// Leaf objects are public and may be changed freely before submission.
/// The kind, and with it the `TRXTYPE`, is fixed at construction.
#[derive(Debug, Clone)]
pub struct Transaction {
    kind: TransactionKind,
    request_id: String,
    /// Detail level requested in the reply.
    pub verbosity: Option<Verbosity>,
    /// Amounts and order details.
    pub invoice: Option<Invoice>,
    /// Payment method.
    pub tender: Option<Tender>,
    /// Merchant credentials.
    pub user_info: Option<UserInfo>,
    /// Merchant pass-through values.
    pub user_item: Option<UserItem>,
    /// 3-D Secure outcome for the payment.
    pub buyer_auth_status: Option<BuyerAuthStatus>,
    /// Extra caller-named fields, sent last in insertion order.
    pub extend_data: Vec<ExtendData>,
    client_info: Option<ClientInfo>,
    context: Context,
    caller_errors: Vec<ErrorObject>,
    caller_mark: usize,
    request: Option<String>,
    response: Option<Response>,
}

impl Transaction {
    /// Create a transaction of `kind` with a fresh request id and no leaf
    /// objects.
    #[must_use]
    pub fn new(kind: TransactionKind) -> Self {
        Self {
            kind,
            request_id: Uuid::new_v4().simple().to_string(),
            verbosity: None,
            invoice: None,
            tender: None,
            user_info: None,
            user_item: None,
            buyer_auth_status: None,
            extend_data: Vec::new(),
            client_info: None,
            context: Context::new(),
            caller_errors: Vec::new(),
            caller_mark: 0,
            request: None,
            response: None,
        }
    }

    fn payment(
        kind: TransactionKind,
        user_info: UserInfo,
        tender: Tender,
        invoice: Invoice,
    ) -> Self {
        let mut trx = Self::new(kind);
        trx.user_info = Some(user_info);
        trx.tender = Some(tender);
        trx.invoice = Some(invoice);
        trx
    }

    fn referencing(user_info: UserInfo, reference: ReferenceTransaction) -> Self {
        let mut trx = Self::new(TransactionKind::Reference(reference));
        trx.user_info = Some(user_info);
        trx
    }

    /// Authorise and capture `invoice` against `tender`.
    #[must_use]
    pub fn sale(user_info: UserInfo, tender: Tender, invoice: Invoice) -> Self {
        Self::payment(TransactionKind::Sale, user_info, tender, invoice)
    }

    /// Authorise `invoice` against `tender` for later capture.
    #[must_use]
    pub fn authorization(user_info: UserInfo, tender: Tender, invoice: Invoice) -> Self {
        Self::payment(TransactionKind::Authorization, user_info, tender, invoice)
    }

    /// Record a phone authorisation identified by `auth_code`.
    #[must_use]
    pub fn voice_authorization(
        user_info: UserInfo,
        auth_code: impl Into<String>,
        tender: Tender,
        invoice: Invoice,
    ) -> Self {
        let kind = TransactionKind::VoiceAuthorization {
            auth_code: auth_code.into(),
        };
        Self::payment(kind, user_info, tender, invoice)
    }

    /// Place an express checkout order for `invoice`.
    #[must_use]
    pub fn order(user_info: UserInfo, invoice: Invoice) -> Self {
        let mut trx = Self::new(TransactionKind::Order);
        trx.user_info = Some(user_info);
        trx.invoice = Some(invoice);
        trx
    }

    /// Store `tender` with the gateway without charging it.
    #[must_use]
    pub fn data_upload(user_info: UserInfo, tender: Tender) -> Self {
        let mut trx = Self::new(TransactionKind::DataUpload);
        trx.user_info = Some(user_info);
        trx.tender = Some(tender);
        trx
    }

    /// Refund the transaction `orig_id`.
    #[must_use]
    pub fn credit(user_info: UserInfo, orig_id: impl Into<String>) -> Self {
        Self::referencing(user_info, ReferenceTransaction::new(orig_id, ReferenceKind::Credit))
    }

    /// Cancel the unsettled transaction `orig_id`.
    #[must_use]
    pub fn void(user_info: UserInfo, orig_id: impl Into<String>) -> Self {
        Self::referencing(user_info, ReferenceTransaction::new(orig_id, ReferenceKind::Void))
    }

    /// Capture the authorisation `orig_id`, optionally for a different
    /// amount.
    #[must_use]
    pub fn capture(user_info: UserInfo, orig_id: impl Into<String>, invoice: Option<Invoice>) -> Self {
        let reference = ReferenceTransaction::new(
            orig_id,
            ReferenceKind::Capture {
                capture_complete: None,
            },
        );
        let mut trx = Self::referencing(user_info, reference);
        trx.invoice = invoice;
        trx
    }

    /// Look up the transaction `orig_id`.
    #[must_use]
    pub fn inquiry(user_info: UserInfo, orig_id: impl Into<String>) -> Self {
        Self::referencing(user_info, ReferenceTransaction::new(orig_id, ReferenceKind::Inquiry))
    }

    /// Resolve the fraud hold on `orig_id`.
    #[must_use]
    pub fn fraud_review(user_info: UserInfo, orig_id: impl Into<String>, action: FraudAction) -> Self {
        Self::referencing(
            user_info,
            ReferenceTransaction::new(orig_id, ReferenceKind::FraudReview { action }),
        )
    }

    /// Apply `action` to a recurring profile described by `info`.
    #[must_use]
    pub fn recurring(user_info: UserInfo, action: RecurringAction, info: RecurringInfo) -> Self {
        let mut trx = Self::new(TransactionKind::Recurring(RecurringTransaction { action, info }));
        trx.user_info = Some(user_info);
        trx
    }

    /// Ask whether `card` is enrolled in 3-D Secure.
    #[must_use]
    pub fn verify_enrollment(user_info: UserInfo, card: CreditCard, amount: Option<Currency>) -> Self {
        let mut trx = Self::new(TransactionKind::BuyerAuth(BuyerAuthStep::VerifyEnrollment {
            card,
            amount,
        }));
        trx.user_info = Some(user_info);
        trx
    }

    /// Validate the issuer's authentication response `pa_res`.
    #[must_use]
    pub fn validate_authentication(user_info: UserInfo, pa_res: impl Into<String>) -> Self {
        let mut trx = Self::new(TransactionKind::BuyerAuth(
            BuyerAuthStep::ValidateAuthentication {
                pa_res: pa_res.into(),
            },
        ));
        trx.user_info = Some(user_info);
        trx
    }

    /// Replace the generated request id.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    /// Request a reply detail level.
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = Some(verbosity);
        self
    }

    /// Identify the client with `client_info` instead of the defaults.
    #[must_use]
    pub fn with_client_info(mut self, client_info: ClientInfo) -> Self {
        self.client_info = Some(client_info);
        self
    }

    /// The operation performed.
    #[must_use]
    pub const fn kind(&self) -> &TransactionKind { &self.kind }

    /// The `TRXTYPE` sent.
    #[must_use]
    pub const fn transaction_type(&self) -> TransactionType { self.kind.transaction_type() }

    /// Idempotency key sent with the request.
    #[must_use]
    pub fn request_id(&self) -> &str { &self.request_id }

    /// Append an extra caller-named field.
    pub fn add_extend_data(&mut self, data: ExtendData) { self.extend_data.push(data); }

    /// Client identification, if set or created by a submission.
    #[must_use]
    pub const fn client_info(&self) -> Option<&ClientInfo> { self.client_info.as_ref() }

    /// Set a transport header, creating default client info if needed.
    pub fn add_trans_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.client_info
            .get_or_insert_with(ClientInfo::default)
            .add_header(name, value);
    }

    /// Remove a transport header, returning its value.
    pub fn remove_trans_header(&mut self, name: &str) -> Option<String> {
        self.client_info.as_mut()?.remove_header(name)
    }

    /// Errors collected so far.
    #[must_use]
    pub const fn context(&self) -> &Context { &self.context }

    /// Mutable access to the collected errors, for adding or clearing them.
    ///
    /// Errors added here are carried into the next submission. Errors the
    /// SDK recorded during a submission are dropped when the next one
    /// starts.
    pub const fn context_mut(&mut self) -> &mut Context { &mut self.context }

    /// Request string of the latest submission; masked unless it reached
    /// the connection.
    #[must_use]
    pub fn request(&self) -> Option<&str> { self.request.as_deref() }

    /// Response of the latest submission.
    #[must_use]
    pub const fn response(&self) -> Option<&Response> { self.response.as_ref() }
}
