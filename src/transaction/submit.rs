//! The submit orchestrator.

use tracing::{debug, info, warn};

use super::{Transaction, TransactionError};
use crate::{
    connection::{Connection, GatewayRequest},
    context::Severity,
    data_objects::ClientInfo,
    request::mask_sensitive_fields,
    response::Response,
};

impl Transaction {
    /// Validate, generate and send the transaction, then attach and return
    /// its response.
    ///
    /// Submission never fails. A fatal error already in the context, or one
    /// found by validation, skips the connection entirely; the response then
    /// carries the masked request and, as its reply, the first fatal error
    /// in reply format. Failures while generating or sending become one
    /// fatal context entry. Each call replaces the previous response and
    /// starts from a fresh context: only errors the caller added since the
    /// last call are carried in.
    pub async fn submit<C>(&mut self, connection: &mut C) -> &Response
    where
        C: Connection + ?Sized,
    {
        let trx_type = self.transaction_type().code();
        debug!(trx_type, request_id = %self.request_id, "submitting transaction");

        let headers = self
            .client_info
            .get_or_insert_with(ClientInfo::default)
            .transport_headers();
        self.validate();

        let mut raw_reply = None;
        let mut sent = None;
        if self.context.has_fatal() {
            warn!(
                trx_type,
                request_id = %self.request_id,
                "fatal error before send; not contacting gateway"
            );
        } else {
            match self.generate_request() {
                Ok(body) => {
                    debug!(
                        request_id = %self.request_id,
                        request = %mask_sensitive_fields(&body),
                        "request generated"
                    );
                    let request = GatewayRequest {
                        body,
                        request_id: self.request_id.clone(),
                        headers,
                    };
                    match connection.send(&request).await {
                        Ok(raw) => raw_reply = Some(raw),
                        Err(err) => {
                            let wrapped = TransactionError::wrap(err);
                            warn!(request_id = %self.request_id, err = %wrapped, "send failed");
                            self.context.add_error(wrapped.to_error_object());
                        }
                    }
                    sent = Some(
                        connection
                            .last_request()
                            .map_or(request.body, str::to_owned),
                    );
                }
                Err(err) => self.context.add_error(err.to_error_object()),
            }
        }
        let request_string = sent.unwrap_or_else(|| self.masked_request());
        let reply = raw_reply.unwrap_or_else(|| {
            self.context
                .first_error(Severity::Fatal)
                .map(ToString::to_string)
                .unwrap_or_default()
        });

        let response = Response::new(request_string.clone(), reply, self.context.clone());
        self.context.clone_from(response.context());
        if response.context().is_error_contained() {
            response.context().log_errors();
        }
        info!(
            trx_type,
            request_id = %self.request_id,
            result = ?response.result(),
            "transaction complete"
        );
        self.end_attempt();
        self.request = Some(request_string);
        self.response.insert(response)
    }

    fn masked_request(&self) -> String {
        self.generate_request()
            .map(|body| mask_sensitive_fields(&body))
            .unwrap_or_default()
    }
}
