//! Client SDK for the Payflow payment gateway.
//!
//! Callers build a [`transaction::Transaction`] from typed leaf objects,
//! then submit it over a [`connection::Connection`]. The transaction is
//! serialised into the gateway's `NAME[len]=value&` request format, and the
//! reply is decoded into a [`response::Response`]. Problems found along the
//! way are collected in a [`context::Context`] rather than returned as
//! errors, so submission always yields a response.

pub mod cli;
pub mod connection;
pub mod context;
pub mod currency;
pub mod data_objects;
pub mod field_id;
pub mod request;
pub mod response;
pub mod transaction;
pub mod transaction_type;

pub use context::{Context, ErrorObject, Severity};
pub use response::Response;
pub use transaction::{Transaction, TransactionError, TransactionKind};
