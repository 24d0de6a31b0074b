//! Command-line interface of the `payflow` binary.
//!
//! Connection settings and credentials are layered: defaults, then
//! `payflow.toml`, then `PAYFLOW_*` variables, then flags. The password is
//! only read from the file or the environment; the card number and security
//! code may come from `PAYFLOW_ACCT` and `PAYFLOW_CVV2` instead of flags.

use std::{
    io::{self, Write},
    process::ExitCode,
};

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use figment::{Figment, providers::Serialized};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    connection::{ConnectionConfig, CredentialConfig, HttpConnection, config},
    currency::{Currency, DEFAULT_CURRENCY_CODE},
    data_objects::{CreditCard, Invoice, RecurringInfo, Tender, UserInfo},
    transaction::{RecurringAction, Transaction, Verbosity},
};

/// Connection flags; unset flags leave lower layers in effect.
#[derive(Args, Serialize, Default, Debug, Clone)]
pub struct ConnectionArgs {
    /// Gateway host.
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Gateway port.
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Round-trip timeout in seconds.
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Use HTTPS (`true`) or plain HTTP (`false`).
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<bool>,
    /// HTTP proxy host.
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_host: Option<String>,
    /// HTTP proxy port.
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_port: Option<u16>,
}

/// Credential flags other than the password.
#[derive(Args, Serialize, Default, Debug, Clone)]
pub struct CredentialArgs {
    /// Merchant login id.
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    /// Login user, when it differs from the vendor.
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Reseller id.
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<String>,
}

/// Card payment details.
#[derive(Args, Debug, Clone)]
pub struct PaymentArgs {
    /// Card number. Prefer `PAYFLOW_ACCT`: flags show up in the process
    /// list and shell history.
    #[arg(long, env = "PAYFLOW_ACCT", hide_env_values = true)]
    pub acct: String,
    /// Expiry as `MMYY`.
    #[arg(long)]
    pub exp_date: String,
    /// Card security code, also read from `PAYFLOW_CVV2`.
    #[arg(long, env = "PAYFLOW_CVV2", hide_env_values = true)]
    pub cvv2: Option<String>,
    /// Amount, such as `25.12`.
    #[arg(long)]
    pub amount: Decimal,
    /// ISO 4217 currency code.
    #[arg(long, default_value = DEFAULT_CURRENCY_CODE)]
    pub currency: String,
    /// Merchant comment.
    #[arg(long)]
    pub comment: Option<String>,
}

impl PaymentArgs {
    fn into_parts(self) -> (Tender, Invoice) {
        let mut card = CreditCard::new(self.acct, self.exp_date);
        card.cvv2 = self.cvv2;
        let mut invoice = Invoice::with_amount(Currency::with_code(self.amount, self.currency));
        invoice.comment1 = self.comment;
        (Tender::card(card), invoice)
    }
}

/// Reference to an earlier transaction, with an optional new amount.
#[derive(Args, Debug, Clone)]
pub struct ReferenceArgs {
    /// `PNREF` of the original transaction.
    #[arg(long)]
    pub orig_id: String,
    /// Amount, when it differs from the original.
    #[arg(long)]
    pub amount: Option<Decimal>,
}

impl ReferenceArgs {
    fn invoice(&self) -> Option<Invoice> { self.amount.map(|amount| Invoice::with_amount(Currency::new(amount))) }
}

/// Recurring profile lookup.
#[derive(Args, Debug, Clone)]
pub struct RecurringInquiryArgs {
    /// Profile id.
    #[arg(long)]
    pub profile_id: String,
    /// Include the payment history.
    #[arg(long)]
    pub history: bool,
}

/// Transactions the binary can submit.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Charge a card.
    Sale(PaymentArgs),
    /// Authorise a card for later capture.
    Authorize(PaymentArgs),
    /// Capture an authorisation.
    Capture(ReferenceArgs),
    /// Cancel an unsettled transaction.
    Void(ReferenceArgs),
    /// Refund a settled transaction.
    Credit(ReferenceArgs),
    /// Look up a transaction.
    Inquiry(ReferenceArgs),
    /// Look up a recurring profile.
    RecurringInquiry(RecurringInquiryArgs),
}

impl Command {
    /// Build the transaction this command describes.
    #[must_use]
    pub fn into_transaction(self, user_info: UserInfo) -> Transaction {
        match self {
            Self::Sale(args) => {
                let (tender, invoice) = args.into_parts();
                Transaction::sale(user_info, tender, invoice)
            }
            Self::Authorize(args) => {
                let (tender, invoice) = args.into_parts();
                Transaction::authorization(user_info, tender, invoice)
            }
            Self::Capture(args) => {
                let invoice = args.invoice();
                Transaction::capture(user_info, args.orig_id, invoice)
            }
            Self::Void(args) => Transaction::void(user_info, args.orig_id),
            Self::Credit(args) => {
                let invoice = args.invoice();
                let mut trx = Transaction::credit(user_info, args.orig_id);
                trx.invoice = invoice;
                trx
            }
            Self::Inquiry(args) => Transaction::inquiry(user_info, args.orig_id),
            Self::RecurringInquiry(args) => {
                let info = RecurringInfo {
                    orig_profile_id: Some(args.profile_id),
                    ..RecurringInfo::default()
                };
                let action = RecurringAction::Inquiry {
                    payment_history: args.history.then_some(true),
                };
                Transaction::recurring(user_info, action, info)
            }
        }
    }
}

fn parse_verbosity(value: &str) -> Result<Verbosity, String> {
    match value.to_ascii_uppercase().as_str() {
        "LOW" => Ok(Verbosity::Low),
        "MEDIUM" => Ok(Verbosity::Medium),
        "HIGH" => Ok(Verbosity::High),
        other => Err(format!("unknown verbosity {other:?}; expected LOW, MEDIUM or HIGH")),
    }
}

/// Top-level arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "payflow", version, about = "Submit one transaction to the Payflow gateway")]
pub struct Cli {
    /// Connection overrides.
    #[command(flatten)]
    pub connection: ConnectionArgs,
    /// Credential overrides.
    #[command(flatten)]
    pub credentials: CredentialArgs,
    /// Reply detail level.
    #[arg(long, value_parser = parse_verbosity)]
    pub verbosity: Option<Verbosity>,
    /// Idempotency key; generated when absent.
    #[arg(long)]
    pub request_id: Option<String>,
    /// Transaction to submit.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Configuration layers with these flags on top.
    #[must_use]
    pub fn figment(&self) -> Figment {
        config::figment()
            .merge(Serialized::defaults(&self.connection))
            .merge(Serialized::defaults(&self.credentials))
    }

    /// Build the transaction, applying the global flags.
    #[must_use]
    pub fn into_transaction(self, user_info: UserInfo) -> Transaction {
        let mut trx = self.command.into_transaction(user_info);
        if let Some(id) = self.request_id {
            trx = trx.with_request_id(id);
        }
        if let Some(level) = self.verbosity {
            trx = trx.with_verbosity(level);
        }
        trx
    }
}

/// Parse arguments, submit the transaction and print its response.
///
/// # Errors
/// Returns an error if configuration is incomplete, the HTTP client cannot
/// be built or the response cannot be written.
pub async fn run() -> Result<ExitCode> { run_with_cli(Cli::parse()).await }

/// Submit the transaction described by `cli` and print its response as
/// JSON. Exits successfully only when the gateway approved it.
///
/// # Errors
/// See [`run`].
pub async fn run_with_cli(cli: Cli) -> Result<ExitCode> {
    let figment = cli.figment();
    let config = ConnectionConfig::from_figment(&figment).context("invalid connection settings")?;
    let user_info = CredentialConfig::from_figment(&figment)?
        .into_user_info()
        .context("incomplete credentials")?;
    let mut connection = HttpConnection::new(config)?;
    let mut trx = cli.into_transaction(user_info);
    let response = trx.submit(&mut connection).await;
    let json = serde_json::to_string_pretty(response)?;
    writeln!(io::stdout().lock(), "{json}")?;
    Ok(if response.is_approved() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use figment::Jail;
    use rstest::rstest;

    use super::*;
    use crate::transaction_type::TransactionType;

    fn creds() -> UserInfo { UserInfo::new("u", "v", "p", "pw") }

    #[rstest]
    fn sale_flags_build_a_sale() {
        let cli = Cli::try_parse_from([
            "payflow",
            "--verbosity",
            "high",
            "sale",
            "--acct",
            "4111111111111111",
            "--exp-date",
            "1230",
            "--amount",
            "25.12",
        ])
        .expect("parse");
        let trx = cli.into_transaction(creds());
        assert_eq!(trx.transaction_type(), TransactionType::Sale);
        assert_eq!(trx.verbosity, Some(Verbosity::High));
        let request = trx.generate_request().expect("generate");
        assert!(request.contains("AMT[5]=25.12&CURRENCY[3]=USD"));
    }

    #[rstest]
    fn recurring_inquiry_sets_profile() {
        let cli = Cli::try_parse_from([
            "payflow",
            "recurring-inquiry",
            "--profile-id",
            "RT0000000001",
            "--history",
        ])
        .expect("parse");
        let request = cli
            .into_transaction(creds())
            .generate_request()
            .expect("generate");
        assert!(request.contains("ACTION[1]=I&ORIGPROFILEID[12]=RT0000000001&PAYMENTHISTORY[1]=Y"));
    }

    #[rstest]
    fn flags_override_environment() {
        Jail::expect_with(|j| {
            j.set_env("PAYFLOW_HOST", "env.example");
            j.set_env("PAYFLOW_PORT", "8443");
            let cli = Cli::try_parse_from(["payflow", "--host", "flag.example", "void", "--orig-id", "V1"])
                .expect("parse");
            let cfg = ConnectionConfig::from_figment(&cli.figment()).expect("config");
            assert_eq!(cfg.host, "flag.example");
            assert_eq!(cfg.port, 8443);
            Ok(())
        });
    }

    #[rstest]
    fn card_details_come_from_environment() {
        Jail::expect_with(|j| {
            j.set_env("PAYFLOW_ACCT", "5105105105105100");
            j.set_env("PAYFLOW_CVV2", "321");
            let cli = Cli::try_parse_from(["payflow", "sale", "--exp-date", "0128", "--amount", "3.00"])
                .expect("parse");
            let request = cli
                .into_transaction(creds())
                .generate_request()
                .expect("generate");
            assert!(request.contains("ACCT[16]=5105105105105100&EXPDATE[4]=0128&CVV2[3]=321"));
            Ok(())
        });
    }

    #[rstest]
    fn bad_verbosity_is_rejected() {
        assert!(Cli::try_parse_from(["payflow", "--verbosity", "loud", "void", "--orig-id", "V1"]).is_err());
    }
}
