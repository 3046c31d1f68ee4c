//! Payment state machine.
//!
//! ```text
//! Idle --connect--> Connected --quote--> Quoted --pay--> Paid
//!                      ^  |                 ^  |            |
//!                      +--+ connect         +--+ quote      | quote
//!                                                           v
//!                                                        Quoted
//! ```
//!
//! Every failed transition leaves the state (and any held session or quote)
//! exactly as it was, so the caller can retry.

use std::fmt;

use alloy::primitives::U256;
use stockpay_core::{compute_quote, PaymentError, PaymentResult, Quantity, Quote, Ticker, TokenAmount};
use stockpay_feed::{DynPriceSource, DynRateSource};
use stockpay_wallet::{
    ConnectReport, NativeBalance, TransactionHandle, TransferExecutor, WalletConnector,
    WalletSession,
};
use tracing::{debug, info};

/// Orchestrator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    Idle,
    Connected,
    Quoted,
    Paid,
}

impl fmt::Display for OrchestratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Connected => "connected",
            Self::Quoted => "quoted",
            Self::Paid => "paid",
        };
        f.write_str(name)
    }
}

/// Result of a successful `pay()`.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub tx: TransactionHandle,
    /// The quote that was paid.
    pub quote: Quote,
    /// Amount actually transferred, after rounding to token precision.
    pub amount: TokenAmount,
}

/// Sequences wallet connection, quoting and payment.
pub struct Orchestrator {
    connector: WalletConnector,
    prices: DynPriceSource,
    rates: DynRateSource,
    executor: TransferExecutor,
    session: Option<WalletSession>,
    quote: Option<Quote>,
    state: OrchestratorState,
}

impl Orchestrator {
    pub fn new(
        connector: WalletConnector,
        prices: DynPriceSource,
        rates: DynRateSource,
        executor: TransferExecutor,
    ) -> Self {
        Self {
            connector,
            prices,
            rates,
            executor,
            session: None,
            quote: None,
            state: OrchestratorState::Idle,
        }
    }

    pub fn state(&self) -> OrchestratorState {
        self.state
    }

    pub fn session(&self) -> Option<&WalletSession> {
        self.session.as_ref()
    }

    /// Quote waiting to be paid, if any.
    pub fn current_quote(&self) -> Option<&Quote> {
        self.quote.as_ref()
    }

    pub fn executor(&self) -> &TransferExecutor {
        &self.executor
    }

    /// Connect (or reconnect) the wallet.
    ///
    /// From `Idle` this moves to `Connected`. Later states are kept; only the
    /// session is replaced, so a pending quote survives a reconnect.
    pub async fn connect(&mut self) -> PaymentResult<ConnectReport> {
        let report = self.connector.connect().await?;

        self.session = Some(report.session.clone());
        if self.state == OrchestratorState::Idle {
            self.state = OrchestratorState::Connected;
        }
        info!(
            account = %report.session.account(),
            chain_id = ?report.session.chain_id(),
            state = %self.state,
            "Wallet connected"
        );
        Ok(report)
    }

    /// Price `quantity` units of `ticker` in the stablecoin.
    ///
    /// Both inputs are validated before any lookup is made. The price and
    /// rate lookups run concurrently; the first failure is returned.
    pub async fn quote(&mut self, ticker: &str, quantity: &str) -> PaymentResult<Quote> {
        if self.session.is_none() {
            return Err(PaymentError::NotConnected);
        }
        let ticker = Ticker::parse(ticker)?;
        let quantity: Quantity = quantity.parse()?;

        debug!(%ticker, %quantity, "Resolving price and rate");
        let (unit_price, rate) = tokio::try_join!(
            self.prices.resolve_price(&ticker),
            self.rates.resolve_stablecoin_rate(),
        )?;

        let quote = compute_quote(ticker, unit_price, quantity, rate)?;
        info!(
            ticker = %quote.ticker,
            quantity = %quote.quantity,
            unit_price = %quote.unit_price,
            rate = %quote.exchange_rate,
            amount = quote.computed_amount,
            "Quote computed"
        );

        self.quote = Some(quote.clone());
        self.state = OrchestratorState::Quoted;
        Ok(quote)
    }

    /// Pay the current quote.
    ///
    /// On success the quote is consumed and the state becomes `Paid`. On
    /// failure the quote is kept and the state stays `Quoted`. A transfer the
    /// wallet accepted always counts as success, so a retry never submits
    /// the same quote twice.
    pub async fn pay(&mut self) -> PaymentResult<PaymentReceipt> {
        let session = self.session.as_ref().ok_or(PaymentError::NotConnected)?;
        let quote = match (self.state, self.quote.as_ref()) {
            (OrchestratorState::Quoted, Some(quote)) => quote,
            _ => return Err(PaymentError::NoActiveQuote),
        };

        let submitted = self.executor.submit_transfer(session, quote).await?;

        let quote = self.quote.take().ok_or(PaymentError::NoActiveQuote)?;
        self.state = OrchestratorState::Paid;
        let amount = submitted.request.amount;
        info!(tx = %submitted.tx, amount = %amount, "Payment submitted");
        Ok(PaymentReceipt {
            tx: submitted.tx,
            quote,
            amount,
        })
    }

    /// Native-currency balance of the connected account.
    pub async fn native_balance(&self) -> PaymentResult<NativeBalance> {
        let session = self.session.as_ref().ok_or(PaymentError::NotConnected)?;
        self.connector.native_balance(session.account()).await
    }

    /// Current gas price in wei.
    pub async fn gas_price(&self) -> PaymentResult<U256> {
        if self.session.is_none() {
            return Err(PaymentError::NotConnected);
        }
        self.connector.gas_price().await
    }
}
