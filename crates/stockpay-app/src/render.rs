//! User-facing outcome messages.

use stockpay_core::{PaymentError, Quote, TokenAmount};
use stockpay_wallet::{ConnectReport, NativeBalance};

use crate::orchestrator::PaymentReceipt;

/// Lines describing a successful connection.
///
/// A failed network switch is reported as a warning line after the account.
pub fn connected(report: &ConnectReport) -> Vec<String> {
    let mut lines = vec![format!("Wallet connected: {}", report.session.account())];
    if let Some(err) = &report.network_switch_error {
        lines.push(format!("Warning: {err}"));
    }
    if !report.session.is_on_target_chain() {
        let chain = report
            .session
            .chain_id()
            .map(|id| format!("0x{id:x}"))
            .unwrap_or_else(|| "unknown".to_string());
        lines.push(format!("Warning: wallet is on chain {chain}, not the payment network"));
    }
    lines
}

/// Cost line for a quote.
///
/// Shows the computed amount and, in parentheses, the amount that will be
/// transferred after rounding to token precision.
pub fn cost(quote: &Quote, symbol: &str) -> String {
    match TokenAmount::from_stable(quote.computed_amount) {
        Ok(transfer) => format!(
            "Cost: {} {symbol} (transfer {transfer} {symbol})",
            quote.computed_amount
        ),
        Err(_) => format!("Cost: {} {symbol}", quote.computed_amount),
    }
}

pub fn payment_submitted(receipt: &PaymentReceipt, symbol: &str) -> String {
    format!(
        "Payment submitted: {} {symbol}, transaction {}",
        receipt.amount, receipt.tx
    )
}

pub fn balance(balance: &NativeBalance, symbol: &str) -> String {
    format!("Balance: {} {symbol}", balance.as_ether())
}

/// The single line shown for a failed operation.
pub fn failure(err: &PaymentError) -> String {
    format!("Error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{B256, U256};
    use std::sync::Arc;
    use stockpay_core::{compute_quote, ExchangeRate, Quantity, Ticker, UnitPrice};
    use stockpay_wallet::{
        ChainConfig, DynWalletProvider, MockWalletProvider, ProviderError, TransactionHandle,
        WalletConnector,
    };

    const ACCOUNT: &str = "0x1111111111111111111111111111111111111111";

    fn sber_quote() -> Quote {
        compute_quote(
            Ticker::parse("SBER").unwrap(),
            UnitPrice::new(250.0).unwrap(),
            Quantity::new(10).unwrap(),
            ExchangeRate::new(95.5).unwrap(),
        )
        .unwrap()
    }

    async fn report_with(mock: MockWalletProvider) -> ConnectReport {
        let provider: DynWalletProvider = Arc::new(mock);
        WalletConnector::new(Some(provider), ChainConfig::default())
            .connect()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_connected_on_target_chain() {
        let report = report_with(MockWalletProvider::cooperative(ACCOUNT, "0xa4b1", "0x")).await;
        let lines = connected(&report);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Wallet connected: 0x1111"));
    }

    #[tokio::test]
    async fn test_connected_after_failed_switch() {
        let mock = MockWalletProvider::cooperative(ACCOUNT, "0x1", "0x");
        mock.respond(
            "wallet_addEthereumChain",
            Err(ProviderError::new(4902, "unrecognized chain")),
        );
        let lines = connected(&report_with(mock).await);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Network switch failed"));
        assert!(lines[2].contains("0x1"));
    }

    #[test]
    fn test_cost_line() {
        let line = cost(&sber_quote(), "USDT");
        assert!(line.starts_with("Cost: 27.26178"), "{line}");
        assert!(line.ends_with("(transfer 27.26178 USDT)"), "{line}");
    }

    #[test]
    fn test_payment_submitted_line() {
        let receipt = PaymentReceipt {
            tx: TransactionHandle::Hash(B256::repeat_byte(0xab)),
            quote: sber_quote(),
            amount: TokenAmount::from_base_units(27_261_780),
        };
        let line = payment_submitted(&receipt, "USDT");
        assert!(line.starts_with("Payment submitted: 27.26178 USDT, transaction 0xabab"));
    }

    #[test]
    fn test_balance_line() {
        let line = balance(
            &NativeBalance {
                wei: U256::from(1_500_000_000_000_000_000u64),
            },
            "ETH",
        );
        assert!(line.starts_with("Balance: 1.5"), "{line}");
        assert!(line.ends_with(" ETH"));
    }

    #[test]
    fn test_failure_is_one_line() {
        let line = failure(&PaymentError::DataUnavailable(
            "failed to fetch price: HTTP 500".into(),
        ));
        assert_eq!(line, "Error: Data unavailable: failed to fetch price: HTTP 500");
        assert!(!line.contains('\n'));
    }
}
