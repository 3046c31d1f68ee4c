//! Component wiring.

use std::sync::Arc;
use std::time::Duration;

use stockpay_feed::{
    build_http_client, CoinGeckoRateResolver, DynPriceSource, DynRateSource, MoexPriceResolver,
};
use stockpay_wallet::{DynWalletProvider, HttpWalletProvider, TransferExecutor, WalletConnector};
use tracing::info;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::orchestrator::Orchestrator;

/// Build an [`Orchestrator`] from configuration.
///
/// Without `wallet.provider_url` the connector has no provider and every
/// `connect()` fails with `WalletUnavailable`.
pub fn build_orchestrator(config: &AppConfig) -> AppResult<Orchestrator> {
    let client = build_http_client(&config.http)
        .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {e}")))?;

    let prices: DynPriceSource = Arc::new(MoexPriceResolver::new(
        client.clone(),
        config.market_data.clone(),
    ));
    let rates: DynRateSource = Arc::new(CoinGeckoRateResolver::new(client, config.rate.clone()));

    let provider: Option<DynWalletProvider> = match &config.wallet.provider_url {
        Some(url) => {
            let timeout = config.http.timeout_secs.map(Duration::from_secs);
            Some(Arc::new(HttpWalletProvider::new(url.clone(), timeout)?))
        }
        None => None,
    };
    info!(
        wallet = config.wallet.provider_url.as_deref().unwrap_or("<none>"),
        chain = %config.chain.chain_name,
        token = %config.token.symbol,
        "Orchestrator configured"
    );

    let connector = WalletConnector::new(provider, config.chain.clone());
    let executor = TransferExecutor::from_config(&config.token)?;

    Ok(Orchestrator::new(connector, prices, rates, executor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::OrchestratorState;
    use stockpay_core::PaymentError;

    #[tokio::test]
    async fn test_default_config_has_no_wallet() {
        let mut orchestrator = build_orchestrator(&AppConfig::default()).unwrap();
        assert_eq!(orchestrator.state(), OrchestratorState::Idle);

        let err = orchestrator.connect().await.unwrap_err();
        assert!(matches!(err, PaymentError::WalletUnavailable(_)));
        assert_eq!(orchestrator.state(), OrchestratorState::Idle);
    }

    #[test]
    fn test_invalid_token_address_is_rejected() {
        let mut config = AppConfig::default();
        config.token.contract = "not-an-address".to_string();
        let err = build_orchestrator(&config).err().unwrap();
        assert!(matches!(err, AppError::WalletConfig(_)));
    }

    #[test]
    fn test_with_provider_url() {
        let mut config = AppConfig::default();
        config.wallet.provider_url = Some("http://127.0.0.1:8545".to_string());
        assert!(build_orchestrator(&config).is_ok());
    }
}
