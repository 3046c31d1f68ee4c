//! Resolver tests against a local HTTP server.

mod common;
use common::mock_http::MockHttpServer;

use stockpay_core::{PaymentError, Ticker};
use stockpay_feed::{
    build_http_client, CoinGeckoRateResolver, HttpConfig, MarketDataConfig, MoexPriceResolver,
    PriceSource, RateConfig, RateSource,
};
use tokio_test::{assert_err, assert_ok};

const SBER_BODY: &str = r#"{"marketdata": {"columns": ["SECID","BOARDID","BID","BIDDEPTH","OFFER","OFFERDEPTH","SPREAD","BIDDEPTHT","OFFERDEPTHT","OPEN","LOW","HIGH","LAST"], "data": [["SBER","TQBR",249.9,10,250.1,12,0.2,100,120,248.0,247.5,251.0,250.0]]}}"#;

fn price_resolver(server: &MockHttpServer) -> MoexPriceResolver {
    let client = build_http_client(&HttpConfig { timeout_secs: Some(5) }).unwrap();
    MoexPriceResolver::new(
        client,
        MarketDataConfig {
            url_template: format!("{}/securities/{{ticker}}.json", server.url()),
            ..Default::default()
        },
    )
}

fn rate_resolver(server: &MockHttpServer) -> CoinGeckoRateResolver {
    let client = build_http_client(&HttpConfig { timeout_secs: Some(5) }).unwrap();
    CoinGeckoRateResolver::new(
        client,
        RateConfig {
            url: format!("{}/simple/price", server.url()),
            ..Default::default()
        },
    )
}

#[tokio::test]
async fn test_price_resolver_reads_last_price() {
    let server = MockHttpServer::start().await;
    server.route("/securities/SBER.json", 200, SBER_BODY).await;

    let resolver = price_resolver(&server);
    let ticker = Ticker::parse("SBER").unwrap();
    let price = assert_ok!(resolver.resolve_price(&ticker).await);
    assert_eq!(price.value(), 250.0);

    assert_eq!(
        server.received_targets().await,
        vec!["/securities/SBER.json".to_string()]
    );
    server.shutdown().await;
}

#[tokio::test]
async fn test_price_resolver_non_success_status() {
    let server = MockHttpServer::start().await;
    server.route("/securities/SBER.json", 500, "{}").await;

    let resolver = price_resolver(&server);
    let ticker = Ticker::parse("SBER").unwrap();
    let err = assert_err!(resolver.resolve_price(&ticker).await);
    assert!(matches!(err, PaymentError::DataUnavailable(_)));
    assert!(err.to_string().contains("500"));
    server.shutdown().await;
}

#[tokio::test]
async fn test_price_resolver_unknown_ticker_shape() {
    let server = MockHttpServer::start().await;
    server
        .route(
            "/securities/NOPE.json",
            200,
            r#"{"marketdata": {"columns": [], "data": []}}"#,
        )
        .await;

    let resolver = price_resolver(&server);
    let ticker = Ticker::parse("NOPE").unwrap();
    let err = assert_err!(resolver.resolve_price(&ticker).await);
    assert!(matches!(err, PaymentError::DataUnavailable(_)));
    server.shutdown().await;
}

#[tokio::test]
async fn test_rate_resolver_sends_query_and_parses() {
    let server = MockHttpServer::start().await;
    server
        .route("/simple/price", 200, r#"{"tether": {"rub": 95.5}}"#)
        .await;

    let resolver = rate_resolver(&server);
    let rate = assert_ok!(resolver.resolve_stablecoin_rate().await);
    assert_eq!(rate.value(), 95.5);

    let targets = server.received_targets().await;
    assert_eq!(targets.len(), 1);
    assert!(targets[0].contains("ids=tether"));
    assert!(targets[0].contains("vs_currencies=rub"));
    server.shutdown().await;
}

#[tokio::test]
async fn test_rate_resolver_not_found() {
    let server = MockHttpServer::start().await;

    let resolver = rate_resolver(&server);
    let err = assert_err!(resolver.resolve_stablecoin_rate().await);
    assert!(matches!(err, PaymentError::DataUnavailable(_)));
    server.shutdown().await;
}

#[tokio::test]
async fn test_unreachable_endpoint_is_unavailable() {
    let server = MockHttpServer::start().await;
    let resolver = rate_resolver(&server);
    server.shutdown().await;
    // Give the accept loop a moment to drop the listener.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let err = assert_err!(resolver.resolve_stablecoin_rate().await);
    assert!(matches!(err, PaymentError::DataUnavailable(_)));
}
