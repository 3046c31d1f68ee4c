//! Shared HTTP plumbing for the resolvers.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use stockpay_core::{PaymentError, PaymentResult};
use tracing::{debug, warn};

use crate::config::HttpConfig;

/// Build the HTTP client shared by the resolvers.
pub fn build_http_client(config: &HttpConfig) -> reqwest::Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

/// Send `request` and return the body of a successful response.
///
/// `what` names the requested data in error messages.
pub(crate) async fn fetch_body(request: RequestBuilder, what: &str) -> PaymentResult<String> {
    let response = request.send().await.map_err(|e| {
        warn!(what, error = %e, "HTTP request failed");
        PaymentError::DataUnavailable(format!("failed to fetch {what}: {e}"))
    })?;

    let status = response.status();
    if !status.is_success() {
        warn!(what, %status, "Non-success HTTP status");
        return Err(PaymentError::DataUnavailable(format!(
            "failed to fetch {what}: HTTP {status}"
        )));
    }

    let body = response.text().await.map_err(|e| {
        PaymentError::DataUnavailable(format!("failed to read {what} response: {e}"))
    })?;
    debug!(what, bytes = body.len(), "Response received");
    Ok(body)
}
