//! Shared HTTP GET plumbing for every provider.

use std::time::Duration;

use almanac_core::{NetworkError, ReqwestErrorExt};
use reqwest::Client;

const USER_AGENT: &str = concat!("almanac/", env!("CARGO_PKG_VERSION"));

/// One `reqwest::Client` with a request timeout, shared by the provider
/// clients. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NetworkError::ConnectionFailed(format!("client setup: {e}")))?;

        Ok(Self { client })
    }

    /// Issue one GET and return the body text.
    ///
    /// Non-2xx statuses become `ServerError`. No retries.
    pub async fn get_text(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: &[(&str, &str)],
    ) -> Result<String, NetworkError> {
        let mut request = self.client.get(url).query(query);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!("GET {} returned {}", url, status);
            return Err(NetworkError::ServerError {
                status: status.as_u16(),
                message: text,
            });
        }

        response
            .text()
            .await
            .map_err(ReqwestErrorExt::into_network_error)
    }
}
