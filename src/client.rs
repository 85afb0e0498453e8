use reqwest::{Client, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use serde::Serialize;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::AlertmanagerConfig;
use crate::endpoints::EndpointsConfig;
use crate::errors::{AlertmanagerError, Result};
use crate::http::HttpClientConfig;

const ALERTS_API_PATH: &str = "api/v2/alerts";

/// Client pushing alerts to one cluster of Alertmanager instances
///
/// Built from an [`AlertmanagerConfig`]: the configured timeout, proxy and
/// credentials apply to every request, and every static endpoint receives
/// each batch of alerts. Discovery-annotated addresses (`dns+...`) are not
/// dialed directly; resolve them externally and pass the results to
/// [`AlertmanagerClient::with_resolved_addresses`].
///
/// # Example
///
/// ```rust,no_run
/// use alert_manager_config::{AlertmanagerClient, AlertmanagerConfig};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = AlertmanagerConfig::from_address(
///         "http://localhost:9093",
///         Duration::from_secs(10),
///     )?;
///     let client = AlertmanagerClient::from_config(&config)?;
///
///     let alert = serde_json::json!({
///         "labels": { "alertname": "TestAlert", "severity": "info" },
///     });
///
///     client.push_alert(&alert).await?;
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct AlertmanagerClient {
    client: ClientWithMiddleware,
    endpoints_config: EndpointsConfig,
    endpoints: Vec<Url>,
    http_config: HttpClientConfig,
}

impl AlertmanagerClient {
    /// Create a client from a receiver configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or a static address
    /// does not form a valid URL.
    pub fn from_config(config: &AlertmanagerConfig) -> Result<Self> {
        let mut builder = Client::builder().timeout(config.timeout);
        if let Some(proxy_url) = &config.http_config.proxy_url {
            let proxy =
                Proxy::all(proxy_url.clone()).map_err(AlertmanagerError::BuildHttpClient)?;
            builder = builder.proxy(proxy);
        }
        let client = builder.build().map_err(AlertmanagerError::BuildHttpClient)?;
        let client = ClientBuilder::new(client).build();

        for (kind, name) in config.endpoints.discovery_addresses() {
            warn!(
                discovery = %kind,
                address = name,
                "Skipping Alertmanager address that requires service discovery"
            );
        }

        let endpoints = config
            .endpoints
            .static_urls()
            .map_err(AlertmanagerError::Endpoint)?;

        Ok(Self {
            client,
            endpoints_config: config.endpoints.clone(),
            endpoints,
            http_config: config.http_config.clone(),
        })
    }

    /// Create a client with a custom reqwest middleware client
    ///
    /// This allows you to add custom middleware (retry, logging, etc.)
    pub fn with_client(client: ClientWithMiddleware, config: &AlertmanagerConfig) -> Result<Self> {
        let endpoints = config
            .endpoints
            .static_urls()
            .map_err(AlertmanagerError::Endpoint)?;

        Ok(Self {
            client,
            endpoints_config: config.endpoints.clone(),
            endpoints,
            http_config: config.http_config.clone(),
        })
    }

    /// Replace the endpoints with `host:port` addresses from a resolver
    ///
    /// The configured scheme and path prefix are applied to each address.
    pub fn with_resolved_addresses<I, S>(mut self, addresses: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.endpoints = addresses
            .into_iter()
            .map(|address| self.endpoints_config.url_for(address.as_ref()))
            .collect::<std::result::Result<_, _>>()
            .map_err(AlertmanagerError::Endpoint)?;
        Ok(self)
    }

    /// Push one or more alerts to every endpoint
    ///
    /// Endpoints are tried in configuration order. The push succeeds when at
    /// least one endpoint accepts the alerts.
    ///
    /// # Errors
    ///
    /// Returns [`AlertmanagerError::NoEndpoints`] if there is nothing to send
    /// to, or the error of the last endpoint if every endpoint failed.
    #[instrument(
        name = "AlertmanagerClient::push_alerts",
        skip_all,
        fields(alert_count = alerts.len(), endpoint_count = self.endpoints.len())
    )]
    pub async fn push_alerts<A: Serialize>(&self, alerts: &[A]) -> Result<()> {
        if alerts.is_empty() {
            debug!("No alerts to push");
            return Ok(());
        }
        if self.endpoints.is_empty() {
            return Err(AlertmanagerError::NoEndpoints);
        }

        let mut last_error = None;
        let mut delivered = 0usize;
        for endpoint in &self.endpoints {
            match self.post_alerts(endpoint, alerts).await {
                Ok(()) => delivered += 1,
                Err(err) => {
                    warn!(endpoint = %endpoint, error = %err, "Failed to push alerts");
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) if delivered == 0 => Err(err),
            _ => {
                debug!(delivered, "Alerts pushed successfully");
                Ok(())
            }
        }
    }

    /// Push a single alert
    ///
    /// Convenience method that wraps `push_alerts` for a single alert.
    pub async fn push_alert<A: Serialize>(&self, alert: &A) -> Result<()> {
        self.push_alerts(std::slice::from_ref(alert)).await
    }

    /// Base URLs alerts are sent to
    pub fn endpoints(&self) -> &[Url] {
        &self.endpoints
    }

    async fn post_alerts<A: Serialize>(&self, endpoint: &Url, alerts: &[A]) -> Result<()> {
        let url = endpoint
            .join(ALERTS_API_PATH)
            .map_err(AlertmanagerError::Endpoint)?;

        debug!(url = %url, "Pushing alerts to Alertmanager");

        let response = self
            .authorize(self.client.post(url))
            .json(alerts)
            .send()
            .await
            .map_err(AlertmanagerError::Request)?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AlertmanagerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let basic_auth = &self.http_config.basic_auth;
        if !basic_auth.is_empty() {
            request.basic_auth(&basic_auth.username, Some(&basic_auth.password))
        } else if !self.http_config.bearer_token.is_empty() {
            request.bearer_auth(&self.http_config.bearer_token)
        } else {
            request
        }
    }
}
