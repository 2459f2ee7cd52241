use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::settings::ClientSettings;
use crate::models::tax::TaxCalculationResult;
use crate::models::transaction::{NewTransaction, Transaction};
use super::traits::{HealthStatus, TransactionApi};

const SERVICE_NAME: &str = "TransactionService";

/// Longest slice of an error body copied into `CoreError::Api`.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP/JSON client for the transaction service.
///
/// - **Session**: the service scopes data by session cookie, so cookies are
///   kept across requests (native cookie store, browser credentials on wasm).
/// - **Timeout**: `ClientSettings::timeout_secs` (10 s by default), native only.
pub struct HttpTransactionApi {
    client: Client,
    base_url: String,
}

impl HttpTransactionApi {
    pub fn new(settings: &ClientSettings) -> Result<Self, CoreError> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .timeout(Duration::from_secs(settings.timeout_secs))
            .cookie_store(true);
        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "transaction service request");
        let builder = self.client.request(method, url);
        #[cfg(target_arch = "wasm32")]
        let builder = builder.fetch_credentials_include();
        builder
    }

    /// Send and turn any non-2xx status into `CoreError::Api`.
    async fn send(&self, builder: RequestBuilder, action: &str) -> Result<Response, CoreError> {
        let resp = builder.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let body: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
        warn!(status = status.as_u16(), %action, "transaction service returned an error");

        let message = if body.is_empty() {
            format!("{action} failed")
        } else {
            format!("{action} failed: {body}")
        };
        Err(CoreError::Api {
            service: SERVICE_NAME.into(),
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl TransactionApi for HttpTransactionApi {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    async fn get_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        let resp = self
            .send(self.request(Method::GET, "/transactions"), "Fetching transactions")
            .await?;
        Ok(resp.json().await?)
    }

    async fn add_transaction(&self, transaction: &NewTransaction) -> Result<Transaction, CoreError> {
        let resp = self
            .send(
                self.request(Method::POST, "/transactions").json(transaction),
                "Adding transaction",
            )
            .await?;
        Ok(resp.json().await?)
    }

    async fn delete_transaction(&self, id: i64) -> Result<(), CoreError> {
        self.send(
            self.request(Method::DELETE, &format!("/transactions/{id}")),
            "Deleting transaction",
        )
        .await?;
        Ok(())
    }

    async fn calculate_tax(&self) -> Result<TaxCalculationResult, CoreError> {
        let resp = self
            .send(
                self.request(Method::POST, "/transactions/calculate-tax"),
                "Calculating tax",
            )
            .await?;
        Ok(resp.json().await?)
    }

    async fn clear_data(&self) -> Result<(), CoreError> {
        self.send(
            self.request(Method::DELETE, "/transactions/clear"),
            "Clearing data",
        )
        .await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<HealthStatus, CoreError> {
        let resp = self
            .send(self.request(Method::GET, "/health"), "Health check")
            .await?;
        Ok(resp.json().await?)
    }
}
