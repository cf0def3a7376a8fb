use crate::reporter::{Reporter, TracingReporter};
use crate::types::FlowRequest;
use crate::{ActionId, FlowConfig, FlowError, Result};
use reqwest::header::CONTENT_TYPE;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Client for the flow dispatch endpoint.
///
/// Cheap to clone: the HTTP connection pool and the reporter are shared.
#[derive(Clone)]
pub struct FlowClient {
    config: FlowConfig,
    http_client: reqwest::Client,
    pub(crate) reporter: Arc<dyn Reporter>,
}

impl std::fmt::Debug for FlowClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FlowClient {
    pub fn new(config: FlowConfig) -> Result<Self> {
        Self::with_reporter(config, TracingReporter)
    }

    pub fn with_reporter(config: FlowConfig, reporter: impl Reporter + 'static) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            config,
            http_client,
            reporter: Arc::new(reporter),
        })
    }

    /// Same config and connection pool, alerts routed to `reporter`.
    pub fn reporting_to(&self, reporter: impl Reporter + 'static) -> Self {
        Self {
            config: self.config.clone(),
            http_client: self.http_client.clone(),
            reporter: Arc::new(reporter),
        }
    }

    /// Post one envelope and return the success body.
    ///
    /// Any non-2xx status becomes [`FlowError::Server`] carrying the body text.
    pub async fn send(&self, action: &ActionId, params: &Map<String, Value>) -> Result<String> {
        let request = FlowRequest::new(action, params.clone());
        let body = serde_json::to_vec(&request)?;

        tracing::debug!(
            "Sending flow request: flow={}, method={}",
            request.flow,
            request.method
        );

        let response = self
            .http_client
            .post(self.config.endpoint_url())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(FlowError::server(status.as_u16(), text));
        }

        tracing::debug!("Flow request successful: action={}, bytes={}", action, text.len());
        Ok(text)
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }
}
