use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_ENDPOINT_PATH: &str = "/___flow___";
pub const DEFAULT_ATTRIBUTE_PREFIX: &str = "flow";

#[derive(Debug, Clone)]
pub struct FlowConfig {
    pub base_url: String,
    pub endpoint_path: String,
    /// Namespace of the declarative trigger attributes, e.g. `flow` for `flow:target`.
    pub attribute_prefix: String,
    /// `None` leaves the request to the HTTP stack's own defaults.
    pub timeout: Option<Duration>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint_path: DEFAULT_ENDPOINT_PATH.to_string(),
            attribute_prefix: DEFAULT_ATTRIBUTE_PREFIX.to_string(),
            timeout: None,
        }
    }
}

impl FlowConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = path.into();
        self
    }

    pub fn with_attribute_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.attribute_prefix = prefix.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_env() -> Self {
        let base_url =
            std::env::var("FLOW_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let endpoint_path = std::env::var("FLOW_ENDPOINT_PATH")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT_PATH.to_string());

        let attribute_prefix = std::env::var("FLOW_ATTRIBUTE_PREFIX")
            .unwrap_or_else(|_| DEFAULT_ATTRIBUTE_PREFIX.to_string());

        let timeout = std::env::var("FLOW_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis);

        Self {
            base_url,
            endpoint_path,
            attribute_prefix,
            timeout,
        }
    }

    /// Full URL of the dispatch endpoint.
    pub fn endpoint_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.endpoint_path.starts_with('/') {
            format!("{}{}", base, self.endpoint_path)
        } else {
            format!("{}/{}", base, self.endpoint_path)
        }
    }

    pub fn target_attribute(&self) -> String {
        format!("{}:target", self.attribute_prefix)
    }

    pub fn swap_attribute(&self) -> String {
        format!("{}:swap", self.attribute_prefix)
    }
}
