use riskdesk_core::WorkflowTriggerRequest;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub refresh_interval: Duration,
    /// Applies to every individual request, including the workflow trigger.
    pub request_timeout: Duration,
    /// Parameters used when an analysis run is requested without overrides.
    pub analysis: WorkflowTriggerRequest,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            analysis: WorkflowTriggerRequest::default(),
        }
    }
}
