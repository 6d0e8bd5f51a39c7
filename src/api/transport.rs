use crate::api::request::CallDescriptor;
use crate::error::AppError;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Status code and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes a call descriptor. Implementations return non-2xx responses as
/// `Ok` and leave status handling to the client; only failures to complete
/// the exchange are errors.
pub trait Transport: Send + Sync {
    fn execute(&self, call: &CallDescriptor) -> Result<RawResponse, AppError>;
}

/// Blocking transport backed by a ureq agent.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        UreqTransport { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        UreqTransport::new(DEFAULT_TIMEOUT)
    }
}

impl Transport for UreqTransport {
    fn execute(&self, call: &CallDescriptor) -> Result<RawResponse, AppError> {
        let mut request = self.agent.get(&call.url);
        for (name, value) in &call.headers {
            request = request.set(name, value);
        }
        for (name, value) in &call.query {
            request = request.query(name, value);
        }

        let response = match request.call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(_, resp)) => resp,
            Err(ureq::Error::Transport(e)) => {
                return Err(AppError::Transport {
                    status: None,
                    message: e.to_string(),
                });
            }
        };

        let status = response.status();
        let body = response.into_string().map_err(|e| AppError::Transport {
            status: Some(status),
            message: format!("failed to read response body: {}", e),
        })?;

        Ok(RawResponse { status, body })
    }
}
