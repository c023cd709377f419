//! Executing `HttpRequest`s against the network.
//!
//! `ActivityClient` never performs I/O itself; `get_*` hand the built request
//! to a `Transport`. Hosts with their own HTTP stack implement the trait, the
//! `ureq` feature provides a blocking default.

use crate::error::ApiError;
#[cfg(feature = "ureq")]
use crate::http::HttpMethod;
use crate::http::{HttpRequest, HttpResponse};
#[cfg(feature = "ureq")]
use ureq::ResponseExt;

/// Performs one HTTP round-trip.
///
/// Implementations must return non-2xx responses as `Ok` data; status
/// interpretation belongs to the client. `Err` is for requests that never got
/// a response.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
#[cfg(feature = "ureq")]
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

#[cfg(feature = "ureq")]
impl UreqTransport {
    pub fn new() -> Self {
        // 4xx/5xx come back as responses, not errors.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

#[cfg(feature = "ureq")]
impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "ureq")]
impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let mut builder = match request.method {
            HttpMethod::Get => self.agent.get(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let mut response = builder
            .call()
            .map_err(|e| ApiError::Transport(format!("{}: {e}", request.url)))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // After redirects this is the URL that actually answered.
        let url = response.get_uri().to_string();
        // No size cap, and error bodies are text for reporting only.
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| ApiError::Transport(format!("{url}: reading body: {e}")))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        tracing::debug!(%url, status, "received response");
        Ok(HttpResponse {
            url,
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::http::HttpMethod;

    struct Recording {
        seen: RefCell<Vec<String>>,
    }

    impl Transport for Recording {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request.url.clone());
            Ok(HttpResponse {
                url: request.url.clone(),
                status: 204,
                headers: Vec::new(),
                body: String::new(),
            })
        }
    }

    #[test]
    fn references_forward_to_the_transport() {
        let inner = Recording {
            seen: RefCell::new(Vec::new()),
        };
        let by_ref = &inner;
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost:8000/time-range".to_string(),
            headers: Vec::new(),
        };
        let response = by_ref.execute(&request).unwrap();
        assert_eq!(response.status, 204);
        assert_eq!(*inner.seen.borrow(), vec!["http://localhost:8000/time-range".to_string()]);
    }
}
