//! Stateless request builder and response parser for the activity backend.
//!
//! # Design
//! `ActivityClient` holds only the resolved backend base URL and carries no
//! mutable state between calls, so concurrent calls never interfere. Each
//! operation is split into a `build_*` method that produces an `HttpRequest`
//! and a `parse_*` method that consumes an `HttpResponse`; `get_*` runs both
//! around a `Transport`.

use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::backend::BackendConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{format_instant, Activity, ApiResponse, SingleEventQuery, TimeRangeQuery};

const TIME_RANGE_PATH: &str = "/time-range";
const SINGLE_EVENT_PATH: &str = "/single-event";

/// Client for the activity backend's read routes.
#[derive(Debug, Clone)]
pub struct ActivityClient {
    config: BackendConfig,
}

impl ActivityClient {
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    /// Shorthand for `ActivityClient::new(BackendConfig::from_page_url(..)?)`.
    pub fn from_page_url(page_url: &str) -> Result<Self, ApiError> {
        Ok(Self::new(BackendConfig::from_page_url(page_url)?))
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn build_time_range(&self, query: &TimeRangeQuery) -> HttpRequest {
        let mut params = form_urlencoded::Serializer::new(String::new());
        if let Some(before) = &query.before {
            params.append_pair("before", &format_instant(before));
        }
        // Zero means "no limit given", not "return nothing".
        if query.limit != 0 {
            params.append_pair("limit", &query.limit.to_string());
        }
        if let Some(after) = &query.after {
            params.append_pair("after", &format_instant(after));
        }
        self.get(TIME_RANGE_PATH, params.finish())
    }

    pub fn build_single_event(&self, query: &SingleEventQuery) -> HttpRequest {
        let params = form_urlencoded::Serializer::new(String::new())
            .append_pair("id", &query.id)
            .finish();
        self.get(SINGLE_EVENT_PATH, params)
    }

    /// Activities in the order the backend returned them.
    pub fn parse_time_range(&self, response: HttpResponse) -> Result<Vec<Activity>, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_single_event(&self, response: HttpResponse) -> Result<Activity, ApiError> {
        parse_envelope(response)
    }

    pub fn get_time_range<T: Transport>(
        &self,
        transport: &T,
        query: &TimeRangeQuery,
    ) -> Result<Vec<Activity>, ApiError> {
        let response = transport.execute(&self.build_time_range(query))?;
        self.parse_time_range(response)
    }

    pub fn get_single_event<T: Transport>(
        &self,
        transport: &T,
        query: &SingleEventQuery,
    ) -> Result<Activity, ApiError> {
        let response = transport.execute(&self.build_single_event(query))?;
        self.parse_single_event(response)
    }

    fn get(&self, path: &str, query: String) -> HttpRequest {
        let mut url = format!("{}{path}", self.config.base_url());
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

/// Reject non-2xx responses, logging them first.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    tracing::error!(
        url = %response.url,
        status = response.status,
        body = %response.body,
        "could not fetch data"
    );
    Err(ApiError::RequestFailed {
        url: response.url.clone(),
        status: response.status,
        body: response.body.clone(),
    })
}

fn parse_envelope<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    let envelope: ApiResponse<T> =
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
    Ok(envelope.data)
}
