//! Client core for the activity backend.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the two
//! read routes of the backend (`/time-range` and `/single-event`). The
//! network round-trip is delegated to a `Transport`, so the request building
//! and response parsing stay deterministic and testable.
//!
//! # Design
//! - `ActivityClient` holds only the resolved backend base URL. The URL is
//!   resolved once through `BackendConfig` and shared by every operation.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response); `get_*` chains both through a transport.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod backend;
pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use backend::{BackendConfig, DEFAULT_BACKEND_PORT};
pub use client::ActivityClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{
    format_instant, Activity, ApiResponse, EnrichedExtractedInfo, EventData, SingleEventQuery,
    TimeRangeQuery,
};
