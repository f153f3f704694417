//! HTTP client module
//!
//! Provides the GET transport with retry, rate limiting, and backoff.
//! Retry-on-status policy lives here and only here; the pagination layer
//! above never retries.
//!
//! # Features
//!
//! - **Automatic Retries**: configurable status-code list with backoff
//! - **Rate Limiting**: token bucket rate limiter using governor
//! - **Identification**: `mailto` and `api_key` decoration on every request

mod client;
mod rate_limit;

pub use client::{BackoffType, HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
