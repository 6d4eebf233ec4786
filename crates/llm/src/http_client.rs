//! HTTP Client Factory
//!
//! One place to build the `reqwest::Client` shared by every binding.

/// Build a `reqwest::Client` for provider calls.
///
/// Proxies from the environment are ignored and no request timeout is set;
/// a call runs until the transport gives up.
pub fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
}
