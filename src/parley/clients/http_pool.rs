//! HTTP client pool maintaining one persistent `reqwest::Client` per base URL.
//!
//! Each backend base URL gets its own client so connection pooling, DNS
//! caching, and TLS session reuse all work per host. The search and
//! question-log collaborators share the same pool.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Global HTTP client pool, lazily initialized on first access.
static HTTP_CLIENT_POOL: Lazy<Mutex<HashMap<String, reqwest::Client>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Get or create a shared HTTP client for the given base URL.
pub fn get_http_client(base_url: &str) -> reqwest::Client {
    let mut pool = HTTP_CLIENT_POOL.lock().unwrap();

    if let Some(client) = pool.get(base_url) {
        return client.clone();
    }

    let client = reqwest::ClientBuilder::new()
        // Keep idle connections alive between debate turns
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .pool_max_idle_per_host(10)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        // Provider calls can run long when the model reasons or searches
        .timeout(Duration::from_secs(300))
        .build()
        .expect("Failed to build HTTP client");

    pool.insert(base_url.to_string(), client.clone());
    client
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clients_are_reused_per_base_url() {
        let first = get_http_client("https://example.test");
        let second = get_http_client("https://example.test");
        // reqwest::Client is an Arc internally; clones of the same pooled
        // client compare equal by pointer through the debug representation.
        assert_eq!(format!("{:?}", first), format!("{:?}", second));
    }
}
