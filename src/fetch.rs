use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::StatusCode;

use crate::cache::{self, CacheStore};
use crate::error::{AppError, Result};

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .build()
        .expect("Failed to build HTTP client")
});

/// Performs exactly one blocking GET and returns the response body.
pub fn fetch(url: &str, params: &[(&str, &str)]) -> Result<String> {
    let response = CLIENT.get(url).query(params).send()?;
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(AppError::NotFound(url.to_string()));
    }
    if !status.is_success() {
        return Err(AppError::Network(format!("{url} returned {status}")));
    }
    Ok(response.text()?)
}

/// Cached GET: derives the canonical request key and goes through the
/// store, so a repeat of the same request never touches the network.
pub fn fetch_with_cache(cache: &mut CacheStore, url: &str, params: &[(&str, &str)]) -> Result<String> {
    let key = cache::request_key(url, params);
    cache.get_or_fetch(&key, || fetch(url, params))
}
