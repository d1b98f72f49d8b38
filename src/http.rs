//! Shared plumbing for the blocking HTTP clients.

use crate::error::{MigrateError, Result};
use reqwest::blocking::{ClientBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

const USER_AGENT: &str = concat!("forecast2github/", env!("CARGO_PKG_VERSION"));

/// Client builder with the process-wide rustls provider installed.
pub fn client_builder() -> ClientBuilder {
    // Already installed on second call; that is fine.
    let _ = rustls::crypto::ring::default_provider().install_default();
    reqwest::blocking::Client::builder().user_agent(USER_AGENT)
}

/// Join an API path onto a configured host, keeping any path prefix of the host.
pub fn endpoint(base: &Url, path: &str) -> String {
    format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

pub fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    let body = response.text().unwrap_or_default();
    Err(MigrateError::Status {
        url,
        status: status.as_u16(),
        body,
    })
}

/// Check the status, then decode the body as `T`.
pub fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = ensure_success(response)?;
    let text = response.text()?;
    Ok(serde_json::from_str(&text)?)
}
