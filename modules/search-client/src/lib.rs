pub mod duckduckgo;
pub mod error;
pub mod serper;
pub mod types;

pub use duckduckgo::DuckDuckGoClient;
pub use error::{Result, SearchError};
pub use serper::SerperClient;
pub use types::{ImageHit, WebHit};

use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Largest error body kept in `SearchError::Api` messages.
const MAX_ERROR_BODY: usize = 300;

fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| SearchError::Network(format!("failed to build HTTP client: {e}")))
}

/// Turn a non-2xx response into `SearchError::Api`.
async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message: String = body.chars().take(MAX_ERROR_BODY).collect();
    Err(SearchError::Api {
        status: status.as_u16(),
        message,
    })
}
