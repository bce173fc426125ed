use crate::error::MirrorError;
use crate::types::FetchOutcome;
use log::{debug, info};
use reqwest::StatusCode;
use std::path::Path;

/// Issues one GET per call and persists the body on success.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Downloads `url` to `output_path`.
    ///
    /// A 404 yields [`FetchOutcome::NotFound`] and writes nothing. Any other
    /// non-200 status is returned as [`MirrorError::TransportError`]. The body
    /// is read completely before the file is created, so a failure never
    /// leaves a truncated file behind.
    pub async fn fetch(&self, url: &str, output_path: &Path) -> Result<FetchOutcome, MirrorError> {
        debug!("GET {}", url);
        let resp = self.client.get(url).send().await?;

        match resp.status() {
            StatusCode::OK => {
                let body = resp.bytes().await?;
                tokio::fs::write(output_path, &body).await?;
                info!("Saved {} ({} bytes)", output_path.display(), body.len());
                Ok(FetchOutcome::Success {
                    bytes: body.len() as u64,
                })
            }
            StatusCode::NOT_FOUND => {
                info!("Not found: {}", url);
                Ok(FetchOutcome::NotFound)
            }
            status => Err(MirrorError::TransportError {
                url: url.to_string(),
                status,
            }),
        }
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}
