use serde_json::Value;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum BookInfoError {
    #[error("Book info service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Book info service returned an unreadable body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the book info lookup service.
pub struct BookInfoClient {
    client: reqwest::Client,
    base_url: String,
}

impl BookInfoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the lookup service's status code and JSON body unchanged.
    pub async fn get_book_info(&self, isbn: &str) -> Result<(u16, Value), BookInfoError> {
        let url = format!("{}/book-info", self.base_url);
        info!("Requesting book info for ISBN {}", isbn);

        let response = self
            .client
            .get(&url)
            .query(&[("isbn", isbn)])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        let value = serde_json::from_slice(&body)?;

        Ok((status, value))
    }
}
