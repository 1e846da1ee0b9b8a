use crate::models::catalog::CatalogRecord;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Catalog response could not be decoded: {0}")]
    Decode(String),
}

/// Read-only access to the external book catalog.
///
/// `Ok(None)` means the catalog answered but has no such resource; an `Err`
/// means the catalog could not be reached or answered with garbage.
#[async_trait]
pub trait CatalogClient {
    async fn fetch(&self, path: &str) -> Result<Option<CatalogRecord>, CatalogError>;
}

pub type Catalog = Arc<dyn CatalogClient + Send + Sync>;

pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch(&self, path: &str) -> Result<Option<CatalogRecord>, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching catalog record {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            debug!("Catalog has no record at {}: {}", url, response.status());
            return Ok(None);
        }

        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)
            .map_err(|e| CatalogError::Decode(format!("{} from {}", e, url)))?;

        CatalogRecord::from_body(value)
            .map_err(|_| CatalogError::Decode(format!("expected a JSON object from {}", url)))
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    enum Reply {
        Record(Value),
        Undecodable(String),
    }

    /// In-process catalog that serves canned records and remembers every
    /// path it was asked for. Unknown paths answer "absent".
    #[derive(Default)]
    pub struct FakeCatalog {
        replies: HashMap<String, Reply>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeCatalog {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_record(mut self, path: &str, record: Value) -> Self {
            self.replies.insert(path.to_string(), Reply::Record(record));
            self
        }

        /// Makes `path` fail as if the catalog sent an unreadable body.
        pub fn with_undecodable(mut self, path: &str, message: &str) -> Self {
            self.replies
                .insert(path.to_string(), Reply::Undecodable(message.to_string()));
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogClient for FakeCatalog {
        async fn fetch(&self, path: &str) -> Result<Option<CatalogRecord>, CatalogError> {
            self.calls.lock().unwrap().push(path.to_string());
            match self.replies.get(path) {
                Some(Reply::Record(value)) => Ok(CatalogRecord::from_body(value.clone())
                    .expect("fixture must be an object or null")),
                Some(Reply::Undecodable(message)) => Err(CatalogError::Decode(message.clone())),
                None => Ok(None),
            }
        }
    }
}
