use crate::models::catalog::UNKNOWN;
use crate::models::outcome::LookupOutcome;
use crate::models::responses::BookMetadata;
use crate::services::catalog::{Catalog, CatalogError};
use crate::utils::path::{isbn_path, linked_path};
use tracing::{error, info};

/// Builds one [`BookMetadata`] out of the book, author and work records.
pub struct MetadataAggregator {
    catalog: Catalog,
}

impl MetadataAggregator {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub async fn aggregate(&self, isbn: &str) -> LookupOutcome {
        match self.collect(isbn).await {
            Ok(Some(metadata)) => LookupOutcome::Found(metadata),
            Ok(None) => {
                info!("No catalog record for ISBN {}", isbn);
                LookupOutcome::NotFound
            }
            Err(e) => {
                error!("Failed to look up ISBN {}: {}", isbn, e);
                LookupOutcome::Failure(e.to_string())
            }
        }
    }

    async fn collect(&self, isbn: &str) -> Result<Option<BookMetadata>, CatalogError> {
        let Some(book) = self.catalog.fetch(&isbn_path(isbn)).await? else {
            return Ok(None);
        };

        let author_key = book.first_link("authors");
        let work_key = book.first_link("works");

        // Any fault here fails the whole lookup and drops the sibling fetch.
        let (author, description) = tokio::try_join!(
            self.linked_text(author_key.as_deref(), "name"),
            self.linked_text(work_key.as_deref(), "description"),
        )?;

        Ok(Some(BookMetadata {
            title: book.text_or_unknown("title"),
            author,
            publish_date: book.text_or_unknown("publish_date"),
            description,
        }))
    }

    async fn linked_text(&self, key: Option<&str>, field: &str) -> Result<String, CatalogError> {
        let Some(key) = key else {
            return Ok(UNKNOWN.to_string());
        };

        let record = self.catalog.fetch(&linked_path(key)).await?;

        Ok(record
            .and_then(|r| r.text(field))
            .unwrap_or_else(|| UNKNOWN.to_string()))
    }
}
