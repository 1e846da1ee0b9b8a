use crate::models::outcome::LookupOutcome;
use crate::services::aggregator::MetadataAggregator;
use crate::services::catalog::Catalog;
use tracing::warn;

/// Entry point for book info requests. Owns no I/O of its own: it checks
/// the ISBN and hands everything else to the aggregator.
pub struct LookupService {
    aggregator: MetadataAggregator,
}

impl LookupService {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            aggregator: MetadataAggregator::new(catalog),
        }
    }

    pub async fn lookup(&self, raw_isbn: Option<&str>) -> LookupOutcome {
        let isbn = match raw_isbn.map(str::trim) {
            Some(isbn) if !isbn.is_empty() => isbn,
            _ => {
                warn!("Rejected book info request without an ISBN");
                return LookupOutcome::InvalidInput;
            }
        };

        self.aggregator.aggregate(isbn).await
    }
}
