use crate::models::errors::ApiError;
use crate::models::requests::PageParams;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// A resolved page of a list endpoint. Numbers start at 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page {
    pub number: usize,
    pub size: usize,
    explicit_size: bool,
}

impl Page {
    /// Resolves the requested page against `count` items.
    ///
    /// An unusable `page_size` falls back to the default and is capped at
    /// [`MAX_PAGE_SIZE`]. A page past the end is an error, except that page 1
    /// always exists.
    pub fn resolve(params: &PageParams, count: usize) -> Result<Self, ApiError> {
        let requested_size = params
            .page_size
            .as_deref()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&size| size > 0);
        let size = requested_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);

        let last = last_page(count, size);
        let number = match params.page.as_deref().map(str::trim) {
            None => 1,
            Some("last") => last,
            Some(raw) => raw.parse::<usize>().map_err(|_| ApiError::InvalidPage)?,
        };

        if number == 0 || number > last {
            return Err(ApiError::InvalidPage);
        }

        Ok(Self {
            number,
            size,
            explicit_size: requested_size.is_some(),
        })
    }

    pub fn offset(&self) -> usize {
        (self.number - 1) * self.size
    }

    pub fn next_link(&self, path: &str, count: usize) -> Option<String> {
        if self.number >= last_page(count, self.size) {
            return None;
        }
        Some(self.link(path, Some(self.number + 1)))
    }

    pub fn previous_link(&self, path: &str) -> Option<String> {
        match self.number {
            1 => None,
            2 => Some(self.link(path, None)),
            n => Some(self.link(path, Some(n - 1))),
        }
    }

    fn link(&self, path: &str, page: Option<usize>) -> String {
        let mut query = Vec::new();
        if let Some(page) = page {
            query.push(format!("page={}", page));
        }
        if self.explicit_size {
            query.push(format!("page_size={}", self.size));
        }

        if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query.join("&"))
        }
    }
}

fn last_page(count: usize, size: usize) -> usize {
    count.div_ceil(size).max(1)
}
