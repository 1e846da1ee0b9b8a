pub const DEFAULT_PORT: &str = "7010";
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://openlibrary.org";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: String,
    pub catalog_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: var("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string()),
            catalog_base_url: var("CATALOG_BASE_URL")
                .unwrap_or_else(|| DEFAULT_CATALOG_BASE_URL.to_string()),
        }
    }
}
