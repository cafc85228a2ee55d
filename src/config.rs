use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the CSV row store lives
    pub data_dir: PathBuf,
    /// Server bind address
    pub bind_addr: String,
    /// Per-request timeout for article page fetches, in seconds
    pub fetch_timeout_secs: u64,
    /// Maximum number of URLs accepted by a single scrape request
    pub max_urls_per_request: usize,
    /// User-Agent header sent with article page fetches
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            bind_addr: "127.0.0.1:8000".to_string(),
            fetch_timeout_secs: 10,
            max_urls_per_request: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("ARTICLE_SEARCH_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(addr) = std::env::var("ARTICLE_SEARCH_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(val) = std::env::var("ARTICLE_SEARCH_FETCH_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.fetch_timeout_secs = v;
            }
        }
        if let Ok(val) = std::env::var("ARTICLE_SEARCH_MAX_URLS_PER_REQUEST") {
            if let Ok(v) = val.parse() {
                config.max_urls_per_request = v;
            }
        }
        if let Ok(ua) = std::env::var("ARTICLE_SEARCH_USER_AGENT") {
            config.user_agent = ua;
        }

        config
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("articles.csv")
    }
}
