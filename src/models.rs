use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel stored in string fields whose extraction came up empty.
pub const NA: &str = "N/A";

/// One scraped article, exactly as persisted in the row store.
///
/// The serde renames define the CSV header; field order here is the column
/// order on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Subtitle")]
    pub subtitle: String,
    #[serde(rename = "Full Text")]
    pub full_text: String,
    #[serde(rename = "Number of Images", deserialize_with = "de_count")]
    pub num_images: u64,
    /// `;`-joined list of image URLs
    #[serde(rename = "Image URLs")]
    pub image_urls: String,
    #[serde(rename = "Number of External Links", deserialize_with = "de_count")]
    pub num_external_links: u64,
    #[serde(rename = "Author Name")]
    pub author_name: String,
    #[serde(rename = "Author Profile URL")]
    pub author_profile_url: String,
    #[serde(rename = "Number of Claps", deserialize_with = "de_count")]
    pub claps: u64,
    #[serde(rename = "Reading Time")]
    pub reading_time: String,
    /// `,`-joined list of keywords
    #[serde(rename = "Keywords")]
    pub keywords: String,
    #[serde(rename = "URL")]
    pub url: String,
}

/// Counters are written as integers, but rows that passed through other
/// tooling may carry "N/A", an empty cell, or a float rendering ("10.0").
/// Anything else is treated as row-store corruption.
fn de_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NA {
        return Ok(0);
    }
    if let Ok(n) = trimmed.parse::<u64>() {
        return Ok(n);
    }
    trimmed
        .parse::<f64>()
        .map(|f| f as u64)
        .map_err(|_| serde::de::Error::custom(format!("invalid counter value: {raw:?}")))
}

impl Article {
    /// True if `value` is empty or the "N/A" sentinel.
    pub fn is_missing(value: &str) -> bool {
        value.trim().is_empty() || value == NA
    }

    /// Keywords split out of the `,`-joined field; empty for missing values.
    pub fn keyword_list(&self) -> Vec<String> {
        split_list(&self.keywords, ',')
    }

    /// Image URLs split out of the `;`-joined field; empty for missing values.
    pub fn image_url_list(&self) -> Vec<String> {
        split_list(&self.image_urls, ';')
    }
}

fn split_list(raw: &str, sep: char) -> Vec<String> {
    if Article::is_missing(raw) {
        return Vec::new();
    }
    raw.split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// One row of a search response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Ordinal position of the row in the full store, stable under filtering
    pub article_id: usize,
    pub title: String,
    pub url: String,
    /// Cosine similarity as a percentage, two-decimal precision
    pub similarity: f64,
    pub claps: u64,
    pub author: String,
    pub reading_time: String,
}

/// Search request
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

/// Search response
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub message: String,
    pub results: Vec<SearchResult>,
}

/// Scrape request
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeRequest {
    pub urls: Vec<String>,
}

/// Scrape response: per-URL errors plus the newly stored articles.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeResponse {
    pub scraped: usize,
    pub errors: Vec<String>,
    pub articles: Vec<ScrapedArticle>,
}

/// A freshly scraped article as echoed back to the scrape form.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapedArticle {
    pub id: usize,
    pub title: String,
    pub subtitle: String,
    /// Full text truncated to a short preview
    pub preview: String,
    pub author: String,
    pub claps: u64,
    pub reading_time: String,
    pub keywords: Vec<String>,
    pub url: String,
}

/// Article list entry
#[derive(Debug, Clone, Serialize)]
pub struct ArticleSummary {
    pub id: usize,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub claps: u64,
    pub reading_time: String,
    pub url: String,
}

/// Full article detail with the joined list fields split out.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleDetail {
    pub id: usize,
    pub title: String,
    pub subtitle: String,
    pub full_text: String,
    pub author: String,
    pub author_url: String,
    pub num_images: u64,
    pub image_urls: Vec<String>,
    pub num_external_links: u64,
    pub claps: u64,
    pub reading_time: String,
    pub keywords: Vec<String>,
    pub url: String,
}

impl ArticleDetail {
    pub fn from_row(id: usize, row: &Article) -> Self {
        Self {
            id,
            title: row.title.clone(),
            subtitle: row.subtitle.clone(),
            full_text: row.full_text.clone(),
            author: row.author_name.clone(),
            author_url: row.author_profile_url.clone(),
            num_images: row.num_images,
            image_urls: row.image_url_list(),
            num_external_links: row.num_external_links,
            claps: row.claps,
            reading_time: row.reading_time.clone(),
            keywords: row.keyword_list(),
            url: row.url.clone(),
        }
    }
}
