//! Article page scraping: one fetch, then fixed CSS/attribute lookups with
//! fallback chains. Field extraction never fails; anything that cannot be
//! found degrades to the "N/A" sentinel (strings) or zero (counters). Only a
//! failed fetch makes the scrape of a URL fail.

use std::collections::HashSet;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::models::{Article, NA};

/// Links under this domain are not counted as external.
const PLATFORM_DOMAIN: &str = "medium.com";
/// Cap on image URLs joined into the stored field.
const MAX_IMAGE_URLS: usize = 50;
/// Cap on keywords joined into the stored field.
const MAX_KEYWORDS: usize = 20;

static READING_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\s*min").expect("reading time pattern"));

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Pre-parsed selectors for every lookup the extractor performs.
struct PageSelectors {
    h1: Selector,
    og_title: Selector,
    h2: Selector,
    og_description: Selector,
    content_roots: Vec<Selector>,
    paragraphish: Selector,
    p: Selector,
    img: Selector,
    anchors: Selector,
    author_meta: Selector,
    author_card: Selector,
    author_link: Selector,
    clap_button: Selector,
    clap_fallbacks: Vec<Selector>,
    span: Selector,
    keywords_meta: Selector,
    tag_link: Selector,
}

impl PageSelectors {
    fn new() -> Self {
        Self {
            h1: sel("h1"),
            og_title: sel(r#"meta[property="og:title"]"#),
            h2: sel("h2"),
            og_description: sel(r#"meta[property="og:description"]"#),
            content_roots: vec![
                sel("article"),
                sel(r#"[data-testid="post-content"]"#),
                sel(".postArticle-content"),
                sel(".articleBody"),
                sel("main article"),
            ],
            paragraphish: sel("p, h1, h2, h3, h4, h5, h6"),
            p: sel("p"),
            img: sel("img"),
            anchors: sel("a[href]"),
            author_meta: sel(r#"meta[property="article:author"]"#),
            author_card: sel(r#"a[data-action="show-user-card"]"#),
            author_link: sel(r#"a[href*="/@"]"#),
            clap_button: sel(r#"button[data-testid="clap-button"]"#),
            clap_fallbacks: vec![
                sel(r#"[data-testid="clap-count"]"#),
                sel(".clap-count"),
                sel(r#"button[aria-label*="clap"]"#),
            ],
            span: sel("span"),
            keywords_meta: sel(r#"meta[name="keywords"]"#),
            tag_link: sel(r#"a[href*="/tag/"]"#),
        }
    }
}

static SELECTORS: LazyLock<PageSelectors> = LazyLock::new(PageSelectors::new);

/// Fetch an article page and extract its fields.
pub async fn scrape_article(client: &reqwest::Client, url: &str) -> Result<Article> {
    let url = if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    };

    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("request failed for {url}"))?
        .error_for_status()
        .with_context(|| format!("bad response status for {url}"))?;
    let body = response
        .text()
        .await
        .with_context(|| format!("failed to read body of {url}"))?;

    Ok(extract_article(&body, &url))
}

/// Extract all twelve fields from a fetched page body.
pub fn extract_article(html: &str, url: &str) -> Article {
    let document = Html::parse_document(html);
    let s = &*SELECTORS;

    let title = first_text(&document, &s.h1)
        .or_else(|| meta_content(&document, &s.og_title))
        .unwrap_or_default();

    let subtitle = first_text(&document, &s.h2)
        .or_else(|| meta_content(&document, &s.og_description))
        .unwrap_or_default();

    let mut full_text = String::new();
    for root_sel in &s.content_roots {
        if let Some(root) = document.select(root_sel).next() {
            let text = joined_text(root.select(&s.paragraphish));
            if !text.is_empty() {
                full_text = text;
                break;
            }
        }
    }
    if full_text.is_empty() {
        full_text = joined_text(document.select(&s.p));
    }

    let mut image_urls = Vec::new();
    for img in document.select(&s.img) {
        let value = img.value();
        let src = value
            .attr("src")
            .or_else(|| value.attr("data-src"))
            .or_else(|| value.attr("data-lazy-src"));
        if let Some(src) = src {
            if src.starts_with("http") {
                image_urls.push(src.to_string());
            }
        }
    }
    let num_images = image_urls.len() as u64;
    image_urls.truncate(MAX_IMAGE_URLS);
    let image_urls = image_urls.join("; ");

    let mut external_links = HashSet::new();
    for anchor in document.select(&s.anchors) {
        if let Some(href) = anchor.value().attr("href") {
            if href.starts_with("http") && !href.to_lowercase().contains(PLATFORM_DOMAIN) {
                external_links.insert(href.to_string());
            }
        }
    }

    let author_name = meta_content(&document, &s.author_meta)
        .or_else(|| first_text(&document, &s.author_card))
        .or_else(|| first_text(&document, &s.author_link))
        .unwrap_or_default();

    let author_profile_url = document
        .select(&s.author_link)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| {
            if href.starts_with('/') {
                format!("https://{PLATFORM_DOMAIN}{href}")
            } else {
                href.to_string()
            }
        })
        .filter(|href| href.starts_with("http"))
        .unwrap_or_default();

    let mut claps = document
        .select(&s.clap_button)
        .next()
        .map(|el| parse_count(&element_text(el)))
        .unwrap_or(0);
    if claps == 0 {
        for fallback in &s.clap_fallbacks {
            if let Some(el) = document.select(fallback).next() {
                claps = parse_count(&element_text(el));
                if claps > 0 {
                    break;
                }
            }
        }
    }

    let reading_time = document
        .select(&s.span)
        .map(element_text)
        .find(|text| READING_TIME.is_match(text))
        .unwrap_or_default();

    let mut keywords: Vec<String> = meta_content(&document, &s.keywords_meta)
        .map(|content| {
            content
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();
    if keywords.is_empty() {
        keywords = document
            .select(&s.tag_link)
            .take(10)
            .map(element_text)
            .filter(|t| !t.is_empty())
            .collect();
    }
    keywords.truncate(MAX_KEYWORDS);
    let keywords = keywords.join(", ");

    Article {
        title: or_na(title),
        subtitle: or_na(subtitle),
        full_text: or_na(full_text),
        num_images,
        image_urls: or_na(image_urls),
        num_external_links: external_links.len() as u64,
        author_name: or_na(author_name),
        author_profile_url: or_na(author_profile_url),
        claps,
        reading_time: or_na(reading_time),
        keywords: or_na(keywords),
        url: url.to_string(),
    }
}

fn or_na(value: String) -> String {
    if value.trim().is_empty() {
        NA.to_string()
    } else {
        value
    }
}

/// Text of an element with inner whitespace collapsed.
fn element_text(el: ElementRef) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
}

fn joined_text<'a>(elements: impl Iterator<Item = ElementRef<'a>>) -> String {
    elements
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Parse a rendered count like "1,200", "1.2K", or "3M".
fn parse_count(text: &str) -> u64 {
    let cleaned = text.trim().to_uppercase().replace(',', "");
    if cleaned.is_empty() {
        return 0;
    }
    let (digits, multiplier) = if let Some(stripped) = cleaned.strip_suffix('K') {
        (stripped, 1_000.0)
    } else if let Some(stripped) = cleaned.strip_suffix('M') {
        (stripped, 1_000_000.0)
    } else {
        (cleaned.as_str(), 1.0)
    };
    digits
        .trim()
        .parse::<f64>()
        .map(|n| (n * multiplier) as u64)
        .unwrap_or(0)
}
