// src/harvester/mod.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::config::HarvestConfig;
use crate::models::{HarvestOutcome, Result};

pub mod extractor;

pub use extractor::EmailExtractor;

/// Seam in front of the website fetch so the pipeline can run with a stub
/// finder in tests.
#[async_trait]
pub trait EmailFinder: Send + Sync {
    async fn harvest(&self, website_url: &str) -> HarvestOutcome;
}

pub struct EmailHarvester {
    client: Client,
    extractor: EmailExtractor,
}

impl EmailHarvester {
    pub fn new(config: &HarvestConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            extractor: EmailExtractor::new(),
        })
    }

    async fn fetch_visible_text(&self, url: &str) -> Result<String> {
        debug!("Fetching website: {}", url);

        let response = self.client.get(url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(format!("HTTP error: {}", response.status()).into());
        }

        let html = response.text().await?;
        debug!("Fetched {} bytes from {}", html.len(), url);

        Ok(extract_visible_text(&html))
    }
}

#[async_trait]
impl EmailFinder for EmailHarvester {
    // Any failure along the way collapses into FetchFailed; the operator
    // only ever sees an empty result.
    async fn harvest(&self, website_url: &str) -> HarvestOutcome {
        match self.fetch_visible_text(website_url).await {
            Ok(text) => HarvestOutcome::Found(self.extractor.extract(&text)),
            Err(e) => {
                warn!("Email harvest of {} failed: {}", website_url, e);
                HarvestOutcome::FetchFailed
            }
        }
    }
}

fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let body_selector = Selector::parse("body").unwrap();

    document
        .select(&body_selector)
        .next()
        .map(|body| {
            body.text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}
