// src/core/net.rs
// HTTP GET with redirect following (capped), a shared cookie jar and
// referer propagation. One client per run.

use async_trait::async_trait;
use reqwest::redirect::Policy;

use crate::config::consts::{MAX_REDIRECTS, USER_AGENT};
use crate::error::{Result, ScrapeError};

/// A fetched response, kept whole so anomalies can be reported with context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    /// Final URL after redirects.
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Page {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `status` plus headers, one per line, for diagnostics.
    pub fn describe(&self) -> String {
        let mut out = format!("HTTP {} {}", self.status, self.url);
        for (k, v) in &self.headers {
            out.push_str(&format!("\n  {k}: {v}"));
        }
        out
    }
}

/// Source of pages. The pipeline only ever GETs.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Page>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::limited(MAX_REDIRECTS))
            .cookie_store(true)
            .referer(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Page> {
        let network = |source: reqwest::Error| ScrapeError::Network { url: s!(url), source };

        let resp = self.client.get(url).send().await.map_err(network)?;
        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();
        let headers = resp
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();
        let body = resp.text().await.map_err(network)?;

        logd!(url, status, bytes = body.len(), "fetched");
        Ok(Page { url: final_url, status, headers, body })
    }
}
