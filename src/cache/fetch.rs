//! Remote retrieval of dependency archives

use crate::error::{XgoError, XgoResult};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, Write};
use tracing::debug;

/// Source of dependency archive bytes
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Stream the body behind `url` into `file`, returning the byte count
    async fn fetch_into(&self, url: &str, file: File) -> XgoResult<u64>;
}

/// Plain HTTP(S) GET fetcher backed by `ureq`
pub struct HttpFetcher {
    agent: ureq::Agent,
    show_progress: bool,
}

impl HttpFetcher {
    /// Create a fetcher; `show_progress` renders a download bar when the
    /// response announces its length
    pub fn new(show_progress: bool) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            show_progress,
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_into(&self, url: &str, file: File) -> XgoResult<u64> {
        let agent = self.agent.clone();
        let url = url.to_string();
        let show_progress = self.show_progress;

        tokio::task::spawn_blocking(move || download(&agent, &url, file, show_progress))
            .await
            .map_err(|e| XgoError::Internal(format!("download task failed: {}", e)))?
    }
}

fn download(agent: &ureq::Agent, url: &str, mut file: File, show_progress: bool) -> XgoResult<u64> {
    debug!("GET {}", url);

    let response = agent
        .get(url)
        .call()
        .map_err(|e| XgoError::DependencyFetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let length = response.body().content_length();
    let mut reader = response.into_body().into_reader();

    let copied = match length.filter(|_| show_progress) {
        Some(total) => {
            let bar = download_bar(total, url);
            let mut writer = bar.wrap_write(&mut file);
            let copied = io::copy(&mut reader, &mut writer);
            bar.finish_and_clear();
            copied
        }
        None => io::copy(&mut reader, &mut file),
    };

    let copied = copied
        .and_then(|n| file.flush().map(|()| n))
        .map_err(|e| XgoError::DependencyDownload {
            url: url.to_string(),
            source: e,
        })?;

    debug!("Fetched {} bytes from {}", copied, url);
    Ok(copied)
}

fn download_bar(total: u64, url: &str) -> ProgressBar {
    let bar = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("  {spinner:.cyan} {prefix}  {bar:20.cyan/dim} {bytes}/{total_bytes} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━╸─");
    bar.set_style(style);
    bar.set_prefix(url.rsplit('/').next().unwrap_or(url).to_string());
    bar
}
