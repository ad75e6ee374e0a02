use crate::error::ReportError;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Loads descriptors from `http(s)://` URLs or local paths.
pub struct Fetcher {
    http: reqwest::blocking::Client,
}

impl Fetcher {
    pub fn new(timeout_ms: u64) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(concat!("govroles/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    pub fn text(&self, source: &str) -> anyhow::Result<String> {
        let source = source.trim();
        debug!(source, "fetching descriptor");
        if is_remote(source) {
            let resp = self.http.get(source).send()?.error_for_status()?;
            return Ok(resp.text()?);
        }
        Ok(std::fs::read_to_string(Path::new(source))?)
    }

    pub fn yaml<T: DeserializeOwned>(&self, source: &str) -> anyhow::Result<T> {
        let body = self.text(source).map_err(|e| descriptor_error(source, e))?;
        serde_yaml::from_str(&body).map_err(|e| descriptor_error(source, e.into()))
    }

    pub fn json<T: DeserializeOwned>(&self, source: &str) -> anyhow::Result<T> {
        let body = self.text(source).map_err(|e| descriptor_error(source, e))?;
        serde_json::from_str(&body).map_err(|e| descriptor_error(source, e.into()))
    }
}

fn descriptor_error(source: &str, err: anyhow::Error) -> anyhow::Error {
    ReportError::Descriptor {
        source_ref: source.to_string(),
        reason: err.to_string(),
    }
    .into()
}
