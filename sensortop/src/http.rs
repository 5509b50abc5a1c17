//! HTTP client for the reading service's "latest readings" endpoint.

use futures::future::BoxFuture;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use tracing::debug;
use url::Url;

use crate::config::MonitorConfig;
use crate::error::FetchError;
use crate::limit::Limit;
use crate::types::{parse_window, Reading};

/// Anything that can hand back the latest window for a sensor.
pub trait ReadingsSource: Send + Sync + 'static {
    fn fetch_latest(
        &self,
        sensor_id: &str,
        limit: Limit,
    ) -> BoxFuture<'static, Result<Vec<Reading>, FetchError>>;
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(config: &MonitorConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = config.request_timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build().map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn endpoint(&self, sensor_id: &str, limit: Limit) -> Result<Url, FetchError> {
        latest_url(&self.base_url, sensor_id, limit)
    }
}

/// `{base}/api/readings/latest?sensorId=..&limit=..`
pub fn latest_url(base_url: &str, sensor_id: &str, limit: Limit) -> Result<Url, FetchError> {
    let raw = format!("{}/api/readings/latest", base_url.trim_end_matches('/'));
    let mut url = Url::parse(&raw).map_err(|e| FetchError::Transport(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("sensorId", sensor_id)
        .append_pair("limit", &limit.to_string());
    Ok(url)
}

impl ReadingsSource for HttpSource {
    fn fetch_latest(
        &self,
        sensor_id: &str,
        limit: Limit,
    ) -> BoxFuture<'static, Result<Vec<Reading>, FetchError>> {
        let client = self.client.clone();
        let url = self.endpoint(sensor_id, limit);
        Box::pin(async move {
            let url = url?;
            debug!(%url, "GET latest readings");
            let resp = client
                .get(url)
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache")
                .send()
                .await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }
            let body = resp.text().await?;
            parse_window(&body)
        })
    }
}
