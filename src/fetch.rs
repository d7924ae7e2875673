//! Single GET-and-decode primitive shared by every tool

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{FetchError, FetchResult};

/// A query string value; lists expand to one `key=value` pair per element
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Scalar(String),
    List(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<usize> for QueryValue {
    fn from(value: usize) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<&[&str]> for QueryValue {
    fn from(values: &[&str]) -> Self {
        QueryValue::List(values.iter().map(|v| v.to_string()).collect())
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        values.as_slice().into()
    }
}

/// Flattens query parameters into ordered pairs, repeating keys for lists
pub fn encode_query(params: &[(&str, QueryValue)]) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        match value {
            QueryValue::Scalar(v) => pairs.push((key.to_string(), v.clone())),
            QueryValue::List(values) => {
                pairs.extend(values.iter().map(|v| (key.to_string(), v.clone())))
            }
        }
    }
    pairs
}

/// HTTP fetcher that turns every failure into a [`FetchError`]
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Sends a GET request and decodes the JSON body into `T`
    ///
    /// Non-2xx statuses and undecodable bodies are errors. Use
    /// `serde_json::Value` for `T` to get the raw document.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, QueryValue)],
        headers: &[(&str, &str)],
    ) -> FetchResult<T> {
        let result = self.send(url, query, headers).await;
        if let Err(e) = &result {
            tracing::warn!(url = e.url(), "Fetch failed: {}", e);
        }
        result
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, QueryValue)],
        headers: &[(&str, &str)],
    ) -> FetchResult<T> {
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url).query(&encode_query(query));
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Parse {
            url: url.to_string(),
            source,
        })
    }
}
