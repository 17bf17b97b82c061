//! Tatoeba sentence search client.
use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::retry::{Attempt, RetryPolicy};
use super::RemoteSearch;
use crate::error::Error;

pub const DEFAULT_ENDPOINT: &str = "https://tatoeba.org/en/api_v0/search";
const TIMEOUT: Duration = Duration::from_secs(10);
const PAGE_SIZE: &str = "50";

/// Search response. Depending on the API version, sentences live under `results` or `sentences`.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<Value>>,
    #[serde(default)]
    sentences: Option<Vec<Value>>,
}

/// Extract the non-empty `text` fields of a search response body.
pub fn parse_candidates(body: &str) -> Result<Vec<String>, Error> {
    let response: SearchResponse = serde_json::from_str(body)?;
    let items = match (response.results, response.sentences) {
        (Some(results), _) if !results.is_empty() => results,
        (_, Some(sentences)) => sentences,
        _ => Vec::new(),
    };

    Ok(items
        .iter()
        .filter_map(|item| item.get("text").and_then(Value::as_str))
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect())
}

/// Blocking client for the Tatoeba search endpoint.
pub struct TatoebaClient {
    client: Client,
    endpoint: Url,
    lang: String,
    retry: RetryPolicy,
}

impl TatoebaClient {
    /// Build a client identifying itself with `user_agent`.
    pub fn new(
        endpoint: Url,
        lang: &str,
        user_agent: &str,
        retry: RetryPolicy,
    ) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            lang: lang.to_string(),
            retry,
        })
    }

    /// Search URL for `term`: approved, non-orphan sentences in random order, without translations.
    pub fn request_url(&self, term: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("query", term)
            .append_pair("from", &self.lang)
            .append_pair("orphans", "no")
            .append_pair("unapproved", "no")
            .append_pair("has_audio", "no")
            .append_pair("sort", "random")
            .append_pair("trans_filter", "limit")
            .append_pair("trans_to", "")
            .append_pair("limit", PAGE_SIZE)
            .append_pair("page", "1");
        url
    }

    fn attempt(&self, url: &Url) -> Attempt<Vec<String>> {
        let resp = match self.client.get(url.clone()).send() {
            Ok(resp) => resp,
            Err(e) => return Attempt::Retry(e.into()),
        };

        let status = resp.status();
        if status == StatusCode::OK {
            return match resp.text() {
                Ok(body) => match parse_candidates(&body) {
                    Ok(texts) => Attempt::Done(texts),
                    Err(e) => Attempt::Fail(e),
                },
                Err(e) => Attempt::Retry(e.into()),
            };
        }

        let body: String = resp.text().unwrap_or_default().chars().take(200).collect();
        warn!("search returned HTTP {}: {}", status, body);
        let err = Error::Custom(format!("HTTP {}", status));
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            Attempt::Retry(err)
        } else {
            Attempt::Fail(err)
        }
    }
}

impl RemoteSearch for TatoebaClient {
    fn search(&self, term: &str) -> Result<Vec<String>, Error> {
        let url = self.request_url(term);
        debug!("GET {}", url);
        self.retry.run(|| self.attempt(&url))
    }
}
