use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use crate::{
    deezer::CatalogGateway,
    error::{LookupError, UpstreamError},
    types::{ApiErrorBody, RawTrack},
};

/// Largest `limit` the search endpoint honours.
pub const MAX_SEARCH_LIMIT: u32 = 100;

/// Error code Deezer uses for "no data" on lookups.
const NO_DATA_ERROR_CODE: i64 = 800;

const RANKING_ORDER: &str = "RANKING";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Deezer catalog client backed by a shared `reqwest` connection pool.
#[derive(Debug, Clone)]
pub struct DeezerClient {
    http: Client,
    base_url: String,
}

impl DeezerClient {
    /// Creates a client against a Deezer-compatible API.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root such as `https://api.deezer.com`; a trailing
    ///   slash is ignored
    /// * `timeout` - Deadline applied to every request made by the client
    ///
    /// # Returns
    ///
    /// - `Ok(DeezerClient)` - Ready to use, connections are pooled and shared by clones
    /// - `Err(UpstreamError::Transport)` - The HTTP client could not be built
    ///
    /// # Example
    ///
    /// ```
    /// let client = DeezerClient::new("https://api.deezer.com", Duration::from_secs(5))?;
    /// let records = client.search("genre:'techno'", 100, 40).await?;
    /// ```
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a GET request and returns the parsed JSON body, or the first
    /// upstream failure encountered on the way.
    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, UpstreamError> {
        let response = self.http.get(url).query(query).send().await;

        let response = match response {
            Ok(resp) => check_status(resp)?,
            Err(err) => return Err(err.into()), // network or reqwest error
        };

        let body = response.text().await?;
        let json: Value = serde_json::from_str(&body)?;

        if let Some(err) = json.get("error") {
            let err: ApiErrorBody = serde_json::from_value(err.clone())?;
            return Err(UpstreamError::Api {
                code: err.code,
                message: err.message,
            });
        }

        Ok(json)
    }
}

fn check_status(response: Response) -> Result<Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        log::warn!(
            "Deezer rate limit hit, retry suggested after {} seconds",
            retry_after
        );
    }

    Err(UpstreamError::Http {
        status: status.as_u16(),
    })
}

/// Extracts usable records from a search response body.
fn parse_search_body(json: Value) -> Result<Vec<RawTrack>, UpstreamError> {
    let data = match json.get("data") {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(UpstreamError::MalformedPayload(
                "`data` is not an array".to_string(),
            ));
        }
        None => {
            return Err(UpstreamError::MalformedPayload(
                "missing `data` array".to_string(),
            ));
        }
    };

    let records: Vec<RawTrack> = data
        .iter()
        .filter_map(|item| match serde_json::from_value::<RawTrack>(item.clone()) {
            Ok(record) if super::has_usable_id(&record) => Some(record),
            Ok(_) => None,
            Err(e) => {
                log::debug!("Skipping unreadable search record: {}", e);
                None
            }
        })
        .collect();

    if records.is_empty() {
        return Err(UpstreamError::EmptyResult);
    }

    Ok(records)
}

#[async_trait]
impl CatalogGateway for DeezerClient {
    /// Searches `GET {base}/search/track?q=&limit=&index=`.
    ///
    /// Records without an id are dropped; the remaining fields of each record
    /// are read leniently and may be missing.
    async fn search(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<RawTrack>, UpstreamError> {
        let api_url = format!("{base}/search/track", base = self.base_url);
        let params = [
            ("q", query.to_string()),
            ("limit", limit.clamp(1, MAX_SEARCH_LIMIT).to_string()),
            ("index", offset.to_string()),
        ];

        let json = self.get_json(&api_url, &params).await?;
        parse_search_body(json)
    }

    /// Searches with `order=RANKING`, so the first records are the most
    /// relevant matches for `query`.
    async fn search_ranked(&self, query: &str, limit: u32) -> Result<Vec<RawTrack>, UpstreamError> {
        let api_url = format!("{base}/search/track", base = self.base_url);
        let params = [
            ("q", query.to_string()),
            ("limit", limit.clamp(1, MAX_SEARCH_LIMIT).to_string()),
            ("order", RANKING_ORDER.to_string()),
        ];

        let json = self.get_json(&api_url, &params).await?;
        parse_search_body(json)
    }

    /// Looks a track up with `GET {base}/track/{id}`.
    ///
    /// Ids that are not plain digits are rejected as not found without a
    /// request. A 4xx status or Deezer's "no data" error code also means
    /// not found.
    async fn track_by_id(&self, id: &str) -> Result<RawTrack, LookupError> {
        if !super::is_valid_track_id(id) {
            log::debug!("Rejecting invalid track id {:?}", id);
            return Err(LookupError::NotFound(id.to_string()));
        }

        let api_url = format!("{base}/track/{id}", base = self.base_url, id = id);

        let json = match self.get_json(&api_url, &[]).await {
            Ok(json) => json,
            Err(err) if err.is_client_error() => return Err(LookupError::NotFound(id.to_string())),
            Err(UpstreamError::Api { code, .. }) if code == NO_DATA_ERROR_CODE => {
                return Err(LookupError::NotFound(id.to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        let record: RawTrack =
            serde_json::from_value(json).map_err(|e| LookupError::Upstream(e.into()))?;
        if !super::has_usable_id(&record) {
            return Err(LookupError::Upstream(UpstreamError::MalformedPayload(
                "track record has no id".to_string(),
            )));
        }

        Ok(record)
    }
}
