//! HTTP client for the hosted relational store.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::query::TableQuery;
use crate::config::{StoreCredentials, install_crypto_provider};
use crate::store::{StoreError, StoreResult};

/// Error body returned by the store on non-success responses.
#[derive(Debug, Default, Deserialize)]
struct RemoteErrorBody {
    message: Option<String>,
    hint: Option<String>,
}

/// Rows returned by a select, with the exact match count when requested.
#[derive(Debug)]
pub struct Rows<T> {
    pub rows: Vec<T>,
    pub total: Option<usize>,
}

/// Client for the store's table endpoints (`{url}/rest/v1/{table}`).
///
/// Built without credentials it answers every request with
/// [`StoreError::CredentialsMissing`], so callers degrade instead of crashing.
#[derive(Clone)]
pub struct RestClient {
    credentials: Option<StoreCredentials>,
    http: Client,
}

impl RestClient {
    pub fn new(credentials: Option<StoreCredentials>) -> Self {
        install_crypto_provider();
        Self {
            credentials,
            http: Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    fn credentials(&self) -> StoreResult<&StoreCredentials> {
        self.credentials.as_ref().ok_or(StoreError::CredentialsMissing)
    }

    /// Start a query against `table`.
    pub fn from(&self, table: &str) -> TableQuery<'_> {
        TableQuery::new(self, table)
    }

    fn table_url(&self, table: &str) -> StoreResult<String> {
        let creds = self.credentials()?;
        Ok(format!(
            "{}/rest/v1/{}",
            creds.url.trim_end_matches('/'),
            table
        ))
    }

    fn auth_headers(&self) -> StoreResult<HeaderMap> {
        let creds = self.credentials()?;
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&creds.anon_key).map_err(|e| StoreError::Validation {
            message: format!("anon key is not a valid header value: {}", e),
        })?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", creds.anon_key)).map_err(|e| {
            StoreError::Validation {
                message: format!("anon key is not a valid header value: {}", e),
            }
        })?;
        headers.insert("apikey", key);
        headers.insert(reqwest::header::AUTHORIZATION, bearer);
        Ok(headers)
    }

    /// Create a GET request builder for a table.
    pub(crate) fn get(&self, table: &str) -> StoreResult<RequestBuilder> {
        Ok(self
            .http
            .get(self.table_url(table)?)
            .headers(self.auth_headers()?))
    }

    /// Create a HEAD request builder for a table.
    pub(crate) fn head(&self, table: &str) -> StoreResult<RequestBuilder> {
        Ok(self
            .http
            .head(self.table_url(table)?)
            .headers(self.auth_headers()?))
    }

    /// Create a POST request builder for a table.
    pub(crate) fn post(&self, table: &str) -> StoreResult<RequestBuilder> {
        Ok(self
            .http
            .post(self.table_url(table)?)
            .headers(self.auth_headers()?))
    }

    /// Insert one row and return it as stored.
    pub async fn insert<B, T>(&self, table: &str, body: &B) -> StoreResult<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .post(table)?
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        first_row(table, response).await
    }

    /// Insert or merge one row on its primary key and return it as stored.
    pub async fn upsert<B, T>(&self, table: &str, body: &B) -> StoreResult<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .post(table)?
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(body)
            .send()
            .await?;
        first_row(table, response).await
    }

    /// Insert one row without reading it back.
    pub async fn insert_only<B>(&self, table: &str, body: &B) -> StoreResult<()>
    where
        B: serde::Serialize + ?Sized,
    {
        let response = self
            .post(table)?
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?;
        check_status(response).await.map(|_| ())
    }

    /// Exact row count of a table.
    pub async fn count(&self, table: &str) -> StoreResult<u64> {
        let response = self
            .head(table)?
            .query(&[("select", "*")])
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let response = check_status(response).await?;
        let total = content_range_total(&response).ok_or_else(|| StoreError::Decode {
            message: format!("missing Content-Range when counting '{}'", table),
        })?;
        Ok(total as u64)
    }
}

/// Map non-success responses to [`StoreError::Remote`].
pub(crate) async fn check_status(response: Response) -> StoreResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let body: RemoteErrorBody = serde_json::from_str(&text).unwrap_or_default();
    let message = match (body.message, body.hint) {
        (Some(message), Some(hint)) => format!("{} ({})", message, hint),
        (Some(message), None) => message,
        _ if text.is_empty() => "Unknown error".to_string(),
        _ => text,
    };
    Err(StoreError::Remote { status, message })
}

async fn first_row<T: DeserializeOwned>(table: &str, response: Response) -> StoreResult<T> {
    let response = check_status(response).await?;
    let mut rows: Vec<T> = response.json().await?;
    if rows.is_empty() {
        return Err(StoreError::Decode {
            message: format!("store returned no row for write to '{}'", table),
        });
    }
    Ok(rows.swap_remove(0))
}

/// Total from a `Content-Range` header such as `0-9/57` or `*/0`.
pub(crate) fn content_range_total(response: &Response) -> Option<usize> {
    response
        .headers()
        .get(reqwest::header::CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_content_range)
}

pub(crate) fn parse_content_range(value: &str) -> Option<usize> {
    let (_, total) = value.rsplit_once('/')?;
    total.trim().parse().ok()
}
