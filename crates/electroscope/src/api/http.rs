//! HTTP client for the dispatch server's JSON API.

use std::time::Duration;

use reqwest::blocking::{Client as ReqwestClient, Response};
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Client, ClientError};
use crate::data::{DispatchId, ListPage, ListQuery};

/// Request timeout for all server calls.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Body of the bulk-delete request.
#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    dispatch_ids: &'a [DispatchId],
}

/// Body of the bulk-delete response.
#[derive(Debug, Deserialize)]
struct DeleteResponse {
    deleted: u64,
}

/// Client for a real dispatch server.
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
}

impl HttpClient {
    /// Create a client for the server at `base_url`.
    ///
    /// A trailing slash on the URL is tolerated.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = ReqwestClient::builder().timeout(TIMEOUT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// The configured server base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn check_status(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl Client for HttpClient {
    fn list(&self, query: &ListQuery) -> Result<ListPage, ClientError> {
        let url = format!("{}/api/v1/dispatches", self.base_url);
        debug!(
            offset = query.offset,
            limit = query.limit,
            sort = query.sort.wire_name(),
            order = query.order.wire_name(),
            search = %query.search,
            "listing dispatches"
        );

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&[
                ("count", query.limit.to_string()),
                ("offset", query.offset.to_string()),
                ("sort_by", query.sort.wire_name().to_string()),
                ("sort_direction", query.order.wire_name().to_string()),
                ("search", query.search.clone()),
            ])
            .send()?;

        let response = Self::check_status(response)?;
        let page: ListPage = response
            .json()
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        debug!(rows = page.dispatches.len(), total = page.total, "page loaded");
        Ok(page)
    }

    fn delete(&self, ids: &[DispatchId]) -> Result<u64, ClientError> {
        let url = format!("{}/api/v1/dispatches/delete", self.base_url);
        debug!(count = ids.len(), "deleting dispatches");

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&DeleteRequest { dispatch_ids: ids })
            .send()?;

        let response = Self::check_status(response)?;
        let body: DeleteResponse = response
            .json()
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        debug!(deleted = body.deleted, "delete acknowledged");
        Ok(body.deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = HttpClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_delete_request_body_shape() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let body = serde_json::to_value(DeleteRequest { dispatch_ids: &ids }).unwrap();
        assert_eq!(body, serde_json::json!({"dispatch_ids": ["a", "b"]}));
    }
}
