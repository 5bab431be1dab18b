//! Microsoft Graph API client for listing directory users.

use serde::Deserialize;
use serde_json::value::RawValue;
use std::sync::Arc;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::error::GraphError;
use crate::identity::TokenSource;

/// Fields requested for every user.
pub const USER_SELECT: [&str; 3] = ["id", "userPrincipalName", "displayName"];

/// Microsoft Graph API client.
///
/// Asks its [`TokenSource`] for a token on every request.
pub struct GraphClient {
    http_client: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenSource>,
}

impl GraphClient {
    pub fn new(http_client: reqwest::Client, base_url: Url, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            http_client,
            base_url,
            tokens,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, GraphError> {
        let url = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&url).map_err(|e| GraphError::RequestFailed(e.to_string()))
    }

    /// Fetch the first page of `/users`, projected to `select`.
    ///
    /// Records are returned exactly as Graph sent them. `@odata.nextLink` is not followed.
    pub async fn list_users(&self, select: &[&str]) -> Result<Vec<Box<RawValue>>, GraphError> {
        let mut url = self.endpoint("users")?;
        if !select.is_empty() {
            url.query_pairs_mut()
                .append_pair("$select", &select.join(","));
        }

        let token = self.tokens.access_token().await?;

        let request_id = Uuid::new_v4();
        debug!(%request_id, "Fetching users from {}", url);

        let response = self
            .http_client
            .get(url)
            .bearer_auth(token.as_str())
            .header("client-request-id", request_id.to_string())
            .send()
            .await?;

        match response.status().as_u16() {
            200 => {
                let page: UserPage = response
                    .json()
                    .await
                    .map_err(|e| GraphError::ParseFailed(e.to_string()))?;

                if page.next_link.is_some() {
                    debug!("Ignoring @odata.nextLink, returning first page only");
                }

                debug!("Fetched {} users", page.value.len());
                Ok(page.value)
            }
            401 => Err(GraphError::Unauthorized),
            403 => Err(GraphError::Forbidden),
            429 => Err(GraphError::RateLimited),
            // Don't expose raw API error details - just log status code
            status => Err(GraphError::RequestFailed(format!("HTTP {}", status))),
        }
    }
}

/// Collection response wrapper. Records stay undecoded.
#[derive(Debug, Deserialize)]
struct UserPage {
    value: Vec<Box<RawValue>>,
    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
}
