//! Reqwest-backed collection transport

use std::sync::Arc;

use async_trait::async_trait;
use graphfeed_core::ports::{CollectionTransport, RawPage};
use graphfeed_domain::{GraphFeedError, NewCalendarEvent, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::{AccessTokenProvider, GraphTransportConfig};
use crate::errors::InfraError;

/// Collection API transport.
///
/// Attaches a bearer token per request, owns timeout policy, and maps
/// HTTP-level failures into the domain error taxonomy. Safe for concurrent
/// use — the underlying client is shared by cheap clone.
#[derive(Clone)]
pub struct GraphTransport {
    client: Client,
    base_url: String,
    token_provider: Arc<dyn AccessTokenProvider>,
}

impl GraphTransport {
    /// Create a transport from its configuration and a token provider.
    pub fn new(
        config: GraphTransportConfig,
        token_provider: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(InfraError::from)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            token_provider,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.token_provider.access_token().await?;
        Ok(request.bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(InfraError::from)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_else(|_| "unknown error".to_owned());
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GraphFeedError::Auth(format!("API error ({status}): {body}")));
        }
        Err(GraphFeedError::Network(format!("API error ({status}): {body}")))
    }

    async fn decode_page(response: Response) -> Result<RawPage> {
        let body = response.text().await.map_err(InfraError::from)?;
        serde_json::from_str(&body).map_err(|e| {
            GraphFeedError::MalformedPage(format!("undecodable page body: {e}"))
        })
    }

    async fn decode_resource(response: Response) -> Result<Value> {
        let body = response.text().await.map_err(InfraError::from)?;
        serde_json::from_str(&body).map_err(|e| {
            GraphFeedError::MalformedPage(format!("undecodable resource body: {e}"))
        })
    }

    /// Fetch a single resource (e.g. `me`, `users/{id}`) with an optional
    /// field projection.
    pub async fn fetch_single(&self, path: &str, select: Option<&[&str]>) -> Result<Value> {
        let mut request = self.client.get(self.endpoint(path));
        if let Some(fields) = select {
            request = request.query(&[("$select", fields.join(","))]);
        }
        let request = self.authorize(request).await?;

        debug!(path, "fetching single resource");
        Self::decode_resource(self.send(request).await?).await
    }

    /// Create a calendar event, returning the created record.
    pub async fn create_event(&self, event: &NewCalendarEvent) -> Result<Value> {
        let request = self.client.post(self.endpoint("me/events")).json(event);
        let request = self.authorize(request).await?;

        debug!(subject = %event.subject, "creating calendar event");
        Self::decode_resource(self.send(request).await?).await
    }
}

#[async_trait]
impl CollectionTransport for GraphTransport {
    async fn fetch_page(
        &self,
        path: &str,
        query: &[(String, String)],
        headers: &[(String, String)],
    ) -> Result<RawPage> {
        let mut request = self.client.get(self.endpoint(path)).query(query);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        let request = self.authorize(request).await?;

        debug!(path, "fetching first page");
        Self::decode_page(self.send(request).await?).await
    }

    async fn fetch_next(&self, next_link: &str, headers: &[(String, String)]) -> Result<RawPage> {
        let mut request = self.client.get(next_link);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        let request = self.authorize(request).await?;

        debug!("following continuation cursor");
        Self::decode_page(self.send(request).await?).await
    }
}
