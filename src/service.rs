use anyhow::Result;
use reqwest::Client;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use std::sync::Arc;

use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::error::{self, GeocodeError};
use crate::formatters::format_locations;
use crate::models::{Endpoint, ForwardGeocodeRequest, LocationRecord, ReverseGeocodeRequest};

/// Geocoding service that handles MCP requests
///
/// Holds no per-request state; the HTTP client is shared only as a
/// connection pool.
#[derive(Clone)]
pub struct Geocoder {
    client: Arc<Client>,
    config: Arc<Config>,
    tool_router: ToolRouter<Self>,
}

impl Geocoder {
    /// Creates a new Geocoder service instance
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        })
    }

    /// Calls one geocoding endpoint and decodes the location list
    async fn fetch_locations(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> error::Result<Vec<LocationRecord>> {
        let url = self.config.endpoint_url(endpoint.as_str());

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            tracing::warn!(endpoint = endpoint.as_str(), status = status.as_u16(), "Geocoding request rejected");
            return Err(GeocodeError::UpstreamHttp {
                status: status.as_u16(),
                body,
            });
        }

        let records = serde_json::from_str::<Vec<LocationRecord>>(&body)?;
        tracing::debug!(endpoint = endpoint.as_str(), count = records.len(), "Geocoding response received");
        Ok(records)
    }

    fn transport_error(&self, e: reqwest::Error) -> GeocodeError {
        if e.is_timeout() {
            GeocodeError::Timeout(self.config.request_timeout)
        } else {
            // Strip the URL, it carries the API key in its query string.
            GeocodeError::Request(e.without_url())
        }
    }

    /// Resolves a place name to coordinates and returns the formatted matches
    pub async fn lookup_forward(&self, request: ForwardGeocodeRequest) -> error::Result<String> {
        let key = self.config.require_api_key()?;
        let limit = request.clamped_limit();
        let query = request.composed_query()?;

        tracing::info!("Forward geocoding '{}' (limit {})", query, limit);

        let records = self
            .fetch_locations(
                Endpoint::Direct,
                &[
                    ("q", query),
                    ("limit", limit.to_string()),
                    ("appid", key),
                ],
            )
            .await?;

        Ok(format_locations(&records))
    }

    /// Resolves coordinates to nearby places and returns the formatted matches
    pub async fn lookup_reverse(&self, request: ReverseGeocodeRequest) -> error::Result<String> {
        let key = self.config.require_api_key()?;
        let limit = request.clamped_limit();

        tracing::info!(
            "Reverse geocoding {}, {} (limit {})",
            request.latitude,
            request.longitude,
            limit
        );

        let records = self
            .fetch_locations(
                Endpoint::Reverse,
                &[
                    ("lat", request.latitude.to_string()),
                    ("lon", request.longitude.to_string()),
                    ("limit", limit.to_string()),
                    ("appid", key),
                ],
            )
            .await?;

        Ok(format_locations(&records))
    }
}

#[tool_handler]
impl ServerHandler for Geocoder {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "lat-long".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Geocoding powered by the OpenWeather Geocoding API. \
                Use forward_geocode to turn a place name into coordinates and \
                reverse_geocode to find places near a latitude/longitude."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Geocoder {
    /// Resolves a place name to latitude/longitude
    #[tool(description = "Resolve a place name to latitude/longitude using OpenWeather Geocoding. Optionally narrow the search with an ISO 3166 country code (e.g., query: 'Paris', countryCode: 'FR'). Returns up to `limit` (1-5) matches, one per line.")]
    pub async fn forward_geocode(
        &self,
        Parameters(request): Parameters<ForwardGeocodeRequest>,
    ) -> Result<CallToolResult, McpError> {
        let formatted = self.lookup_forward(request).await.map_err(|e| {
            tracing::error!("forward_geocode failed: {}", e);
            McpError::from(e)
        })?;

        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }

    /// Resolves latitude/longitude to the nearest places
    #[tool(description = "Resolve latitude/longitude to the nearest places using OpenWeather Geocoding (e.g., latitude: 52.52, longitude: 13.405 for Berlin). Returns up to `limit` (1-5) matches, one per line.")]
    pub async fn reverse_geocode(
        &self,
        Parameters(request): Parameters<ReverseGeocodeRequest>,
    ) -> Result<CallToolResult, McpError> {
        let formatted = self.lookup_reverse(request).await.map_err(|e| {
            tracing::error!("reverse_geocode failed: {}", e);
            McpError::from(e)
        })?;

        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }
}
