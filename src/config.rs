//! Configuration for the geocoding server
//!
//! Upstream settings are resolved from the environment; the API key itself is
//! read again on every tool call so a host can inject or rotate it at runtime.

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tokio::net::TcpListener;

use crate::constants::{
    API_BASE, API_BASE_VAR, API_KEY_VAR, DEFAULT_HOST, DEFAULT_MOUNT_PATH, DEFAULT_PORT,
    REQUEST_TIMEOUT,
};
use crate::error::{GeocodeError, Result};

/// Upstream API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the geocoding API, without trailing slash
    pub api_base: String,

    /// Name of the environment variable holding the API key
    pub api_key_var: String,

    /// Per-request timeout for upstream calls
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key_var: API_KEY_VAR.to_string(),
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    /// Create a configuration from the environment, falling back to the public API
    pub fn from_env() -> Self {
        let api_base = std::env::var(API_BASE_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| API_BASE.to_string());
        Self::new(api_base)
    }

    pub fn with_api_key_var(mut self, var: impl Into<String>) -> Self {
        self.api_key_var = var.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read the API key; missing and empty values are both errors
    pub fn require_api_key(&self) -> Result<String> {
        match std::env::var(&self.api_key_var) {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => Err(GeocodeError::Configuration {
                var: self.api_key_var.clone(),
            }),
        }
    }

    /// Full URL for one endpoint path segment
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(API_BASE)
    }
}

/// How the MCP server is exposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// JSON-RPC over stdin/stdout
    Stdio,
    /// MCP streamable HTTP
    StreamableHttp,
}

/// Geocoding MCP Server
#[derive(Debug, Parser)]
#[command(name = "mcp-geocode-server")]
#[command(version, about = "MCP server exposing OpenWeather forward and reverse geocoding")]
pub struct ServerSettings {
    /// Transport used to talk to the MCP client
    #[arg(long, env = "MCP_TRANSPORT", value_enum, default_value_t = Transport::StreamableHttp)]
    pub transport: Transport,

    /// Bind address for the HTTP transport
    #[arg(long, env = "MCP_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Bind port for the HTTP transport
    #[arg(long, env = "MCP_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Path the MCP endpoint is mounted under
    #[arg(long, env = "MCP_MOUNT_PATH", default_value = DEFAULT_MOUNT_PATH)]
    pub mount_path: String,
}

impl ServerSettings {
    /// Bind the HTTP listener; the host may be a name, IPv4 or IPv6 literal
    pub async fn bind_listener(&self) -> anyhow::Result<TcpListener> {
        TcpListener::bind((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("Failed to bind {}:{}", self.host, self.port))
    }

    /// Mount path normalised to a single leading slash
    pub fn mount_path(&self) -> String {
        let trimmed = self.mount_path.trim_matches('/');
        format!("/{}", trimmed)
    }
}
