//! Geocoding MCP Server Library
//!
//! Exposes OpenWeather forward and reverse geocoding as two Model Context
//! Protocol tools, `forward_geocode` and `reverse_geocode`.

pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod models;
pub mod service;

pub use config::{Config, ServerSettings, Transport};
pub use error::{GeocodeError, Result};
pub use service::Geocoder;
