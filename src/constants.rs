use std::time::Duration;

/// User agent string for HTTP requests
pub const USER_AGENT: &str = concat!("mcp-geocode-server/", env!("CARGO_PKG_VERSION"));

/// OpenWeather Geocoding API base URL
pub const API_BASE: &str = "https://api.openweathermap.org/geo/1.0";

/// Environment variable holding the OpenWeather API key
pub const API_KEY_VAR: &str = "OPENWEATHERMAP_API_KEY";

/// Environment variable overriding [`API_BASE`]
pub const API_BASE_VAR: &str = "OPENWEATHERMAP_API_BASE";

/// Upper bound for a single upstream request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 5;
pub const DEFAULT_LIMIT: i64 = 1;

pub const NO_LOCATIONS: &str = "No locations found.";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8001;
pub const DEFAULT_MOUNT_PATH: &str = "/mcp";
