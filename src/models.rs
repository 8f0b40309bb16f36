use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::constants::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
use crate::error::{GeocodeError, Result};

// ============================================================================
// OpenWeather Geocoding API Models
// ============================================================================

/// One candidate location returned by `/direct` or `/reverse`.
///
/// The upstream shape is loose, so every field is optional and extra fields
/// such as `local_names` are ignored. A field of an unexpected type never
/// rejects the record: scalars are stringified, anything else is absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LocationRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub lon: Option<f64>,
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Geocoding API endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Direct,
    Reverse,
}

impl Endpoint {
    pub fn as_str(self) -> &'static str {
        match self {
            Endpoint::Direct => "direct",
            Endpoint::Reverse => "reverse",
        }
    }
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Clamps a requested result count into the range the upstream API accepts
pub fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(MIN_LIMIT, MAX_LIMIT)
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForwardGeocodeRequest {
    /// Place name to resolve, e.g. "Berlin" or "Springfield,IL"
    pub query: String,
    /// Maximum number of matches to return (1-5)
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Optional ISO 3166 country code used to narrow the search
    #[serde(default, alias = "country_code")]
    pub country_code: Option<String>,
}

impl ForwardGeocodeRequest {
    pub fn clamped_limit(&self) -> i64 {
        clamp_limit(self.limit)
    }

    /// Builds the `q` parameter: trimmed query, plus `,{country}` when given
    pub fn composed_query(&self) -> Result<String> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(GeocodeError::InvalidArgument {
                name: "query",
                message: "must not be empty".to_string(),
            });
        }

        match self.country_code.as_deref().map(str::trim) {
            Some(country) if !country.is_empty() => Ok(format!("{},{}", query, country)),
            _ => Ok(query.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ReverseGeocodeRequest {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Maximum number of matches to return (1-5)
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl ReverseGeocodeRequest {
    pub fn clamped_limit(&self) -> i64 {
        clamp_limit(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward(query: &str, country_code: Option<&str>) -> ForwardGeocodeRequest {
        ForwardGeocodeRequest {
            query: query.to_string(),
            limit: 1,
            country_code: country_code.map(String::from),
        }
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(10), 5);
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(3), 3);
        assert_eq!(clamp_limit(-7), 1);
        assert_eq!(clamp_limit(i64::MAX), 5);
    }

    #[test]
    fn test_composed_query_trims_and_appends_country() {
        assert_eq!(forward("  Paris ", Some(" fr ")).composed_query().unwrap(), "Paris,fr");
        assert_eq!(forward("Paris", None).composed_query().unwrap(), "Paris");
        assert_eq!(forward("Paris", Some("   ")).composed_query().unwrap(), "Paris");
    }

    #[test]
    fn test_composed_query_rejects_blank() {
        let err = forward("   ", Some("fr")).composed_query().unwrap_err();
        assert!(matches!(err, GeocodeError::InvalidArgument { name: "query", .. }));
    }

    #[test]
    fn test_forward_request_defaults_and_aliases() {
        let request: ForwardGeocodeRequest =
            serde_json::from_value(serde_json::json!({ "query": "Berlin" })).unwrap();
        assert_eq!(request.limit, 1);
        assert!(request.country_code.is_none());

        let request: ForwardGeocodeRequest = serde_json::from_value(serde_json::json!({
            "query": "Paris",
            "limit": 9,
            "countryCode": "FR"
        }))
        .unwrap();
        assert_eq!(request.clamped_limit(), 5);
        assert_eq!(request.country_code.as_deref(), Some("FR"));

        let request: ForwardGeocodeRequest = serde_json::from_value(serde_json::json!({
            "query": "Paris",
            "country_code": "FR"
        }))
        .unwrap();
        assert_eq!(request.country_code.as_deref(), Some("FR"));
    }

    #[test]
    fn test_reverse_request_default_limit() {
        let request: ReverseGeocodeRequest = serde_json::from_value(serde_json::json!({
            "latitude": 52.52,
            "longitude": 13.405
        }))
        .unwrap();
        assert_eq!(request.clamped_limit(), 1);
    }

    #[test]
    fn test_location_record_tolerates_missing_and_extra_fields() {
        let records: Vec<LocationRecord> = serde_json::from_str(
            r#"[{"name":"Berlin","local_names":{"de":"Berlin"},"lat":52.52,"lon":13.405,"country":"DE"},
                {"state":null}]"#,
        )
        .unwrap();
        assert_eq!(records[0].name.as_deref(), Some("Berlin"));
        assert_eq!(records[0].state, None);
        assert_eq!(records[0].lat, Some(52.52));
        assert_eq!(records[1], LocationRecord::default());
    }

    #[test]
    fn test_location_record_mistyped_fields_do_not_reject_list() {
        let records: Vec<LocationRecord> = serde_json::from_str(
            r#"[{"name":"Berlin","state":"Berlin","country":"DE","lat":52.52,"lon":13.405},
                {"name":12345,"state":{"code":"BE"},"country":true,"lat":"1.5","lon":[2]}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name.as_deref(), Some("Berlin"));
        assert_eq!(records[1].name.as_deref(), Some("12345"));
        assert_eq!(records[1].state, None);
        assert_eq!(records[1].country.as_deref(), Some("true"));
        assert_eq!(records[1].lat, Some(1.5));
        assert_eq!(records[1].lon, None);
    }

    #[test]
    fn test_location_list_must_be_array() {
        assert!(serde_json::from_str::<Vec<LocationRecord>>(r#"{"cod":"400"}"#).is_err());
    }
}
