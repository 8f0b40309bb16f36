use crate::constants::NO_LOCATIONS;
use crate::models::LocationRecord;

/// Formats geocoding matches as numbered lines, one per record, in input order
pub fn format_locations(records: &[LocationRecord]) -> String {
    if records.is_empty() {
        return NO_LOCATIONS.to_string();
    }

    records
        .iter()
        .enumerate()
        .map(|(i, record)| format_location(i + 1, record))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_location(index: usize, record: &LocationRecord) -> String {
    let name = present(&record.name).unwrap_or("Unknown");
    // Country is always shown, falling back to "?".
    let country = present(&record.country).unwrap_or("?");
    let meta = match present(&record.state) {
        Some(state) => format!(" ({}, {})", state, country),
        None => format!(" ({})", country),
    };

    format!(
        "{}. {}{} -> lat={}, lon={}",
        index,
        name,
        meta,
        coordinate(record.lat),
        coordinate(record.lon)
    )
}

/// Null and empty strings both count as absent
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn coordinate(value: Option<f64>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        name: Option<&str>,
        state: Option<&str>,
        country: Option<&str>,
        lat: f64,
        lon: f64,
    ) -> LocationRecord {
        LocationRecord {
            name: name.map(String::from),
            state: state.map(String::from),
            country: country.map(String::from),
            lat: Some(lat),
            lon: Some(lon),
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(format_locations(&[]), "No locations found.");
    }

    #[test]
    fn test_single_with_state_and_country() {
        let records = [record(Some("Berlin"), Some("Berlin"), Some("DE"), 52.52, 13.405)];
        assert_eq!(
            format_locations(&records),
            "1. Berlin (Berlin, DE) -> lat=52.52, lon=13.405"
        );
    }

    #[test]
    fn test_missing_state() {
        let records = [record(Some("Paris"), None, Some("FR"), 48.856, 2.352)];
        assert_eq!(
            format_locations(&records),
            "1. Paris (FR) -> lat=48.856, lon=2.352"
        );
    }

    #[test]
    fn test_missing_state_and_country() {
        let records = [record(Some("Unknown Place"), None, None, 0.0, 0.0)];
        assert_eq!(
            format_locations(&records),
            "1. Unknown Place (?) -> lat=0, lon=0"
        );
    }

    #[test]
    fn test_empty_strings_treated_as_absent() {
        let records = [record(Some(""), Some(""), Some(""), 1.5, -2.25)];
        assert_eq!(
            format_locations(&records),
            "1. Unknown (?) -> lat=1.5, lon=-2.25"
        );
    }

    #[test]
    fn test_missing_coordinates() {
        let records = [LocationRecord {
            name: Some("Nowhere".to_string()),
            ..Default::default()
        }];
        assert_eq!(format_locations(&records), "1. Nowhere (?) -> lat=?, lon=?");
    }

    #[test]
    fn test_multiple_keep_order_and_duplicates() {
        let records = [
            record(Some("London"), Some("England"), Some("GB"), 51.5074, -0.1278),
            record(Some("London"), Some("Ontario"), Some("CA"), 42.9849, -81.2453),
            record(Some("London"), Some("England"), Some("GB"), 51.5074, -0.1278),
        ];
        let output = format_locations(&records);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "1. London (England, GB) -> lat=51.5074, lon=-0.1278");
        assert_eq!(lines[1], "2. London (Ontario, CA) -> lat=42.9849, lon=-81.2453");
        assert_eq!(lines[2], "3. London (England, GB) -> lat=51.5074, lon=-0.1278");
        assert!(!output.ends_with('\n'));
    }
}
