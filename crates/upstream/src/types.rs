//! Decoded upstream response shapes.
//!
//! Two families live here: the minimal metric-units shape consumed by the
//! cached lookup path, and the full pass-through bodies forwarded to callers
//! verbatim (temperatures in Kelvin, provider `cod` discriminator included).
//! Unknown fields are ignored everywhere; a missing required field fails the
//! decode and surfaces as an upstream error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Geocoding
// ============================================================================

/// One geocoding result. The provider returns an array of these; an empty
/// array means the city is unknown.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GeoMatch {
    pub lat: f64,
    pub lon: f64,
}

// ============================================================================
// Current conditions (metric, cached path)
// ============================================================================

/// Current conditions as fetched with `units=metric` for the cached lookup
/// path. Only the fields the normalized reading needs are required.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    pub sys: CountrySection,
    pub main: MetricConditions,
    pub weather: Vec<ConditionSummary>,
    pub wind: WindSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountrySection {
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricConditions {
    /// Celsius.
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: i64,
    pub pressure: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionSummary {
    pub description: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WindSummary {
    pub speed: f64,
}

// ============================================================================
// Pass-through bodies (Kelvin, no normalization)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainReadings {
    /// Kelvin on the pass-through routes.
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i64,
    pub humidity: i64,
    pub sea_level: Option<i64>,
    pub grnd_level: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    pub deg: Option<i64>,
    pub gust: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Clouds {
    pub all: i64,
}

/// Raw current-weather body. `cod` is an **integer** here; the forecast body
/// carries it as a string. The asymmetry is the provider's, not ours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeatherBody {
    pub coord: Value,
    pub weather: Vec<WeatherCondition>,
    pub base: String,
    pub main: MainReadings,
    pub visibility: Option<i64>,
    pub wind: Option<Wind>,
    pub clouds: Option<Clouds>,
    pub dt: i64,
    pub sys: Value,
    pub timezone: i64,
    pub id: i64,
    pub name: String,
    pub cod: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastItem {
    pub dt: i64,
    pub main: MainReadings,
    pub weather: Vec<WeatherCondition>,
    pub clouds: Option<Clouds>,
    pub wind: Option<Wind>,
    pub visibility: Option<i64>,
    /// Probability of precipitation, 0.0-1.0.
    pub pop: Option<f64>,
    pub sys: Option<Value>,
    pub dt_txt: String,
}

/// Raw 5-day/3-hour forecast body. `cod` is a **string** here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastBody {
    pub cod: String,
    pub message: i64,
    pub cnt: i64,
    pub list: Vec<ForecastItem>,
    pub city: Value,
}

// ============================================================================
// IP geolocation
// ============================================================================

/// ip-api response, forwarded to callers as-is. `status == "fail"` carries
/// the error in `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoIpInfo {
    pub status: String,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub region: Option<String>,
    pub region_name: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub timezone: Option<String>,
    pub isp: Option<String>,
    pub org: Option<String>,
    #[serde(rename = "as")]
    pub asn: Option<String>,
    pub query: Option<String>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_conditions_decode_minimal() {
        let body = r#"{
            "name": "London",
            "sys": {"country": "GB"},
            "main": {"temp": 15.5, "feels_like": 14.2, "humidity": 80, "pressure": 1013},
            "weather": [{"description": "cloudy"}],
            "wind": {"speed": 5.2}
        }"#;

        let conditions: CurrentConditions = serde_json::from_str(body).unwrap();
        assert_eq!(conditions.name, "London");
        assert_eq!(conditions.sys.country, "GB");
        assert_eq!(conditions.main.temp, 15.5);
        assert_eq!(conditions.weather[0].description, "cloudy");
        assert_eq!(conditions.wind.speed, 5.2);
    }

    #[test]
    fn test_current_conditions_ignores_unknown_fields() {
        let body = r#"{
            "name": "London",
            "sys": {"country": "GB", "sunrise": 1700000000},
            "main": {"temp": 15.5, "feels_like": 14.2, "humidity": 80, "pressure": 1013},
            "weather": [{"id": 804, "main": "Clouds", "description": "cloudy", "icon": "04d"}],
            "wind": {"speed": 5.2, "deg": 220},
            "cod": 200,
            "visibility": 10000
        }"#;

        assert!(serde_json::from_str::<CurrentConditions>(body).is_ok());
    }

    #[test]
    fn test_current_conditions_requires_main() {
        let body = r#"{"name": "London", "sys": {"country": "GB"}, "weather": [], "wind": {"speed": 1.0}}"#;
        assert!(serde_json::from_str::<CurrentConditions>(body).is_err());
    }

    #[test]
    fn test_forecast_cod_is_a_string() {
        let body = r#"{
            "cod": "200",
            "message": 0,
            "cnt": 1,
            "list": [{
                "dt": 1700000000,
                "main": {"temp": 288.5, "feels_like": 287.9, "temp_min": 287.0,
                         "temp_max": 289.0, "pressure": 1013, "humidity": 80},
                "weather": [{"id": 804, "main": "Clouds", "description": "overcast clouds", "icon": "04d"}],
                "dt_txt": "2023-11-14 22:00:00"
            }],
            "city": {"name": "London"}
        }"#;

        let forecast: ForecastBody = serde_json::from_str(body).unwrap();
        assert_eq!(forecast.cod, "200");
        assert_eq!(forecast.list.len(), 1);
        assert_eq!(forecast.list[0].main.pressure, 1013);
    }

    #[test]
    fn test_geo_ip_field_names_survive_roundtrip() {
        let body = r#"{
            "status": "success",
            "country": "United Kingdom",
            "countryCode": "GB",
            "regionName": "England",
            "as": "AS15169 Google LLC",
            "query": "8.8.8.8"
        }"#;

        let info: GeoIpInfo = serde_json::from_str(body).unwrap();
        assert_eq!(info.country_code.as_deref(), Some("GB"));
        assert_eq!(info.asn.as_deref(), Some("AS15169 Google LLC"));

        let out = serde_json::to_value(&info).unwrap();
        assert_eq!(out["countryCode"], "GB");
        assert_eq!(out["regionName"], "England");
        assert_eq!(out["as"], "AS15169 Google LLC");
    }
}
