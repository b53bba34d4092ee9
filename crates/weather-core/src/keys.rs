//! Cache key construction.
//!
//! Keys are namespaced by purpose and case-insensitive on city name: the
//! name is lower-cased before use, and that is the only normalization.

pub fn geocoding(city: &str) -> String {
    format!("geocoding:{}", city.to_lowercase())
}

pub fn weather(city: &str) -> String {
    format!("weather:{}", city.to_lowercase())
}

pub fn alerts(city: Option<&str>) -> String {
    match city {
        Some(city) => format!("alerts:{}", city.to_lowercase()),
        None => "alerts:global".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_case_insensitive() {
        assert_eq!(geocoding("London"), geocoding("LONDON"));
        assert_eq!(weather("New York"), "weather:new york");
        assert_eq!(alerts(Some("Tokyo")), alerts(Some("tokyo")));
    }

    #[test]
    fn test_alerts_key_without_city_is_global() {
        assert_eq!(alerts(None), "alerts:global");
    }
}
