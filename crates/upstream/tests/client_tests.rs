//! Client tests against a mock upstream provider.

use reqwest::Client;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use upstream::{GeoLocator, IpApiClient, OpenWeatherClient, WeatherProvider};
use weather_common::{Coordinate, Settings, WeatherError};

fn settings_for(server: &MockServer) -> Settings {
    Settings {
        openweather_api_key: "test-key".to_string(),
        openweather_base_url: format!("{}/data/2.5", server.uri()),
        geocoding_url: format!("{}/geo/1.0/direct", server.uri()),
        ip_api_url: format!("{}/json", server.uri()),
        redis_url: "redis://localhost:6379".to_string(),
        cache_ttl: 300,
        geocoding_cache_ttl: 86400,
    }
}

fn client_for(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::new(Client::new(), &settings_for(server))
}

#[tokio::test]
async fn test_geocode_returns_first_match_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "London"))
        .and(query_param("limit", "1"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "London", "lat": 51.5074, "lon": -0.1278, "country": "GB"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let matches = client_for(&server).geocode("London").await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].lat, 51.5074);
    assert_eq!(matches[0].lon, -0.1278);
}

#[tokio::test]
async fn test_geocode_empty_array_is_ok_and_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let matches = client_for(&server).geocode("Nowhereville").await.unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn test_current_weather_requests_metric_units() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("units", "metric"))
        .and(query_param("lat", "51.5074"))
        .and(query_param("lon", "-0.1278"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "London",
            "sys": {"country": "GB"},
            "main": {"temp": 15.5, "feels_like": 14.2, "humidity": 80, "pressure": 1013},
            "weather": [{"description": "cloudy"}],
            "wind": {"speed": 5.2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let coord = Coordinate { lat: 51.5074, lon: -0.1278 };
    let conditions = client_for(&server).current_weather(&coord).await.unwrap();
    assert_eq!(conditions.name, "London");
    assert_eq!(conditions.main.temp, 15.5);
}

#[tokio::test]
async fn test_current_weather_404_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "cod": "404", "message": "city not found"
        })))
        .mount(&server)
        .await;

    let coord = Coordinate { lat: 0.0, lon: 0.0 };
    let err = client_for(&server).current_weather(&coord).await.unwrap_err();
    assert!(matches!(err, WeatherError::NotFound(_)));
}

#[tokio::test]
async fn test_current_weather_server_error_carries_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "cod": 401, "message": "Invalid API key"
        })))
        .mount(&server)
        .await;

    let coord = Coordinate { lat: 0.0, lon: 0.0 };
    let err = client_for(&server).current_weather(&coord).await.unwrap_err();
    match err {
        WeatherError::Upstream(msg) => assert_eq!(msg, "Invalid API key"),
        other => panic!("expected Upstream, got {:?}", other),
    }
}

#[tokio::test]
async fn test_pass_through_weather_checks_integer_cod() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "coord": {"lon": -0.1278, "lat": 51.5074},
            "weather": [{"id": 804, "main": "Clouds", "description": "overcast clouds", "icon": "04n"}],
            "base": "stations",
            "main": {"temp": 288.65, "feels_like": 288.05, "temp_min": 287.0,
                     "temp_max": 290.0, "pressure": 1013, "humidity": 80},
            "visibility": 10000,
            "wind": {"speed": 5.2, "deg": 220},
            "clouds": {"all": 90},
            "dt": 1700000000,
            "sys": {"country": "GB", "sunrise": 1699946400, "sunset": 1699979700},
            "timezone": 0,
            "id": 2643743,
            "name": "London",
            "cod": 200
        })))
        .mount(&server)
        .await;

    let coord = Coordinate { lat: 51.5074, lon: -0.1278 };
    let body = client_for(&server).current_by_coord(&coord).await.unwrap();
    assert_eq!(body.cod, 200);
    assert_eq!(body.name, "London");
    // Kelvin passes through untouched.
    assert_eq!(body.main.temp, 288.65);
}

#[tokio::test]
async fn test_pass_through_error_body_maps_to_upstream_with_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "cod": "404", "message": "city not found"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .current_by_query("Nowhereville")
        .await
        .unwrap_err();
    match err {
        WeatherError::Upstream(msg) => assert_eq!(msg, "city not found"),
        other => panic!("expected Upstream, got {:?}", other),
    }
}

#[tokio::test]
async fn test_pass_through_forecast_checks_string_cod() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("q", "London,GB"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cod": "200",
            "message": 0,
            "cnt": 1,
            "list": [{
                "dt": 1700000000,
                "main": {"temp": 288.5, "feels_like": 287.9, "temp_min": 287.0,
                         "temp_max": 289.0, "pressure": 1013, "humidity": 80},
                "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
                "clouds": {"all": 75},
                "wind": {"speed": 4.1, "deg": 200},
                "pop": 0.32,
                "dt_txt": "2023-11-14 22:00:00"
            }],
            "city": {"id": 2643743, "name": "London", "country": "GB"}
        })))
        .mount(&server)
        .await;

    let body = client_for(&server).forecast_by_query("London,GB").await.unwrap();
    assert_eq!(body.cod, "200");
    assert_eq!(body.cnt, 1);
    assert_eq!(body.list[0].pop, Some(0.32));
}

#[tokio::test]
async fn test_locate_queries_specific_ip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "country": "United States",
            "countryCode": "US",
            "city": "Mountain View",
            "lat": 37.386,
            "lon": -122.0838,
            "query": "8.8.8.8"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let locator = IpApiClient::new(Client::new(), format!("{}/json", server.uri()));
    let info = locator.locate(Some("8.8.8.8")).await.unwrap();
    assert_eq!(info.status, "success");
    assert_eq!(info.lat, Some(37.386));
}

#[tokio::test]
async fn test_locate_loopback_uses_empty_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "query": "203.0.113.7"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let locator = IpApiClient::new(Client::new(), format!("{}/json", server.uri()));
    let info = locator.locate(None).await.unwrap();
    assert_eq!(info.query.as_deref(), Some("203.0.113.7"));
}

#[tokio::test]
async fn test_locate_passes_failure_status_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/256.1.1.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "fail",
            "message": "invalid query",
            "query": "256.1.1.1"
        })))
        .mount(&server)
        .await;

    let locator = IpApiClient::new(Client::new(), format!("{}/json", server.uri()));
    let info = locator.locate(Some("256.1.1.1")).await.unwrap();
    assert_eq!(info.status, "fail");
    assert_eq!(info.message.as_deref(), Some("invalid query"));
}
