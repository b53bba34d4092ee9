//! HTTP request handlers.
//!
//! Handlers are thin: they translate query/path parameters into calls on the
//! lookup services and shape the JSON response. Typed errors become HTTP
//! status + `{"detail": …}` bodies here and nowhere else.

mod alerts;
mod location;
mod passthrough;
mod system;
mod weather;

pub use alerts::{alerts_handler, city_alerts_handler};
pub use location::location_handler;
pub use passthrough::{
    forecast_by_city_handler, forecast_by_coord_handler, weather_by_city_handler,
    weather_by_coord_handler,
};
pub use system::{health_handler, metrics_handler, root_handler};
pub use weather::weather_handler;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Error response carrying an HTTP status and a `detail` message, matching
/// the wire shape of the original service.
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}
