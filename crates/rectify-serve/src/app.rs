use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::Response,
    routing::{get, post},
    Router,
};

use rectify::io::DEFAULT_JPEG_QUALITY;

use crate::transform;

// uploads are full resolution photos
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Settings shared by all handlers.
#[derive(Debug, Clone, Copy)]
pub struct AppState {
    /// JPEG quality of the returned image.
    pub quality: u8,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Build the service with its routes and the permissive CORS policy.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Welcome to rectify!" }))
        .route(
            "/transform",
            post(transform::transform).options(preflight),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::map_response(allow_any_origin))
        .with_state(state)
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn allow_any_origin(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("*"),
    );
    response
}
