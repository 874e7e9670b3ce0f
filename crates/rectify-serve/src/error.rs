use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use rectify::{io::IoError, RectifyError};

/// An error type for the HTTP service.
#[derive(thiserror::Error, Debug)]
pub enum ServeError {
    /// A required multipart field was not sent.
    #[error("Missing form field: {0}")]
    MissingField(&'static str),

    /// The multipart body could not be read.
    #[error("Invalid multipart body. {0}")]
    Multipart(#[from] MultipartError),

    /// The points field is not a JSON list of points.
    #[error("Invalid points. {0}")]
    InvalidPoints(#[from] serde_json::Error),

    /// The uploaded file is not a decodable image.
    #[error("Invalid image. {0}")]
    Decode(IoError),

    /// The rectified image could not be encoded.
    #[error("Failed to encode the image. {0}")]
    Encode(IoError),

    /// The rectification failed.
    #[error(transparent)]
    Rectify(#[from] RectifyError),

    /// The blocking worker panicked or was cancelled.
    #[error("Worker task failed. {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ServeError {
    fn status(&self) -> StatusCode {
        match self {
            ServeError::MissingField(_)
            | ServeError::Multipart(_)
            | ServeError::InvalidPoints(_)
            | ServeError::Decode(_) => StatusCode::BAD_REQUEST,
            ServeError::Rectify(RectifyError::InvalidPointCount(_))
            | ServeError::Rectify(RectifyError::UnsupportedImageFormat { .. }) => {
                StatusCode::BAD_REQUEST
            }
            ServeError::Rectify(RectifyError::DegenerateGeometry(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ServeError::Rectify(RectifyError::Image(_))
            | ServeError::Encode(_)
            | ServeError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ServeError::Rectify(RectifyError::InvalidPointCount(_)) => {
                "Exactly 4 points are required.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("request failed: {}", self);
        } else {
            log::warn!("request rejected: {}", self);
        }

        (status, Json(serde_json::json!({ "error": self.message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rectify::geometry::GeometryError;

    #[test]
    fn status_codes() {
        assert_eq!(
            ServeError::MissingField("file").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServeError::Rectify(RectifyError::InvalidPointCount(3)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServeError::Rectify(RectifyError::DegenerateGeometry(
                GeometryError::RankDeficient(0.0)
            ))
            .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ServeError::Encode(IoError::InvalidJpegQuality(0)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn point_count_message() {
        assert_eq!(
            ServeError::Rectify(RectifyError::InvalidPointCount(5)).message(),
            "Exactly 4 points are required."
        );
    }
}
