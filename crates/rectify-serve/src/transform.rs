use axum::{
    extract::{Multipart, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use rectify::{
    geometry::Point2d,
    io::{decode_image_rgb8, encode_image_jpeg},
    rectify, RectifyError,
};

use crate::{app::AppState, error::ServeError};

/// A corner as sent by clients, either `[x, y]` or `{"x": .., "y": ..}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PointRepr {
    Pair([f64; 2]),
    Object { x: f64, y: f64 },
}

impl From<PointRepr> for Point2d {
    fn from(p: PointRepr) -> Self {
        match p {
            PointRepr::Pair([x, y]) => Point2d::new(x, y),
            PointRepr::Object { x, y } => Point2d::new(x, y),
        }
    }
}

/// Body of a successful `POST /transform`.
#[derive(Debug, Serialize)]
pub struct TransformResponse {
    /// The rectified image as hex encoded JPEG bytes.
    pub image: String,
}

fn parse_points(text: &str) -> Result<Vec<Point2d>, serde_json::Error> {
    let points: Vec<PointRepr> = serde_json::from_str(text)?;
    Ok(points.into_iter().map(Point2d::from).collect())
}

fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Rectify an uploaded image.
///
/// Expects a multipart form with the encoded image in `file` and the four corners as JSON
/// in `points`. Responds with the rectified image as hex encoded JPEG.
pub async fn transform(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TransformResponse>, ServeError> {
    let mut file = None;
    let mut points = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => file = Some(field.bytes().await?),
            Some("points") => points = Some(field.text().await?),
            _ => {}
        }
    }

    let file = file.ok_or(ServeError::MissingField("file"))?;
    let points = parse_points(&points.ok_or(ServeError::MissingField("points"))?)?;

    if points.len() != 4 {
        return Err(RectifyError::InvalidPointCount(points.len()).into());
    }

    log::info!("transform: {} bytes, points {:?}", file.len(), points);

    let quality = state.quality;
    let image = tokio::task::spawn_blocking(move || -> Result<String, ServeError> {
        let image = decode_image_rgb8(&file).map_err(ServeError::Decode)?;
        let rectified = rectify(&image, &points)?;
        let jpeg = encode_image_jpeg(&rectified, quality).map_err(ServeError::Encode)?;
        Ok(encode_hex(&jpeg))
    })
    .await??;

    Ok(Json(TransformResponse { image }))
}
