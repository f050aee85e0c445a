//! Path parameter extractor that reports bad segments in the error envelope.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use common::AppError;

/// Like [`Path`], but a segment that fails to deserialize (for example a
/// non-numeric id) is a `VALIDATION_ERROR` instead of a plain-text 400.
pub struct PathParam<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParam<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        Ok(PathParam(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    async fn echo(PathParam(id): PathParam<i32>) -> String {
        id.to_string()
    }

    async fn get_item(uri: &str) -> (StatusCode, Vec<u8>) {
        let app = Router::new().route("/items/:id", get(echo));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_numeric_id() {
        let (status, body) = get_item("/items/42").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"42");
    }

    #[tokio::test]
    async fn test_non_numeric_id_uses_error_envelope() {
        let (status, body) = get_item("/items/abc").await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "VALIDATION_ERROR");
    }
}
