//! Counter Routes
//!
//! Fixed-contract counter resource.
//!
//! - GET /api/counter - Always `{"count": 100}`
//! - POST /api/counter - Echoes the posted JSON with a confirmation message

use axum::{body::Bytes, http::Method, Json};
use serde_json::Value;

use crate::api::dto::{
    CounterEchoResponse, CounterResponse, COUNTER_FIXED_COUNT, COUNTER_POST_MESSAGE,
};
use crate::api::error::{ApiError, ApiResult};

/// GET /api/counter
pub async fn get_counter(method: Method) -> Json<CounterResponse> {
    tracing::info!(method = %method, "Counter requested");

    Json(CounterResponse {
        count: COUNTER_FIXED_COUNT,
    })
}

/// POST /api/counter
///
/// Any JSON document is accepted whatever the `Content-Type` header says;
/// a body that is not JSON is a 400.
pub async fn post_counter(body: Bytes) -> ApiResult<Json<CounterEchoResponse>> {
    let data: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::MalformedBody(format!("Invalid JSON: {}", e)))?;

    Ok(Json(CounterEchoResponse {
        message: COUNTER_POST_MESSAGE,
        data,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_counter_is_fixed() {
        for method in [Method::GET, Method::HEAD] {
            let Json(body) = get_counter(method).await;
            assert_eq!(body.count, 100);
        }
    }

    #[tokio::test]
    async fn test_post_counter_echoes() {
        let Json(body) = post_counter(Bytes::from_static(br#"{"x": 1}"#))
            .await
            .unwrap();

        assert_eq!(body.message, COUNTER_POST_MESSAGE);
        assert_eq!(body.data, serde_json::json!({"x": 1}));
    }

    #[tokio::test]
    async fn test_post_counter_rejects_non_json() {
        for body in ["not json", "", r#"{"x":"#] {
            let err = post_counter(Bytes::from(body)).await.unwrap_err();
            assert!(matches!(err, ApiError::MalformedBody(_)));
        }
    }
}
