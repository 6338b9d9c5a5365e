use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// 요청 단위 식별자 (x-request-id)
#[derive(Clone)]
pub struct RequestId(pub String);

const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %path,
    );

    let start = std::time::Instant::now();

    async move {
        let mut response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;
        let status = response.status().as_u16();

        if status >= 500 {
            warn!(duration_ms, status, "request failed");
        } else {
            info!(duration_ms, status, "request completed");
        }

        response.headers_mut().insert(
            REQUEST_ID_HEADER,
            request_id
                .parse()
                .unwrap_or_else(|_| axum::http::HeaderValue::from_static("unknown")),
        );
        response
    }
    .instrument(span)
    .await
}
