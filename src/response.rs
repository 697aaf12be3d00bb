use axum::{
    http::{header::CACHE_CONTROL, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

// ════════════════════════════════════════════════════════════
// 1. Shared Modifiers
// ════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct BaseResponse {
    pub status: Option<StatusCode>,
    pub headers: HeaderMap,
}

impl BaseResponse {
    /// Applies the status override and all headers to the Axum response.
    pub fn apply_to_response(&self, response: &mut Response) {
        if let Some(status) = self.status {
            *response.status_mut() = status;
        }

        for (name, value) in &self.headers {
            response.headers_mut().insert(name.clone(), value.clone());
        }
    }
}

// ════════════════════════════════════════════════════════════
// 2. The Modifier Trait
// ════════════════════════════════════════════════════════════

pub trait ResponseExt: Sized {
    fn base_mut(&mut self) -> &mut BaseResponse;

    fn with_header(mut self, key: &'static str, value: impl AsRef<str>) -> Self {
        if let Ok(val) = HeaderValue::from_str(value.as_ref()) {
            self.base_mut()
                .headers
                .insert(HeaderName::from_static(key), val);
        }
        self
    }

    fn with_status(mut self, status: StatusCode) -> Self {
        self.base_mut().status = Some(status);
        self
    }

    /// Every page reload must re-run the pipeline.
    fn no_store(mut self) -> Self {
        self.base_mut()
            .headers
            .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        self
    }
}

// ════════════════════════════════════════════════════════════
// 3. Response Wrappers
// ════════════════════════════════════════════════════════════

// --- HTML ---
pub struct HtmlResponse {
    pub data: String,
    pub base: BaseResponse,
}

impl IntoResponse for HtmlResponse {
    fn into_response(self) -> Response {
        let mut response = axum::response::Html(self.data).into_response();
        self.base.apply_to_response(&mut response);
        response
    }
}

// --- JSON ---
pub struct JsonResponse<T> {
    pub data: T,
    pub base: BaseResponse,
}

impl<T: serde::Serialize> IntoResponse for JsonResponse<T> {
    fn into_response(self) -> Response {
        // Never unwrap serialization. Return 500 if it fails.
        let payload = match serde_json::to_value(&self.data) {
            Ok(val) => val,
            Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        };

        let mut response = Json(payload).into_response();
        self.base.apply_to_response(&mut response);
        response
    }
}

// ════════════════════════════════════════════════════════════
// 4. Constructors & Trait Impls
// ════════════════════════════════════════════════════════════

pub fn html(data: impl Into<String>) -> HtmlResponse {
    HtmlResponse {
        data: data.into(),
        base: BaseResponse::default(),
    }
}

pub fn json<T>(data: T) -> JsonResponse<T> {
    JsonResponse {
        data,
        base: BaseResponse::default(),
    }
}

impl ResponseExt for HtmlResponse {
    fn base_mut(&mut self) -> &mut BaseResponse {
        &mut self.base
    }
}
impl<T> ResponseExt for JsonResponse<T> {
    fn base_mut(&mut self) -> &mut BaseResponse {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::{html, json, ResponseExt};
    use axum::{
        body::to_bytes,
        http::{header::CACHE_CONTROL, StatusCode},
        response::IntoResponse,
    };
    use serde::ser::{Error as _, Serialize, Serializer};

    #[tokio::test]
    async fn html_body_and_content_type() {
        let response = html("<h1>M31</h1>").into_response();
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/html"));

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        assert_eq!(&body[..], b"<h1>M31</h1>");
    }

    #[test]
    fn no_store_and_status_are_applied() {
        let response = html("boom")
            .with_status(StatusCode::BAD_GATEWAY)
            .no_store()
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
    }

    #[test]
    fn with_header_accepts_dynamic_values() {
        let hash = format!("{:08x}", 0xdead_beef_u32);
        let response = json(serde_json::json!({}))
            .with_header("x-client-js", &hash)
            .into_response();
        assert_eq!(response.headers()["x-client-js"], "deadbeef");
    }

    struct BadSerialize;

    impl Serialize for BadSerialize {
        fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            Err(S::Error::custom("serialization failed"))
        }
    }

    #[test]
    fn json_serialization_failure_returns_500() {
        let response = json(BadSerialize).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
