use crate::{
    error::{Result, StickerError},
    models::{Prediction, PredictionRequest},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

const USER_AGENT: &str = "chibigen/0.1";

/// Leaf dependency of the polling client: create a prediction job, fetch its
/// current state. Everything above this seam is network-free and testable.
#[async_trait]
pub trait PredictionTransport: Send + Sync {
    async fn create_prediction(
        &self,
        api_key: &str,
        request: &PredictionRequest,
    ) -> Result<Prediction>;

    async fn get_prediction(&self, api_key: &str, id: &str) -> Result<Prediction>;
}

pub struct HttpTransport {
    client: Client,
    api_base: String,
}

impl HttpTransport {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
        }
    }

    fn build_headers(&self, api_key: &str) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Token {}", api_key).parse().unwrap(),
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json".parse().unwrap(),
        );
        headers.insert(reqwest::header::USER_AGENT, USER_AGENT.parse().unwrap());
        headers
    }

    async fn read_prediction(response: reqwest::Response) -> Result<Prediction> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_http_error(status, &body));
        }
        response.json::<Prediction>().await.map_err(|e| {
            StickerError::Unknown(format!("failed to parse prediction response: {}", e))
        })
    }
}

#[async_trait]
impl PredictionTransport for HttpTransport {
    async fn create_prediction(
        &self,
        api_key: &str,
        request: &PredictionRequest,
    ) -> Result<Prediction> {
        let response = self
            .client
            .post(&format!("{}/predictions", self.api_base))
            .headers(self.build_headers(api_key))
            .json(request)
            .send()
            .await
            .map_err(map_send_error)?;

        Self::read_prediction(response).await
    }

    async fn get_prediction(&self, api_key: &str, id: &str) -> Result<Prediction> {
        let response = self
            .client
            .get(&format!("{}/predictions/{}", self.api_base, id))
            .headers(self.build_headers(api_key))
            .send()
            .await
            .map_err(map_send_error)?;

        Self::read_prediction(response).await
    }
}

/// Maps a non-success HTTP response to the matching error kind. 401/402/429
/// each get their own kind; anything else surfaces the service's `detail`
/// message when the body carries one.
pub(crate) fn classify_http_error(status: StatusCode, body: &str) -> StickerError {
    match status.as_u16() {
        401 => StickerError::Auth(
            "Invalid API key. Check your Replicate API key in the settings".into(),
        ),
        402 => StickerError::Billing(
            "Insufficient credits. Add credits to your Replicate account".into(),
        ),
        429 => StickerError::RateLimit(
            "Rate limit exceeded. Wait a moment and try again".into(),
        ),
        _ => {
            let detail = serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|value| {
                    value
                        .get("detail")
                        .and_then(|detail| detail.as_str())
                        .map(String::from)
                });
            StickerError::Unknown(
                detail.unwrap_or_else(|| format!("API request failed ({})", status)),
            )
        }
    }
}

/// Transport-level failures (DNS, refused connections, timeouts) are a
/// different kind than HTTP error responses.
pub(crate) fn map_send_error(err: reqwest::Error) -> StickerError {
    StickerError::Network(format!(
        "Unable to reach the prediction API: {}. Check your internet connection; client-side network restrictions can also block the request",
        err
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_an_auth_error() {
        let err = classify_http_error(StatusCode::UNAUTHORIZED, "");
        assert!(matches!(err, StickerError::Auth(_)));
    }

    #[test]
    fn payment_required_is_a_billing_error() {
        let err = classify_http_error(StatusCode::PAYMENT_REQUIRED, "");
        assert!(matches!(err, StickerError::Billing(_)));
    }

    #[test]
    fn too_many_requests_is_a_rate_limit_error() {
        let err = classify_http_error(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(matches!(err, StickerError::RateLimit(_)));
    }

    #[test]
    fn other_statuses_surface_the_detail_field() {
        let err = classify_http_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail":"version does not exist"}"#,
        );
        assert!(matches!(err, StickerError::Unknown(msg) if msg == "version does not exist"));
    }

    #[test]
    fn other_statuses_without_detail_keep_the_status_code() {
        let err = classify_http_error(StatusCode::INTERNAL_SERVER_ERROR, "not json");
        assert!(matches!(err, StickerError::Unknown(msg) if msg.contains("500")));
    }

    #[test]
    fn status_codes_map_to_three_distinct_kinds() {
        let kinds = [
            classify_http_error(StatusCode::UNAUTHORIZED, ""),
            classify_http_error(StatusCode::PAYMENT_REQUIRED, ""),
            classify_http_error(StatusCode::TOO_MANY_REQUESTS, ""),
        ];
        assert!(matches!(kinds[0], StickerError::Auth(_)));
        assert!(matches!(kinds[1], StickerError::Billing(_)));
        assert!(matches!(kinds[2], StickerError::RateLimit(_)));
    }
}
