use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use slidegenius_common::{FormPayload, FormValue};

use crate::error::RequestFailure;

/// Service endpoints the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Outline,
    Generate,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Outline => "/api/outline",
            Endpoint::Generate => "/api/generate",
        }
    }
}

/// Submits a multipart payload and yields the raw success body.
///
/// Non-success statuses surface as [`RequestFailure::Status`] carrying the
/// response body as detail.
#[async_trait]
pub trait SlideService: Send + Sync {
    async fn submit(
        &self,
        endpoint: Endpoint,
        payload: FormPayload,
    ) -> Result<Vec<u8>, RequestFailure>;
}

/// `reqwest`-backed service client.
#[derive(Debug, Clone)]
pub struct HttpSlideService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSlideService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

fn to_multipart(payload: FormPayload) -> Form {
    payload
        .into_fields()
        .into_iter()
        .fold(Form::new(), |form, field| match field.value {
            FormValue::Text(text) => form.text(field.name, text),
            FormValue::File { file_name, bytes } => {
                form.part(field.name, Part::bytes(bytes).file_name(file_name))
            }
        })
}

#[async_trait]
impl SlideService for HttpSlideService {
    async fn submit(
        &self,
        endpoint: Endpoint,
        payload: FormPayload,
    ) -> Result<Vec<u8>, RequestFailure> {
        let url = self.url(endpoint);
        tracing::debug!(url = %url, fields = ?payload.names(), "submitting form");

        let response = self
            .client
            .post(&url)
            .multipart(to_multipart(payload))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.map_err(|err| {
                tracing::warn!(%status, "failed to read error body: {err}");
                RequestFailure::from(err)
            })?;
            tracing::debug!(%status, "service returned failure");
            return Err(RequestFailure::from_status(status.as_u16(), &text));
        }

        let body = response.bytes().await?;
        tracing::debug!(%status, len = body.len(), "service returned body");
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GENERIC_FAILURE;
    use mockito::Matcher;

    fn payload() -> FormPayload {
        FormPayload::new()
            .text("text", "Hello")
            .text("guidance", "")
            .text("provider", "openai")
            .text("api_key", "sk-test")
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let service = HttpSlideService::new("http://localhost:8000/");
        assert_eq!(
            service.url(Endpoint::Outline),
            "http://localhost:8000/api/outline"
        );
        assert_eq!(
            service.url(Endpoint::Generate),
            "http://localhost:8000/api/generate"
        );
    }

    #[tokio::test]
    async fn test_submit_returns_success_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/outline")
            .match_header(
                "content-type",
                Matcher::Regex("multipart/form-data".to_string()),
            )
            .match_body(Matcher::Regex(r#"name="api_key""#.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"slides":[]}"#)
            .create_async()
            .await;

        let service = HttpSlideService::new(server.url());
        let body = service.submit(Endpoint::Outline, payload()).await.unwrap();

        assert_eq!(body, br#"{"slides":[]}"#.to_vec());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_sends_template_part() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::Regex(
                r#"name="template"; filename="brand.pptx""#.to_string(),
            ))
            .with_status(200)
            .with_body([0x50u8, 0x4b, 0x03, 0x04])
            .create_async()
            .await;

        let service = HttpSlideService::new(server.url());
        let body = service
            .submit(
                Endpoint::Generate,
                payload().file("template", "brand.pptx", vec![9, 9]),
            )
            .await
            .unwrap();

        assert_eq!(body, vec![0x50, 0x4b, 0x03, 0x04]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_uses_body_as_detail() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/generate")
            .with_status(400)
            .with_body("Upload a .pptx or .potx file")
            .create_async()
            .await;

        let service = HttpSlideService::new(server.url());
        let err = service
            .submit(Endpoint::Generate, payload())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RequestFailure::Status {
                status: 400,
                detail: "Upload a .pptx or .potx file".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_empty_failure_body_falls_back() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/outline")
            .with_status(502)
            .create_async()
            .await;

        let service = HttpSlideService::new(server.url());
        let err = service
            .submit(Endpoint::Outline, payload())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), GENERIC_FAILURE);
        assert_eq!(err.status(), Some(502));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_failure() {
        let service = HttpSlideService::new("http://127.0.0.1:1");
        let err = service
            .submit(Endpoint::Outline, payload())
            .await
            .unwrap_err();
        assert!(matches!(err, RequestFailure::Transport(_)));
    }

    #[tokio::test]
    async fn test_truncated_failure_body_is_transport_failure() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.ends_with(b"--\r\n") || request.ends_with(b"0\r\n\r\n") {
                    break;
                }
            }
            socket
                .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 64\r\n\r\npartial")
                .await
                .unwrap();
        });

        let service = HttpSlideService::new(format!("http://{addr}"));
        let err = service
            .submit(Endpoint::Outline, payload())
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, RequestFailure::Transport(_)));
        assert_ne!(err.to_string(), GENERIC_FAILURE);
    }
}
