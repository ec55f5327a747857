use std::time::Duration;

use docqa_logging::docqa_debug;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{BackendError, FailureKind, UploadedFile};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/";
pub const UPLOAD_ENDPOINT: &str = "upload";
pub const ASK_ENDPOINT: &str = "ask";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// `None` waits for the backend indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadReply {
    context: String,
}

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    context: &'a str,
    question: &'a str,
}

#[derive(Debug, Deserialize)]
struct AskReply {
    answer: String,
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    error: String,
}

/// The document Q&A service: extracts text from files and answers questions.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Uploads a file and returns the extracted context text.
    async fn upload(&self, file: UploadedFile) -> Result<String, BackendError>;

    /// Asks `question` about `context` and returns the answer text.
    async fn ask(&self, context: &str, question: &str) -> Result<String, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: BackendSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &BackendSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn upload(&self, file: UploadedFile) -> Result<String, BackendError> {
        let url = endpoint_url(&self.settings.base_url, UPLOAD_ENDPOINT)?;
        docqa_debug!(
            "POST {} file={} bytes={}",
            url,
            file.file_name,
            file.bytes.len()
        );

        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime_type)
            .map_err(map_reqwest_error)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let reply: UploadReply = read_reply(response).await?;
        Ok(reply.context)
    }

    async fn ask(&self, context: &str, question: &str) -> Result<String, BackendError> {
        let url = endpoint_url(&self.settings.base_url, ASK_ENDPOINT)?;
        docqa_debug!(
            "POST {} context_len={} question_len={}",
            url,
            context.len(),
            question.len()
        );

        let response = self
            .client
            .post(url)
            .json(&AskRequest { context, question })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let reply: AskReply = read_reply(response).await?;
        Ok(reply.answer)
    }
}

/// Resolves `endpoint` against `base`, treating `base` as a directory.
pub(crate) fn endpoint_url(base: &str, endpoint: &str) -> Result<Url, BackendError> {
    let mut base = Url::parse(base)
        .map_err(|err| BackendError::new(FailureKind::InvalidUrl, format!("{base}: {err}")))?;
    if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
        return Err(BackendError::new(
            FailureKind::InvalidUrl,
            format!("{base} is not an http(s) base address"),
        ));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(endpoint)
        .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))
}

async fn read_reply<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;

    if !status.is_success() {
        // Backends report `{ "error": ... }`; keep it for the log.
        let detail = serde_json::from_slice::<ErrorReply>(&body)
            .map(|reply| reply.error)
            .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
        return Err(BackendError::new(
            FailureKind::HttpStatus(status.as_u16()),
            format!("{status}: {detail}"),
        ));
    }

    serde_json::from_slice(&body)
        .map_err(|err| BackendError::new(FailureKind::InvalidResponse, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    BackendError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_onto_root() {
        let url = endpoint_url("http://localhost:5000", UPLOAD_ENDPOINT).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/upload");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let url = endpoint_url("https://qa.example.com/api/v1", ASK_ENDPOINT).unwrap();
        assert_eq!(url.as_str(), "https://qa.example.com/api/v1/ask");

        let url = endpoint_url("https://qa.example.com/api/v1/", ASK_ENDPOINT).unwrap();
        assert_eq!(url.as_str(), "https://qa.example.com/api/v1/ask");
    }

    #[test]
    fn endpoint_rejects_non_http_base() {
        let err = endpoint_url("mailto:someone@example.com", ASK_ENDPOINT).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);

        let err = endpoint_url("not a url", ASK_ENDPOINT).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
