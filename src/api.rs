// API client module: a small blocking HTTP client for the SM.MS image
// host. One request per call, no retries; every failure comes back as an
// `ApiError` for the handlers to turn into something the user can read.

use crate::config::{Config, ConfigError};
use reqwest::blocking::{multipart, Client};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Content type used for every uploaded file, whatever its extension.
pub const UPLOAD_MIME: &str = "image/png";

/// Multipart field name the upload endpoint expects.
pub const UPLOAD_FIELD: &str = "smfile";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{}", .message.as_deref().unwrap_or("request rejected"))]
    Rejected { message: Option<String> },

    #[error("response carried no data")]
    MissingData,
}

impl ApiError {
    /// Message supplied by the API itself, if it sent one.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message } => message.as_deref(),
            _ => None,
        }
    }
}

/// One entry of the upload history.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RemoteImage {
    pub filename: String,
    pub url: String,
    /// Identifier the delete endpoint takes.
    pub hash: String,
}

/// The part of an upload response the bridge uses.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub url: String,
    #[serde(default)]
    pub hash: String,
}

/// Common shape of every SM.MS response.
#[derive(Deserialize, Debug)]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

/// The remote operations the command handlers depend on. `ApiClient` is
/// the real implementation; tests script their own.
pub trait ImageHost {
    fn list_uploads(&self) -> Result<Vec<RemoteImage>, ApiError>;

    fn delete_by_hash(&self, hash: &str) -> Result<(), ApiError>;

    fn upload_bytes(&self, bytes: Vec<u8>, filename: &str) -> Result<UploadedImage, ApiError>;

    /// Plain GET of an arbitrary URL, used for thumbnails.
    fn download(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

/// Blocking reqwest client bound to one API base and token.
///
/// The token only goes to API endpoints; thumbnail downloads hit whatever
/// host the image lives on and are sent without it.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: HeaderMap,
}

impl ApiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder().build()?;
        Ok(ApiClient {
            client,
            base_url: config.api_base.clone(),
            auth: auth_headers(&config.token)?,
        })
    }
}

fn auth_headers(token: &str) -> Result<HeaderMap, ConfigError> {
    let mut value = HeaderValue::from_str(token).map_err(|_| ConfigError::InvalidToken)?;
    value.set_sensitive(true);
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

impl ImageHost for ApiClient {
    fn list_uploads(&self) -> Result<Vec<RemoteImage>, ApiError> {
        let url = format!("{}/upload_history", &self.base_url);
        debug!(%url, "fetching upload history");
        let res = self.client.get(&url).headers(self.auth.clone()).send()?;
        let status = res.status();
        let body = res.text()?;
        parse_data(status, &body)
    }

    fn delete_by_hash(&self, hash: &str) -> Result<(), ApiError> {
        let url = format!("{}/delete/{}", &self.base_url, hash);
        debug!(%url, "deleting image");
        let res = self.client.get(&url).headers(self.auth.clone()).send()?;
        let status = res.status();
        let body = res.text()?;
        parse_ack(status, &body)
    }

    fn upload_bytes(&self, bytes: Vec<u8>, filename: &str) -> Result<UploadedImage, ApiError> {
        let url = format!("{}/upload", &self.base_url);
        debug!(%url, filename, size = bytes.len(), "uploading image");

        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(UPLOAD_MIME)?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        let res = self
            .client
            .post(&url)
            .headers(self.auth.clone())
            .multipart(form)
            .send()?;
        let status = res.status();
        let body = res.text()?;
        parse_data(status, &body)
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        debug!(%url, "downloading thumbnail");
        let res = self.client.get(url).send()?;
        if res.status() != StatusCode::OK {
            return Err(ApiError::Status(res.status()));
        }
        Ok(res.bytes()?.to_vec())
    }
}

/// Interpret a response whose `data` payload the caller needs.
pub fn parse_data<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
    let envelope: Envelope<T> = parse_envelope(status, body)?;
    envelope.data.ok_or(ApiError::MissingData)
}

/// Interpret a response where only `success` matters.
pub fn parse_ack(status: StatusCode, body: &str) -> Result<(), ApiError> {
    parse_envelope::<IgnoredAny>(status, body).map(|_| ())
}

fn parse_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<Envelope<T>, ApiError> {
    if status != StatusCode::OK {
        return Err(ApiError::Status(status));
    }
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    if !envelope.success {
        return Err(ApiError::Rejected {
            message: envelope.message,
        });
    }
    Ok(envelope)
}
