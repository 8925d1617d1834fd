use crate::config::TinifyConfig;
use crate::constants::{COMPRESSION_COUNT_HEADER, HTTP_CONNECT_TIMEOUT, TINIFY_AUTH_USER};
use crate::error::{CompressionError, Result};
use reqwest::header::LOCATION;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tokio::runtime::Runtime;

/// Something that turns image bytes into smaller image bytes.
pub trait CompressionService {
    fn shrink(&self, data: &[u8]) -> Result<Vec<u8>>;
}

impl<T: CompressionService + ?Sized> CompressionService for &T {
    fn shrink(&self, data: &[u8]) -> Result<Vec<u8>> {
        (**self).shrink(data)
    }
}

#[derive(Debug, Deserialize)]
struct ShrinkResponse {
    output: ShrinkOutput,
}

#[derive(Debug, Deserialize)]
struct ShrinkOutput {
    size: u64,
    #[serde(rename = "type")]
    mime_type: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: String,
    message: String,
}

/// Blocking client for the TinyPNG `/shrink` API.
pub struct TinifyClient {
    client: Client,
    runtime: Runtime,
    config: TinifyConfig,
}

impl TinifyClient {
    pub fn new(config: TinifyConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(config.timeout);
        if config.is_loopback() {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CompressionError::Runtime(e.to_string()))?;

        Ok(Self {
            client,
            runtime,
            config,
        })
    }

    /// Uploads `data` for compression and downloads the result.
    ///
    /// # Returns
    /// * `Ok(bytes)` - The compressed image
    /// * `Err(CompressionError)` - Transport failure or a non-success service response
    pub async fn shrink_async(&self, data: Vec<u8>) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(self.config.shrink_url())
            .basic_auth(TINIFY_AUTH_USER, Some(&self.config.api_key))
            .body(data)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        if let Some(count) = response
            .headers()
            .get(COMPRESSION_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            crate::verbose!("Compressions used this month: {}", count);
        }

        let header_location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().await?;
        let shrink: Option<ShrinkResponse> = serde_json::from_str(&body).ok();
        if let Some(shrink) = &shrink {
            crate::verbose!(
                "Service reports output: {} bytes ({})",
                shrink.output.size,
                shrink.output.mime_type
            );
        }

        let location = header_location
            .or_else(|| shrink.and_then(|s| s.output.url))
            .ok_or(CompressionError::MissingOutputLocation)?;
        let location = self.config.resolve_location(&location);
        crate::verbose!("Downloading result from {}", location);

        let download = self
            .client
            .get(&location)
            .basic_auth(TINIFY_AUTH_USER, Some(&self.config.api_key))
            .send()
            .await?;
        let download = ensure_success(download).await?;

        Ok(download.bytes().await?.to_vec())
    }
}

impl CompressionService for TinifyClient {
    fn shrink(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.runtime.block_on(self.shrink_async(data.to_vec()))
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(service_error(status, &body))
}

fn service_error(status: StatusCode, body: &str) -> CompressionError {
    match serde_json::from_str::<ServiceErrorBody>(body) {
        Ok(parsed) => CompressionError::Service {
            status: status.as_u16(),
            error: parsed.error,
            message: parsed.message,
        },
        Err(_) => CompressionError::Service {
            status: status.as_u16(),
            error: status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string(),
            message: body.trim().to_string(),
        },
    }
}

/// In-memory service used by unit tests: records every payload it receives.
#[cfg(test)]
pub(crate) struct RecordingService {
    pub calls: std::cell::RefCell<Vec<Vec<u8>>>,
    pub response: Vec<u8>,
}

#[cfg(test)]
impl RecordingService {
    pub fn new(response: &[u8]) -> Self {
        Self {
            calls: std::cell::RefCell::new(Vec::new()),
            response: response.to_vec(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

#[cfg(test)]
impl CompressionService for RecordingService {
    fn shrink(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.calls.borrow_mut().push(data.to_vec());
        Ok(self.response.clone())
    }
}
