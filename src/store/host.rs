use base64::Engine as _;
use serde::Deserialize;
use url::Url;

use crate::foundation::error::{PfpError, PfpResult};
use crate::render::compose::EncodedImage;
use crate::store::http::build_client;

/// ImgBB upload endpoint.
pub const DEFAULT_IMGBB_ENDPOINT: &str = "https://api.imgbb.com/1/upload";

/// Third-party image hosting used to obtain a shareable URL.
pub trait ImageHost: Send + Sync {
    /// Upload an encoded image and return its public URL.
    ///
    /// Every failure is reported as [`PfpError::Upload`].
    fn upload(&self, image: &EncodedImage) -> PfpResult<String>;
}

#[derive(Deserialize)]
struct ImgbbResponse {
    #[serde(default)]
    success: bool,
    data: Option<ImgbbData>,
}

#[derive(Deserialize)]
struct ImgbbData {
    url: String,
}

/// ImgBB upload API client.
pub struct ImgbbHost {
    client: reqwest::blocking::Client,
    endpoint: Url,
}

impl ImgbbHost {
    /// Client for the public endpoint authenticated with `api_key`.
    pub fn new(api_key: &str, timeout_ms: u64) -> PfpResult<Self> {
        Self::with_endpoint(DEFAULT_IMGBB_ENDPOINT, api_key, timeout_ms)
    }

    /// Client for a custom endpoint.
    pub fn with_endpoint(endpoint: &str, api_key: &str, timeout_ms: u64) -> PfpResult<Self> {
        if api_key.is_empty() {
            return Err(PfpError::validation("imgbb api key must be non-empty"));
        }
        let mut endpoint = Url::parse(endpoint)
            .map_err(|e| PfpError::validation(format!("invalid imgbb endpoint: {e}")))?;
        endpoint.query_pairs_mut().append_pair("key", api_key);
        Ok(Self {
            client: build_client(timeout_ms)?,
            endpoint,
        })
    }
}

fn parse_upload_response(body: &[u8]) -> PfpResult<String> {
    let resp: ImgbbResponse = serde_json::from_slice(body)
        .map_err(|e| PfpError::upload(format!("invalid upload response: {e}")))?;
    match resp.data {
        Some(data) if resp.success && !data.url.is_empty() => Ok(data.url),
        _ => Err(PfpError::upload("image host reported failure")),
    }
}

impl ImageHost for ImgbbHost {
    #[tracing::instrument(skip_all, fields(bytes = image.png.len()))]
    fn upload(&self, image: &EncodedImage) -> PfpResult<String> {
        let payload = base64::engine::general_purpose::STANDARD.encode(&image.png);
        let resp = self
            .client
            .post(self.endpoint.clone())
            .form(&[("image", payload)])
            .send()
            .map_err(|e| PfpError::upload(format!("upload request failed: {e}")))?;
        // The API returns a JSON body with `success: false` on rejected uploads.
        let body = resp
            .bytes()
            .map_err(|e| PfpError::upload(format!("read upload response: {e}")))?;
        parse_upload_response(&body)
    }
}
