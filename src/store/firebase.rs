use anyhow::Context;
use serde::Deserialize;
use url::Url;

use crate::assets::locator::AssetRef;
use crate::foundation::error::{PfpError, PfpResult};
use crate::store::http::build_client;
use crate::store::object::ObjectStore;

/// Public Firebase Storage REST endpoint.
pub const DEFAULT_STORAGE_ENDPOINT: &str = "https://firebasestorage.googleapis.com";

#[derive(Deserialize)]
struct ListPage {
    #[serde(default)]
    items: Vec<ListItem>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct ListItem {
    name: String,
}

#[derive(Deserialize)]
struct ObjectMeta {
    #[serde(rename = "downloadTokens")]
    download_tokens: Option<String>,
}

/// Firebase Storage bucket accessed through its REST API.
pub struct FirebaseStorage {
    client: reqwest::blocking::Client,
    endpoint: Url,
    bucket: String,
}

impl FirebaseStorage {
    /// Connect to `bucket` on the public endpoint.
    pub fn new(bucket: impl Into<String>, timeout_ms: u64) -> PfpResult<Self> {
        Self::with_endpoint(DEFAULT_STORAGE_ENDPOINT, bucket, timeout_ms)
    }

    /// Connect to `bucket` on a custom endpoint (for example the storage emulator).
    pub fn with_endpoint(
        endpoint: &str,
        bucket: impl Into<String>,
        timeout_ms: u64,
    ) -> PfpResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| PfpError::validation(format!("invalid storage endpoint: {e}")))?;
        let bucket = bucket.into();
        if bucket.is_empty() {
            return Err(PfpError::validation("storage bucket must be non-empty"));
        }
        Ok(Self {
            client: build_client(timeout_ms)?,
            endpoint,
            bucket,
        })
    }

    /// `{endpoint}/v0/b/{bucket}/o[/{object}]`, with the object name encoded as one segment.
    fn objects_url(&self, object: Option<&str>) -> PfpResult<Url> {
        let mut url = self.endpoint.clone();
        {
            let mut segs = url
                .path_segments_mut()
                .map_err(|()| PfpError::validation("storage endpoint cannot be a base url"))?;
            segs.pop_if_empty()
                .extend(["v0", "b", self.bucket.as_str(), "o"]);
            if let Some(object) = object {
                segs.push(object);
            }
        }
        Ok(url)
    }

    fn list_page(&self, prefix: &str, page_token: Option<&str>) -> anyhow::Result<ListPage> {
        let mut url = self.objects_url(None)?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("prefix", prefix).append_pair("delimiter", "/");
            if let Some(token) = page_token {
                q.append_pair("pageToken", token);
            }
        }

        let resp = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("list '{prefix}'"))?
            .error_for_status()
            .with_context(|| format!("list '{prefix}'"))?;
        resp.json::<ListPage>()
            .with_context(|| format!("parse listing of '{prefix}'"))
    }
}

impl ObjectStore for FirebaseStorage {
    #[tracing::instrument(skip(self))]
    fn list(&self, folder: &str) -> PfpResult<Vec<AssetRef>> {
        let prefix = format!("{}/", folder.trim_end_matches('/'));
        let mut out = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let page = self
                .list_page(&prefix, token.as_deref())
                .map_err(|e| PfpError::asset_listing(format!("{e:#}")))?;
            for item in page.items {
                out.push(AssetRef::parse_path(&item.name)?);
            }
            match page.next_page_token {
                Some(next) if !next.is_empty() => token = Some(next),
                _ => break,
            }
        }
        tracing::debug!(folder, count = out.len(), "listed storage folder");
        Ok(out)
    }

    fn resolve(&self, asset: &AssetRef) -> PfpResult<String> {
        let path = asset.path();
        let meta_url = self.objects_url(Some(&path))?;
        let meta: ObjectMeta = self
            .client
            .get(meta_url)
            .send()
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("fetch metadata for '{path}'"))?
            .json()
            .with_context(|| format!("parse metadata for '{path}'"))?;

        let mut url = self.objects_url(Some(&path))?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("alt", "media");
            if let Some(token) = meta
                .download_tokens
                .as_deref()
                .and_then(|t| t.split(',').next())
                .filter(|t| !t.is_empty())
            {
                q.append_pair("token", token);
            }
        }
        Ok(url.into())
    }

    fn fetch(&self, asset: &AssetRef) -> PfpResult<Vec<u8>> {
        let url = self.resolve(asset)?;
        let bytes = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())
            .with_context(|| format!("download '{asset}'"))?;
        Ok(bytes.to_vec())
    }
}
