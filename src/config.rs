//! Runtime configuration.
//!
//! Everything has a working default; deployment secrets and endpoints come from the environment.

use serde::{Deserialize, Serialize};

use crate::foundation::color::Rgba8;
use crate::foundation::core::Category;
use crate::foundation::error::{PfpError, PfpResult};
use crate::render::compose::{CompositorOpts, EXPORT_SIZE, PREVIEW_SIZE};

/// Default trait file name per category, applied at startup and on reset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultTraits {
    /// Default background file.
    pub background: String,
    /// Default body file.
    pub body: String,
    /// Default skin file.
    pub skin: String,
    /// Default eyes file.
    pub eyes: String,
    /// Default top file.
    pub top: String,
    /// Default mouth file.
    pub mouth: String,
    /// Default glasses file.
    pub glasses: String,
    /// Default earrings file.
    pub earrings: String,
}

impl DefaultTraits {
    /// Default file name for `category`.
    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::Background => &self.background,
            Category::Body => &self.body,
            Category::Skin => &self.skin,
            Category::Eyes => &self.eyes,
            Category::Top => &self.top,
            Category::Mouth => &self.mouth,
            Category::Glasses => &self.glasses,
            Category::Earrings => &self.earrings,
        }
    }
}

impl Default for DefaultTraits {
    fn default() -> Self {
        Self {
            background: "iceblue.png".to_owned(),
            body: "tshirtwhite_skin1.png".to_owned(),
            skin: "skin1_rosy.png".to_owned(),
            eyes: "blue.png".to_owned(),
            top: "originalbrown.png".to_owned(),
            mouth: "trollgrin.png".to_owned(),
            glasses: "cfbglasses.png".to_owned(),
            earrings: "noearrings.png".to_owned(),
        }
    }
}

/// Firebase project settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirebaseConfig {
    /// Storage bucket holding both asset tiers.
    pub bucket: Option<String>,
    /// Project id of the Firestore database.
    pub project: Option<String>,
    /// Web API key sent with Firestore writes.
    pub api_key: Option<String>,
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PfpConfig {
    /// Root prefix of the low-resolution tier used for listing and previews.
    pub low_res_root: String,
    /// Root prefix of the high-resolution tier used for exports.
    pub high_res_root: String,
    /// Export edge in pixels.
    pub size: u32,
    /// Preview edge in pixels.
    pub preview_size: u32,
    /// Fill color used when no background is selected.
    pub fallback_color: Rgba8,
    /// File name of the local download.
    pub download_name: String,
    /// Default trait files.
    pub defaults: DefaultTraits,
    /// Timeout applied to every HTTP request.
    pub http_timeout_ms: u64,
    /// Firebase storage and Firestore settings.
    pub firebase: FirebaseConfig,
    /// ImgBB API key; uploads are skipped without one.
    pub imgbb_api_key: Option<String>,
}

impl Default for PfpConfig {
    fn default() -> Self {
        Self {
            low_res_root: "LD_ASSETS".to_owned(),
            high_res_root: "HD_ASSETS".to_owned(),
            size: EXPORT_SIZE,
            preview_size: PREVIEW_SIZE,
            fallback_color: Rgba8::default(),
            download_name: "combined-pfp.png".to_owned(),
            defaults: DefaultTraits::default(),
            http_timeout_ms: 30_000,
            firebase: FirebaseConfig::default(),
            imgbb_api_key: None,
        }
    }
}

impl PfpConfig {
    /// Defaults overlaid with `PFP_*` environment variables.
    pub fn from_env() -> PfpResult<Self> {
        let mut cfg = Self::default();
        cfg.overlay(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    /// Overlay values from a key lookup (environment variables in production).
    pub fn overlay(&mut self, lookup: impl Fn(&str) -> Option<String>) -> PfpResult<()> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("PFP_FIREBASE_BUCKET") {
            self.firebase.bucket = Some(v);
        }
        if let Some(v) = get("PFP_FIREBASE_PROJECT") {
            self.firebase.project = Some(v);
        }
        if let Some(v) = get("PFP_FIREBASE_API_KEY") {
            self.firebase.api_key = Some(v);
        }
        if let Some(v) = get("PFP_IMGBB_API_KEY") {
            self.imgbb_api_key = Some(v);
        }
        if let Some(v) = get("PFP_LOW_RES_ROOT") {
            self.low_res_root = v;
        }
        if let Some(v) = get("PFP_HIGH_RES_ROOT") {
            self.high_res_root = v;
        }
        if let Some(v) = get("PFP_HTTP_TIMEOUT_MS") {
            self.http_timeout_ms = v.trim().parse().map_err(|_| {
                PfpError::validation(format!("PFP_HTTP_TIMEOUT_MS must be an integer, got \"{v}\""))
            })?;
        }
        if let Some(v) = get("PFP_FALLBACK_COLOR") {
            self.fallback_color = v.parse()?;
        }
        self.validate()
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> PfpResult<()> {
        if self.low_res_root.trim_matches('/').is_empty()
            || self.high_res_root.trim_matches('/').is_empty()
        {
            return Err(PfpError::validation("asset roots must be non-empty"));
        }
        if self.low_res_root == self.high_res_root {
            return Err(PfpError::validation("low- and high-resolution roots must differ"));
        }
        if self.size == 0 || self.preview_size == 0 {
            return Err(PfpError::validation("output sizes must be > 0"));
        }
        if self.download_name.is_empty() || self.download_name.contains(['/', '\\']) {
            return Err(PfpError::validation("download name must be a plain file name"));
        }
        Ok(())
    }

    /// Compositor settings derived from this configuration.
    pub fn compositor_opts(&self) -> CompositorOpts {
        CompositorOpts {
            size: self.size,
            preview_size: self.preview_size,
            high_res_root: self.high_res_root.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
