/// Convenience result type used across pfpkit.
pub type PfpResult<T> = Result<T, PfpError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum PfpError {
    /// Invalid user-provided input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A category folder could not be listed from the object store.
    #[error("asset listing error: {0}")]
    AssetListing(String),

    /// No variant tag could be derived from an asset name.
    #[error("variant resolution miss: {0}")]
    VariantResolutionMiss(String),

    /// The composed image could not be produced. No partial output exists.
    #[error("composition error: {0}")]
    Composition(String),

    /// The image host rejected or failed the upload.
    #[error("upload error: {0}")]
    Upload(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PfpError {
    /// Build a [`PfpError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PfpError::AssetListing`] value.
    pub fn asset_listing(msg: impl Into<String>) -> Self {
        Self::AssetListing(msg.into())
    }

    /// Build a [`PfpError::VariantResolutionMiss`] value.
    pub fn variant_miss(msg: impl Into<String>) -> Self {
        Self::VariantResolutionMiss(msg.into())
    }

    /// Build a [`PfpError::Composition`] value.
    pub fn composition(msg: impl Into<String>) -> Self {
        Self::Composition(msg.into())
    }

    /// Build a [`PfpError::Upload`] value.
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }

    /// Build a [`PfpError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
