use std::fmt;

use crate::foundation::core::Category;
use crate::foundation::error::{PfpError, PfpResult};

/// Storage locator for one trait image.
///
/// A locator is `root/category/file`, where `root` selects the resolution tier (for example
/// `LD_ASSETS` for previews and `HD_ASSETS` for exports). Both tiers mirror the same relative
/// `category/file` layout, so swapping tiers is a root substitution.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetRef {
    root: String,
    category: Category,
    file: String,
}

impl AssetRef {
    /// Build a locator from its parts.
    pub fn new(
        root: impl Into<String>,
        category: Category,
        file: impl Into<String>,
    ) -> PfpResult<Self> {
        let root = normalize_rel_path(&root.into())?;
        let file = file.into();
        if file.is_empty() || file.contains(['/', '\\']) || file == "." || file == ".." {
            return Err(PfpError::validation(format!(
                "asset file name \"{file}\" must be a single path segment"
            )));
        }
        Ok(Self {
            root,
            category,
            file,
        })
    }

    /// Parse a storage object path such as `LD_ASSETS/body/tshirtwhite_skin1.png`.
    ///
    /// The last segment is the file name, the one before it the category folder, and
    /// everything above that the root prefix.
    pub fn parse_path(path: &str) -> PfpResult<Self> {
        let norm = normalize_rel_path(path)?;
        let mut parts = norm.rsplitn(3, '/');
        let (Some(file), Some(category), Some(root)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(PfpError::validation(format!(
                "asset path \"{path}\" must look like root/category/file"
            )));
        };
        Self::new(root, category.parse()?, file)
    }

    /// Root prefix (resolution tier).
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Layer this asset belongs to.
    pub fn category(&self) -> Category {
        self.category
    }

    /// File name, including extension.
    pub fn file_name(&self) -> &str {
        &self.file
    }

    /// Folder holding this asset, `root/category`.
    pub fn folder(&self) -> String {
        category_folder(&self.root, self.category)
    }

    /// Full object path, `root/category/file`.
    pub fn path(&self) -> String {
        format!("{}/{}/{}", self.root, self.category, self.file)
    }

    /// Same relative path under a different root prefix.
    pub fn with_root(&self, root: &str) -> PfpResult<Self> {
        Self::new(root, self.category, self.file.clone())
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.root, self.category, self.file)
    }
}

impl TryFrom<String> for AssetRef {
    type Error = PfpError;

    fn try_from(value: String) -> PfpResult<Self> {
        Self::parse_path(&value)
    }
}

impl From<AssetRef> for String {
    fn from(value: AssetRef) -> Self {
        value.path()
    }
}

/// Storage folder for one category under a root prefix, `root/category`.
pub fn category_folder(root: &str, category: Category) -> String {
    format!("{}/{}", root.trim_end_matches('/'), category)
}

/// Normalize and validate storage-relative paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> PfpResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(PfpError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(PfpError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(PfpError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(PfpError::validation("asset path must contain a segment"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/locator.rs"]
mod tests;
