use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{PfpError, PfpResult};

/// One of the eight fixed avatar layers.
///
/// Declaration order is the z-order used for compositing: `Background` is drawn first and
/// `Earrings` last.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Full-bleed backdrop.
    Background,
    /// Clothing; carries a skin variant tag.
    Body,
    /// Skin tone layer; carries a skin variant tag.
    Skin,
    /// Eyes.
    Eyes,
    /// Hair or headwear.
    Top,
    /// Mouth.
    Mouth,
    /// Glasses.
    Glasses,
    /// Earrings.
    Earrings,
}

impl Category {
    /// All categories in compositing z-order.
    pub const ALL: [Category; 8] = [
        Category::Background,
        Category::Body,
        Category::Skin,
        Category::Eyes,
        Category::Top,
        Category::Mouth,
        Category::Glasses,
        Category::Earrings,
    ];

    /// Storage folder name and wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Background => "background",
            Category::Body => "body",
            Category::Skin => "skin",
            Category::Eyes => "eyes",
            Category::Top => "top",
            Category::Mouth => "mouth",
            Category::Glasses => "glasses",
            Category::Earrings => "earrings",
        }
    }

    /// Position in [`Category::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PfpError;

    fn from_str(s: &str) -> PfpResult<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PfpError::validation(format!("unknown category \"{s}\"")))
    }
}

/// Fixed-size table holding one value per [`Category`], indexed in z-order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PerCategory<T> {
    slots: [T; 8],
}

impl<T> PerCategory<T> {
    /// Build a table by evaluating `f` once per category in z-order.
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self {
            slots: std::array::from_fn(|i| f(Category::ALL[i])),
        }
    }

    /// Borrow the slot for `category`.
    pub fn get(&self, category: Category) -> &T {
        &self.slots[category.index()]
    }

    /// Mutably borrow the slot for `category`.
    pub fn get_mut(&mut self, category: Category) -> &mut T {
        &mut self.slots[category.index()]
    }

    /// Iterate `(category, value)` pairs in z-order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().zip(self.slots.iter())
    }

    /// Iterate mutable `(category, value)` pairs in z-order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Category, &mut T)> {
        Category::ALL.into_iter().zip(self.slots.iter_mut())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
