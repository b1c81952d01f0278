use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::error::{PfpError, PfpResult};

/// Highest skin variant number.
pub const MAX_SKIN: u8 = 10;

// Digits are matched greedily so `skin123` is one (rejected) token, never `skin12`.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"skin(?P<n>\d+)|universal").expect("variant tag regex"));

/// Skin variant carried by body and skin assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VariantTag {
    /// `skin1` through `skin10`.
    Skin(u8),
    /// Compatible with every skin variant.
    Universal,
}

impl VariantTag {
    /// Every tag in declaration order: `skin1..skin10`, then `universal`.
    pub const ALL: [VariantTag; 11] = [
        VariantTag::Skin(1),
        VariantTag::Skin(2),
        VariantTag::Skin(3),
        VariantTag::Skin(4),
        VariantTag::Skin(5),
        VariantTag::Skin(6),
        VariantTag::Skin(7),
        VariantTag::Skin(8),
        VariantTag::Skin(9),
        VariantTag::Skin(10),
        VariantTag::Universal,
    ];

    /// `skin<n>` when `n` is in `1..=10`.
    pub fn skin(n: u8) -> Option<Self> {
        (1..=MAX_SKIN).contains(&n).then_some(Self::Skin(n))
    }

    /// Return `true` for [`VariantTag::Universal`].
    pub fn is_universal(self) -> bool {
        matches!(self, Self::Universal)
    }

    /// Find the first valid tag in an asset file name.
    ///
    /// Out-of-range skin numbers (`skin0`, `skin11`) are skipped rather than reported.
    pub fn find_in(name: &str) -> Option<Self> {
        TAG_RE.captures_iter(name).find_map(|caps| match caps.name("n") {
            Some(n) => Self::from_skin_digits(n.as_str()),
            None => Some(Self::Universal),
        })
    }

    /// Replace the first valid skin token in `name` with `tag`.
    ///
    /// Names without a skin token (including `universal` assets) come back unchanged.
    pub fn replace_skin_token(name: &str, tag: VariantTag) -> String {
        let token = TAG_RE.captures_iter(name).find_map(|caps| {
            Self::from_skin_digits(caps.name("n")?.as_str())?;
            caps.get(0)
        });
        match token {
            Some(m) => format!("{}{}{}", &name[..m.start()], tag, &name[m.end()..]),
            None => name.to_owned(),
        }
    }

    // At most two digits, then the 1..=10 range.
    fn from_skin_digits(digits: &str) -> Option<Self> {
        if digits.len() > 2 {
            return None;
        }
        digits.parse().ok().and_then(Self::skin)
    }
}

impl fmt::Display for VariantTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skin(n) => write!(f, "skin{n}"),
            Self::Universal => f.write_str("universal"),
        }
    }
}

impl FromStr for VariantTag {
    type Err = PfpError;

    fn from_str(s: &str) -> PfpResult<Self> {
        let s = s.trim();
        if s == "universal" {
            return Ok(Self::Universal);
        }
        s.strip_prefix("skin")
            .and_then(|n| n.parse().ok())
            .and_then(Self::skin)
            .ok_or_else(|| PfpError::validation(format!("invalid variant tag \"{s}\"")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/variant.rs"]
mod tests;
