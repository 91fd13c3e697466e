//! Strategy selection

use std::str::FromStr;

use bucketizer_core::BucketizerError;

/// Which bucketizer to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketizerKind {
    /// Fixed-size numbered pages
    Basic,
    /// Prefix trie over a normalized property value
    Substring,
}

impl BucketizerKind {
    /// Whether the strategy needs `propertyPath`
    pub fn requires_property_path(&self) -> bool {
        matches!(self, BucketizerKind::Substring)
    }
}

impl std::fmt::Display for BucketizerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BucketizerKind::Basic => write!(f, "basic"),
            BucketizerKind::Substring => write!(f, "substring"),
        }
    }
}

impl FromStr for BucketizerKind {
    type Err = BucketizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(BucketizerKind::Basic),
            "substring" => Ok(BucketizerKind::Substring),
            other => Err(BucketizerError::config(format!("unknown bucketizer {:?}", other))),
        }
    }
}
