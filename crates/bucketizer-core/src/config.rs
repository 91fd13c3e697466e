//! Configuration module for the bucketizers

use serde::{Deserialize, Serialize};

use crate::error::{BucketizerError, BucketizerResult};

/// Default maximum number of members per bucket
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Default prefix for buckets of members without a partitioning value
pub const DEFAULT_FALLBACK_BUCKET_PREFIX: &str = "bucketless";

/// Bucketizer options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BucketizerOptions {
    /// Maximum members per bucket before it rolls over or splits
    pub page_size: usize,

    /// Path selecting the partitioning value (key-based strategies only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_path: Option<String>,

    /// Prefix of the fallback buckets
    pub fallback_bucket_prefix: String,
}

impl Default for BucketizerOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            property_path: None,
            fallback_bucket_prefix: DEFAULT_FALLBACK_BUCKET_PREFIX.to_string(),
        }
    }
}

impl BucketizerOptions {
    /// Options with a property path and defaults for everything else
    pub fn with_property_path(property_path: impl Into<String>) -> Self {
        Self {
            property_path: Some(property_path.into()),
            ..Self::default()
        }
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn fallback_bucket_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.fallback_bucket_prefix = prefix.into();
        self
    }

    /// Load options from environment variables
    pub fn from_env() -> Self {
        let mut options = BucketizerOptions::default();

        if let Ok(page_size) = std::env::var("BUCKETIZER_PAGE_SIZE") {
            if let Ok(page_size) = page_size.trim().parse() {
                options.page_size = page_size;
            }
        }

        if let Ok(path) = std::env::var("BUCKETIZER_PROPERTY_PATH") {
            let path = path.trim();
            if !path.is_empty() {
                options.property_path = Some(path.to_string());
            }
        }

        if let Ok(prefix) = std::env::var("BUCKETIZER_FALLBACK_PREFIX") {
            if !prefix.is_empty() {
                options.fallback_bucket_prefix = prefix;
            }
        }

        options
    }

    /// Check options shared by every strategy
    pub fn validate(&self) -> BucketizerResult<()> {
        if self.page_size == 0 {
            return Err(BucketizerError::config("pageSize must be a positive integer"));
        }
        Ok(())
    }

    /// Property path, or a configuration error for strategies that need one
    pub fn require_property_path(&self) -> BucketizerResult<&str> {
        self.property_path
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .ok_or_else(|| BucketizerError::config("propertyPath option is required"))
    }
}
