//! Owner service configuration.
//!
//! Configuration is read from the environment once at startup. Every
//! constructor also has a `from_lookup` form that takes the variable source as
//! a closure so tests never touch the process environment.

use std::env;

/// Startup configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("Invalid value for {name}: {value}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Owner service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerServiceConfig {
    /// AWS region for the store and object store clients.
    pub region: String,
    /// Key-value store table holding owners.
    pub table_name: String,
    /// Upload bucket, as configured; validated per request.
    pub bucket_name: Option<String>,
    /// Default tracing filter.
    pub log_level: String,
}

impl OwnerServiceConfig {
    /// Read the configuration from the process environment.
    ///
    /// `REGION` and `TABLE_NAME` are required.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        Ok(Self {
            region: required("REGION")?,
            table_name: required("TABLE_NAME")?,
            bucket_name: lookup("S3_BUCKET_NAME"),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_owned()),
        })
    }

    /// The upload bucket, if it is usable.
    ///
    /// Empty names and ARNs are rejected; the object store wants a plain
    /// bucket name.
    #[must_use]
    pub fn upload_bucket(&self) -> Option<&str> {
        valid_bucket_name(self.bucket_name.as_deref())
    }
}

impl Default for OwnerServiceConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_owned(),
            table_name: "owners".to_owned(),
            bucket_name: None,
            log_level: "info".to_owned(),
        }
    }
}

/// Returns the bucket name when it is non-empty and not an ARN.
#[must_use]
pub fn valid_bucket_name(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.is_empty() && !n.starts_with("arn:"))
}

/// Local development server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalServerConfig {
    /// Socket address to listen on.
    pub listen_addr: String,
    /// Owner service settings.
    pub service: OwnerServiceConfig,
    /// Object store endpoint for path-style presigned URLs.
    pub s3_endpoint_url: String,
    /// Access key used to presign.
    pub access_key: String,
    /// Secret key used to presign.
    pub secret_key: String,
    /// Page size of the in-memory scan.
    pub scan_page_size: usize,
}

impl LocalServerConfig {
    /// Read the configuration from the process environment, with defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration from `lookup`, with defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let first = |keys: &[&str]| keys.iter().find_map(|k| lookup(k).filter(|v| !v.is_empty()));

        let scan_page_size = match lookup("SCAN_PAGE_SIZE") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    name: "SCAN_PAGE_SIZE",
                    value: raw,
                })?,
            None => defaults.scan_page_size,
        };

        Ok(Self {
            listen_addr: first(&["GATEWAY_LISTEN"]).unwrap_or(defaults.listen_addr),
            service: OwnerServiceConfig {
                region: first(&["REGION"]).unwrap_or(defaults.service.region),
                table_name: first(&["TABLE_NAME"]).unwrap_or(defaults.service.table_name),
                bucket_name: lookup("S3_BUCKET_NAME"),
                log_level: first(&["LOG_LEVEL"]).unwrap_or(defaults.service.log_level),
            },
            s3_endpoint_url: first(&["S3_ENDPOINT_URL"]).unwrap_or(defaults.s3_endpoint_url),
            access_key: first(&["ACCESS_KEY", "AWS_ACCESS_KEY_ID"]).unwrap_or(defaults.access_key),
            secret_key: first(&["SECRET_KEY", "AWS_SECRET_ACCESS_KEY"])
                .unwrap_or(defaults.secret_key),
            scan_page_size,
        })
    }
}

impl Default for LocalServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:4567".to_owned(),
            service: OwnerServiceConfig::default(),
            s3_endpoint_url: "http://localhost:4566".to_owned(),
            access_key: "test".to_owned(),
            secret_key: "test".to_owned(),
            scan_page_size: 100,
        }
    }
}
