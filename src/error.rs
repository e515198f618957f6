//! Provider error taxonomy / 存储提供者错误类型
//!
//! Errors raised below the adapter (vendor client) are passed through as-is,
//! the adapter never wraps or retries them.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProviderError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The vendor has no such capability / 该厂商不支持此操作
    #[error("{operation} is not supported by provider {provider}")]
    Unsupported {
        provider: &'static str,
        operation: &'static str,
    },

    /// Request never produced a response / 请求未能完成
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-success status / 后端返回错误状态码
    #[error("vendor error ({status}): {message}")]
    Vendor { status: u16, message: String },

    #[error("provider type not found: {0}")]
    UnknownProvider(String),

    #[error("invalid provider config: {0}")]
    InvalidConfig(String),

    #[error("provider not found: {0}")]
    NotFound(String),
}

impl ProviderError {
    pub fn unsupported(provider: &'static str, operation: &'static str) -> Self {
        Self::Unsupported { provider, operation }
    }

    /// Capability gap rather than a transient fault
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidConfig(e.to_string())
    }
}
