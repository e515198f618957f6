use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;

/// Configuration item definition / 配置项定义
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigItem {
    pub name: String,
    /// Display title (friendly name) / 显示标题
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl ConfigItem {
    pub fn new(name: &str, item_type: &str) -> Self {
        Self {
            name: name.to_string(),
            title: None,
            item_type: item_type.to_string(),
            default: None,
            required: false,
            help: None,
        }
    }

    pub fn title(mut self, val: &str) -> Self {
        self.title = Some(val.to_string());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default(mut self, val: &str) -> Self {
        self.default = Some(val.to_string());
        self
    }

    pub fn help(mut self, val: &str) -> Self {
        self.help = Some(val.to_string());
        self
    }
}

/// Complete provider information / 提供者完整信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub provider_type: String,
    pub display_name: String,
    /// Provider-specific configuration items / 提供者特有配置项
    pub items: Vec<ConfigItem>,
}

/// Object entry returned by listing / 对象条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub key: String,
    pub size: u64,
    pub modified: Option<String>,
}

/// A request the caller issues directly against the vendor
/// 调用方直接发往厂商的已签名请求
///
/// Built fresh for every call and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedRequest {
    pub url: String,
    /// Headers the request must carry verbatim / 必须原样携带的请求头
    pub headers: HashMap<String, String>,
    /// Unix timestamp after which the URL is rejected, None if the vendor
    /// does not bind the signature to a window
    pub expires_at: Option<i64>,
}

impl SignedRequest {
    pub fn new(url: String) -> Self {
        Self {
            url,
            headers: HashMap::new(),
            expires_at: None,
        }
    }

    pub fn header(mut self, name: &str, value: String) -> Self {
        self.headers.insert(name.to_string(), value);
        self
    }

    pub fn expires_at(mut self, ts: i64) -> Self {
        self.expires_at = Some(ts);
        self
    }
}

/// Object storage provider interface / 对象存储提供者接口
///
/// Every capability is present on every provider. Vendors lacking one
/// return [`ProviderError::Unsupported`](crate::error::ProviderError::Unsupported)
/// so callers can tell a capability gap from a transient fault.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name / 提供者名称
    fn name(&self) -> &'static str;

    /// Configure cross-origin access on the bucket / 配置跨域
    async fn setup_cors(&self) -> Result<()>;

    /// List objects under a prefix / 列出前缀下的对象
    async fn list(&self, prefix: &str) -> Result<Vec<Object>>;

    /// Move object / 移动对象
    async fn move_object(&self, object: &str, new_object: &str) -> Result<()>;

    /// Signed upload request / 签名上传请求
    async fn signed_put_url(
        &self,
        key: &str,
        filetype: &str,
        filesize: u64,
        public: bool,
    ) -> Result<SignedRequest>;

    /// Signed, time-limited download URL / 限时下载链接
    ///
    /// `expires_at` carries the instant the URL stops working.
    async fn signed_get_url(&self, key: &str, filename: &str) -> Result<SignedRequest>;

    /// Unsigned public URL / 公开访问链接
    fn public_url(&self, key: &str) -> String;

    /// Delete a single object / 删除单个对象
    async fn object_delete(&self, key: &str) -> Result<()>;

    /// Delete objects one by one, stopping at the first failure
    /// 顺序删除，遇到第一个错误即返回
    ///
    /// Keys before the failing one are already gone, keys after it were
    /// never attempted.
    async fn objects_delete(&self, keys: &[String]) -> Result<()> {
        for key in keys {
            if let Err(e) = self.object_delete(key).await {
                tracing::warn!("Batch delete aborted at {}: {}", key, e);
                return Err(e);
            }
        }
        Ok(())
    }
}

pub mod manager;

pub use manager::{ProviderFactory, ProviderManager, ProviderBox};
