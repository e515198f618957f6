//! USS配置

use std::fmt;

use serde::{Deserialize, Serialize};

use super::sign::SigningScheme;

/// REST API host / 又拍云REST接口域名
pub const DEFAULT_ENDPOINT: &str = "v0.api.upyun.com";

/// USS配置
#[derive(Clone, Serialize, Deserialize)]
pub struct UssConfig {
    /// 服务名称（存储桶）
    pub bucket: String,
    /// 操作员名称
    pub access_key: String,
    /// 操作员密码
    pub access_secret: String,
    /// 加速域名，如 https://cdn.example.com
    pub custom_host: String,
    /// REST接口域名
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// 上传签名方式
    #[serde(default)]
    pub upload_scheme: UploadScheme,
}

/// Schemes the vendor accepts on the upload header / 上传可用的签名方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadScheme {
    #[default]
    Hmac,
    Legacy,
}

impl UploadScheme {
    pub fn scheme(&self) -> SigningScheme {
        match self {
            Self::Hmac => SigningScheme::HmacHeader,
            Self::Legacy => SigningScheme::LegacyDigestHeader,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl UssConfig {
    pub fn new(bucket: &str, access_key: &str, access_secret: &str, custom_host: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            access_key: access_key.to_string(),
            access_secret: access_secret.to_string(),
            custom_host: custom_host.to_string(),
            endpoint: default_endpoint(),
            upload_scheme: UploadScheme::default(),
        }
    }
}

impl fmt::Debug for UssConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UssConfig")
            .field("bucket", &self.bucket)
            .field("access_key", &self.access_key)
            .field("access_secret", &"***")
            .field("custom_host", &self.custom_host)
            .field("endpoint", &self.endpoint)
            .field("upload_scheme", &self.upload_scheme)
            .finish()
    }
}
