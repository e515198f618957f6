//! USS provider / 又拍云存储提供者
//!
//! - 上传：返回REST地址和签名头(X-Date, Authorization)，调用方直接PUT
//! - 下载：加速域名 + `_upt` 限时token，15分钟有效
//! - 无CORS接口，不支持列表和移动

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{ProviderError, Result};
use crate::provider::{Object, Provider, SignedRequest};
use super::client::{DeleteObject, RestUssClient, UssClient};
use super::config::{UploadScheme, UssConfig};
use super::sign::{self, Credentials, SigningScheme};

/// Lifetime of a signed download URL (seconds) / 下载链接有效期
pub const GET_URL_TTL_SECS: i64 = 15 * 60;

const NAME: &str = "uss";

pub struct UssProvider {
    config: UssConfig,
    credentials: Credentials,
    client: Arc<dyn UssClient>,
}

impl UssProvider {
    /// 创建新的USS提供者，使用REST客户端
    pub fn new(config: UssConfig) -> Result<Self> {
        let credentials = Credentials::new(&config.access_key, &config.access_secret);
        let client = RestUssClient::new(&config.endpoint, &config.bucket, credentials.clone())?;
        Ok(Self::build(config, credentials, Arc::new(client)))
    }

    /// Use an already constructed vendor client / 注入厂商客户端
    pub fn with_client(config: UssConfig, client: Arc<dyn UssClient>) -> Self {
        let credentials = Credentials::new(&config.access_key, &config.access_secret);
        Self::build(config, credentials, client)
    }

    fn build(mut config: UssConfig, credentials: Credentials, client: Arc<dyn UssClient>) -> Self {
        config.custom_host = config.custom_host.trim_end_matches('/').to_string();
        Self { config, credentials, client }
    }

    /// Upload request signed at `now` / 按指定时间签名上传请求
    ///
    /// The vendor does not bind this signature to an expiry window, so
    /// `expires_at` stays empty.
    pub fn signed_put_url_at(&self, key: &str, filesize: u64, now: DateTime<Utc>) -> SignedRequest {
        let uri = format!("/{}/{}", self.config.bucket, key);
        let date = sign::http_date(now);
        let auth = match self.config.upload_scheme {
            UploadScheme::Hmac => sign::upload_authorization(&self.credentials, &uri, &date, filesize),
            UploadScheme::Legacy => sign::legacy_digest_header(
                &self.credentials,
                &["PUT", &uri, &date, &filesize.to_string()],
            ),
        };
        tracing::debug!(
            "USS signed PUT: uri={}, size={}, scheme={}",
            uri,
            filesize,
            self.config.upload_scheme.scheme().name()
        );

        SignedRequest::new(format!("http://{}/{}/{}", self.config.endpoint, self.config.bucket, key))
            .header("X-Date", date)
            .header("Authorization", auth)
    }

    /// Download URL signed at `now` / 按指定时间签名下载链接
    pub fn signed_get_url_at(&self, key: &str, now: DateTime<Utc>) -> SignedRequest {
        let expire_at = now.timestamp() + GET_URL_TTL_SECS;
        let upt = sign::truncated_digest_token(&self.credentials, expire_at, &format!("/{}", key));
        tracing::debug!(
            "USS signed GET: key={}, expire_at={}, scheme={}",
            key,
            expire_at,
            SigningScheme::TruncatedDigestToken.name()
        );

        SignedRequest::new(format!("{}?_upt={}", self.public_url(key), upt))
            .expires_at(expire_at)
    }
}

#[async_trait]
impl Provider for UssProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn setup_cors(&self) -> Result<()> {
        // 官方没有提供相关接口
        Ok(())
    }

    async fn list(&self, _prefix: &str) -> Result<Vec<Object>> {
        Err(ProviderError::unsupported(NAME, "list"))
    }

    async fn move_object(&self, _object: &str, _new_object: &str) -> Result<()> {
        Err(ProviderError::unsupported(NAME, "move"))
    }

    async fn signed_put_url(
        &self,
        key: &str,
        _filetype: &str,
        filesize: u64,
        _public: bool,
    ) -> Result<SignedRequest> {
        Ok(self.signed_put_url_at(key, filesize, Utc::now()))
    }

    async fn signed_get_url(&self, key: &str, _filename: &str) -> Result<SignedRequest> {
        Ok(self.signed_get_url_at(key, Utc::now()))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.config.custom_host, key)
    }

    async fn object_delete(&self, key: &str) -> Result<()> {
        self.client
            .delete(&DeleteObject {
                path: key.to_string(),
                is_async: false,
                folder: false,
            })
            .await
    }
}
