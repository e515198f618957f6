//! USS REST client / 又拍云REST客户端
//!
//! Only the calls the provider needs. No retries and no timeouts,
//! failures go straight back to the caller.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use url::Url;

use super::sign::{self, Credentials};
use crate::error::{ProviderError, Result};

/// 删除对象参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteObject {
    pub path: String,
    pub is_async: bool,
    pub folder: bool,
}

/// Vendor storage client / 厂商存储客户端
#[async_trait]
pub trait UssClient: Send + Sync {
    async fn delete(&self, req: &DeleteObject) -> Result<()>;
}

pub struct RestUssClient {
    base: Url,
    bucket: String,
    credentials: Credentials,
    http: Client,
}

impl RestUssClient {
    pub fn new(endpoint: &str, bucket: &str, credentials: Credentials) -> Result<Self> {
        let base = Url::parse(&format!("http://{}", endpoint))
            .map_err(|e| ProviderError::InvalidConfig(format!("endpoint {}: {}", endpoint, e)))?;
        let http = Client::builder()
            .pool_max_idle_per_host(4)
            .build()?;

        Ok(Self {
            base,
            bucket: bucket.to_string(),
            credentials,
            http,
        })
    }

    /// `/{bucket}/{path}` with every segment percent-encoded
    fn uri(&self, path: &str) -> String {
        let escaped: Vec<String> = path
            .trim_start_matches('/')
            .split('/')
            .map(|seg| urlencoding::encode(seg).into_owned())
            .collect();
        format!("/{}/{}", self.bucket, escaped.join("/"))
    }

    /// Signed DELETE request at `now` / 按指定时间签名删除请求
    fn delete_request(&self, req: &DeleteObject, now: DateTime<Utc>) -> RequestBuilder {
        let uri = self.uri(&req.path);
        let date = sign::http_date(now);
        let auth = sign::hmac_header(&self.credentials, &["DELETE", &uri, &date]);

        let mut url = self.base.clone();
        url.set_path(&uri);
        tracing::debug!("USS DELETE: {}", url);

        let mut request = self.http
            .delete(url)
            .header("Date", &date)
            .header("Authorization", auth);
        if req.is_async {
            request = request.header("x-upyun-async", "true");
        }
        if req.folder {
            request = request.header("x-upyun-folder", "true");
        }
        request
    }
}

#[async_trait]
impl UssClient for RestUssClient {
    async fn delete(&self, req: &DeleteObject) -> Result<()> {
        let response = self.delete_request(req, Utc::now()).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Vendor { status: status.as_u16(), message });
        }

        Ok(())
    }
}
