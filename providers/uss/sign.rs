//! USS signing engine / 又拍云签名算法
//!
//! Three incompatible schemes, each byte-exact to what the vendor verifies:
//! - HMAC header: `UpYun {operator}:base64(hmac-sha1(md5(secret), items joined by &))`
//! - Truncated digest token (`_upt`): `md5(secret&expiry&uri)[12..20] + expiry`
//! - Legacy digest header: `UpYun {operator}:md5(items&md5(secret))`
//!
//! All functions are pure. Callers hand in the clock.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Signing scheme tag / 签名方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningScheme {
    HmacHeader,
    TruncatedDigestToken,
    LegacyDigestHeader,
}

impl SigningScheme {
    pub fn name(&self) -> &'static str {
        match self {
            Self::HmacHeader => "hmac_header",
            Self::TruncatedDigestToken => "truncated_digest_token",
            Self::LegacyDigestHeader => "legacy_digest_header",
        }
    }
}

/// Operator name and password / 操作员与密码
#[derive(Clone)]
pub struct Credentials {
    pub operator: String,
    secret: String,
}

impl Credentials {
    pub fn new(operator: &str, secret: &str) -> Self {
        Self {
            operator: operator.to_string(),
            secret: secret.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("operator", &self.operator)
            .field("secret", &"***")
            .finish()
    }
}

/// MD5哈希(十六进制) / MD5 hash (lowercase hex)
pub fn md5_hex(data: &str) -> String {
    format!("{:x}", md5::compute(data.as_bytes()))
}

/// HTTP date (IMF-fixdate) / HTTP日期字符串
pub fn http_date(t: DateTime<Utc>) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// HMAC-SHA1 Authorization header value / HMAC-SHA1签名头
///
/// The HMAC key is the hex md5 of the secret, not the secret itself.
pub fn hmac_header(creds: &Credentials, items: &[&str]) -> String {
    let key = md5_hex(&creds.secret);
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(items.join("&").as_bytes());
    let sign = BASE64.encode(mac.finalize().into_bytes());
    format!("UpYun {}:{}", creds.operator, sign)
}

/// Upload authorization for `PUT {path}` / 上传签名
///
/// `date` must be sent unchanged as `X-Date`.
pub fn upload_authorization(creds: &Credentials, path: &str, date: &str, size: u64) -> String {
    hmac_header(creds, &["PUT", path, date, &size.to_string()])
}

/// Time-limited download token / 限时下载token
///
/// sign = md5(secret & etime & uri), token = middle 8 hex chars + etime.
/// `path` excludes the bucket.
pub fn truncated_digest_token(creds: &Credentials, expire_at: i64, path: &str) -> String {
    let expire = expire_at.to_string();
    let sign = md5_hex(&[creds.secret.as_str(), &expire, path].join("&"));
    format!("{}{}", &sign[12..20], expire)
}

/// Check a `_upt` token against `path` at time `now` / 校验下载token
pub fn verify_token(creds: &Credentials, path: &str, token: &str, now: DateTime<Utc>) -> bool {
    let (Some(_), Some(expire)) = (token.get(..8), token.get(8..)) else {
        return false;
    };
    if expire.is_empty() || !expire.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let Ok(expire_at) = expire.parse::<i64>() else {
        return false;
    };
    if now.timestamp() > expire_at {
        return false;
    }
    truncated_digest_token(creds, expire_at, path) == token
}

/// Legacy md5 Authorization header value / 旧版签名
///
/// md5 of the secret is appended as the last item, no HMAC.
pub fn legacy_digest_header(creds: &Credentials, items: &[&str]) -> String {
    let secret_md5 = md5_hex(&creds.secret);
    let mut all: Vec<&str> = items.to_vec();
    all.push(&secret_md5);
    format!("UpYun {}:{}", creds.operator, md5_hex(&all.join("&")))
}
