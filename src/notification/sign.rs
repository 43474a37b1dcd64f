//! Webhook 签名 - 飞书与钉钉的 HMAC-SHA256 变体
//!
//! 两种方案同为 HMAC-SHA256，但输入构造与输出编码不同，不可混用：
//! - 飞书：以 `"{timestamp}\n{secret}"` 整体作为 HMAC 密钥，对空消息取
//!   摘要，结果 base64。时间戳为秒。
//! - 钉钉：以 secret 作为 HMAC 密钥，对 `"{timestamp}\n{secret}"` 取摘要，
//!   base64 后再做 URL 百分号编码（拼接为查询参数）。时间戳为毫秒。

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// 生成飞书签名。
///
/// 保留服务端要求的历史构造：密钥即待签串本身，消息为空。
pub fn feishu_sign(secret: &str, timestamp: &str) -> String {
    let string_to_sign = format!("{}\n{}", timestamp, secret);
    let mac = HmacSha256::new_from_slice(string_to_sign.as_bytes())
        .expect("HMAC accepts any key length");
    STANDARD.encode(mac.finalize().into_bytes())
}

/// 生成钉钉签名（百分号编码后的 base64）
pub fn dingtalk_sign(secret: &str, timestamp: &str) -> String {
    let string_to_sign = format!("{}\n{}", timestamp, secret);
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(string_to_sign.as_bytes());
    let encoded = STANDARD.encode(mac.finalize().into_bytes());
    urlencoding::encode(&encoded).into_owned()
}
