//! HTTP 传输 - 所有 webhook 渠道共用的出站 POST 原语

use std::time::Duration;

use anyhow::{anyhow, Result};
use serde_json::Value;
use tracing::debug;

/// 出站请求超时，单个慢端点不能拖垮整次运行
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// 统一的响应形式
///
/// 网络层错误（DNS、拒绝连接、超时）折叠为 `status == 0`，
/// body 为错误描述；调用方据此统一判定成败。
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 网络层错误的合成响应
    pub fn network_error(description: impl Into<String>) -> Self {
        Self {
            status: 0,
            body: description.into(),
        }
    }
}

/// POST 原语抽象（测试时注入 spy 统计调用）
pub trait HttpPoster {
    /// 发送 JSON POST。永不返回错误：网络异常折叠为 `(0, 描述)`。
    /// Content-Type 固定为 application/json。
    fn post_json(&self, url: &str, body: &Value, extra_headers: &[(&str, &str)]) -> HttpResponse;
}

/// 基于 reqwest 的真实传输
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// 创建传输
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| anyhow!("Cannot create HTTP client: {}", e))?;
        Ok(Self { client })
    }
}

impl HttpPoster for HttpTransport {
    fn post_json(&self, url: &str, body: &Value, extra_headers: &[(&str, &str)]) -> HttpResponse {
        let mut request = self.client.post(url).json(body);
        for (name, value) in extra_headers {
            request = request.header(*name, *value);
        }

        match request.send() {
            Ok(resp) => {
                let status = resp.status().as_u16();
                let body = resp.text().unwrap_or_default();
                debug!(url = %url, status = status, "Webhook POST complete");
                HttpResponse { status, body }
            }
            Err(e) => {
                debug!(url = %url, error = %e, "Webhook POST failed");
                HttpResponse::network_error(e.to_string())
            }
        }
    }
}
