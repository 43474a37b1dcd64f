//! 企业微信群机器人渠道
//!
//! Webhook 地址由 WECOM_WEBHOOK_URL 配置；无签名机制。

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use tracing::debug;

use super::response_code_is_zero;
use crate::config::Config;
use crate::notification::channel::NotificationChannel;
use crate::notification::transport::{HttpPoster, HttpTransport};

/// 企业微信渠道
pub struct WecomChannel {
    transport: Arc<dyn HttpPoster>,
}

impl WecomChannel {
    /// 创建渠道
    pub fn new() -> Result<Self> {
        Ok(Self {
            transport: Arc::new(HttpTransport::new()?),
        })
    }

    /// 注入自定义传输（测试用）
    pub fn with_transport(transport: Arc<dyn HttpPoster>) -> Self {
        Self { transport }
    }
}

impl NotificationChannel for WecomChannel {
    fn name(&self) -> &'static str {
        "wecom"
    }

    fn send(&self, config: &Config, title: &str, content: &str) -> Result<bool> {
        let webhook_url = match config.get("WECOM_WEBHOOK_URL") {
            Some(url) if !url.is_empty() => url,
            _ => {
                debug!("WeCom channel not configured, skipping");
                return Ok(false);
            }
        };

        let data = json!({
            "msgtype": "markdown",
            "markdown": {
                "content": format!("### {}\n{}", title, content),
            }
        });

        let resp = self.transport.post_json(&webhook_url, &data, &[]);
        Ok(resp.status == 200 && response_code_is_zero(&resp.body, "errcode"))
    }
}
