//! 飞书群机器人渠道
//!
//! 发送 interactive 卡片；配置了 FEISHU_SECRET 时在请求体附带
//! timestamp/sign 字段。

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use serde_json::json;
use tracing::debug;

use super::response_code_is_zero;
use crate::config::Config;
use crate::notification::channel::NotificationChannel;
use crate::notification::sign::feishu_sign;
use crate::notification::transport::{HttpPoster, HttpTransport};

/// 飞书渠道
pub struct FeishuChannel {
    transport: Arc<dyn HttpPoster>,
}

impl FeishuChannel {
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

impl NotificationChannel for FeishuChannel {
    fn name(&self) -> &'static str {
        "feishu"
    }

    fn send(&self, config: &Config, title: &str, content: &str) -> Result<bool> {
        let webhook_url = match config.get("FEISHU_WEBHOOK_URL") {
            Some(url) if !url.is_empty() => url,
            _ => {
                debug!("Feishu channel not configured, skipping");
                return Ok(false);
            }
        };

        let mut data = json!({
            "msg_type": "interactive",
            "card": {
                "header": {
                    "title": {
                        "tag": "plain_text",
                        "content": title,
                    },
                    "template": "blue",
                },
                "elements": [
                    {
                        "tag": "markdown",
                        "content": content,
                    }
                ],
            }
        });

        // 签名按渠道可选：没有 secret 时完全省略 timestamp/sign 字段
        if let Some(secret) = config.get("FEISHU_SECRET").filter(|s| !s.is_empty()) {
            let timestamp = Utc::now().timestamp().to_string();
            data["sign"] = json!(feishu_sign(&secret, &timestamp));
            data["timestamp"] = json!(timestamp);
        }

        let resp = self.transport.post_json(&webhook_url, &data, &[]);
        // 服务端不同版本的成功字段名不一致，两个都要检查
        Ok(resp.status == 200
            && (response_code_is_zero(&resp.body, "code")
                || response_code_is_zero(&resp.body, "StatusCode")))
    }
}
