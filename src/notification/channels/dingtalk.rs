//! 钉钉群机器人渠道
//!
//! 配置了 DINGTALK_SECRET 时把 timestamp/sign 追加为目标 URL 的查询参数。

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use serde_json::json;
use tracing::debug;

use super::response_code_is_zero;
use crate::config::Config;
use crate::notification::channel::NotificationChannel;
use crate::notification::sign::dingtalk_sign;
use crate::notification::transport::{HttpPoster, HttpTransport};

/// 钉钉渠道
pub struct DingTalkChannel {
    transport: Arc<dyn HttpPoster>,
}

impl DingTalkChannel {
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

impl NotificationChannel for DingTalkChannel {
    fn name(&self) -> &'static str {
        "dingtalk"
    }

    fn send(&self, config: &Config, title: &str, content: &str) -> Result<bool> {
        let mut webhook_url = match config.get("DINGTALK_WEBHOOK_URL") {
            Some(url) if !url.is_empty() => url,
            _ => {
                debug!("DingTalk channel not configured, skipping");
                return Ok(false);
            }
        };

        // 签名拼接为查询参数；毫秒级时间戳
        if let Some(secret) = config.get("DINGTALK_SECRET").filter(|s| !s.is_empty()) {
            let timestamp = Utc::now().timestamp_millis().to_string();
            let sign = dingtalk_sign(&secret, &timestamp);
            let separator = if webhook_url.contains('?') { '&' } else { '?' };
            webhook_url = format!(
                "{}{}timestamp={}&sign={}",
                webhook_url, separator, timestamp, sign
            );
        }

        let data = json!({
            "msgtype": "markdown",
            "markdown": {
                "title": title,
                "text": format!("### {}\n{}", title, content),
            }
        });

        let resp = self.transport.post_json(&webhook_url, &data, &[]);
        Ok(resp.status == 200 && response_code_is_zero(&resp.body, "errcode"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::channels::testing::SpyPoster;
    use std::collections::HashMap;

    fn config(url: &str, secret: Option<&str>) -> Config {
        let mut map = HashMap::new();
        map.insert("DINGTALK_WEBHOOK_URL".to_string(), url.to_string());
        if let Some(secret) = secret {
            map.insert("DINGTALK_SECRET".to_string(), secret.to_string());
        }
        Config::from_map(map)
    }

    #[test]
    fn test_unconfigured_returns_false_without_network() {
        let spy = Arc::new(SpyPoster::new(200, r#"{"errcode":0}"#));
        let channel = DingTalkChannel::with_transport(spy.clone());

        assert!(!channel.send(&Config::default(), "t", "c").unwrap());
        assert_eq!(spy.call_count(), 0);
    }

    #[test]
    fn test_markdown_payload_shape() {
        let spy = Arc::new(SpyPoster::new(200, r#"{"errcode":0,"errmsg":"ok"}"#));
        let channel = DingTalkChannel::with_transport(spy.clone());

        let cfg = config("https://oapi.dingtalk.com/robot/send", None);
        assert!(channel.send(&cfg, "标题", "正文").unwrap());

        let (url, body) = spy.last_call().unwrap();
        // 无 secret 时 URL 原样使用
        assert_eq!(url, "https://oapi.dingtalk.com/robot/send");
        assert_eq!(body["msgtype"], "markdown");
        assert_eq!(body["markdown"]["title"], "标题");
        assert_eq!(body["markdown"]["text"], "### 标题\n正文");
    }

    #[test]
    fn test_sign_appended_with_question_mark() {
        let spy = Arc::new(SpyPoster::new(200, r#"{"errcode":0}"#));
        let channel = DingTalkChannel::with_transport(spy.clone());

        let cfg = config("https://oapi.dingtalk.com/robot/send", Some("secret"));
        assert!(channel.send(&cfg, "t", "c").unwrap());

        let (url, _) = spy.last_call().unwrap();
        assert!(url.starts_with("https://oapi.dingtalk.com/robot/send?timestamp="));
        assert!(url.contains("&sign="));
    }

    #[test]
    fn test_sign_appended_with_ampersand_when_query_exists() {
        let spy = Arc::new(SpyPoster::new(200, r#"{"errcode":0}"#));
        let channel = DingTalkChannel::with_transport(spy.clone());

        let cfg = config(
            "https://oapi.dingtalk.com/robot/send?access_token=tok",
            Some("secret"),
        );
        assert!(channel.send(&cfg, "t", "c").unwrap());

        let (url, _) = spy.last_call().unwrap();
        assert!(url.contains("?access_token=tok&timestamp="));
    }

    #[test]
    fn test_failure_on_nonzero_errcode() {
        let spy = Arc::new(SpyPoster::new(200, r#"{"errcode":310000,"errmsg":"sign not match"}"#));
        let channel = DingTalkChannel::with_transport(spy);

        let cfg = config("https://oapi.dingtalk.com/robot/send", Some("secret"));
        assert!(!channel.send(&cfg, "t", "c").unwrap());
    }

    #[test]
    fn test_failure_on_network_error() {
        let spy = Arc::new(SpyPoster::new(0, "connection refused"));
        let channel = DingTalkChannel::with_transport(spy);

        let cfg = config("https://oapi.dingtalk.com/robot/send", None);
        assert!(!channel.send(&cfg, "t", "c").unwrap());
    }
}
