//! 通知派发 - 按配置把消息送往各启用渠道
//!
//! 渠道按 NOTIFY_CHANNELS 中的顺序逐个调用；未注册的标识静默跳过；
//! 单个渠道的异常在边界捕获并记为失败，不影响其余渠道。

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use super::channel::NotificationChannel;
use super::channels::{DingTalkChannel, EmailChannel, FeishuChannel, WecomChannel};
use crate::config::Config;

/// 派发结果：渠道标识 → 是否成功，按调用顺序排列
pub type DispatchResult = Vec<(String, bool)>;

/// 通知派发器
pub struct Dispatcher {
    /// 所有注册的渠道
    channels: Vec<Arc<dyn NotificationChannel>>,
    /// 是否为 dry-run 模式
    dry_run: bool,
}

impl Dispatcher {
    /// 创建空派发器
    pub fn new() -> Self {
        Self {
            channels: Vec::new(),
            dry_run: false,
        }
    }

    /// 创建并注册全部内置渠道
    pub fn with_default_channels() -> Result<Self> {
        let mut dispatcher = Self::new();
        dispatcher.register(Arc::new(WecomChannel::new()?));
        dispatcher.register(Arc::new(FeishuChannel::new()?));
        dispatcher.register(Arc::new(DingTalkChannel::new()?));
        dispatcher.register(Arc::new(EmailChannel::new()));
        Ok(dispatcher)
    }

    /// 设置 dry-run 模式
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// 注册渠道
    pub fn register(&mut self, channel: Arc<dyn NotificationChannel>) {
        self.channels.push(channel);
    }

    /// 已注册的渠道名称
    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    /// 向所有启用渠道发送消息
    pub fn dispatch(&self, config: &Config, title: &str, content: &str) -> DispatchResult {
        let mut results = DispatchResult::new();

        for id in config.enabled_channels() {
            // 一次运行内每个渠道至多调用一次
            if results.iter().any(|(name, _)| *name == id) {
                continue;
            }
            // 未注册的标识按构造静默跳过，不计入结果
            let Some(channel) = self.channels.iter().find(|c| c.name() == id) else {
                continue;
            };

            if self.dry_run {
                eprintln!("[DRY-RUN] Would send to channel: {}", id);
                results.push((id, true));
                continue;
            }

            let ok = match channel.send(config, title, content) {
                Ok(ok) => ok,
                Err(e) => {
                    warn!(channel = %id, error = %e, "Channel send failed");
                    false
                }
            };
            info!(channel = %id, success = ok, "Channel dispatch complete");
            results.push((id, ok));
        }

        results
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
