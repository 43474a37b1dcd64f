//! 通知渠道 trait 定义

use anyhow::Result;

use crate::config::Config;

/// 通知渠道 trait
///
/// `Ok(false)` 覆盖非异常的失败（渠道未配置、传输失败、远端响应不符合
/// 成功格式）；`Err` 留给渠道自身没能兜住的异常，由派发器在渠道边界
/// 捕获并记为失败。
pub trait NotificationChannel {
    /// 渠道标识（用于 NOTIFY_CHANNELS 匹配与结果展示）
    fn name(&self) -> &'static str;

    /// 发送一条已格式化的消息。
    ///
    /// 必需配置缺失时立即返回 `Ok(false)`，不发起网络请求。
    fn send(&self, config: &Config, title: &str, content: &str) -> Result<bool>;
}
