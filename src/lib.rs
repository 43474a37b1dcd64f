//! AI Task Notify - Claude Code / Codex 任务完成通知
//!
//! 作为 post-task hook 被两类 AI 编码代理调用：
//! - Claude Code (Stop hook)：JSON 通过 stdin 传入
//! - Codex CLI (notify)：JSON 作为命令行参数传入
//!
//! 事件归一化为（标题, 正文）后，派发到启用的通知渠道：
//! 企业微信 (WeCom)、飞书 (Feishu)、钉钉 (DingTalk)、邮件 (Email)。
//! 单渠道失败互相隔离，整体尽力而为，不重试。

pub mod config;
pub mod event;
pub mod formatter;
pub mod input;
pub mod notification;

pub use config::Config;
pub use event::{ClaudeCodeEvent, CodexEvent, Event, UnknownEvent};
pub use formatter::{format_message, Message};
pub use input::{parse_input, ParsedInput};
pub use notification::{DispatchResult, Dispatcher, NotificationChannel};
