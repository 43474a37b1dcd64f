//! 通知子系统 - 渠道抽象、签名、传输与派发
//!
//! # 设计
//! 1. 统一接口：所有渠道实现 `NotificationChannel` trait
//! 2. 渠道解耦：每个渠道独立读取自己的配置键，互不影响
//! 3. 失败隔离：单渠道异常在派发边界捕获，不影响其余渠道
//! 4. 尽力而为：单次发送，不重试，不排队

pub mod channel;
pub mod channels;
pub mod dispatcher;
pub mod sign;
pub mod transport;

pub use channel::NotificationChannel;
pub use channels::{DingTalkChannel, EmailChannel, FeishuChannel, WecomChannel};
pub use dispatcher::{DispatchResult, Dispatcher};
pub use transport::{HttpPoster, HttpResponse, HttpTransport};
