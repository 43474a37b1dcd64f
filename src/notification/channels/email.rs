//! SMTP 邮件渠道
//!
//! 必需配置：SMTP_HOST / SMTP_USER / SMTP_PASSWORD / EMAIL_FROM / EMAIL_TO，
//! 任一缺失即视为未配置。默认 SSL 直连（465 端口），
//! SMTP_USE_SSL=false 时改走 STARTTLS 升级。

use std::time::Duration;

use anyhow::Result;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, error};

use crate::config::Config;
use crate::notification::channel::NotificationChannel;

/// SMTP 会话超时
const SMTP_TIMEOUT: Duration = Duration::from_secs(10);
/// 默认 SMTP 端口（SSL 直连）
const DEFAULT_SMTP_PORT: u16 = 465;

/// 邮件渠道
#[derive(Debug, Default)]
pub struct EmailChannel;

impl EmailChannel {
    /// 创建渠道
    pub fn new() -> Self {
        Self
    }
}

impl NotificationChannel for EmailChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    fn send(&self, config: &Config, title: &str, content: &str) -> Result<bool> {
        let host = config.get_or("SMTP_HOST", "");
        let user = config.get_or("SMTP_USER", "");
        let password = config.get_or("SMTP_PASSWORD", "");
        let from = config.get_or("EMAIL_FROM", "");
        let to = config.get_or("EMAIL_TO", "");

        if host.is_empty()
            || user.is_empty()
            || password.is_empty()
            || from.is_empty()
            || to.is_empty()
        {
            debug!("Email channel not configured, skipping");
            return Ok(false);
        }

        let port: u16 = config
            .get_or("SMTP_PORT", "465")
            .parse()
            .unwrap_or(DEFAULT_SMTP_PORT);
        let use_ssl = config.get_or("SMTP_USE_SSL", "true").to_lowercase() == "true";

        let recipients = parse_recipients(&to);
        let message = build_message(&from, &recipients, title, content)?;

        // SSL 直连或 STARTTLS 升级；会话在本次调用内建立并释放
        let builder = if use_ssl {
            SmtpTransport::relay(&host)
        } else {
            SmtpTransport::starttls_relay(&host)
        };

        let mailer = match builder {
            Ok(b) => b
                .port(port)
                .credentials(Credentials::new(user, password))
                .timeout(Some(SMTP_TIMEOUT))
                .build(),
            Err(e) => {
                error!(error = %e, "Cannot create SMTP transport");
                return Ok(false);
            }
        };

        match mailer.send(&message) {
            Ok(_) => Ok(true),
            Err(e) => {
                error!(error = %e, "Email send failed");
                Ok(false)
            }
        }
    }
}

/// 解析逗号分隔的收件人列表
fn parse_recipients(email_to: &str) -> Vec<&str> {
    email_to
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// 正文的 HTML 版本：标题作 h2，内容预格式化
fn html_body(title: &str, content: &str) -> String {
    format!(
        "<html>\n<body>\n<h2>{}</h2>\n<pre style=\"background-color: #f5f5f5; \
         padding: 15px; border-radius: 5px;\">\n{}\n</pre>\n</body>\n</html>",
        title, content
    )
}

/// 构造 multipart/alternative 邮件（纯文本 + HTML 两个部件）
fn build_message(from: &str, recipients: &[&str], title: &str, content: &str) -> Result<Message> {
    let from: Mailbox = from.parse()?;
    let mut builder = Message::builder().from(from).subject(title);
    for recipient in recipients {
        builder = builder.to(recipient.parse::<Mailbox>()?);
    }
    let message = builder.multipart(MultiPart::alternative_plain_html(
        content.to_string(),
        html_body(title, content),
    ))?;
    Ok(message)
}
