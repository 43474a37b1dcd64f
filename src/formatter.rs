//! 消息格式化 - 将事件渲染为（标题, 正文）
//!
//! 按事件来源分支；长内容做硬字符数截断，不做单词对齐，不加省略号。

use chrono::Local;
use serde_json::Value;

use crate::event::Event;

/// Claude Code 最后消息的最大长度（字符数）
const ASSISTANT_TEXT_LIMIT: usize = 500;
/// 原始 JSON 数据的最大长度（字符数）
const RAW_JSON_LIMIT: usize = 1000;

/// 已格式化的通知消息
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub title: String,
    pub body: String,
}

/// 格式化通知消息
pub fn format_message(event: &Event) -> Message {
    let now = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    match event {
        Event::ClaudeCode(e) => {
            let last_message = e
                .last_assistant_text()
                .map(|t| truncate_chars(t, ASSISTANT_TEXT_LIMIT))
                .unwrap_or_default();

            Message {
                title: "🤖 Claude Code 任务完成".to_string(),
                body: format!(
                    "**时间**: {}\n**工作目录**: {}\n**会话ID**: {}...\n\n**最后消息**:\n{}",
                    now,
                    e.cwd.as_deref().unwrap_or("N/A"),
                    truncate_chars(e.session_id.as_deref().unwrap_or("N/A"), 8),
                    if last_message.is_empty() {
                        "(无内容)"
                    } else {
                        last_message.as_str()
                    },
                ),
            }
        }
        Event::Codex(e) => Message {
            title: "🤖 Codex 任务完成".to_string(),
            body: format!(
                "**时间**: {}\n**事件类型**: {}\n\n**原始数据**:\n```json\n{}\n```",
                now,
                e.event_type,
                truncate_chars(&pretty_json(&e.payload), RAW_JSON_LIMIT),
            ),
        },
        Event::Unknown(e) => Message {
            title: "🤖 AI 任务完成".to_string(),
            body: format!(
                "**时间**: {}\n**来源**: {}\n\n**数据**:\n```json\n{}\n```",
                now,
                e.source,
                truncate_chars(&pretty_json(&e.payload), RAW_JSON_LIMIT),
            ),
        },
    }
}

/// 按字符数截断
fn truncate_chars(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
