//! 事件模型 - 归一化的触发事件
//!
//! 按来源区分的封闭枚举，每个变体只携带其格式化所需的字段。
//! 从通用 JSON 结构转换时字段缺失取默认值，不做空值传播。

use serde::Deserialize;
use serde_json::Value;

/// 归一化后的触发事件
#[derive(Debug, Clone)]
pub enum Event {
    /// Claude Code Stop hook（stdin JSON）
    ClaudeCode(ClaudeCodeEvent),
    /// Codex notify（命令行参数 JSON）
    Codex(CodexEvent),
    /// 未知来源
    Unknown(UnknownEvent),
}

impl Event {
    /// 事件来源标识
    pub fn source(&self) -> &str {
        match self {
            Event::ClaudeCode(_) => "claude-code",
            Event::Codex(_) => "codex",
            Event::Unknown(e) => &e.source,
        }
    }
}

/// Claude Code Stop hook 事件
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClaudeCodeEvent {
    /// 工作目录
    #[serde(default)]
    pub cwd: Option<String>,
    /// 会话 ID
    #[serde(default)]
    pub session_id: Option<String>,
    /// 会话消息记录
    #[serde(default)]
    pub transcript: Vec<TranscriptEntry>,
}

/// transcript 中的一条记录
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscriptEntry {
    /// 记录类型（assistant / user / ...）
    #[serde(rename = "type", default)]
    pub kind: String,
    /// 消息体（结构因记录类型而异，保持原样）
    #[serde(default)]
    pub message: Value,
}

impl ClaudeCodeEvent {
    /// 从已解析的 JSON 构造；字段缺失时取默认值
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// 从 transcript 末尾找最近一条 assistant 记录，取其消息中
    /// 第一个 text 类型内容块的文本。
    pub fn last_assistant_text(&self) -> Option<&str> {
        let entry = self.transcript.iter().rev().find(|e| e.kind == "assistant")?;
        let content = entry.message.get("content")?.as_array()?;
        let block = content
            .iter()
            .find(|b| b.get("type").and_then(Value::as_str) == Some("text"))?;
        block.get("text").and_then(Value::as_str)
    }
}

/// Codex notify 事件
#[derive(Debug, Clone)]
pub struct CodexEvent {
    /// payload 中的 type 字段，缺失时为空串
    pub event_type: String,
    /// 原始 payload
    pub payload: Value,
}

impl CodexEvent {
    /// 从已解析的 JSON 构造
    pub fn new(payload: Value) -> Self {
        let event_type = payload
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self {
            event_type,
            payload,
        }
    }
}

/// 未知来源事件
#[derive(Debug, Clone)]
pub struct UnknownEvent {
    pub source: String,
    pub payload: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_claude_event_from_value_with_all_fields() {
        let value = json!({
            "cwd": "/home/x",
            "session_id": "abcdefgh12345",
            "transcript": [
                {"type": "user", "message": {"content": "hi"}},
                {"type": "assistant", "message": {"content": [
                    {"type": "text", "text": "Done."}
                ]}}
            ]
        });

        let event = ClaudeCodeEvent::from_value(value).unwrap();
        assert_eq!(event.cwd.as_deref(), Some("/home/x"));
        assert_eq!(event.session_id.as_deref(), Some("abcdefgh12345"));
        assert_eq!(event.last_assistant_text(), Some("Done."));
    }

    #[test]
    fn test_claude_event_missing_fields_default() {
        let event = ClaudeCodeEvent::from_value(json!({})).unwrap();
        assert_eq!(event.cwd, None);
        assert_eq!(event.session_id, None);
        assert!(event.transcript.is_empty());
        assert_eq!(event.last_assistant_text(), None);
    }

    #[test]
    fn test_last_assistant_text_takes_most_recent_assistant() {
        let event = ClaudeCodeEvent::from_value(json!({
            "transcript": [
                {"type": "assistant", "message": {"content": [
                    {"type": "text", "text": "old"}
                ]}},
                {"type": "assistant", "message": {"content": [
                    {"type": "tool_use", "name": "bash"},
                    {"type": "text", "text": "new"}
                ]}},
                {"type": "user", "message": {"content": "bye"}}
            ]
        }))
        .unwrap();

        assert_eq!(event.last_assistant_text(), Some("new"));
    }

    #[test]
    fn test_last_assistant_text_stops_at_most_recent_entry() {
        // 最近的 assistant 记录没有 text 块时不回退到更早的记录
        let event = ClaudeCodeEvent::from_value(json!({
            "transcript": [
                {"type": "assistant", "message": {"content": [
                    {"type": "text", "text": "older answer"}
                ]}},
                {"type": "assistant", "message": {"content": [
                    {"type": "tool_use", "name": "bash"}
                ]}}
            ]
        }))
        .unwrap();

        assert_eq!(event.last_assistant_text(), None);
    }

    #[test]
    fn test_codex_event_type_extraction() {
        let event = CodexEvent::new(json!({"type": "agent-turn-complete", "cwd": "/tmp"}));
        assert_eq!(event.event_type, "agent-turn-complete");

        let event = CodexEvent::new(json!({"cwd": "/tmp"}));
        assert_eq!(event.event_type, "");
    }

    #[test]
    fn test_event_source_tags() {
        assert_eq!(
            Event::ClaudeCode(ClaudeCodeEvent::default()).source(),
            "claude-code"
        );
        assert_eq!(Event::Codex(CodexEvent::new(json!({}))).source(), "codex");
        assert_eq!(
            Event::Unknown(UnknownEvent {
                source: "unknown".to_string(),
                payload: json!({}),
            })
            .source(),
            "unknown"
        );
    }
}
