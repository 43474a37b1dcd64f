//! 输入解析 - 识别调用方式并提取事件
//!
//! 两条互斥的获取路径，按固定顺序尝试：
//! 1. 命令行参数（Codex notify）
//! 2. stdin（Claude Code Stop hook，仅在非终端时读取）
//!
//! 任一路径的 JSON 解析失败都被吞掉，回落到下一条路径或缺失状态。

use serde_json::Value;
use tracing::debug;

use crate::event::{ClaudeCodeEvent, CodexEvent, Event};

/// Codex 中唯一需要通知的事件类型
const CODEX_COMPLETE_EVENT: &str = "agent-turn-complete";

/// 输入解析结果
#[derive(Debug)]
pub enum ParsedInput {
    /// 归一化事件，继续派发
    Event(Event),
    /// 按策略忽略的事件（如 Codex 的非完成事件），整体以成功退出
    Ignored,
    /// 两条路径都没有可用数据
    Missing,
}

/// 解析输入。
///
/// `read_stdin` 仅在命令行路径未产出事件时调用；终端检测由调用方负责
/// （交互终端下应返回 `None`）。
pub fn parse_input<F>(arg: Option<&str>, read_stdin: F) -> ParsedInput
where
    F: FnOnce() -> Option<String>,
{
    // Codex 路径：命令行参数
    if let Some(raw) = arg {
        match serde_json::from_str::<Value>(raw) {
            Ok(payload) => {
                let event = CodexEvent::new(payload);
                if event.event_type != CODEX_COMPLETE_EVENT {
                    debug!(event_type = %event.event_type, "Ignoring Codex event");
                    return ParsedInput::Ignored;
                }
                return ParsedInput::Event(Event::Codex(event));
            }
            Err(e) => {
                debug!(error = %e, "Command line payload is not valid JSON");
            }
        }
    }

    // Claude Code 路径：stdin
    if let Some(text) = read_stdin() {
        if !text.trim().is_empty() {
            match serde_json::from_str::<Value>(&text) {
                Ok(payload) => match ClaudeCodeEvent::from_value(payload) {
                    Ok(event) => return ParsedInput::Event(Event::ClaudeCode(event)),
                    Err(e) => debug!(error = %e, "Cannot interpret stdin payload"),
                },
                Err(e) => debug!(error = %e, "stdin payload is not valid JSON"),
            }
        }
    }

    ParsedInput::Missing
}
