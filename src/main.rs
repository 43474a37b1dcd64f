//! AI Task Notify CLI
//!
//! Claude Code / Codex 任务完成通知 hook。
//! - Claude Code (Stop hook)：JSON 通过 stdin 传入
//! - Codex CLI (notify)：JSON 作为命令行参数传入

use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use ai_task_notify::{format_message, parse_input, Config, Dispatcher, ParsedInput};

#[derive(Parser)]
#[command(name = "ai-notify")]
#[command(about = "AI Task Notify - Claude Code / Codex 任务完成通知")]
#[command(version)]
struct Cli {
    /// Codex notify 传入的 JSON payload（Claude Code 场景走 stdin）
    payload: Option<String>,

    /// 配置文件路径（默认 ./.env，其次 ~/.config/ai-task-notify/.env）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 只打印将要发送的渠道，不实际发送
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    // 初始化 tracing 日志系统
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ai_task_notify=info,ai_notify=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref());

    // 没有启用任何渠道时直接成功退出
    if config.enabled_channels().is_empty() {
        eprintln!("No notification channels enabled");
        return Ok(ExitCode::SUCCESS);
    }

    let event = match parse_input(cli.payload.as_deref(), read_stdin) {
        ParsedInput::Event(event) => event,
        // 按策略忽略的事件类型，干净地成功退出，不做任何派发
        ParsedInput::Ignored => return Ok(ExitCode::SUCCESS),
        ParsedInput::Missing => {
            eprintln!("No valid input data");
            return Ok(ExitCode::FAILURE);
        }
    };

    info!(source = event.source(), "Dispatching notification");

    let message = format_message(&event);
    let dispatcher = Dispatcher::with_default_channels()?.with_dry_run(cli.dry_run);
    let results = dispatcher.dispatch(&config, &message.title, &message.body);

    let success_count = results.iter().filter(|(_, ok)| *ok).count();
    println!("Notifications sent: {}/{}", success_count, results.len());
    for (channel, success) in &results {
        let status = if *success { "✓" } else { "✗" };
        println!("  {} {}", status, channel);
    }

    if success_count > 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// 仅在 stdin 非交互终端时读取全部内容
fn read_stdin() -> Option<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return None;
    }
    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer).ok()?;
    Some(buffer)
}
