//! 配置解析 - key=value 文件 + 环境变量覆盖
//!
//! 查找顺序：进程环境变量 > 配置文件 > 硬编码默认值。
//! 配置在进程启动时加载一次，之后只读。

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// 当前目录下的配置文件名
const ENV_FILE: &str = ".env";
/// 用户级配置目录（~/.config 下）
const APP_DIR: &str = "ai-task-notify";

/// 只读配置视图
#[derive(Debug, Clone, Default)]
pub struct Config {
    file: HashMap<String, String>,
}

impl Config {
    /// 加载配置文件。
    ///
    /// 路径优先级：显式指定 > `./.env` > `~/.config/ai-task-notify/.env`。
    /// 文件不存在或不可读时返回空配置，不报错。
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_paths().into_iter().find(|p| p.exists()) {
                Some(p) => p,
                None => return Self::default(),
            },
        };

        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(path = %path.display(), "Loaded config file");
                Self {
                    file: parse_env_file(&content),
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// 从内存表构造（测试用）
    pub fn from_map(map: HashMap<String, String>) -> Self {
        Self { file: map }
    }

    /// 查找配置项：环境变量优先，其次配置文件
    pub fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok().or_else(|| self.file.get(key).cloned())
    }

    /// 带默认值的查找
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// 启用的通知渠道列表（NOTIFY_CHANNELS，逗号分隔，统一小写）
    pub fn enabled_channels(&self) -> Vec<String> {
        self.get_or("NOTIFY_CHANNELS", "")
            .split(',')
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect()
    }
}

/// 解析 key=value 格式的文件内容，跳过空行和 # 注释
fn parse_env_file(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    map
}

fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(ENV_FILE)];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".config").join(APP_DIR).join(ENV_FILE));
    }
    paths
}
