//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，并允许环境变量覆盖关键项

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// 数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// 模拟模式：所有数据由本地生成器提供
    #[serde(default = "default_true")]
    pub mock_mode: bool,
    /// 后端 REST 根地址
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 请求后端时携带的 Bearer Token
    #[serde(default)]
    pub auth_token: Option<String>,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// 实时推送配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// WebSocket 地址
    #[serde(default = "default_ws_url")]
    pub url: String,
    /// 最大重连次数
    #[serde(default = "default_max_reconnect")]
    pub max_reconnect_attempts: u32,
    /// 重连间隔（秒），固定不递增
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_secs: u64,
    /// 模拟模式下行情推送间隔（毫秒）
    #[serde(default = "default_stock_interval")]
    pub stock_update_interval_ms: u64,
    /// 模拟模式下市场状态推送间隔（秒）
    #[serde(default = "default_status_interval")]
    pub market_status_interval_secs: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 数据源配置
    #[serde(default)]
    pub data: DataConfig,
    /// 实时推送配置
    #[serde(default)]
    pub realtime: RealtimeConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_true() -> bool { true }
fn default_base_url() -> String { "http://localhost:3001/api/v1".to_string() }
fn default_timeout() -> u64 { 10 }
fn default_ws_url() -> String { "ws://localhost:3001".to_string() }
fn default_max_reconnect() -> u32 { 5 }
fn default_reconnect_delay() -> u64 { 3 }
fn default_stock_interval() -> u64 { 2000 }
fn default_status_interval() -> u64 { 60 }
fn default_log_level() -> String { "info".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            mock_mode: true,
            base_url: default_base_url(),
            auth_token: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl DataConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            url: default_ws_url(),
            max_reconnect_attempts: default_max_reconnect(),
            reconnect_delay_secs: default_reconnect_delay(),
            stock_update_interval_ms: default_stock_interval(),
            market_status_interval_secs: default_status_interval(),
        }
    }
}

impl RealtimeConfig {
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }

    pub fn stock_update_interval(&self) -> Duration {
        Duration::from_millis(self.stock_update_interval_ms)
    }

    pub fn market_status_interval(&self) -> Duration {
        Duration::from_secs(self.market_status_interval_secs)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// 解析布尔型环境变量，无法识别时返回 None
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值；最后应用环境变量覆盖
    pub fn load() -> Self {
        let mut config = Self::load_file();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    fn load_file() -> Self {
        let config_paths = ["config.json", "config/config.json"];

        for path in config_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        log::info!("从 {} 加载配置成功", path);
                        return config;
                    }
                    Err(e) => {
                        log::warn!("加载配置文件 {} 失败: {}", path, e);
                    }
                }
            }
        }

        log::info!("使用默认配置");
        Self::default()
    }

    /// 应用环境变量覆盖：USE_MOCK_DATA、API_BASE、WS_URL
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("USE_MOCK_DATA") {
            match parse_flag(&raw) {
                Some(flag) => self.data.mock_mode = flag,
                None => log::warn!("无法识别 USE_MOCK_DATA={}，保持 {}", raw, self.data.mock_mode),
            }
        }
        if let Some(base) = lookup("API_BASE") {
            self.data.base_url = base;
        }
        if let Some(url) = lookup("WS_URL") {
            self.realtime.url = url;
        }
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
