//! 配置模块
//!
//! 支持从 JSON 文件加载配置，API Key 等敏感信息可由环境变量覆盖

use anyhow::{anyhow, bail, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

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

/// 上游数据源配置
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Finnhub API Key
    #[serde(default)]
    pub finnhub_api_key: String,
    #[serde(default = "default_finnhub_base_url")]
    pub finnhub_base_url: String,
    /// Polygon.io API Key
    #[serde(default)]
    pub polygon_api_key: String,
    #[serde(default = "default_polygon_base_url")]
    pub polygon_base_url: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// 计算日期区间所用的时区（IANA 名称）
    #[serde(default = "default_market_timezone")]
    pub market_timezone: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProviderConfig,
}

// 默认值函数
fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }
fn default_finnhub_base_url() -> String { "https://finnhub.io/api/v1".to_string() }
fn default_polygon_base_url() -> String { "https://api.polygon.io".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_connect_timeout() -> u64 { 10 }
fn default_market_timezone() -> String { "America/New_York".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            finnhub_api_key: String::new(),
            finnhub_base_url: default_finnhub_base_url(),
            polygon_api_key: String::new(),
            polygon_base_url: default_polygon_base_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            market_timezone: default_market_timezone(),
        }
    }
}

// API Key 不能出现在日志里
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("finnhub_api_key", &redact(&self.finnhub_api_key))
            .field("finnhub_base_url", &self.finnhub_base_url)
            .field("polygon_api_key", &redact(&self.polygon_api_key))
            .field("polygon_base_url", &self.polygon_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("market_timezone", &self.market_timezone)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "***" }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// 解析时区名称
    pub fn market_tz(&self) -> Result<Tz> {
        self.market_timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("无效的时区 {}: {}", self.market_timezone, e))
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值，最后应用环境变量
    pub fn load() -> Self {
        let mut config = Self::load_file();
        config.apply_overrides(|name| env::var(name).ok());
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

    /// 用环境变量覆盖配置项
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("FINNHUB_API_KEY") {
            self.providers.finnhub_api_key = key;
        }
        if let Some(key) = lookup("POLYGON_API_KEY") {
            self.providers.polygon_api_key = key;
        }
        if let Some(host) = lookup("GATEWAY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("GATEWAY_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => log::warn!("GATEWAY_PORT={} 不是有效端口，忽略", port),
            }
        }
    }

    /// 启动前校验配置
    pub fn validate(&self) -> Result<()> {
        for base in [&self.providers.finnhub_base_url, &self.providers.polygon_base_url] {
            let url = Url::parse(base)?;
            if url.cannot_be_a_base() {
                bail!("无效的上游地址: {}", base);
            }
        }
        self.providers.market_tz()?;

        if self.providers.finnhub_api_key.is_empty() {
            log::warn!("未设置 FINNHUB_API_KEY，Finnhub 请求将被上游拒绝");
        }
        if self.providers.polygon_api_key.is_empty() {
            log::warn!("未设置 POLYGON_API_KEY，Polygon 请求将被上游拒绝");
        }
        Ok(())
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
