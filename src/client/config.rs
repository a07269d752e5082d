// src/client/config.rs

use std::fs;
use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::common::consts::{
    DEFAULT_HTTP_CLIENT_AGENT, DEFAULT_HTTP_CLIENT_POOL_IDLE_TIMEOUT,
    DEFAULT_HTTP_CLIENT_POOL_MAX_IDLE_CONNECTIONS, DEFAULT_HTTP_CLIENT_TIMEOUT,
};
use crate::common::error::{DohError, Result};

// HTTP 客户端配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    // HTTP 客户端超时时间（秒）
    #[serde(default = "default_http_client_timeout")]
    pub timeout: u64,

    // 连接池配置
    #[serde(default)]
    pub pool: PoolConfig,

    // HTTP 请求相关配置
    #[serde(default)]
    pub request: RequestConfig,
}

// 连接池配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    // 连接池空闲超时时间（秒）
    #[serde(default = "default_http_client_pool_idle_timeout")]
    pub idle_timeout: u64,

    // 连接池最大空闲连接数
    #[serde(default = "default_http_client_pool_max_idle_connections")]
    pub max_idle_connections: u32,
}

// HTTP 请求配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestConfig {
    // HTTP 客户端 User-Agent
    #[serde(default = "default_http_client_agent")]
    pub user_agent: String,
}

fn default_http_client_timeout() -> u64 {
    DEFAULT_HTTP_CLIENT_TIMEOUT
}

fn default_http_client_pool_idle_timeout() -> u64 {
    DEFAULT_HTTP_CLIENT_POOL_IDLE_TIMEOUT
}

fn default_http_client_pool_max_idle_connections() -> u32 {
    DEFAULT_HTTP_CLIENT_POOL_MAX_IDLE_CONNECTIONS
}

fn default_http_client_agent() -> String {
    DEFAULT_HTTP_CLIENT_AGENT.to_string()
}

impl HttpClientConfig {
    // 从配置文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .map_err(|e| DohError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml_str(&config_str)
    }

    // 从 YAML 字符串解析配置
    pub fn from_yaml_str(config_str: &str) -> Result<Self> {
        let config: HttpClientConfig = serde_yaml::from_str(config_str)
            .map_err(|e| DohError::Config(format!("Failed to parse config: {}", e)))?;

        config.test()?;

        Ok(config)
    }

    // 验证配置
    pub fn test(&self) -> Result<()> {
        if self.timeout == 0 {
            return Err(DohError::Config("HTTP client timeout must be greater than 0".to_string()));
        }

        if self.request.user_agent.trim().is_empty() {
            return Err(DohError::Config("HTTP client user agent cannot be empty".to_string()));
        }

        Ok(())
    }

    // 获取 HTTP 客户端超时时间
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    // 获取连接池空闲超时时间
    pub fn pool_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.pool.idle_timeout)
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_HTTP_CLIENT_TIMEOUT,
            pool: PoolConfig::default(),
            request: RequestConfig::default(),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            idle_timeout: DEFAULT_HTTP_CLIENT_POOL_IDLE_TIMEOUT,
            max_idle_connections: DEFAULT_HTTP_CLIENT_POOL_MAX_IDLE_CONNECTIONS,
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_HTTP_CLIENT_AGENT.to_string(),
        }
    }
}
