// src/client/transport.rs

/// 该模块定义 DoH 提供者与 HTTP 传输层之间的接口。
///
/// 提供者只依赖 `HttpTransport`：给定 URL、查询参数、上下文和额外 Header 发起 GET，
/// 返回一个可读取完整响应体的 `TransportResponse`。响应资源在 `TransportResponse`
/// 被 drop 时释放，因此任何返回路径都只会释放一次。

use std::collections::BTreeMap;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client};
use tracing::{debug, trace};
use url::Url;

use crate::client::config::HttpClientConfig;
use crate::client::context::QueryContext;
use crate::common::error::{DohError, Result};

/// 查询参数 (键有序，便于断言和日志)
pub type QueryParams = BTreeMap<String, String>;

/// 额外的请求 Header
pub type Headers = BTreeMap<String, String>;

/// HTTP 传输层
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// 发起 GET 请求，非 2xx 状态码和网络错误均以 `Err` 返回
    async fn get(
        &self,
        url: &str,
        params: &QueryParams,
        ctx: &QueryContext,
        headers: &Headers,
    ) -> Result<Box<dyn TransportResponse>>;
}

/// 传输层响应，drop 即释放底层资源
#[async_trait]
pub trait TransportResponse: Send {
    /// 读取完整响应体
    async fn bytes(&mut self) -> Result<Bytes>;
}

/// 基于 reqwest 的默认传输层
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// 按配置创建 HTTP 客户端
    pub fn new(config: &HttpClientConfig) -> Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .timeout(config.timeout())
            .pool_idle_timeout(config.pool_idle_timeout())
            .user_agent(&config.request.user_agent)
            .pool_max_idle_per_host(config.pool.max_idle_connections as usize)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        params: &QueryParams,
        ctx: &QueryContext,
        headers: &Headers,
    ) -> Result<Box<dyn TransportResponse>> {
        let url = Url::parse_with_params(url, params.iter())
            .map_err(|e| DohError::Transport(format!("Invalid upstream URL: {}", e)))?;
        trace!(url = %url, "Sending DoH GET request");

        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        // 请求本身也受上下文约束，取消时 reqwest 的 future 被 drop，连接随之关闭
        let response = ctx
            .run(async { request.send().await.map_err(DohError::from) })
            .await?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
            debug!(status = status.as_u16(), "DoH server returned error status");
            return Err(DohError::HttpStatus(status.as_u16(), reason));
        }

        trace!(
            content_type = ?response.headers().get(header::CONTENT_TYPE),
            "DoH response received"
        );

        Ok(Box::new(ReqwestResponse { inner: Some(response) }))
    }
}

// reqwest 响应包装，读取后即交还连接
struct ReqwestResponse {
    inner: Option<reqwest::Response>,
}

#[async_trait]
impl TransportResponse for ReqwestResponse {
    async fn bytes(&mut self) -> Result<Bytes> {
        let response = self
            .inner
            .take()
            .ok_or_else(|| DohError::Transport("Response body already consumed".to_string()))?;
        Ok(response.bytes().await?)
    }
}
