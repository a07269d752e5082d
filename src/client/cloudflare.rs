// src/client/cloudflare.rs

/// Cloudflare DoH 提供者。
///
/// 主要流程：
/// 1. 以去除首尾空白的域名和记录类型构建 `name` / `type` 查询参数。
/// 2. ECS 非空时先规范化子网，失败则直接返回，不发起网络请求。
/// 3. 携带 `accept: application/dns-json` 向上游发起 GET，整个过程受调用方上下文约束。
/// 4. 读取完整响应体并解码为 `Response`。
/// 5. 上游状态码非 0 时返回 `DohError::FailedResponse`，其中带有已解码的应答。

use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::client::config::HttpClientConfig;
use crate::client::context::QueryContext;
use crate::client::provider::Provider;
use crate::client::provides::Provides;
use crate::client::response::Response;
use crate::client::subnet::fix_subnet;
use crate::client::transport::{Headers, HttpTransport, QueryParams, ReqwestTransport};
use crate::common::consts::{
    CONTENT_TYPE_DNS_JSON, PARAM_EDNS_CLIENT_SUBNET, PARAM_NAME, PARAM_TYPE, PROVIDER_NAME,
};
use crate::common::error::{DohError, Result};

/// Cloudflare DoH 客户端
#[derive(Clone)]
pub struct CloudflareClient {
    provides: Provides,
    transport: Arc<dyn HttpTransport>,
}

impl CloudflareClient {
    /// 使用默认 HTTP 客户端配置创建
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpClientConfig::default())
    }

    /// 使用指定 HTTP 客户端配置创建
    pub fn with_config(config: &HttpClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// 注入自定义传输层
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            provides: Provides::Default,
            transport,
        }
    }

    /// 当前上游变体
    pub fn provides(&self) -> Provides {
        self.provides
    }

    /// 当前上游 URL
    pub fn upstream(&self) -> &'static str {
        self.provides.upstream()
    }

    // 构建查询参数
    fn build_params(domain: &str, record_type: &str, ecs: &str) -> Result<QueryParams> {
        let mut params = QueryParams::new();
        params.insert(PARAM_NAME.to_string(), domain.trim().to_string());
        params.insert(PARAM_TYPE.to_string(), record_type.trim().to_string());

        let ecs = ecs.trim();
        if !ecs.is_empty() {
            let subnet = fix_subnet(ecs)?;
            params.insert(PARAM_EDNS_CLIENT_SUBNET.to_string(), subnet);
        }

        Ok(params)
    }

    async fn send(&self, ctx: &QueryContext, params: &QueryParams) -> Result<Response> {
        let mut headers = Headers::new();
        headers.insert("accept".to_string(), CONTENT_TYPE_DNS_JSON.to_string());

        let upstream = self.upstream();
        let mut rsp = ctx
            .run(self.transport.get(upstream, params, ctx, &headers))
            .await?;

        // 出错时 rsp 随提前返回被 drop；成功读取后显式 drop，尽早交还底层连接
        let body = ctx.run(rsp.bytes()).await?;
        drop(rsp);

        Response::from_slice(&body)
    }
}

#[async_trait]
impl Provider for CloudflareClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn set_provides(&mut self, provides: u32) {
        self.provides = Provides::from_index(provides);
    }

    async fn query(&self, ctx: &QueryContext, domain: &str, record_type: &str) -> Result<Response> {
        self.ecs_query(ctx, domain, record_type, "").await
    }

    async fn ecs_query(
        &self,
        ctx: &QueryContext,
        domain: &str,
        record_type: &str,
        ecs: &str,
    ) -> Result<Response> {
        let params = Self::build_params(domain, record_type, ecs)?;
        let domain = &params[PARAM_NAME];

        debug!(
            provider = PROVIDER_NAME,
            domain = %domain,
            record_type = %record_type.trim(),
            ecs = ?params.get(PARAM_EDNS_CLIENT_SUBNET),
            "Sending DoH query"
        );

        let response = match self.send(ctx, &params).await {
            Ok(response) => response,
            Err(e) => {
                warn!(provider = PROVIDER_NAME, error = %e, "DoH query failed");
                return Err(e);
            }
        };

        if !response.is_success() {
            warn!(
                provider = PROVIDER_NAME,
                status = response.status,
                domain = %domain,
                "DoH upstream returned failure status"
            );
            return Err(DohError::FailedResponse {
                status: response.status,
                response: Box::new(response),
            });
        }

        debug!(
            provider = PROVIDER_NAME,
            answers = response.answer.len(),
            "DoH query successful"
        );

        Ok(response)
    }
}

impl fmt::Display for CloudflareClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PROVIDER_NAME)
    }
}

impl fmt::Debug for CloudflareClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareClient")
            .field("provides", &self.provides)
            .field("upstream", &self.upstream())
            .finish()
    }
}
