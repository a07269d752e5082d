// src/client/provider.rs

use async_trait::async_trait;

use crate::client::context::QueryContext;
use crate::client::response::Response;
use crate::common::error::Result;

/// DoH 提供者接口
///
/// 聚合层通过该接口在多个上游之间切换，每个实现对应一个 DoH 服务。
#[async_trait]
pub trait Provider: Send + Sync {
    /// 提供者名称
    fn name(&self) -> &str;

    /// 设置上游变体，不支持的变体由实现自行归并
    fn set_provides(&mut self, provides: u32);

    /// 普通 DNS 查询
    async fn query(&self, ctx: &QueryContext, domain: &str, record_type: &str) -> Result<Response>;

    /// 携带 EDNS 客户端子网的查询，`ecs` 为空表示不携带
    async fn ecs_query(
        &self,
        ctx: &QueryContext,
        domain: &str,
        record_type: &str,
        ecs: &str,
    ) -> Result<Response>;
}
