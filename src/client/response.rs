// src/client/response.rs

/// 该模块定义 DoH JSON 应答 (`application/dns-json`) 的结构。
///
/// 字段名与上游 JSON 保持一致 (`Status`、`Answer` 等)，未知字段原样保存在 `extra` 中，
/// 便于聚合层透传。缺失或为 null 的字段按零值处理，缺少 `Status` 视为 0。

use std::collections::BTreeMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::common::consts::DOH_STATUS_NOERROR;
use crate::common::error::Result;

/// DoH JSON 应答
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    /// 应答状态 (0 = NOERROR)
    #[serde(rename = "Status", default, deserialize_with = "null_as_default")]
    pub status: u32,
    /// 是否截断
    #[serde(rename = "TC", default)]
    pub truncated: bool,
    /// 是否期望递归
    #[serde(rename = "RD", default)]
    pub recursion_desired: bool,
    /// 是否递归可用
    #[serde(rename = "RA", default)]
    pub recursion_available: bool,
    /// 是否通过 DNSSEC 验证
    #[serde(rename = "AD", default)]
    pub authentic_data: bool,
    /// 是否禁用验证
    #[serde(rename = "CD", default)]
    pub checking_disabled: bool,
    /// 问题部分
    #[serde(rename = "Question", default)]
    pub question: Vec<Question>,
    /// 应答部分
    #[serde(rename = "Answer", default, skip_serializing_if = "Vec::is_empty")]
    pub answer: Vec<Answer>,
    /// 权威部分
    #[serde(rename = "Authority", default, skip_serializing_if = "Vec::is_empty")]
    pub authority: Vec<Answer>,
    /// 附加部分
    #[serde(rename = "Additional", default, skip_serializing_if = "Vec::is_empty")]
    pub additional: Vec<Answer>,
    /// 上游回显的 ECS 子网
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edns_client_subnet: Option<String>,
    /// 注释，不同上游可能是字符串或数组
    #[serde(rename = "Comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Value>,
    /// 其余未建模字段
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// 问题记录
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Question {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub record_type: u16,
}

/// 资源记录
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub record_type: u16,
    #[serde(rename = "TTL", default, deserialize_with = "null_as_default")]
    pub ttl: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: String,
}

// null 按零值处理
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Response {
    /// 从 JSON 字节解码
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// 上游状态码是否为 NOERROR
    pub fn is_success(&self) -> bool {
        self.status == DOH_STATUS_NOERROR
    }
}
