// src/common/error.rs

use std::result;
use std::time::Duration;
use thiserror::Error;

use crate::client::response::Response;

/// DoH 查询错误类型
#[derive(Debug, Error)]
pub enum DohError {
    /// ECS 子网格式错误，未发起网络请求
    #[error("Invalid subnet: {0}")]
    InvalidSubnet(String),

    /// HTTP 请求错误 (例如，网络问题，连接失败)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// 非 reqwest 传输层报告的错误
    #[error("Transport error: {0}")]
    Transport(String),

    /// HTTP 服务器错误
    #[error("HTTP error {0}: {1}")]
    HttpStatus(u16, String),

    /// 查询超时
    #[error("Query timed out after {0:?}")]
    Timeout(Duration),

    /// 调用方取消了查询
    #[error("Query cancelled")]
    Cancelled,

    /// JSON 反序列化错误
    #[error("JSON processing error: {0}")]
    Json(#[from] serde_json::Error),

    /// 上游返回非零状态码，附带已解码的应答
    #[error("doh: failed response code {status}")]
    FailedResponse {
        status: u32,
        response: Box<Response>,
    },

    /// 配置错误
    #[error("Config error: {0}")]
    Config(String),
}

impl DohError {
    /// 上游状态码失败时，借用已解码的应答
    pub fn partial_response(&self) -> Option<&Response> {
        match self {
            DohError::FailedResponse { response, .. } => Some(response),
            _ => None,
        }
    }

    /// 取回已解码的应答
    pub fn into_partial_response(self) -> Option<Response> {
        match self {
            DohError::FailedResponse { response, .. } => Some(*response),
            _ => None,
        }
    }

    /// 是否由超时或取消引起
    pub fn is_cancellation(&self) -> bool {
        matches!(self, DohError::Timeout(_) | DohError::Cancelled)
    }
}

/// 结果类型别名
pub type Result<T> = result::Result<T, DohError>;
