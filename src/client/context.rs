// src/client/context.rs

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::common::error::{DohError, Result};

/// 查询上下文
///
/// 由调用方提供，携带取消令牌和可选截止时间。查询过程中的每个挂起点都会与之竞争，
/// 调用方取消或超时后查询会立即返回 `Cancelled` / `Timeout`。
#[derive(Debug, Clone)]
pub struct QueryContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
    timeout: Option<Duration>,
}

impl QueryContext {
    /// 无超时、不会被取消的上下文
    pub fn background() -> Self {
        Self {
            cancel: CancellationToken::new(),
            deadline: None,
            timeout: None,
        }
    }

    /// 从现在起 `timeout` 后到期
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancel: CancellationToken::new(),
            deadline: Some(Instant::now() + timeout),
            timeout: Some(timeout),
        }
    }

    /// 绑定调用方的取消令牌
    pub fn with_cancel(token: CancellationToken) -> Self {
        Self {
            cancel: token,
            deadline: None,
            timeout: None,
        }
    }

    /// 在当前上下文基础上设置截止时间
    pub fn deadline(mut self, deadline: Instant) -> Self {
        let now = Instant::now();
        self.timeout = Some(deadline.saturating_duration_since(now));
        self.deadline = Some(deadline);
        self
    }

    /// 取消该上下文
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// 是否已取消
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// 距离截止时间的剩余时长
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// 在上下文约束下执行 future
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.cancel.is_cancelled() {
            return Err(DohError::Cancelled);
        }

        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => Err(DohError::Cancelled),
                    _ = tokio::time::sleep_until(deadline) => {
                        Err(DohError::Timeout(self.timeout.unwrap_or_default()))
                    }
                    res = fut => res,
                }
            }
            None => {
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => Err(DohError::Cancelled),
                    res = fut => res,
                }
            }
        }
    }
}

impl Default for QueryContext {
    fn default() -> Self {
        Self::background()
    }
}
