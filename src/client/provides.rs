// src/client/provides.rs

use std::fmt;
use tracing::debug;

use crate::common::consts::CLOUDFLARE_UPSTREAM_URL;

/// 上游变体选择
///
/// Cloudflare 只对外提供一个 JSON 端点，因此只有 `Default` 一个变体。
/// 任何其他选择都会被归并到 `Default`，而不是报错。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provides {
    #[default]
    Default,
}

// 变体 -> 上游 URL
const UPSTREAMS: &[(Provides, &str)] = &[(Provides::Default, CLOUDFLARE_UPSTREAM_URL)];

impl Provides {
    /// 按索引选择变体，越界索引归并到 `Default`
    pub fn from_index(index: u32) -> Self {
        if index != 0 {
            debug!(index, "Unsupported provides index, coerced to default");
        }
        Provides::Default
    }

    /// 变体对应的索引
    pub fn index(self) -> u32 {
        match self {
            Provides::Default => 0,
        }
    }

    /// 变体对应的上游 URL
    pub fn upstream(self) -> &'static str {
        UPSTREAMS
            .iter()
            .find(|(p, _)| *p == self)
            .map(|(_, url)| *url)
            .unwrap_or(CLOUDFLARE_UPSTREAM_URL)
    }
}

impl From<u32> for Provides {
    fn from(index: u32) -> Self {
        Provides::from_index(index)
    }
}

impl fmt::Display for Provides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provides::Default => write!(f, "default"),
        }
    }
}
