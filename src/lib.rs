// src/lib.rs

//! Cloudflare DNS over HTTPS (DoH) 提供者客户端。
//!
//! 把 DNS 问题 (域名、记录类型、可选 ECS 子网) 转换为 Cloudflare JSON API 的 GET 请求，
//! 并将上游 JSON 应答校验、解码为 `Response`。

pub mod client;
pub mod common;

pub use client::{CloudflareClient, Provider, Provides, QueryContext, Response};
pub use common::error::{DohError, Result};
