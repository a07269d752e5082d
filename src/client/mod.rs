// src/client/mod.rs

/// 声明 DoH 提供者客户端的公共模块。
pub mod cloudflare;
pub mod config;
pub mod context;
pub mod provider;
pub mod provides;
pub mod response;
pub mod subnet;
pub mod transport;

pub use cloudflare::CloudflareClient;
pub use config::HttpClientConfig;
pub use context::QueryContext;
pub use provider::Provider;
pub use provides::Provides;
pub use response::{Answer, Question, Response};
pub use subnet::fix_subnet;
pub use transport::{Headers, HttpTransport, QueryParams, ReqwestTransport, TransportResponse};
