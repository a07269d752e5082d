// src/common/consts.rs
//
// 本文件包含项目中使用的所有全局常量

//
// 提供者常量
//

/// 提供者名称
pub const PROVIDER_NAME: &str = "cloudflare";

/// Cloudflare DoH 上游地址
pub const CLOUDFLARE_UPSTREAM_URL: &str = "https://cloudflare-dns.com/dns-query";

/// 包作者
pub const PKG_AUTHOR: &str = "[Li Kexian](https://www.likexian.com/)";

/// 包许可证
pub const PKG_LICENSE: &str = "Licensed under the Apache License 2.0";

/// 返回包版本
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// 返回包作者
pub fn author() -> &'static str {
    PKG_AUTHOR
}

/// 返回包许可证
pub fn license() -> &'static str {
    PKG_LICENSE
}

//
// DoH 请求常量
//

/// DoH JSON 内容类型
pub const CONTENT_TYPE_DNS_JSON: &str = "application/dns-json";

/// 查询参数：域名
pub const PARAM_NAME: &str = "name";

/// 查询参数：记录类型
pub const PARAM_TYPE: &str = "type";

/// 查询参数：EDNS 客户端子网
pub const PARAM_EDNS_CLIENT_SUBNET: &str = "edns_client_subnet";

/// 上游应答成功状态码 (NOERROR)
pub const DOH_STATUS_NOERROR: u32 = 0;

//
// 子网常量
//

/// IPv4 最大前缀长度
pub const IPV4_MAX_PREFIX_LENGTH: u8 = 32;

/// IPv6 最大前缀长度
pub const IPV6_MAX_PREFIX_LENGTH: u8 = 128;

//
// HTTP 客户端常量
//

/// 默认 HTTP 客户端超时时间（秒）
pub const DEFAULT_HTTP_CLIENT_TIMEOUT: u64 = 30;

/// 默认连接池空闲超时时间（秒）
pub const DEFAULT_HTTP_CLIENT_POOL_IDLE_TIMEOUT: u64 = 90;

/// 默认每个主机最大空闲连接数
pub const DEFAULT_HTTP_CLIENT_POOL_MAX_IDLE_CONNECTIONS: u32 = 10;

/// 默认 User-Agent
pub const DEFAULT_HTTP_CLIENT_AGENT: &str = concat!("oxide-cfdoh/", env!("CARGO_PKG_VERSION"));
