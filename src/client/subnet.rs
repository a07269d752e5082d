// src/client/subnet.rs

//! EDNS 客户端子网规范化。
//!
//! 将用户提供的 IP 或 `IP/前缀` 字符串转换为规范的网络地址形式：
//! - 不带前缀的 IPv4 地址补全为 `/32`，IPv6 地址补全为 `/128`。
//! - 主机位清零，例如 `192.168.1.123/24` -> `192.168.1.0/24`。

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::common::consts::{IPV4_MAX_PREFIX_LENGTH, IPV6_MAX_PREFIX_LENGTH};
use crate::common::error::{DohError, Result};

/// 规范化子网字符串
pub fn fix_subnet(subnet: &str) -> Result<String> {
    let subnet = subnet.trim();
    if subnet.is_empty() {
        return Err(DohError::InvalidSubnet("empty subnet".to_string()));
    }

    let (addr_part, prefix_part) = match subnet.split_once('/') {
        Some((addr, prefix)) => (addr, Some(prefix)),
        None => (subnet, None),
    };

    let address: IpAddr = addr_part
        .parse()
        .map_err(|_| DohError::InvalidSubnet(format!("invalid IP address: {}", subnet)))?;

    let max_prefix = match address {
        IpAddr::V4(_) => IPV4_MAX_PREFIX_LENGTH,
        IpAddr::V6(_) => IPV6_MAX_PREFIX_LENGTH,
    };

    let prefix_length = match prefix_part {
        None => max_prefix,
        Some(prefix) => parse_prefix_length(prefix, max_prefix)
            .ok_or_else(|| DohError::InvalidSubnet(format!("invalid CIDR prefix: {}", subnet)))?,
    };

    let network = match address {
        IpAddr::V4(ipv4) => IpAddr::V4(mask_ipv4(ipv4, prefix_length)),
        IpAddr::V6(ipv6) => IpAddr::V6(mask_ipv6(ipv6, prefix_length)),
    };

    Ok(format!("{}/{}", network, prefix_length))
}

// 只接受纯十进制数字，拒绝 "+24"、" 24" 之类的写法
fn parse_prefix_length(prefix: &str, max_prefix: u8) -> Option<u8> {
    if prefix.is_empty() || prefix.len() > 3 || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse::<u8>().ok().filter(|len| *len <= max_prefix)
}

fn mask_ipv4(ip: Ipv4Addr, prefix_length: u8) -> Ipv4Addr {
    if prefix_length >= IPV4_MAX_PREFIX_LENGTH {
        return ip;
    }
    let mask = if prefix_length == 0 {
        0
    } else {
        !0u32 << (32 - prefix_length)
    };
    Ipv4Addr::from(u32::from(ip) & mask)
}

fn mask_ipv6(ip: Ipv6Addr, prefix_length: u8) -> Ipv6Addr {
    if prefix_length >= IPV6_MAX_PREFIX_LENGTH {
        return ip;
    }
    let mask = if prefix_length == 0 {
        0
    } else {
        !0u128 << (128 - prefix_length)
    };
    Ipv6Addr::from(u128::from(ip) & mask)
}
