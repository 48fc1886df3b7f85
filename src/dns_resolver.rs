use std::collections::HashMap;
use std::fmt;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use log::warn;
use serde::{Deserialize, Serialize};
use trust_dns_resolver::config::*;
use trust_dns_resolver::system_conf::read_system_conf;
use trust_dns_resolver::TokioAsyncResolver;

use crate::error::{BruteError, Result};

/// 一次地址解析的结果
///
/// 空结果表示“无法解析”，NXDOMAIN、超时、网络错误都归为这一类。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resolution(Vec<IpAddr>);

impl Resolution {
    pub fn new(addrs: Vec<IpAddr>) -> Self {
        Resolution(addrs)
    }

    pub fn empty() -> Self {
        Resolution(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Option<&IpAddr> {
        self.0.first()
    }

    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.0.contains(ip)
    }

    pub fn addrs(&self) -> &[IpAddr] {
        &self.0
    }
}

impl From<Vec<IpAddr>> for Resolution {
    fn from(addrs: Vec<IpAddr>) -> Self {
        Resolution(addrs)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, ip) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", ip)?;
        }
        write!(f, "]")
    }
}

/// 主机名到IP地址的解析
///
/// 实现方不得向调用方返回错误，所有失败都折叠为空结果。
#[async_trait]
pub trait Resolve: Send + Sync {
    async fn resolve(&self, host: &str) -> Resolution;
}

/// 基于trust-dns的解析器
#[derive(Clone)]
pub struct DnsResolver {
    resolver: TokioAsyncResolver,
}

impl DnsResolver {
    /// 创建解析器
    ///
    /// 未指定DNS服务器时读取系统配置，系统配置不可用时退回默认配置。
    pub fn new(nameservers: &[String]) -> Result<Self> {
        let (config, opts) = resolver_parts(nameservers)?;
        Ok(Self::with_config(config, opts))
    }

    /// 使用给定配置创建解析器，A和AAAA记录总是同时查询
    pub fn with_config(config: ResolverConfig, opts: ResolverOpts) -> Self {
        DnsResolver {
            resolver: TokioAsyncResolver::tokio(config, dual_stack(opts)),
        }
    }
}

fn resolver_parts(nameservers: &[String]) -> Result<(ResolverConfig, ResolverOpts)> {
    if nameservers.is_empty() {
        return Ok(match read_system_conf() {
            Ok((config, opts)) => (config, dual_stack(opts)),
            Err(e) => {
                warn!("读取系统DNS配置失败，使用默认配置: {}", e);
                (ResolverConfig::default(), dual_stack(ResolverOpts::default()))
            }
        });
    }

    let ips = parse_nameservers(nameservers)?;
    let group = NameServerConfigGroup::from_ips_clear(&ips, 53, true);
    let config = ResolverConfig::from_parts(None, vec![], group);
    Ok((config, dual_stack(ResolverOpts::default())))
}

// 默认策略是Ipv4thenIpv6，有A记录时会丢掉AAAA
fn dual_stack(mut opts: ResolverOpts) -> ResolverOpts {
    opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
    opts
}

#[async_trait]
impl Resolve for DnsResolver {
    async fn resolve(&self, host: &str) -> Resolution {
        match self.resolver.lookup_ip(host).await {
            Ok(response) => response.iter().collect::<Vec<_>>().into(),
            Err(_) => Resolution::empty(),
        }
    }
}

fn parse_nameservers(nameservers: &[String]) -> Result<Vec<IpAddr>> {
    nameservers
        .iter()
        .map(|s| {
            s.trim()
                .parse::<IpAddr>()
                .map_err(|_| BruteError::InvalidNameserver(s.clone()))
        })
        .collect()
}

/// 内存中的静态解析器，按预设表应答并记录每个主机名的查询次数
#[doc(hidden)]
#[derive(Debug, Default)]
pub struct StaticResolver {
    records: HashMap<String, Vec<IpAddr>>,
    wildcard: Option<(String, Vec<IpAddr>)>,
    queries: std::sync::Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加一条记录
    pub fn with_record(mut self, host: &str, addrs: &[IpAddr]) -> Self {
        self.records.insert(host.to_string(), addrs.to_vec());
        self
    }

    /// 让`domain`下所有未登记的子域名都解析到`addrs`
    pub fn with_wildcard(mut self, domain: &str, addrs: &[IpAddr]) -> Self {
        self.wildcard = Some((domain.to_string(), addrs.to_vec()));
        self
    }

    pub fn total_queries(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn queries_for(&self, host: &str) -> usize {
        self.queries
            .lock()
            .map(|q| q.get(host).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// 以`.suffix`结尾的主机名被查询的总次数
    pub fn queries_under(&self, suffix: &str) -> usize {
        let suffix = format!(".{}", suffix);
        self.queries
            .lock()
            .map(|q| {
                q.iter()
                    .filter(|(host, _)| host.ends_with(&suffix))
                    .map(|(_, n)| *n)
                    .sum()
            })
            .unwrap_or(0)
    }
}

#[async_trait]
impl Resolve for StaticResolver {
    async fn resolve(&self, host: &str) -> Resolution {
        self.total.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.queries.lock() {
            *queries.entry(host.to_string()).or_insert(0) += 1;
        }

        if let Some(addrs) = self.records.get(host) {
            return addrs.clone().into();
        }
        if let Some((domain, addrs)) = &self.wildcard {
            if host.ends_with(&format!(".{}", domain)) {
                return addrs.clone().into();
            }
        }
        Resolution::empty()
    }
}
