use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};
use std::net::IpAddr;
use std::sync::{Arc, Mutex};

use colored::*;
use serde::{Deserialize, Serialize};

use crate::dns_resolver::Resolution;

/// 发现的子域名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// 完整主机名
    pub host: String,
    /// 所属目标域名
    pub domain: String,
    pub addrs: Resolution,
    pub timestamp: u64,
}

impl Finding {
    pub fn new(host: String, domain: &str, addrs: Resolution) -> Self {
        Finding {
            host,
            domain: domain.to_string(),
            addrs,
            timestamp: chrono::Utc::now().timestamp() as u64,
        }
    }
}

/// 结果接收端，多个worker会并发调用
pub trait ResultSink: Send + Sync {
    fn emit(&self, finding: &Finding);
}

/// 按行输出到标准输出: `host [ip ip]`
#[derive(Debug, Default)]
pub struct StdoutSink;

impl ResultSink for StdoutSink {
    fn emit(&self, finding: &Finding) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let _ = writeln!(out, "{} {}", finding.host.green(), finding.addrs);
    }
}

/// 收集所有结果，供导出和统计使用
#[derive(Debug, Default)]
pub struct CollectSink {
    findings: Mutex<Vec<Finding>>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn findings(&self) -> Vec<Finding> {
        match self.findings.lock() {
            Ok(findings) => findings.clone(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.findings.lock().map(|f| f.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultSink for CollectSink {
    fn emit(&self, finding: &Finding) {
        if let Ok(mut findings) = self.findings.lock() {
            findings.push(finding.clone());
        }
    }
}

/// 同时写入多个接收端
#[derive(Default)]
pub struct TeeSink {
    sinks: Vec<Arc<dyn ResultSink>>,
}

impl TeeSink {
    pub fn new(sinks: Vec<Arc<dyn ResultSink>>) -> Self {
        TeeSink { sinks }
    }
}

impl ResultSink for TeeSink {
    fn emit(&self, finding: &Finding) {
        for sink in &self.sinks {
            sink.emit(finding);
        }
    }
}

/// 汇总统计信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_findings: usize,
    pub unique_ips: BTreeSet<IpAddr>,
    pub findings_per_domain: BTreeMap<String, usize>,
}

impl SummaryStats {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut stats = SummaryStats {
            total_findings: findings.len(),
            ..Default::default()
        };
        for finding in findings {
            stats.unique_ips.extend(finding.addrs.addrs().iter().copied());
            *stats
                .findings_per_domain
                .entry(finding.domain.clone())
                .or_insert(0) += 1;
        }
        stats
    }
}

/// 打印汇总统计
pub fn print_summary(summary: &SummaryStats) {
    println!("\n{}", "=".repeat(60));
    println!("{}", "                    汇总统计".bold());
    println!("{}", "=".repeat(60));

    println!("发现子域名总数: {}", summary.total_findings);
    println!("唯一IP数量: {}", summary.unique_ips.len());

    println!("\n各域名发现数量:");
    for (domain, count) in &summary.findings_per_domain {
        println!("  {}: {}", domain, count);
    }

    if !summary.unique_ips.is_empty() {
        println!("\n发现的IP地址 (前20个):");
        for ip in summary.unique_ips.iter().take(20) {
            println!("  {}", ip);
        }
        if summary.unique_ips.len() > 20 {
            println!("  ... 还有 {} 个IP", summary.unique_ips.len() - 20);
        }
    }

    println!("{}", "=".repeat(60));
}
