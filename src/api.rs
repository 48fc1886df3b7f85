use std::sync::Arc;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::candidate::CandidateSource;
use crate::confirm::{Confirm, StdinConfirm};
use crate::dns_resolver::{DnsResolver, Resolution, Resolve};
use crate::error::Result;
use crate::handle::{CollectSink, Finding, ResultSink, StdoutSink};
use crate::pool::{WorkerPool, DEFAULT_WORKERS};
use crate::wildcard;
use crate::wordlist::WordList;

/// 域名暴破配置
#[derive(Debug, Clone)]
pub struct BruteConfig {
    /// 目标域名列表，按顺序逐个扫描
    pub domains: Vec<String>,
    /// 并发worker数量
    pub threads: usize,
    /// 自动回答所有确认提示
    pub autoconfirm: bool,
    /// DNS服务器列表，为空时使用系统配置
    pub resolvers: Vec<String>,
}

impl Default for BruteConfig {
    fn default() -> Self {
        BruteConfig {
            domains: Vec::new(),
            threads: DEFAULT_WORKERS,
            autoconfirm: false,
            resolvers: Vec::new(),
        }
    }
}

/// 跳过域名的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// 目标域名本身无法解析
    Unresolved,
    /// 检测到泛解析
    Wildcard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum DomainOutcome {
    Completed,
    Skipped(SkipReason),
}

/// 单个域名的扫描结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainReport {
    pub domain: String,
    pub outcome: DomainOutcome,
    /// 泛解析基线，未探测时为空
    pub wildcard: Resolution,
    pub attempted: usize,
    pub findings: usize,
}

impl DomainReport {
    fn skipped(domain: &str, reason: SkipReason, wildcard: Resolution) -> Self {
        DomainReport {
            domain: domain.to_string(),
            outcome: DomainOutcome::Skipped(reason),
            wildcard,
            attempted: 0,
            findings: 0,
        }
    }
}

/// 整次运行的扫描结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub domains: Vec<DomainReport>,
}

impl ScanReport {
    pub fn total_attempted(&self) -> usize {
        self.domains.iter().map(|d| d.attempted).sum()
    }

    pub fn total_findings(&self) -> usize {
        self.domains.iter().map(|d| d.findings).sum()
    }
}

/// 域名暴破引擎
pub struct BruteEngine {
    config: BruteConfig,
    resolver: Arc<dyn Resolve>,
    confirm: Arc<dyn Confirm>,
    sink: Arc<dyn ResultSink>,
}

impl BruteEngine {
    /// 使用系统DNS配置、标准输入确认和标准输出创建引擎
    pub fn new(config: BruteConfig) -> Result<Self> {
        let resolver = Arc::new(DnsResolver::new(&config.resolvers)?);
        let confirm = Arc::new(StdinConfirm::new(config.autoconfirm));
        Ok(Self::with_parts(config, resolver, confirm, Arc::new(StdoutSink)))
    }

    pub fn with_parts(
        config: BruteConfig,
        resolver: Arc<dyn Resolve>,
        confirm: Arc<dyn Confirm>,
        sink: Arc<dyn ResultSink>,
    ) -> Self {
        BruteEngine {
            config,
            resolver,
            confirm,
            sink,
        }
    }

    pub fn config(&self) -> &BruteConfig {
        &self.config
    }

    /// 按顺序扫描所有目标域名
    pub async fn run(&self, words: &WordList) -> ScanReport {
        let mut report = ScanReport::default();
        for domain in &self.config.domains {
            report.domains.push(self.scan_domain(domain, words).await);
        }
        report
    }

    /// 扫描单个域名，返回时该域名的所有结果都已经交给接收端
    pub async fn scan_domain(&self, domain: &str, words: &WordList) -> DomainReport {
        info!("开始扫描: {}", domain);

        if self.resolver.resolve(domain).await.is_empty() {
            let prompt = format!(
                "Failed to resolve {}. Continue brute force on this domain?",
                domain
            );
            if !self.ask(prompt).await {
                warn!("跳过无法解析的域名: {}", domain);
                return DomainReport::skipped(domain, SkipReason::Unresolved, Resolution::empty());
            }
        }

        let baseline = wildcard::probe(self.resolver.as_ref(), domain).await;
        if !baseline.is_empty() {
            info!("检测到泛解析: *.{} {}", domain, baseline);
            let prompt = format!(
                "Detected wildcard at *.{} {}. Continue brute force on this domain?",
                domain, baseline
            );
            if !self.ask(prompt).await {
                warn!("跳过泛解析域名: {}", domain);
                return DomainReport::skipped(domain, SkipReason::Wildcard, baseline);
            }
        }

        let pool = WorkerPool::new(self.config.threads, self.resolver.clone(), self.sink.clone());
        let stats = pool
            .run(CandidateSource::new(words.clone(), domain), baseline.clone())
            .await;

        info!(
            "{} 扫描完成: 查询 {} 个，发现 {} 个",
            domain, stats.attempted, stats.findings
        );
        DomainReport {
            domain: domain.to_string(),
            outcome: DomainOutcome::Completed,
            wildcard: baseline,
            attempted: stats.attempted,
            findings: stats.findings,
        }
    }

    async fn ask(&self, prompt: String) -> bool {
        let confirm = self.confirm.clone();
        match tokio::task::spawn_blocking(move || confirm.confirm(&prompt)).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("确认任务异常: {}", e);
                false
            }
        }
    }
}

/// 便捷的域名暴破函数，自动确认所有提示并返回全部结果
pub async fn brute_force_subdomains(
    domains: Vec<String>,
    wordlist_path: &str,
) -> Result<Vec<Finding>> {
    let words = WordList::load(wordlist_path)?;
    let config = BruteConfig {
        domains,
        autoconfirm: true,
        ..Default::default()
    };

    let resolver = Arc::new(DnsResolver::new(&config.resolvers)?);
    let confirm = Arc::new(StdinConfirm::new(true));
    let sink = Arc::new(CollectSink::new());
    let engine = BruteEngine::with_parts(config, resolver, confirm, sink.clone());
    engine.run(&words).await;
    Ok(sink.findings())
}
