//! # rsubbrute
//!
//! 基于字典的子域名暴破工具库，带泛解析过滤。
//!
//! ## 工作流程
//!
//! 对每个目标域名依次执行：
//!
//! 1. 解析域名本身，解析失败时询问是否继续；
//! 2. 解析一个32位随机子域名作为泛解析基线，存在泛解析时询问是否继续；
//! 3. 启动固定数量的worker共享同一个字典队列，逐个解析 `词.域名`，
//!    通过过滤的结果立即交给接收端；
//! 4. 全部worker退出后才开始下一个域名。
//!
//! 存在泛解析时，只要候选结果不包含基线中的第一个地址就会上报。
//!
//! ## 快速开始
//!
//! ```rust,no_run
//! use rsubbrute::brute_force_subdomains;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let domains = vec!["example.com".to_string()];
//!     let findings = brute_force_subdomains(domains, "subdomains.txt").await?;
//!
//!     for finding in &findings {
//!         println!("{} {}", finding.host, finding.addrs);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## 自定义组件
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rsubbrute::{BruteConfig, BruteEngine, CollectSink, DnsResolver, FixedConfirm, WordList};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BruteConfig {
//!         domains: vec!["example.com".to_string()],
//!         threads: 256,
//!         ..Default::default()
//!     };
//!     let sink = Arc::new(CollectSink::new());
//!     let engine = BruteEngine::with_parts(
//!         config,
//!         Arc::new(DnsResolver::new(&[])?),
//!         Arc::new(FixedConfirm(true)),
//!         sink.clone(),
//!     );
//!
//!     let report = engine.run(&WordList::load("subdomains.txt")?).await;
//!     println!("查询 {} 个，发现 {} 个", report.total_attempted(), sink.len());
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod candidate;
pub mod confirm;
pub mod dns_resolver;
pub mod error;
pub mod filter;
pub mod handle;
pub mod input;
pub mod logger;
pub mod output;
pub mod pool;
pub mod wildcard;
pub mod wordlist;

// 重新导出主要的公共API
pub use api::{
    brute_force_subdomains, BruteConfig, BruteEngine, DomainOutcome, DomainReport, ScanReport,
    SkipReason,
};

pub use candidate::{Candidate, CandidateSource};
pub use confirm::{Confirm, FixedConfirm, StdinConfirm};
pub use dns_resolver::{DnsResolver, Resolution, Resolve, StaticResolver};
pub use error::BruteError;
pub use filter::is_reportable;
pub use handle::{CollectSink, Finding, ResultSink, StdoutSink, SummaryStats, TeeSink};
pub use input::OutputFormat;
pub use output::export_results;
pub use pool::{PoolStats, WorkerPool, DEFAULT_WORKERS};
pub use wordlist::WordList;
