use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, error};
use tokio::task::JoinSet;

use crate::candidate::CandidateSource;
use crate::dns_resolver::{Resolution, Resolve};
use crate::filter::is_reportable;
use crate::handle::{Finding, ResultSink};

/// 默认并发worker数量
pub const DEFAULT_WORKERS: usize = 1024;

/// 一次暴破的计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub attempted: usize,
    pub findings: usize,
}

#[derive(Default)]
struct Counters {
    attempted: AtomicUsize,
    findings: AtomicUsize,
}

/// 固定大小的worker池
///
/// 所有worker共享同一个候选队列，每个worker串行解析。`run`在所有worker
/// 都观察到队列耗尽后才返回。
pub struct WorkerPool {
    workers: usize,
    resolver: Arc<dyn Resolve>,
    sink: Arc<dyn ResultSink>,
}

impl WorkerPool {
    /// worker数量为0时按1处理
    pub fn new(workers: usize, resolver: Arc<dyn Resolve>, sink: Arc<dyn ResultSink>) -> Self {
        WorkerPool {
            workers: workers.max(1),
            resolver,
            sink,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub async fn run(&self, source: CandidateSource, baseline: Resolution) -> PoolStats {
        let source = Arc::new(source);
        let baseline = Arc::new(baseline);
        let counters = Arc::new(Counters::default());

        let mut tasks = JoinSet::new();
        for _ in 0..self.workers {
            tasks.spawn(brute(
                source.clone(),
                baseline.clone(),
                self.resolver.clone(),
                self.sink.clone(),
                counters.clone(),
            ));
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!("worker异常退出: {}", e);
            }
        }

        debug!("{} 的worker池已全部退出", source.domain());
        PoolStats {
            attempted: counters.attempted.load(Ordering::SeqCst),
            findings: counters.findings.load(Ordering::SeqCst),
        }
    }
}

async fn brute(
    source: Arc<CandidateSource>,
    baseline: Arc<Resolution>,
    resolver: Arc<dyn Resolve>,
    sink: Arc<dyn ResultSink>,
    counters: Arc<Counters>,
) {
    while let Some(candidate) = source.next_candidate() {
        let result = resolver.resolve(&candidate.host).await;
        counters.attempted.fetch_add(1, Ordering::SeqCst);

        if is_reportable(&result, &baseline) {
            counters.findings.fetch_add(1, Ordering::SeqCst);
            sink.emit(&Finding::new(candidate.host, source.domain(), result));
        }
    }
}
