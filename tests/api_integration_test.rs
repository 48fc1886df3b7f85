use std::net::IpAddr;
use std::process::Command;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rsubbrute::{
    brute_force_subdomains, BruteConfig, BruteEngine, BruteError, CollectSink, Confirm,
    DomainOutcome, Finding, FixedConfirm, Resolution, Resolve, ResultSink, SkipReason,
    StaticResolver, WordList,
};

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

fn config(domains: &[&str], threads: usize) -> BruteConfig {
    BruteConfig {
        domains: domains.iter().map(|d| d.to_string()).collect(),
        threads,
        ..Default::default()
    }
}

/// 记录所有提问，按前缀决定回答
#[derive(Default)]
struct RecordingConfirm {
    prompts: Mutex<Vec<String>>,
    accept_unresolved: bool,
    accept_wildcard: bool,
}

impl Confirm for RecordingConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if prompt.starts_with("Failed to resolve") {
            self.accept_unresolved
        } else {
            self.accept_wildcard
        }
    }
}

#[tokio::test]
async fn test_single_finding_without_wildcard() {
    let resolver = Arc::new(
        StaticResolver::new()
            .with_record("example.com", &[ip("203.0.113.1")])
            .with_record("www.example.com", &[ip("203.0.113.5")]),
    );
    let sink = Arc::new(CollectSink::new());
    let confirm = Arc::new(RecordingConfirm::default());
    let engine = BruteEngine::with_parts(
        config(&["example.com"], 1024),
        resolver.clone(),
        confirm.clone(),
        sink.clone(),
    );

    let report = engine.run(&WordList::parse("www mail vpn")).await;

    let findings = sink.findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].host, "www.example.com");
    assert_eq!(findings[0].addrs, Resolution::new(vec![ip("203.0.113.5")]));

    assert!(confirm.prompts.lock().unwrap().is_empty());
    assert_eq!(report.domains[0].outcome, DomainOutcome::Completed);
    assert_eq!(report.domains[0].attempted, 3);
    assert!(report.domains[0].wildcard.is_empty());
    // 3个候选 + 1个泛解析探测
    assert_eq!(resolver.queries_under("example.com"), 4);
}

#[tokio::test]
async fn test_wildcard_domain_filtering() {
    let resolver = Arc::new(
        StaticResolver::new()
            .with_record("wild.example.com", &[ip("198.51.100.1")])
            .with_wildcard("wild.example.com", &[ip("198.51.100.9")])
            .with_record(
                "api.wild.example.com",
                &[ip("198.51.100.9"), ip("198.51.100.10")],
            )
            .with_record("legacy.wild.example.com", &[ip("192.0.2.1")]),
    );
    let sink = Arc::new(CollectSink::new());
    let confirm = Arc::new(RecordingConfirm {
        accept_wildcard: true,
        ..Default::default()
    });
    let engine = BruteEngine::with_parts(
        config(&["wild.example.com"], 8),
        resolver,
        confirm.clone(),
        sink.clone(),
    );

    let report = engine.run(&WordList::parse("api legacy www dev")).await;

    let hosts: Vec<String> = sink.findings().into_iter().map(|f| f.host).collect();
    assert_eq!(hosts, vec!["legacy.wild.example.com"]);

    let prompts = confirm.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].starts_with("Detected wildcard at *.wild.example.com [198.51.100.9]"));

    let domain = &report.domains[0];
    assert_eq!(domain.wildcard, Resolution::new(vec![ip("198.51.100.9")]));
    assert_eq!(domain.attempted, 4);
    assert_eq!(domain.findings, 1);
}

#[tokio::test]
async fn test_unresolved_domain_declined() {
    let resolver = Arc::new(StaticResolver::new());
    let sink = Arc::new(CollectSink::new());
    let confirm = Arc::new(RecordingConfirm::default());
    let engine = BruteEngine::with_parts(
        config(&["gone.example"], 16),
        resolver.clone(),
        confirm.clone(),
        sink.clone(),
    );

    let report = engine.run(&WordList::parse("www mail vpn")).await;

    assert_eq!(
        report.domains[0].outcome,
        DomainOutcome::Skipped(SkipReason::Unresolved)
    );
    assert_eq!(report.domains[0].attempted, 0);
    assert_eq!(resolver.queries_under("gone.example"), 0);
    assert_eq!(resolver.total_queries(), 1);
    assert!(sink.is_empty());
    assert_eq!(
        confirm.prompts.lock().unwrap()[0],
        "Failed to resolve gone.example. Continue brute force on this domain?"
    );
}

#[tokio::test]
async fn test_unresolved_domain_accepted() {
    let resolver = Arc::new(StaticResolver::new().with_record("vpn.hidden.example", &[ip("192.0.2.7")]));
    let sink = Arc::new(CollectSink::new());
    let engine = BruteEngine::with_parts(
        config(&["hidden.example"], 2),
        resolver.clone(),
        Arc::new(FixedConfirm(true)),
        sink.clone(),
    );

    let report = engine.run(&WordList::parse("www mail vpn")).await;

    assert_eq!(report.domains[0].outcome, DomainOutcome::Completed);
    assert_eq!(sink.len(), 1);
    assert_eq!(resolver.queries_under("hidden.example"), 4);
}

#[tokio::test]
async fn test_wildcard_declined_skips_brute_force() {
    let resolver = Arc::new(
        StaticResolver::new()
            .with_record("wild.example.com", &[ip("198.51.100.1")])
            .with_wildcard("wild.example.com", &[ip("198.51.100.9")]),
    );
    let sink = Arc::new(CollectSink::new());
    let engine = BruteEngine::with_parts(
        config(&["wild.example.com"], 4),
        resolver.clone(),
        Arc::new(FixedConfirm(false)),
        sink.clone(),
    );

    let report = engine.run(&WordList::parse("www mail vpn")).await;

    assert_eq!(
        report.domains[0].outcome,
        DomainOutcome::Skipped(SkipReason::Wildcard)
    );
    assert!(!report.domains[0].wildcard.is_empty());
    // 只有泛解析探测
    assert_eq!(resolver.queries_under("wild.example.com"), 1);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_skip_continues_with_next_domain() {
    let resolver = Arc::new(
        StaticResolver::new()
            .with_record("b.example", &[ip("192.0.2.2")])
            .with_record("www.b.example", &[ip("192.0.2.3")]),
    );
    let sink = Arc::new(CollectSink::new());
    let engine = BruteEngine::with_parts(
        config(&["a.example", "b.example"], 4),
        resolver,
        Arc::new(RecordingConfirm::default()),
        sink.clone(),
    );

    let report = engine.run(&WordList::parse("www")).await;

    assert_eq!(report.domains.len(), 2);
    assert_eq!(
        report.domains[0].outcome,
        DomainOutcome::Skipped(SkipReason::Unresolved)
    );
    assert_eq!(report.domains[1].outcome, DomainOutcome::Completed);
    assert_eq!(sink.findings()[0].host, "www.b.example");
}

/// 按主机名长度延迟应答，除泛解析探测外都能解析
struct SlowResolver;

#[async_trait]
impl Resolve for SlowResolver {
    async fn resolve(&self, host: &str) -> Resolution {
        let millis = (host.len() % 7) as u64;
        tokio::time::sleep(Duration::from_millis(millis)).await;
        if host.split('.').next().map(|l| l.len() == 32).unwrap_or(false) {
            return Resolution::empty();
        }
        Resolution::new(vec!["192.0.2.1".parse().unwrap()])
    }
}

/// 按到达顺序记录结果所属的域名
#[derive(Default)]
struct OrderSink {
    domains: Mutex<Vec<String>>,
}

impl ResultSink for OrderSink {
    fn emit(&self, finding: &Finding) {
        self.domains.lock().unwrap().push(finding.domain.clone());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pool_is_barrier_between_domains() {
    let words: WordList = (0..200).map(|i| format!("host{}", i)).collect();
    let sink = Arc::new(OrderSink::default());
    let engine = BruteEngine::with_parts(
        config(&["one.example", "two.example", "three.example"], 32),
        Arc::new(SlowResolver),
        Arc::new(FixedConfirm(true)),
        sink.clone(),
    );

    let report = engine.run(&words).await;

    let order = sink.domains.lock().unwrap();
    assert_eq!(order.len(), 600);
    assert!(order[..200].iter().all(|d| d == "one.example"));
    assert!(order[200..400].iter().all(|d| d == "two.example"));
    assert!(order[400..].iter().all(|d| d == "three.example"));
    assert_eq!(report.total_attempted(), 600);
    assert_eq!(report.total_findings(), 600);
}

#[tokio::test]
async fn test_empty_wordlist() {
    let resolver = Arc::new(StaticResolver::new().with_record("example.com", &[ip("203.0.113.1")]));
    let sink = Arc::new(CollectSink::new());
    let engine = BruteEngine::with_parts(
        config(&["example.com"], 1024),
        resolver.clone(),
        Arc::new(FixedConfirm(true)),
        sink.clone(),
    );

    let report = engine.run(&WordList::default()).await;

    assert_eq!(report.domains[0].outcome, DomainOutcome::Completed);
    assert_eq!(report.domains[0].attempted, 0);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_missing_wordlist_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");

    match brute_force_subdomains(vec!["example.com".to_string()], missing.to_str().unwrap()).await {
        Err(BruteError::Wordlist { .. }) => {}
        other => panic!("unexpected result: {:?}", other.map(|f| f.len())),
    }
}

#[test]
fn test_binary_exits_on_missing_wordlist() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");

    let output = Command::new(env!("CARGO_BIN_EXE_rsubbrute"))
        .args(["-y", "-w", missing.to_str().unwrap(), "example.com"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_default_config() {
    let config = BruteConfig::default();

    assert!(config.domains.is_empty());
    assert_eq!(config.threads, 1024);
    assert!(!config.autoconfirm);
    assert!(config.resolvers.is_empty());
}
