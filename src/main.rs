use std::process;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};

use rsubbrute::dns_resolver::DnsResolver;
use rsubbrute::handle::{self, CollectSink, ResultSink, StdoutSink, SummaryStats, TeeSink};
use rsubbrute::input::Opts;
use rsubbrute::output::export_results;
use rsubbrute::{logger, BruteEngine, StdinConfirm, WordList};

#[tokio::main]
async fn main() {
    let opts = Opts::parse();
    logger::init_logger(opts.silent);

    // 字典加载失败直接退出，此时还没有任何网络请求
    let words = match WordList::load(&opts.wordlist) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    info!("字典加载完成: {} 个", words.len());

    if let Err(e) = run_subdomain_brute(opts, words).await {
        error!("域名暴破失败: {}", e);
        process::exit(1);
    }
}

/// 执行域名暴破主逻辑
async fn run_subdomain_brute(opts: Opts, words: WordList) -> rsubbrute::error::Result<()> {
    let config = opts.brute_config();
    let resolver = Arc::new(DnsResolver::new(&config.resolvers)?);
    let confirm = Arc::new(StdinConfirm::new(config.autoconfirm));

    let collector = Arc::new(CollectSink::new());
    let sink: Arc<dyn ResultSink> = if opts.output.is_some() || opts.summary {
        Arc::new(TeeSink::new(vec![
            Arc::new(StdoutSink) as Arc<dyn ResultSink>,
            collector.clone() as Arc<dyn ResultSink>,
        ]))
    } else {
        Arc::new(StdoutSink)
    };

    let engine = BruteEngine::with_parts(config, resolver, confirm, sink);
    let report = engine.run(&words).await;
    info!(
        "全部完成: 查询 {} 个，发现 {} 个",
        report.total_attempted(),
        report.total_findings()
    );

    let findings = collector.findings();
    let summary = SummaryStats::from_findings(&findings);

    if opts.summary {
        handle::print_summary(&summary);
    }

    if let Some(output_path) = &opts.output {
        export_results(findings, report, summary, output_path, opts.format)?;
    }

    Ok(())
}
