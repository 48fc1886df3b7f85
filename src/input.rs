use clap::Parser;

use crate::api::BruteConfig;
use crate::pool::DEFAULT_WORKERS;

/// 输出格式枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Txt,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "txt" => Ok(OutputFormat::Txt),
            _ => Err(format!("不支持的输出格式: {}。支持的格式: json, csv, txt", s)),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "rsubbrute")]
#[command(version)]
#[command(about = "Brute-force subdomains of the given domains with a wordlist", long_about = None, arg_required_else_help = true)]
pub struct Opts {
    /// domains to scan, processed in order
    #[arg(value_name = "DOMAIN")]
    pub domains: Vec<String>,

    /// wordlist of subdomains to attempt
    #[arg(short, long)]
    pub wordlist: String,

    /// maximum number of concurrent DNS queries
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    pub threads: usize,

    /// automatically answer yes to prompts (wildcard bypass, unresolved domain bypass)
    #[arg(short = 'y', long = "yes")]
    pub autoconfirm: bool,

    /// dns servers to query, use system configuration on default
    #[arg(short, long)]
    pub resolvers: Vec<String>,

    /// only print warnings and findings
    #[arg(short, long)]
    pub silent: bool,

    /// output file path
    #[arg(short, long)]
    pub output: Option<String>,

    /// output format (json, csv, txt)
    #[arg(long, default_value = "json")]
    pub format: OutputFormat,

    /// show summary statistics
    #[arg(long)]
    pub summary: bool,
}

impl Opts {
    pub fn brute_config(&self) -> BruteConfig {
        BruteConfig {
            domains: self.domains.clone(),
            threads: self.threads,
            autoconfirm: self.autoconfirm,
            resolvers: self.resolvers.clone(),
        }
    }
}
